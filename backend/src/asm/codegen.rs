use crate::asm::assemblyast::Instruction;

pub fn assembly_lines(instructions: &[Instruction]) -> Vec<String> {
  instructions.iter().map(|i| i.to_string()).collect()
}

/// Renders a `.text` section with one tab-indented instruction per line.
pub fn generate_assembly(lines: &[String]) -> String {
  let mut assembly = String::from(".text\n");
  for line in lines {
    assembly.push('\t');
    assembly.push_str(line);
    assembly.push('\n');
  }
  assembly
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::asm::assemblyast::Register;

  #[test]
  fn test_text_section_layout() {
    let lines = assembly_lines(&[
      Instruction::Li(Register::T0, 5),
      Instruction::Mv(Register::A0, Register::T0),
    ]);
    assert_eq!(generate_assembly(&lines), ".text\n\tli t0, 5\n\tmv a0, t0\n");
  }

  #[test]
  fn test_empty_program_is_header_only() {
    assert_eq!(generate_assembly(&[]), ".text\n");
  }
}
