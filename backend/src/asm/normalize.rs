use log::debug;

use super::assemblyast::fits_addi;
use crate::tacky::{BinaryOp, Instruction, TempCounter, Val};

/// Rewrites the IR so every operand the RISC-V templates need in a register
/// is a variable. Returns a new list; the input is left untouched.
///
/// - `ADD/MUL r, imm, var` swap their operands.
/// - an immediate left operand is loaded into a fresh temporary first
///   (`SUB r, imm, var` becomes `MOV t, imm; SUB r, t, var`).
/// - an immediate right operand is loaded the same way, except for `ADD`
///   whose immediate fits `addi`.
pub fn normalize(instructions: &[Instruction]) -> Vec<Instruction> {
  let mut temps = TempCounter::after(instructions);
  let mut replaced_instructions: Vec<Instruction> = Vec::with_capacity(instructions.len());

  for instruction in instructions {
    match instruction {
      Instruction::Binary(op, result, lhs, rhs) => {
        let (lhs, rhs) = match (lhs, rhs) {
          (Val::Imm(_), Val::Var(_)) if op.is_commutative() => (rhs.clone(), lhs.clone()),
          _ => (lhs.clone(), rhs.clone()),
        };

        let lhs = match lhs {
          Val::Imm(n) => {
            let temp = temps.fresh();
            replaced_instructions.push(Instruction::Mov(temp.clone(), Val::Imm(n)));
            Val::Var(temp)
          }
          var => var,
        };

        let rhs = match rhs {
          Val::Imm(n) if *op == BinaryOp::Add && fits_addi(n) => Val::Imm(n),
          Val::Imm(n) => {
            let temp = temps.fresh();
            replaced_instructions.push(Instruction::Mov(temp.clone(), Val::Imm(n)));
            Val::Var(temp)
          }
          var => var,
        };

        replaced_instructions.push(Instruction::Binary(*op, result.clone(), lhs, rhs));
      }
      _ => {
        replaced_instructions.push(instruction.clone());
      }
    }
  }

  debug!(
    "normalized {} IR instructions into {}",
    instructions.len(),
    replaced_instructions.len()
  );
  replaced_instructions
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tacky::Variable;

  fn var(name: &str) -> Val {
    Val::Var(Variable::named(name))
  }

  fn temp(n: usize) -> Variable {
    Variable::Temp(n)
  }

  #[test]
  fn test_add_with_immediate_left_is_commuted() {
    let input = vec![Instruction::Binary(
      BinaryOp::Add,
      temp(1),
      Val::Imm(3),
      var("x"),
    )];
    assert_eq!(
      normalize(&input),
      vec![Instruction::Binary(
        BinaryOp::Add,
        temp(1),
        var("x"),
        Val::Imm(3)
      )]
    );
  }

  #[test]
  fn test_sub_with_immediate_left_gets_one_mov() {
    let input = vec![Instruction::Binary(
      BinaryOp::Sub,
      temp(1),
      Val::Imm(10),
      var("y"),
    )];
    let output = normalize(&input);
    assert_eq!(
      output,
      vec![
        Instruction::Mov(temp(2), Val::Imm(10)),
        Instruction::Binary(BinaryOp::Sub, temp(1), Val::Var(temp(2)), var("y")),
      ]
    );
  }

  #[test]
  fn test_untouched_shapes_are_copied() {
    let input = vec![
      Instruction::Mov(Variable::named("x"), Val::Imm(5)),
      Instruction::Binary(BinaryOp::Add, temp(0), var("x"), Val::Imm(1)),
      Instruction::Binary(BinaryOp::Mul, temp(1), var("x"), Val::Var(temp(0))),
      Instruction::Return(Val::Var(temp(1))),
    ];
    assert_eq!(normalize(&input), input);
  }

  #[test]
  fn test_no_immediate_left_after_normalization() {
    let input = vec![
      Instruction::Binary(BinaryOp::Add, temp(0), Val::Imm(1), Val::Imm(2)),
      Instruction::Binary(BinaryOp::Sub, temp(1), var("a"), Val::Imm(4)),
      Instruction::Binary(BinaryOp::Mul, temp(2), Val::Imm(6), var("a")),
      Instruction::Binary(BinaryOp::Add, temp(3), var("a"), Val::Imm(5000)),
    ];
    let output = normalize(&input);
    for instruction in &output {
      if let Instruction::Binary(op, _, lhs, rhs) = instruction {
        assert!(!lhs.is_imm());
        if *op != BinaryOp::Add {
          assert!(!rhs.is_imm());
        }
      }
    }
    // fresh temporaries start after the highest one in the input
    assert_eq!(output[0], Instruction::Mov(temp(4), Val::Imm(1)));
    assert_eq!(
      output[1],
      Instruction::Binary(BinaryOp::Add, temp(0), Val::Var(temp(4)), Val::Imm(2))
    );
    assert_eq!(output.len(), 4 + 4);
  }
}
