use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
  T0,
  T1,
  T2,
  T3,
  T4,
  T5,
  T6,
  A0,
}

impl Register {
  /// The allocatable pool, in the order free registers are handed out.
  pub const SCRATCH: [Register; 7] = [
    Register::T0,
    Register::T1,
    Register::T2,
    Register::T3,
    Register::T4,
    Register::T5,
    Register::T6,
  ];

  pub const RETURN_VALUE: Register = Register::A0;

  pub fn name(self) -> &'static str {
    match self {
      Register::T0 => "t0",
      Register::T1 => "t1",
      Register::T2 => "t2",
      Register::T3 => "t3",
      Register::T4 => "t4",
      Register::T5 => "t5",
      Register::T6 => "t6",
      Register::A0 => "a0",
    }
  }
}

impl fmt::Display for Register {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
}

impl BinaryOp {
  pub fn mnemonic(self) -> &'static str {
    match self {
      BinaryOp::Add => "add",
      BinaryOp::Sub => "sub",
      BinaryOp::Mul => "mul",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
  Li(Register, i32),
  Mv(Register, Register),
  Addi(Register, Register, i32),
  Binary(BinaryOp, Register, Register, Register),
}

/// Range of the signed 12-bit immediate accepted by `addi`.
pub const ADDI_IMM_MIN: i32 = -2048;
pub const ADDI_IMM_MAX: i32 = 2047;

pub fn fits_addi(imm: i32) -> bool {
  (ADDI_IMM_MIN..=ADDI_IMM_MAX).contains(&imm)
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Instruction::Li(dst, imm) => write!(f, "li {}, {}", dst, imm),
      Instruction::Mv(dst, src) => write!(f, "mv {}, {}", dst, src),
      Instruction::Addi(dst, src, imm) => write!(f, "addi {}, {}, {}", dst, src, imm),
      Instruction::Binary(op, dst, lhs, rhs) => {
        write!(f, "{} {}, {}, {}", op.mnemonic(), dst, lhs, rhs)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render() {
    assert_eq!(Instruction::Li(Register::T0, 5).to_string(), "li t0, 5");
    assert_eq!(
      Instruction::Mv(Register::RETURN_VALUE, Register::T3).to_string(),
      "mv a0, t3"
    );
    assert_eq!(
      Instruction::Addi(Register::T1, Register::T0, -3).to_string(),
      "addi t1, t0, -3"
    );
    assert_eq!(
      Instruction::Binary(BinaryOp::Mul, Register::T2, Register::T0, Register::T1).to_string(),
      "mul t2, t0, t1"
    );
  }

  #[test]
  fn test_addi_range() {
    assert!(fits_addi(2047));
    assert!(fits_addi(-2048));
    assert!(!fits_addi(2048));
  }
}
