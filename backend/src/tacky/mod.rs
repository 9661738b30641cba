//! Three-address IR shared by the IR generator and the assembly generator.
pub mod generator;

pub use generator::{generate_tac, IrGenerator};

use frontend::grammar::Production;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IrError {
  #[error("symbol stack underflow reducing {production}")]
  StackUnderflow { production: Production },

  #[error("production {production} does not match its grammar rule")]
  ShapeMismatch { production: Production },

  #[error("child {position} of {production} carries no value")]
  MissingValue {
    production: Production,
    position: usize,
  },

  #[error("integer literal `{literal}` does not fit in 32 bits")]
  LiteralOutOfRange { literal: String },

  #[error("assignment target `{value}` is not a variable")]
  NotAVariable { value: Val },

  #[error("instructions requested before the parse was accepted")]
  NotAccepted,

  #[error("parse event received after accept")]
  AlreadyAccepted,
}

/// A named variable is identified by its name, a temporary by its number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
  Named(String),
  Temp(usize),
}

impl Variable {
  pub fn named(name: impl Into<String>) -> Self {
    Variable::Named(name.into())
  }

  pub fn is_temp(&self) -> bool {
    matches!(self, Variable::Temp(_))
  }
}

impl fmt::Display for Variable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Variable::Named(name) => write!(f, "{}", name),
      Variable::Temp(n) => write!(f, "${}", n),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Val {
  Imm(i32),
  Var(Variable),
}

impl Val {
  pub fn as_var(&self) -> Option<&Variable> {
    match self {
      Val::Var(v) => Some(v),
      Val::Imm(_) => None,
    }
  }

  pub fn is_imm(&self) -> bool {
    matches!(self, Val::Imm(_))
  }
}

impl From<Variable> for Val {
  fn from(v: Variable) -> Self {
    Val::Var(v)
  }
}

impl fmt::Display for Val {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Val::Imm(n) => write!(f, "{}", n),
      Val::Var(v) => write!(f, "{}", v),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
}

impl BinaryOp {
  pub fn is_commutative(self) -> bool {
    matches!(self, BinaryOp::Add | BinaryOp::Mul)
  }
}

impl fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BinaryOp::Add => write!(f, "ADD"),
      BinaryOp::Sub => write!(f, "SUB"),
      BinaryOp::Mul => write!(f, "MUL"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
  Mov(Variable, Val),
  Binary(BinaryOp, Variable, Val, Val),
  Return(Val),
}

impl Instruction {
  pub fn result(&self) -> Option<&Variable> {
    match self {
      Instruction::Mov(result, _) | Instruction::Binary(_, result, _, _) => Some(result),
      Instruction::Return(_) => None,
    }
  }

  /// Operands read by the instruction, left to right.
  pub fn sources(&self) -> Vec<&Val> {
    match self {
      Instruction::Mov(_, from) => vec![from],
      Instruction::Binary(_, _, lhs, rhs) => vec![lhs, rhs],
      Instruction::Return(val) => vec![val],
    }
  }
}

impl fmt::Display for Instruction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Instruction::Mov(result, from) => write!(f, "(MOV, {}, {})", result, from),
      Instruction::Binary(op, result, lhs, rhs) => {
        write!(f, "({}, {}, {}, {})", op, result, lhs, rhs)
      }
      Instruction::Return(val) => write!(f, "(RET, {})", val),
    }
  }
}

/// Hands out fresh temporaries in increasing order.
#[derive(Debug, Default, Clone)]
pub struct TempCounter {
  next: usize,
}

impl TempCounter {
  pub fn new() -> Self {
    TempCounter { next: 0 }
  }

  /// A counter whose temporaries cannot collide with any in `instructions`.
  pub fn after(instructions: &[Instruction]) -> Self {
    let next = instructions
      .iter()
      .flat_map(|instr| {
        let sources = instr.sources().into_iter().filter_map(Val::as_var);
        instr.result().into_iter().chain(sources)
      })
      .filter_map(|v| match v {
        Variable::Temp(n) => Some(n + 1),
        Variable::Named(_) => None,
      })
      .max()
      .unwrap_or(0);
    TempCounter { next }
  }

  pub fn fresh(&mut self) -> Variable {
    let temp = Variable::Temp(self.next);
    self.next += 1;
    temp
  }
}

pub fn dump_lines(instructions: &[Instruction]) -> Vec<String> {
  instructions.iter().map(|i| i.to_string()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_variable_identity() {
    assert_eq!(Variable::named("x"), Variable::named("x"));
    let mut temps = TempCounter::new();
    let a = temps.fresh();
    let b = temps.fresh();
    assert_ne!(a, b);
    assert!(a.is_temp());
    assert!(!Variable::named("x").is_temp());
  }

  #[test]
  fn test_display() {
    let add = Instruction::Binary(
      BinaryOp::Add,
      Variable::Temp(3),
      Val::Var(Variable::named("a")),
      Val::Imm(-2),
    );
    assert_eq!(add.to_string(), "(ADD, $3, a, -2)");
    assert_eq!(Instruction::Return(Val::Imm(0)).to_string(), "(RET, 0)");
  }

  #[test]
  fn test_counter_after_skips_existing_temps() {
    let instrs = vec![
      Instruction::Mov(Variable::Temp(4), Val::Imm(1)),
      Instruction::Return(Val::Var(Variable::Temp(7))),
    ];
    assert_eq!(TempCounter::after(&instrs).fresh(), Variable::Temp(8));
    assert_eq!(TempCounter::after(&[]).fresh(), Variable::Temp(0));
  }
}
