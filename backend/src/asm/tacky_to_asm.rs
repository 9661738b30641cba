use std::collections::HashMap;

use log::debug;

use super::assemblyast::{BinaryOp, Instruction, Register};
use super::regalloc::RegisterFile;
use super::AsmError;
use crate::tacky::{self, Val, Variable};

/// Selects RISC-V instructions for normalized IR, allocating registers as
/// operands are met. Last uses are indexed against the same list the
/// builder walks.
pub(crate) struct AsmBuilder<'a> {
  tac: &'a [tacky::Instruction],
  registers: RegisterFile,
  last_use: HashMap<Variable, usize>,
  position: usize,
}

impl<'a> AsmBuilder<'a> {
  pub(crate) fn new(tac: &'a [tacky::Instruction]) -> Self {
    let mut last_use = HashMap::new();
    for (position, instruction) in tac.iter().enumerate() {
      for source in instruction.sources() {
        if let Val::Var(v @ Variable::Temp(_)) = source {
          last_use.insert(v.clone(), position);
        }
      }
    }

    AsmBuilder {
      tac,
      registers: RegisterFile::new(),
      last_use,
      position: 0,
    }
  }

  pub(crate) fn tacky_to_asm(&mut self) -> Result<Vec<Instruction>, AsmError> {
    let tac = self.tac;
    let mut instructions = Vec::with_capacity(tac.len());
    for (position, instruction) in tac.iter().enumerate() {
      self.position = position;
      let selected = self.convert_instruction(instruction)?;
      debug!("{} => {}", instruction, selected);
      debug_assert!(self.registers.is_consistent());
      instructions.push(selected);
    }
    Ok(instructions)
  }

  #[cfg(test)]
  pub(crate) fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  fn convert_instruction(
    &mut self,
    instruction: &tacky::Instruction,
  ) -> Result<Instruction, AsmError> {
    match instruction {
      tacky::Instruction::Mov(result, Val::Imm(n)) => {
        let dst = self.result_register(result)?;
        Ok(Instruction::Li(dst, *n))
      }
      tacky::Instruction::Mov(result, from @ Val::Var(_)) => {
        let src = self.source_register(instruction, from)?;
        let dst = self.result_register(result)?;
        Ok(Instruction::Mv(dst, src))
      }
      tacky::Instruction::Binary(tacky::BinaryOp::Add, result, lhs, Val::Imm(n)) => {
        let src = self.source_register(instruction, lhs)?;
        let dst = self.result_register(result)?;
        Ok(Instruction::Addi(dst, src, *n))
      }
      tacky::Instruction::Binary(op, result, lhs, rhs) => {
        let lhs = self.source_register(instruction, lhs)?;
        let rhs = self.source_register(instruction, rhs)?;
        let dst = self.result_register(result)?;
        Ok(Instruction::Binary(convert_op(*op), dst, lhs, rhs))
      }
      tacky::Instruction::Return(Val::Imm(n)) => Ok(Instruction::Li(Register::RETURN_VALUE, *n)),
      tacky::Instruction::Return(value) => {
        let src = self.source_register(instruction, value)?;
        Ok(Instruction::Mv(Register::RETURN_VALUE, src))
      }
    }
  }

  fn source_register(
    &mut self,
    instruction: &tacky::Instruction,
    operand: &Val,
  ) -> Result<Register, AsmError> {
    match operand {
      Val::Var(v) => self.acquire(v, false),
      Val::Imm(_) => Err(AsmError::IllShapedOperand {
        instruction: instruction.clone(),
        operand: operand.clone(),
      }),
    }
  }

  fn result_register(&mut self, result: &Variable) -> Result<Register, AsmError> {
    self.acquire(result, true)
  }

  // A temporary may give up its register once its last read is behind us.
  // While picking the destination the current instruction's sources have
  // already been read, so those count as dead too.
  fn acquire(&mut self, variable: &Variable, for_result: bool) -> Result<Register, AsmError> {
    let position = self.position;
    let last_use = &self.last_use;
    self
      .registers
      .acquire(variable, |held| match last_use.get(held) {
        Some(&used) => used < position || (for_result && used == position),
        None => true,
      })
  }
}

fn convert_op(op: tacky::BinaryOp) -> BinaryOp {
  match op {
    tacky::BinaryOp::Add => BinaryOp::Add,
    tacky::BinaryOp::Sub => BinaryOp::Sub,
    tacky::BinaryOp::Mul => BinaryOp::Mul,
  }
}
