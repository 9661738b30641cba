pub mod assemblyast;
pub mod codegen;
pub mod normalize;
pub mod regalloc;
mod tacky_to_asm;

use log::info;
use thiserror::Error;

use self::tacky_to_asm::AsmBuilder;
use crate::tacky::{self, Val, Variable};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
  #[error("no register left for `{variable}`: every register holds a live variable")]
  RegisterExhausted { variable: Variable },

  #[error("operand `{operand}` of `{instruction}` must be a variable")]
  IllShapedOperand {
    instruction: tacky::Instruction,
    operand: Val,
  },
}

/// Normalizes the IR, then selects instructions and allocates registers in
/// a single pass over the normalized list.
pub fn tac_to_asm(
  tac: &[tacky::Instruction],
) -> Result<Vec<assemblyast::Instruction>, AsmError> {
  let normalized = normalize::normalize(tac);
  let mut asm_builder = AsmBuilder::new(&normalized);
  let asm = asm_builder.tacky_to_asm()?;
  info!(
    "lowered {} IR instructions to {} assembly instructions",
    tac.len(),
    asm.len()
  );
  Ok(asm)
}
