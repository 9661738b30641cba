extern crate frontend;
pub mod asm;
pub mod tacky;

use frontend::symtab::SymbolLookup;
use frontend::tree::ParseEvent;
use thiserror::Error;

use asm::AsmError;
use tacky::{generate_tac, IrError};

#[derive(Error, Debug)]
pub enum BackendError {
  #[error("IR generation failed: {0}")]
  Ir(#[from] IrError),

  #[error("code generation failed: {0}")]
  Asm(#[from] AsmError),
}

/// The artifacts of one compilation unit.
#[derive(Debug)]
pub struct Generated {
  pub tac: Vec<tacky::Instruction>,
  pub assembly: Vec<String>,
}

/// Runs the parse events through IR generation and lowers the result.
/// Any failure aborts the whole unit.
pub fn generate_code<S, I>(events: I, symbols: &S) -> Result<Generated, BackendError>
where
  S: SymbolLookup,
  I: IntoIterator<Item = ParseEvent>,
{
  let tac = generate_tac(events, symbols)?;
  let asm = asm::tac_to_asm(&tac)?;
  let assembly = asm::codegen::assembly_lines(&asm);
  Ok(Generated { tac, assembly })
}
