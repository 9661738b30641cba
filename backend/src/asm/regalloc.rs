use std::collections::HashMap;

use log::trace;

use super::assemblyast::Register;
use super::AsmError;
use crate::tacky::Variable;

/// Bindings between the scratch registers and the variables living in them.
///
/// `occupants[i]` is the variable held by `Register::SCRATCH[i]` and `homes`
/// is the reverse map. Both are only changed by `bind`, so they always
/// describe the same partial bijection.
#[derive(Debug, Default)]
pub struct RegisterFile {
  occupants: [Option<Variable>; 7],
  homes: HashMap<Variable, usize>,
}

impl RegisterFile {
  pub fn new() -> Self {
    RegisterFile::default()
  }

  pub fn lookup(&self, variable: &Variable) -> Option<Register> {
    self.homes.get(variable).map(|&slot| Register::SCRATCH[slot])
  }

  #[cfg(test)]
  fn occupant(&self, register: Register) -> Option<&Variable> {
    let slot = Register::SCRATCH.iter().position(|&r| r == register)?;
    self.occupants[slot].as_ref()
  }

  /// Finds a register for `variable`: its current one, else the first free
  /// one, else the first one held by a temporary that `evictable` allows to
  /// be dropped. Named variables are never evicted.
  pub fn acquire<F>(&mut self, variable: &Variable, evictable: F) -> Result<Register, AsmError>
  where
    F: Fn(&Variable) -> bool,
  {
    if let Some(register) = self.lookup(variable) {
      return Ok(register);
    }

    if let Some(slot) = self.occupants.iter().position(Option::is_none) {
      self.bind(slot, variable);
      return Ok(Register::SCRATCH[slot]);
    }

    let victim = self.occupants.iter().position(|occupant| match occupant {
      Some(held) => held.is_temp() && evictable(held),
      None => false,
    });
    match victim {
      Some(slot) => {
        self.bind(slot, variable);
        Ok(Register::SCRATCH[slot])
      }
      None => Err(AsmError::RegisterExhausted {
        variable: variable.clone(),
      }),
    }
  }

  fn bind(&mut self, slot: usize, variable: &Variable) {
    if let Some(evicted) = self.occupants[slot].take() {
      trace!("evict {} from {}", evicted, Register::SCRATCH[slot]);
      self.homes.remove(&evicted);
    }
    trace!("bind {} to {}", variable, Register::SCRATCH[slot]);
    self.occupants[slot] = Some(variable.clone());
    self.homes.insert(variable.clone(), slot);
  }

  /// Checks that both directions of the binding agree.
  pub fn is_consistent(&self) -> bool {
    let forward = self
      .occupants
      .iter()
      .enumerate()
      .filter_map(|(slot, occupant)| occupant.as_ref().map(|v| (slot, v)))
      .all(|(slot, v)| self.homes.get(v) == Some(&slot));
    let bound = self.occupants.iter().filter(|o| o.is_some()).count();
    forward && bound == self.homes.len()
  }
}
