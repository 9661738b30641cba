use std::collections::BTreeMap;
use std::fmt;

/// Narrow view of the symbol table handed to the passes that need it.
/// The scanner registers identifiers; later stages only ask `has`.
pub trait SymbolLookup {
  fn has(&self, name: &str) -> bool;
  fn register(&mut self, name: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
  Int,
}

impl fmt::Display for SourceType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SourceType::Int => write!(f, "Int"),
    }
  }
}

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
  entries: BTreeMap<String, Option<SourceType>>,
}

impl SymbolTable {
  pub fn new() -> Self {
    SymbolTable {
      entries: BTreeMap::new(),
    }
  }

  /// Records the declared type of `name`, registering it if needed.
  pub fn declare(&mut self, name: &str, typ: SourceType) {
    self.entries.insert(name.to_string(), Some(typ));
  }

  pub fn type_of(&self, name: &str) -> Option<SourceType> {
    self.entries.get(name).copied().flatten()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, Option<SourceType>)> {
    self
      .entries
      .iter()
      .map(|(name, typ)| (name.as_str(), *typ))
  }

  pub fn dump_lines(&self) -> Vec<String> {
    self
      .iter()
      .map(|(name, typ)| match typ {
        Some(typ) => format!("({}, {})", name, typ),
        None => format!("({}, null)", name),
      })
      .collect()
  }
}

impl SymbolLookup for SymbolTable {
  fn has(&self, name: &str) -> bool {
    self.entries.contains_key(name)
  }

  fn register(&mut self, name: &str) {
    self.entries.entry(name.to_string()).or_insert(None);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_register_is_idempotent_and_keeps_type() {
    let mut table = SymbolTable::new();
    table.register("a");
    table.declare("a", SourceType::Int);
    table.register("a");
    assert_eq!(table.len(), 1);
    assert_eq!(table.type_of("a"), Some(SourceType::Int));
  }

  #[test]
  fn test_dump_is_name_ordered() {
    let mut table = SymbolTable::new();
    table.register("zeta");
    table.declare("alpha", SourceType::Int);
    assert_eq!(table.dump_lines(), vec!["(alpha, Int)", "(zeta, null)"]);
  }
}
