use lalrpop_util::lalrpop_mod;
use log::{debug, info};
use thiserror::Error;

pub mod grammar;
pub mod scanner;
pub mod symtab;
pub mod token;
pub mod tree;
lalrpop_mod!(pub parser);

use scanner::{ScanError, Scanner};
use symtab::SymbolTable;
use token::Token;
use tree::{ParseEvent, ParseTree};

#[derive(Error, Debug)]
pub enum FrontendError {
  #[error("Lexical error: {0}")]
  Scan(#[from] ScanError),

  #[error("Parse error: {0}")]
  Parse(String),
}

/// Everything the front end hands to later stages.
#[derive(Debug)]
pub struct FrontEnd {
  pub tokens: Vec<Token>,
  pub symbols: SymbolTable,
  pub tree: ParseTree,
}

impl FrontEnd {
  pub fn events(&self) -> Vec<ParseEvent> {
    self.tree.events()
  }
}

pub fn scan(source: &str, symbols: &mut SymbolTable) -> Result<Vec<Token>, FrontendError> {
  Ok(Scanner::new(symbols).run(source)?)
}

/// Parses a scanned token stream. The trailing `$` is the parser's own
/// end of input and is not handed over as a token.
pub fn parse(tokens: &[Token]) -> Result<ParseTree, FrontendError> {
  let input = tokens
    .iter()
    .take_while(|token| !token.is_eof())
    .cloned()
    .enumerate()
    .map(|(i, token)| (i, token, i + 1));

  parser::ProgramParser::new()
    .parse(input)
    .map_err(|e| FrontendError::Parse(e.to_string()))
}

pub fn front_end_passes(source: &str) -> Result<FrontEnd, FrontendError> {
  let mut symbols = SymbolTable::new();
  let tokens = scan(source, &mut symbols)?;
  debug!("scanned {} tokens", tokens.len());

  let tree = parse(&tokens)?;
  tree.declare_types(&mut symbols);
  info!(
    "front end done: {} tokens, {} symbols",
    tokens.len(),
    symbols.len()
  );

  Ok(FrontEnd {
    tokens,
    symbols,
    tree,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use grammar::Rule;
  use symtab::{SourceType, SymbolLookup};

  fn reductions(events: &[ParseEvent]) -> Vec<usize> {
    events
      .iter()
      .filter_map(|e| match e {
        ParseEvent::Reduce(p) => Some(p.index),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn test_basic_parse() {
    let front = front_end_passes("int a;\na = 1;\nreturn a;").unwrap();
    assert!(front.symbols.has("a"));
    assert_eq!(front.symbols.type_of("a"), Some(SourceType::Int));
  }

  #[test]
  fn test_event_order_matches_lr_parse() {
    let front = front_end_passes("x = 1 + 2 * y;").unwrap();
    let events = front.events();
    assert_eq!(events.last(), Some(&ParseEvent::Accept));
    // 1 -> B A E, 2 -> B A, y -> B, A*B, E+A, S, S_list, P
    assert_eq!(
      reductions(&events),
      vec![
        Rule::IntConst.index(),
        Rule::TermFactor.index(),
        Rule::ExprTerm.index(),
        Rule::IntConst.index(),
        Rule::TermFactor.index(),
        Rule::Ident.index(),
        Rule::Mul.index(),
        Rule::Add.index(),
        Rule::Assign.index(),
        Rule::StmtListLast.index(),
        Rule::Program.index(),
      ]
    );
    let shifts = events
      .iter()
      .filter(|e| matches!(e, ParseEvent::Shift(_)))
      .count();
    assert_eq!(shifts, 8);
  }

  #[test]
  fn test_parse_error() {
    let err = front_end_passes("x = ;").unwrap_err();
    assert!(matches!(err, FrontendError::Parse(_)));
  }

  #[test]
  fn test_scan_error_propagates() {
    let err = front_end_passes("x = 1 / 2;").unwrap_err();
    assert!(matches!(err, FrontendError::Scan(_)));
  }
}
