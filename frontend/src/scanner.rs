use log::trace;
use thiserror::Error;

use crate::symtab::SymbolLookup;
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized lexeme `{lexeme}` on line {line}")]
pub struct ScanError {
  pub lexeme: String,
  pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
  Initial,
  InToken,
}

/// Whitespace-delimited scanner. `;` always ends the current lexeme and is
/// a token of its own. Identifiers are registered in `symbols`.
pub struct Scanner<'a, S: SymbolLookup> {
  symbols: &'a mut S,
  tokens: Vec<Token>,
}

impl<'a, S: SymbolLookup> Scanner<'a, S> {
  pub fn new(symbols: &'a mut S) -> Self {
    Scanner {
      symbols,
      tokens: Vec::new(),
    }
  }

  /// Scans the whole source; the result always ends with `$`.
  pub fn run(mut self, source: &str) -> Result<Vec<Token>, ScanError> {
    let mut buffer = String::new();
    let mut state = State::Initial;

    for (index, line) in source.lines().enumerate() {
      let line_no = index + 1;
      for ch in line.chars() {
        match (state, ch) {
          (_, ';') => {
            if state == State::InToken {
              self.push_lexeme(&buffer, line_no)?;
              buffer.clear();
            }
            self.push_lexeme(";", line_no)?;
            state = State::Initial;
          }
          (State::Initial, c) if c.is_whitespace() => {}
          (State::Initial, c) => {
            buffer.push(c);
            state = State::InToken;
          }
          (State::InToken, c) if c.is_whitespace() => {
            self.push_lexeme(&buffer, line_no)?;
            buffer.clear();
            state = State::Initial;
          }
          (State::InToken, c) => buffer.push(c),
        }
      }
      // a line break also ends a lexeme
      if state == State::InToken {
        self.push_lexeme(&buffer, line_no)?;
        buffer.clear();
        state = State::Initial;
      }
    }

    self.tokens.push(Token::eof());
    Ok(self.tokens)
  }

  fn push_lexeme(&mut self, lexeme: &str, line: usize) -> Result<(), ScanError> {
    let token = if let Some(kind) = TokenKind::simple(lexeme) {
      if kind == TokenKind::Eof {
        return Err(ScanError {
          lexeme: lexeme.to_string(),
          line,
        });
      }
      Token::simple(kind)
    } else if is_digits(lexeme) {
      Token::normal(TokenKind::IntConst, lexeme)
    } else if is_identifier(lexeme) {
      if !self.symbols.has(lexeme) {
        self.symbols.register(lexeme);
      }
      Token::normal(TokenKind::Id, lexeme)
    } else {
      return Err(ScanError {
        lexeme: lexeme.to_string(),
        line,
      });
    };
    trace!("scanned {}", token);
    self.tokens.push(token);
    Ok(())
  }
}

fn is_digits(lexeme: &str) -> bool {
  !lexeme.is_empty() && lexeme.chars().all(|c| c.is_ascii_digit())
}

fn is_identifier(lexeme: &str) -> bool {
  let mut chars = lexeme.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::symtab::SymbolTable;

  fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
  }

  #[test]
  fn test_scan_assignment_and_return() {
    let mut table = SymbolTable::new();
    let tokens = Scanner::new(&mut table)
      .run("int a;\na = 3 * ( b + 4 );\nreturn a;")
      .unwrap();
    assert_eq!(
      kinds(&tokens),
      vec![
        TokenKind::Int,
        TokenKind::Id,
        TokenKind::Semicolon,
        TokenKind::Id,
        TokenKind::Assign,
        TokenKind::IntConst,
        TokenKind::Star,
        TokenKind::LParen,
        TokenKind::Id,
        TokenKind::Plus,
        TokenKind::IntConst,
        TokenKind::RParen,
        TokenKind::Semicolon,
        TokenKind::Return,
        TokenKind::Id,
        TokenKind::Semicolon,
        TokenKind::Eof,
      ]
    );
    assert!(table.has("a"));
    assert!(table.has("b"));
    assert_eq!(table.len(), 2);
  }

  #[test]
  fn test_semicolon_splits_without_whitespace() {
    let mut table = SymbolTable::new();
    let tokens = Scanner::new(&mut table).run("return x;").unwrap();
    assert_eq!(tokens[1], Token::normal(TokenKind::Id, "x"));
    assert_eq!(tokens[2].kind, TokenKind::Semicolon);
  }

  #[test]
  fn test_empty_source_yields_only_end_marker() {
    let mut table = SymbolTable::new();
    let tokens = Scanner::new(&mut table).run("   \n\t").unwrap();
    assert_eq!(tokens, vec![Token::eof()]);
  }

  #[test]
  fn test_bad_lexeme_reports_line() {
    let mut table = SymbolTable::new();
    let err = Scanner::new(&mut table).run("a = 1;\nb = 2a;").unwrap_err();
    assert_eq!(
      err,
      ScanError {
        lexeme: "2a".to_string(),
        line: 2
      }
    );
  }
}
