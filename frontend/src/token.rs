use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Int,
  Return,
  Assign,
  Plus,
  Minus,
  Star,
  LParen,
  RParen,
  Semicolon,
  Id,
  IntConst,
  Eof,
}

impl TokenKind {
  /// Kinds whose text is fixed, keyed by the lexeme the scanner sees.
  pub fn simple(lexeme: &str) -> Option<TokenKind> {
    let kind = match lexeme {
      "int" => TokenKind::Int,
      "return" => TokenKind::Return,
      "=" => TokenKind::Assign,
      "+" => TokenKind::Plus,
      "-" => TokenKind::Minus,
      "*" => TokenKind::Star,
      "(" => TokenKind::LParen,
      ")" => TokenKind::RParen,
      ";" => TokenKind::Semicolon,
      "$" => TokenKind::Eof,
      _ => return None,
    };
    Some(kind)
  }

  pub fn name(&self) -> &'static str {
    match self {
      TokenKind::Int => "int",
      TokenKind::Return => "return",
      TokenKind::Assign => "=",
      TokenKind::Plus => "+",
      TokenKind::Minus => "-",
      TokenKind::Star => "*",
      TokenKind::LParen => "(",
      TokenKind::RParen => ")",
      TokenKind::Semicolon => "Semicolon",
      TokenKind::Id => "id",
      TokenKind::IntConst => "IntConst",
      TokenKind::Eof => "$",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
}

impl Token {
  pub fn simple(kind: TokenKind) -> Self {
    let text = match kind {
      TokenKind::Semicolon => ";".to_string(),
      _ => kind.name().to_string(),
    };
    Token { kind, text }
  }

  pub fn normal(kind: TokenKind, text: impl Into<String>) -> Self {
    Token {
      kind,
      text: text.into(),
    }
  }

  pub fn eof() -> Self {
    Token::simple(TokenKind::Eof)
  }

  pub fn is_eof(&self) -> bool {
    self.kind == TokenKind::Eof
  }
}

// Dumped as `(kind,text)`; fixed-text kinds leave the text empty.
impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kind {
      TokenKind::Id | TokenKind::IntConst => write!(f, "({},{})", self.kind.name(), self.text),
      _ => write!(f, "({},)", self.kind.name()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_simple_kinds_round_trip_through_lexeme() {
    assert_eq!(TokenKind::simple("return"), Some(TokenKind::Return));
    assert_eq!(TokenKind::simple(";"), Some(TokenKind::Semicolon));
    assert_eq!(TokenKind::simple("x"), None);
    assert_eq!(Token::simple(TokenKind::Semicolon).text, ";");
  }

  #[test]
  fn test_display() {
    assert_eq!(Token::normal(TokenKind::Id, "abc").to_string(), "(id,abc)");
    assert_eq!(Token::normal(TokenKind::IntConst, "12").to_string(), "(IntConst,12)");
    assert_eq!(Token::simple(TokenKind::Plus).to_string(), "(+,)");
    assert_eq!(Token::eof().to_string(), "($,)");
  }
}
