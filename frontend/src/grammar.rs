//! The fixed grammar of the language and the productions the parser reports.
//!
//! ```text
//! 0  P'     -> P
//! 1  P      -> S_list
//! 2  S_list -> S Semicolon S_list
//! 3  S_list -> S Semicolon
//! 4  S      -> D id
//! 5  D      -> int
//! 6  S      -> id = E
//! 7  S      -> return E
//! 8  E      -> E + A
//! 9  E      -> E - A
//! 10 E      -> A
//! 11 A      -> A * B
//! 12 A      -> B
//! 13 B      -> ( E )
//! 14 B      -> id
//! 15 B      -> IntConst
//! ```
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NonTerminal {
  Start,
  Program,
  StmtList,
  Stmt,
  Decl,
  Expr,
  Term,
  Factor,
}

impl fmt::Display for NonTerminal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      NonTerminal::Start => "P'",
      NonTerminal::Program => "P",
      NonTerminal::StmtList => "S_list",
      NonTerminal::Stmt => "S",
      NonTerminal::Decl => "D",
      NonTerminal::Expr => "E",
      NonTerminal::Term => "A",
      NonTerminal::Factor => "B",
    };
    write!(f, "{}", name)
  }
}

/// A named grammar rule. The discriminant is the production's stable index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
  Start = 0,
  Program = 1,
  StmtListCons = 2,
  StmtListLast = 3,
  Declare = 4,
  IntType = 5,
  Assign = 6,
  Return = 7,
  Add = 8,
  Sub = 9,
  ExprTerm = 10,
  Mul = 11,
  TermFactor = 12,
  Paren = 13,
  Ident = 14,
  IntConst = 15,
}

impl Rule {
  pub const ALL: [Rule; 16] = [
    Rule::Start,
    Rule::Program,
    Rule::StmtListCons,
    Rule::StmtListLast,
    Rule::Declare,
    Rule::IntType,
    Rule::Assign,
    Rule::Return,
    Rule::Add,
    Rule::Sub,
    Rule::ExprTerm,
    Rule::Mul,
    Rule::TermFactor,
    Rule::Paren,
    Rule::Ident,
    Rule::IntConst,
  ];

  pub fn from_index(index: usize) -> Option<Rule> {
    Rule::ALL.get(index).copied()
  }

  pub fn index(self) -> usize {
    self as usize
  }

  pub fn head(self) -> NonTerminal {
    match self {
      Rule::Start => NonTerminal::Start,
      Rule::Program => NonTerminal::Program,
      Rule::StmtListCons | Rule::StmtListLast => NonTerminal::StmtList,
      Rule::Declare | Rule::Assign | Rule::Return => NonTerminal::Stmt,
      Rule::IntType => NonTerminal::Decl,
      Rule::Add | Rule::Sub | Rule::ExprTerm => NonTerminal::Expr,
      Rule::Mul | Rule::TermFactor => NonTerminal::Term,
      Rule::Paren | Rule::Ident | Rule::IntConst => NonTerminal::Factor,
    }
  }

  pub fn body_len(self) -> usize {
    match self {
      Rule::Start
      | Rule::Program
      | Rule::IntType
      | Rule::ExprTerm
      | Rule::TermFactor
      | Rule::Ident
      | Rule::IntConst => 1,
      Rule::StmtListLast | Rule::Declare | Rule::Return => 2,
      Rule::StmtListCons | Rule::Assign | Rule::Add | Rule::Sub | Rule::Mul | Rule::Paren => 3,
    }
  }

  pub fn production(self) -> Production {
    Production {
      index: self.index(),
      head: self.head(),
      body_len: self.body_len(),
    }
  }
}

/// A production as reported by a reduce event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Production {
  pub index: usize,
  pub head: NonTerminal,
  pub body_len: usize,
}

impl Production {
  /// The grammar rule behind this production, if its index is known.
  pub fn rule(&self) -> Option<Rule> {
    Rule::from_index(self.index)
  }
}

impl From<Rule> for Production {
  fn from(rule: Rule) -> Self {
    rule.production()
  }
}

impl fmt::Display for Production {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{} {} (|body| = {})", self.index, self.head, self.body_len)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_indices_are_stable() {
    for (index, rule) in Rule::ALL.iter().enumerate() {
      assert_eq!(rule.index(), index);
      assert_eq!(Rule::from_index(index), Some(*rule));
    }
    assert_eq!(Rule::from_index(16), None);
  }

  #[test]
  fn test_production_shape() {
    let assign = Production::from(Rule::Assign);
    assert_eq!(assign.index, 6);
    assert_eq!(assign.head, NonTerminal::Stmt);
    assert_eq!(assign.body_len, 3);
    assert_eq!(Rule::Paren.production().body_len, 3);
    assert_eq!(Rule::Return.production().body_len, 2);
  }
}
