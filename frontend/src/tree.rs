use crate::grammar::{Production, Rule};
use crate::symtab::{SourceType, SymbolTable};
use crate::token::{Token, TokenKind};

/// What a shift-reduce parser reports while it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEvent {
  Shift(Token),
  Reduce(Production),
  Accept,
}

/// Concrete parse tree built by the grammar actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseTree {
  Leaf(Token),
  Node(Rule, Vec<ParseTree>),
}

impl ParseTree {
  pub fn node(rule: Rule, children: Vec<ParseTree>) -> Self {
    debug_assert_eq!(rule.body_len(), children.len());
    ParseTree::Node(rule, children)
  }

  /// Replays the parse as the LR automaton performed it: a post-order walk
  /// shifts every leaf and reduces every node after its children, then
  /// accepts.
  pub fn events(&self) -> Vec<ParseEvent> {
    let mut events = Vec::new();
    self.collect_events(&mut events);
    events.push(ParseEvent::Accept);
    events
  }

  fn collect_events(&self, events: &mut Vec<ParseEvent>) {
    match self {
      ParseTree::Leaf(token) => events.push(ParseEvent::Shift(token.clone())),
      ParseTree::Node(rule, children) => {
        for child in children {
          child.collect_events(events);
        }
        events.push(ParseEvent::Reduce(rule.production()));
      }
    }
  }

  /// Records the type of every identifier introduced by `S -> D id`.
  pub fn declare_types(&self, table: &mut SymbolTable) {
    match self {
      ParseTree::Leaf(_) => {}
      ParseTree::Node(Rule::Declare, children) => {
        if let [ParseTree::Node(Rule::IntType, _), ParseTree::Leaf(id)] = children.as_slice() {
          if id.kind == TokenKind::Id {
            table.declare(&id.text, SourceType::Int);
          }
        }
      }
      ParseTree::Node(_, children) => {
        for child in children {
          child.declare_types(table);
        }
      }
    }
  }
}
