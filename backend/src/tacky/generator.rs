use frontend::grammar::{NonTerminal, Production, Rule};
use frontend::symtab::SymbolLookup;
use frontend::token::{Token, TokenKind};
use frontend::tree::ParseEvent;
use log::{trace, warn};

use super::{BinaryOp, Instruction, IrError, TempCounter, Val, Variable};

#[derive(Debug, Clone)]
enum SymbolKind {
  Terminal(Token),
  NonTerminal(NonTerminal),
}

/// An entry of the value stack. The value is fixed when the symbol is built.
#[derive(Debug, Clone)]
struct Symbol {
  kind: SymbolKind,
  value: Option<Val>,
}

impl Symbol {
  fn terminal(token: Token, value: Val) -> Self {
    Symbol {
      kind: SymbolKind::Terminal(token),
      value: Some(value),
    }
  }

  fn nonterminal(head: NonTerminal, value: Option<Val>) -> Self {
    Symbol {
      kind: SymbolKind::NonTerminal(head),
      value,
    }
  }
}

/// Builds three-address code from the events of a shift-reduce parse,
/// keeping a value stack in step with the parser's own stack.
pub struct IrGenerator<'a, S: SymbolLookup> {
  symbols: &'a S,
  stack: Vec<Symbol>,
  instructions: Vec<Instruction>,
  temps: TempCounter,
  accepted: bool,
}

impl<'a, S: SymbolLookup> IrGenerator<'a, S> {
  pub fn new(symbols: &'a S) -> Self {
    IrGenerator {
      symbols,
      stack: Vec::new(),
      instructions: Vec::new(),
      temps: TempCounter::new(),
      accepted: false,
    }
  }

  pub fn handle(&mut self, event: ParseEvent) -> Result<(), IrError> {
    if self.accepted {
      return Err(IrError::AlreadyAccepted);
    }
    match event {
      ParseEvent::Shift(token) => self.on_shift(token),
      ParseEvent::Reduce(production) => self.on_reduce(production),
      ParseEvent::Accept => {
        self.on_accept();
        Ok(())
      }
    }
  }

  pub fn on_shift(&mut self, token: Token) -> Result<(), IrError> {
    let value = match token.text.parse::<i32>() {
      Ok(n) => Val::Imm(n),
      Err(_) if token.kind == TokenKind::IntConst => {
        return Err(IrError::LiteralOutOfRange {
          literal: token.text,
        });
      }
      Err(_) => {
        if token.kind == TokenKind::Id && !self.symbols.has(&token.text) {
          warn!("identifier `{}` is not in the symbol table", token.text);
        }
        Val::Var(Variable::named(token.text.as_str()))
      }
    };
    trace!("shift {} => {}", token, value);
    self.stack.push(Symbol::terminal(token, value));
    Ok(())
  }

  pub fn on_reduce(&mut self, production: Production) -> Result<(), IrError> {
    let rule = production.rule();
    if let Some(rule) = rule {
      if rule.body_len() != production.body_len {
        return Err(IrError::ShapeMismatch { production });
      }
    }
    let children = self.pop_children(production)?;

    let value = match rule {
      Some(Rule::Assign) => {
        let result = match value_of(&children, 0, production)? {
          Val::Var(v) => v,
          value => return Err(IrError::NotAVariable { value }),
        };
        let from = value_of(&children, 2, production)?;
        self.emit(Instruction::Mov(result, from));
        None
      }
      Some(Rule::Return) => {
        let value = value_of(&children, 1, production)?;
        self.emit(Instruction::Return(value));
        None
      }
      Some(Rule::Add) => Some(self.emit_binary(BinaryOp::Add, &children, production)?),
      Some(Rule::Sub) => Some(self.emit_binary(BinaryOp::Sub, &children, production)?),
      Some(Rule::Mul) => Some(self.emit_binary(BinaryOp::Mul, &children, production)?),
      Some(Rule::Paren) => Some(value_of(&children, 1, production)?),
      Some(Rule::Program) => children[0].value.clone(),
      Some(Rule::ExprTerm | Rule::TermFactor | Rule::Ident | Rule::IntConst) => {
        Some(value_of(&children, 0, production)?)
      }
      // statement lists, declarations and the type keyword carry no value
      Some(
        Rule::Start | Rule::StmtListCons | Rule::StmtListLast | Rule::Declare | Rule::IntType,
      ) => None,
      None => {
        warn!("no action for production {}, discarding its children", production);
        None
      }
    };

    trace!("reduce {} => {:?}", production, value);
    self
      .stack
      .push(Symbol::nonterminal(production.head, value));
    Ok(())
  }

  pub fn on_accept(&mut self) {
    if self.stack.len() != 1 {
      warn!("accepted with {} symbols on the value stack", self.stack.len());
    }
    if let Some(Symbol {
      kind: SymbolKind::NonTerminal(head),
      ..
    }) = self.stack.last()
    {
      trace!("accept {}", head);
    }
    self.accepted = true;
  }

  pub fn instructions(&self) -> Result<&[Instruction], IrError> {
    if self.accepted {
      Ok(&self.instructions)
    } else {
      Err(IrError::NotAccepted)
    }
  }

  pub fn finish(self) -> Result<Vec<Instruction>, IrError> {
    if self.accepted {
      Ok(self.instructions)
    } else {
      Err(IrError::NotAccepted)
    }
  }

  /// Pops the right-hand side of `production`, returned left to right.
  fn pop_children(&mut self, production: Production) -> Result<Vec<Symbol>, IrError> {
    let len = production.body_len;
    if self.stack.len() < len {
      return Err(IrError::StackUnderflow { production });
    }
    let at = self.stack.len() - len;
    Ok(self.stack.split_off(at))
  }

  fn emit_binary(
    &mut self,
    op: BinaryOp,
    children: &[Symbol],
    production: Production,
  ) -> Result<Val, IrError> {
    let lhs = value_of(children, 0, production)?;
    let rhs = value_of(children, 2, production)?;
    let temp = self.temps.fresh();
    self.emit(Instruction::Binary(op, temp.clone(), lhs, rhs));
    Ok(Val::Var(temp))
  }

  fn emit(&mut self, instruction: Instruction) {
    trace!("emit {}", instruction);
    self.instructions.push(instruction);
  }
}

fn value_of(children: &[Symbol], position: usize, production: Production) -> Result<Val, IrError> {
  children
    .get(position)
    .and_then(|symbol| symbol.value.clone())
    .ok_or(IrError::MissingValue {
      production,
      position,
    })
}

/// Runs a whole event stream through a fresh generator.
pub fn generate_tac<S, I>(events: I, symbols: &S) -> Result<Vec<Instruction>, IrError>
where
  S: SymbolLookup,
  I: IntoIterator<Item = ParseEvent>,
{
  let mut generator = IrGenerator::new(symbols);
  for event in events {
    generator.handle(event)?;
  }
  generator.finish()
}
