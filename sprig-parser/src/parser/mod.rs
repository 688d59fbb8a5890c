//! Converts source text into expression trees.
//!
//! Parsing happens in three stages:
//!
//! 1. [`lex`] splits the source into [`Symbol`]s, classifying each word as a scalar, an operator
//!    or a variable with the help of a [`SymbolTable`].
//! 2. [`shunting::shunting_yard`] reorders infix symbols into postfix order.
//! 3. [`postfix::from_postfix`] reduces postfix symbols into an [`Expr`] with a stack machine.
//!
//! Postfix (reverse-Polish) input skips the second stage.

pub mod error;
pub mod fmt;
pub mod postfix;
pub mod shunting;

use crate::{
    symbol::{self, Operator, SymbolTable},
    tokenizer::{tokenize_complete, TokenKind},
    value::Expr,
};
use error::{kind, Error};
use std::{ops::Range, sync::Arc};
pub use postfix::from_postfix;
pub use shunting::shunting_yard;

/// The classification of a [`Symbol`].
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// A number.
    Scalar(f64),

    /// A word that is neither a number nor an operator name.
    Variable(String),

    /// A registered operator.
    Operator(Arc<Operator>),

    /// An opening parenthesis.
    OpenParen,

    /// A closing parenthesis.
    CloseParen,

    /// An already-built tree, inserted in place of a word by a caller that builds trees from
    /// templates.
    Subtree(Expr),
}

/// A classified token, along with the region of source text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// The region of the source code that this symbol originated from.
    pub span: Range<usize>,

    /// The kind of symbol.
    pub kind: SymbolKind,
}

impl Symbol {
    /// Creates a new symbol.
    pub fn new(span: Range<usize>, kind: SymbolKind) -> Self {
        Self { span, kind }
    }

    /// Returns the operator of this symbol, if it is one.
    pub fn operator(&self) -> Option<&Arc<Operator>> {
        match &self.kind {
            SymbolKind::Operator(op) => Some(op),
            _ => None,
        }
    }
}

/// Splits the source into symbols, classifying words using the given symbol table.
///
/// Words that parse as numbers are scalars, and words that name a registered operator are
/// operators. Any other word is a variable, so unknown text is never an error. The only error is
/// punctuation (`+ * / ^`) missing from the table.
pub fn lex(source: &str, table: &SymbolTable) -> Result<Vec<Symbol>, Error> {
    let mut symbols = Vec::new();
    for token in tokenize_complete(source).iter() {
        let symbol_kind = match token.kind {
            TokenKind::Whitespace => continue,
            TokenKind::OpenParen => SymbolKind::OpenParen,
            TokenKind::CloseParen => SymbolKind::CloseParen,
            TokenKind::Punct => match table.get(token.lexeme) {
                Some(op) => SymbolKind::Operator(op),
                None => return Err(Error::new(
                    vec![token.span.clone()],
                    kind::UnregisteredOperator { name: token.lexeme.to_string() },
                )),
            },
            TokenKind::Word => classify_word(token.lexeme, table),
        };
        symbols.push(Symbol::new(token.span.clone(), symbol_kind));
    }

    tracing::trace!(target: "sprig::parser", symbols = symbols.len(), "lexed source");
    Ok(symbols)
}

/// Classifies a word as a scalar, an operator or a variable.
fn classify_word(word: &str, table: &SymbolTable) -> SymbolKind {
    if let Ok(n) = word.parse::<f64>() {
        SymbolKind::Scalar(n)
    } else if let Some(op) = table.get(word) {
        SymbolKind::Operator(op)
    } else {
        SymbolKind::Variable(word.to_string())
    }
}

/// A parser over some source text, bound to a symbol table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'source, 'table> {
    source: &'source str,
    table: &'table SymbolTable,
}

impl<'source, 'table> Parser<'source, 'table> {
    /// Creates a parser for the given source that resolves operators with the given table.
    pub fn with_table(source: &'source str, table: &'table SymbolTable) -> Self {
        Self { source, table }
    }

    /// Returns the source text being parsed.
    pub fn source(&self) -> &'source str {
        self.source
    }

    /// Parses the source as an infix expression.
    pub fn parse_infix(&self) -> Result<Expr, Error> {
        let symbols = lex(self.source, self.table)?;
        from_postfix(shunting_yard(symbols)?)
    }

    /// Parses the source as a postfix (reverse-Polish) expression.
    pub fn parse_postfix(&self) -> Result<Expr, Error> {
        from_postfix(lex(self.source, self.table)?)
    }
}

/// Parses an infix expression using the process-wide symbol table.
pub fn parse(source: &str) -> Result<Expr, Error> {
    let table = symbol::global();
    Parser::with_table(source, &table).parse_infix()
}

/// Parses a postfix (reverse-Polish) expression using the process-wide symbol table.
pub fn parse_postfix(source: &str) -> Result<Expr, Error> {
    let table = symbol::global();
    Parser::with_table(source, &table).parse_postfix()
}
