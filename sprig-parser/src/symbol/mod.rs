//! The operator registry consulted by the tokenizer, parser, evaluator and differentiator.
//!
//! Every operator is described by an [`Operator`] record. Records are stored in a
//! [`SymbolTable`] and shared as [`Arc<Operator>`] by every tree that uses them. A process-wide
//! table seeded with the standard operators is available through [`global`], [`lookup`] and
//! [`register`].

pub mod table;

use once_cell::sync::Lazy;
use std::{
    fmt::{self, Display, Formatter},
    sync::{Arc, RwLock, RwLockReadGuard},
};
pub use table::{RegistryError, SymbolTable};

/// The associativity of an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Associativity {
    /// The operator cannot be chained without parentheses, or only has one operand.
    None,

    /// The operator is left-associative: `a - b - c` is `(a - b) - c`.
    Left,

    /// The operator is right-associative: `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,

    /// The operator is fully associative: `a + b + c` can be flattened into a single node with
    /// three operands.
    Full,
}

/// The numeric function computed by an operator.
#[derive(Debug, Clone, Copy)]
pub enum Evaluator {
    /// A function of one operand.
    Unary(fn(f64) -> f64),

    /// A function of two operands.
    Binary(fn(f64, f64) -> f64),
}

impl Evaluator {
    /// Returns the number of operands the function accepts.
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// An operator: a named function symbol together with the information needed to parse, evaluate
/// and differentiate it.
#[derive(Debug, Clone)]
pub struct Operator {
    /// The name of the operator, as it appears in source text.
    pub name: String,

    /// The number of operands of the operator (1 or 2).
    pub arity: usize,

    /// The precedence of the operator. Higher precedence binds tighter.
    pub precedence: u8,

    /// The associativity of the operator.
    pub associativity: Associativity,

    /// Whether the order of the operands is irrelevant.
    pub commutative: bool,

    /// The numeric function computed by the operator, if it has one.
    pub evaluator: Option<Evaluator>,

    /// A postfix template describing the derivative of the operator.
    ///
    /// In the template, `#n` stands for a copy of the `n`-th operand and `##n` for the derivative
    /// of the `n`-th operand.
    pub derivative: Option<String>,
}

impl Operator {
    /// Creates a new operator with no evaluator, no derivative template, no associativity and no
    /// commutativity.
    pub fn new(name: impl Into<String>, arity: usize, precedence: u8) -> Self {
        Self {
            name: name.into(),
            arity,
            precedence,
            associativity: Associativity::None,
            commutative: false,
            evaluator: None,
            derivative: None,
        }
    }

    /// Sets the associativity of the operator.
    pub fn associativity(mut self, associativity: Associativity) -> Self {
        self.associativity = associativity;
        self
    }

    /// Marks the operator as commutative.
    pub fn commutative(mut self) -> Self {
        self.commutative = true;
        self
    }

    /// Sets the operator's evaluator to a function of one operand.
    pub fn unary(mut self, f: fn(f64) -> f64) -> Self {
        self.evaluator = Some(Evaluator::Unary(f));
        self
    }

    /// Sets the operator's evaluator to a function of two operands.
    pub fn binary(mut self, f: fn(f64, f64) -> f64) -> Self {
        self.evaluator = Some(Evaluator::Binary(f));
        self
    }

    /// Sets the operator's derivative template.
    pub fn derivative(mut self, template: impl Into<String>) -> Self {
        self.derivative = Some(template.into());
        self
    }

    /// Returns true if the operator can be flattened into a single node with many operands.
    pub fn is_flattenable(&self) -> bool {
        self.associativity == Associativity::Full
    }
}

/// Operators are identified by their name.
impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Operator {}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The process-wide symbol table.
static GLOBAL: Lazy<RwLock<SymbolTable>> = Lazy::new(|| RwLock::new(SymbolTable::standard()));

/// Returns a read guard over the process-wide symbol table.
pub fn global() -> RwLockReadGuard<'static, SymbolTable> {
    // the table is never left half-updated, so a poisoned lock is still usable
    GLOBAL.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Looks up an operator by name in the process-wide symbol table.
pub fn lookup(name: &str) -> Option<Arc<Operator>> {
    global().get(name)
}

/// Registers a new operator in the process-wide symbol table.
pub fn register(operator: Operator) -> Result<Arc<Operator>, RegistryError> {
    GLOBAL
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .register(operator)
}
