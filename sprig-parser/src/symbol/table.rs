use std::{collections::HashMap, fmt, sync::Arc};
use super::{Associativity, Operator};

/// Single-character operator names. These are split from surrounding text by the tokenizer, so
/// they are the only names allowed to contain these characters.
pub const PUNCTUATION: [char; 4] = ['+', '*', '/', '^'];

/// An error that can occur when registering an operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The operator's name is empty, or contains whitespace or parentheses.
    InvalidName(String),

    /// The operator's name would be read as a number.
    NumericName(String),

    /// The operator's name mixes punctuation with other characters, so the tokenizer would split
    /// it apart.
    SplitName(String),

    /// The operator's arity is not 1 or 2.
    UnsupportedArity {
        /// The name of the operator.
        name: String,

        /// The arity that was given.
        arity: usize,
    },

    /// The operator's evaluator takes a different number of operands than the operator.
    EvaluatorArity {
        /// The name of the operator.
        name: String,

        /// The arity of the operator.
        arity: usize,

        /// The arity of the evaluator.
        evaluator: usize,
    },

    /// An operator with the same name is already registered.
    Duplicate(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "invalid operator name `{}`", name),
            Self::NumericName(name) => write!(f, "operator name `{}` would be read as a number", name),
            Self::SplitName(name) => write!(
                f,
                "operator name `{}` mixes punctuation with other characters",
                name,
            ),
            Self::UnsupportedArity { name, arity } => write!(
                f,
                "operator `{}` has arity {}, but only arity 1 and 2 are supported",
                name,
                arity,
            ),
            Self::EvaluatorArity { name, arity, evaluator } => write!(
                f,
                "operator `{}` has arity {}, but its evaluator takes {} operand(s)",
                name,
                arity,
                evaluator,
            ),
            Self::Duplicate(name) => write!(f, "operator `{}` is already registered", name),
        }
    }
}

impl std::error::Error for RegistryError {}

/// A registry of operators, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    operators: HashMap<String, Arc<Operator>>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a symbol table containing the standard operators.
    ///
    /// | Operator | Arity | Precedence | Associativity | Commutative |
    /// | -------- | ----- | ---------- | ------------- | ----------- |
    /// | `+` `-`  | 2     | 1          | full / left   | `+` only    |
    /// | `*` `/`  | 2     | 2          | full / left   | `*` only    |
    /// | `^`      | 2     | 3          | right         | no          |
    /// | `sq` `exp` `sin` `cos` `ln` | 1 | 4 | right   | no          |
    /// | `D`      | 2     | 5          | left          | no          |
    ///
    /// `D` is the differentiation operator: `x D f` is the derivative of `f` with respect to `x`.
    /// It has no evaluator.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for operator in standard_operators() {
            if let Err(err) = table.register(operator) {
                unreachable!("invalid standard operator: {}", err);
            }
        }
        table
    }

    /// Validates and adds an operator to the table, returning the shared record.
    pub fn register(&mut self, operator: Operator) -> Result<Arc<Operator>, RegistryError> {
        validate(&operator)?;
        if self.operators.contains_key(&operator.name) {
            return Err(RegistryError::Duplicate(operator.name));
        }

        let operator = Arc::new(operator);
        self.operators.insert(operator.name.clone(), Arc::clone(&operator));
        Ok(operator)
    }

    /// Returns the operator with the given name.
    pub fn get(&self, name: &str) -> Option<Arc<Operator>> {
        self.operators.get(name).cloned()
    }

    /// Returns true if an operator with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.operators.contains_key(name)
    }

    /// Returns an iterator over the registered operators, in no particular order.
    pub fn operators(&self) -> impl Iterator<Item = &Arc<Operator>> {
        self.operators.values()
    }
}

/// The operators of [`SymbolTable::standard`].
pub(crate) fn standard_operators() -> Vec<Operator> {
    use Associativity::*;

    vec![
        Operator::new("+", 2, 1)
            .associativity(Full)
            .commutative()
            .binary(|a, b| a + b)
            .derivative("##0 ##1 +"),
        Operator::new("-", 2, 1)
            .associativity(Left)
            .binary(|a, b| a - b)
            .derivative("##0 ##1 -"),
        Operator::new("*", 2, 2)
            .associativity(Full)
            .commutative()
            .binary(|a, b| a * b)
            .derivative("##0 #1 * #0 ##1 * +"),
        Operator::new("/", 2, 2)
            .associativity(Left)
            .binary(|a, b| a / b)
            .derivative("##0 #1 * #0 ##1 * - #1 sq /"),
        Operator::new("^", 2, 3)
            .associativity(Right)
            .binary(f64::powf)
            .derivative("#1 #0 #1 1 - ^ * ##0 * #0 #1 ^ #0 ln * ##1 * +"),
        Operator::new("sq", 1, 4)
            .associativity(Right)
            .unary(|a| a * a)
            .derivative("2 #0 * ##0 *"),
        Operator::new("exp", 1, 4)
            .associativity(Right)
            .unary(f64::exp)
            .derivative("#0 exp ##0 *"),
        Operator::new("sin", 1, 4)
            .associativity(Right)
            .unary(f64::sin)
            .derivative("#0 cos ##0 *"),
        Operator::new("cos", 1, 4)
            .associativity(Right)
            .unary(f64::cos)
            .derivative("-1 #0 sin * ##0 *"),
        Operator::new("ln", 1, 4)
            .associativity(Right)
            .unary(f64::ln)
            .derivative("##0 #0 /"),
        Operator::new("D", 2, 5)
            .associativity(Left),
    ]
}

/// Checks that the operator can be told apart from other tokens and that its evaluator agrees
/// with its arity.
fn validate(operator: &Operator) -> Result<(), RegistryError> {
    let name = &operator.name;
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c == '(' || c == ')') {
        return Err(RegistryError::InvalidName(name.clone()));
    }

    if name.parse::<f64>().is_ok() {
        return Err(RegistryError::NumericName(name.clone()));
    }

    if name.chars().any(|c| PUNCTUATION.contains(&c)) && name.chars().count() != 1 {
        return Err(RegistryError::SplitName(name.clone()));
    }

    if !(1..=2).contains(&operator.arity) {
        return Err(RegistryError::UnsupportedArity {
            name: name.clone(),
            arity: operator.arity,
        });
    }

    match operator.evaluator {
        Some(evaluator) if evaluator.arity() != operator.arity => Err(RegistryError::EvaluatorArity {
            name: name.clone(),
            arity: operator.arity,
            evaluator: evaluator.arity(),
        }),
        _ => Ok(()),
    }
}
