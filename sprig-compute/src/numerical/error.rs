use std::fmt;

/// An error that can occur while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The expression uses a variable the context has no value for.
    UnboundVariable {
        /// The name of the variable.
        name: String,
    },

    /// The expression uses an operator that has no evaluator, such as `D`.
    NoEvaluator {
        /// The name of the operator.
        operator: String,
    },

    /// An operator node has a number of operands its evaluator cannot accept.
    ArityMismatch {
        /// The name of the operator.
        operator: String,

        /// The number of operands the node has.
        operands: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnboundVariable { name } => write!(f, "unknown variable `{}`", name),
            Self::NoEvaluator { operator } => write!(f, "`{}` cannot be evaluated numerically", operator),
            Self::ArityMismatch { operator, operands } => {
                write!(f, "`{}` cannot be applied to {} operand(s)", operator, operands)
            },
        }
    }
}

impl std::error::Error for EvalError {}
