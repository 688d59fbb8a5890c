use ariadne::Fmt;
use sprig_attrs::ErrorKind;
use sprig_error::{EXPR, OPERATOR};

/// A parenthesis has no partner.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unbalanced parentheses",
    labels = [if *opening {
        "this parenthesis is never closed"
    } else {
        "this parenthesis was never opened"
    }],
    help = format!("add the missing {}", (if *opening { "`)`" } else { "`(`" }).fg(EXPR)),
)]
pub struct UnbalancedParens {
    /// Whether the unmatched parenthesis is an opening one.
    pub opening: bool,
}

/// An operator was reached with fewer operands available than it needs.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing operands for `{}`", operator),
    labels = [format!("this operator takes {} operand(s), but only {} are available", arity, found)],
    help = format!("postfix operators follow {}", "all of their operands".fg(EXPR)),
)]
pub struct StackUnderflow {
    /// The name of the operator.
    pub operator: String,

    /// The number of operands the operator takes.
    pub arity: usize,

    /// The number of operands that were available.
    pub found: usize,
}

/// More than one expression was left over after reduction.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected a single expression",
    labels = std::iter::once("the expression starts here".to_string())
        .chain((1..*count).map(|_| "but another one starts here".to_string())),
    help = format!("join these expressions with an {}", "operator".fg(OPERATOR)),
)]
pub struct TrailingTokens {
    /// The number of expressions that were left over.
    pub count: usize,
}

/// The source contains no expression at all.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty expression",
    labels = ["you might need to add an expression here"],
)]
pub struct EmptyExpression;

/// A parenthesis appeared in postfix input, where grouping is implied by the order of tokens.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected parenthesis",
    labels = ["postfix expressions cannot contain parentheses"],
    help = "remove the parenthesis",
)]
pub struct UnexpectedParenthesis;

/// Punctuation was found that the symbol table has no operator for.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unregistered operator `{}`", name),
    labels = ["this operator is missing from the symbol table"],
    help = format!("register `{}` as an {} before parsing", name, "operator".fg(OPERATOR)),
)]
pub struct UnregisteredOperator {
    /// The punctuation that was found.
    pub name: String,
}
