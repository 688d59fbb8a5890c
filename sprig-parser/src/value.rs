//! The values stored in the nodes of an expression tree.

use crate::{symbol::{self, Operator}, tree::Tree};
use std::{
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

/// An expression tree.
pub type Expr = Tree<Value>;

/// The kinds of nodes a pattern variable is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchClass {
    /// Matches any node.
    Any,

    /// Matches only [`Value::Scalar`] leaves.
    Scalar,

    /// Matches only [`Value::Variable`] leaves.
    Variable,

    /// Matches only operator nodes.
    Operator,
}

impl MatchClass {
    /// Infers the match class of a pattern variable from its name.
    ///
    /// Names consisting of an `s` optionally followed by digits (`s`, `s1`, `s20`) match scalars
    /// only. Every other name matches anything.
    pub fn infer(name: &str) -> Self {
        match name.strip_prefix('s') {
            Some(rest) if rest.chars().all(|c| c.is_ascii_digit()) => Self::Scalar,
            _ => Self::Any,
        }
    }

    /// Returns true if a node holding the given value belongs to this class.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Scalar => matches!(value, Value::Scalar(_)),
            Self::Variable => matches!(value, Value::Variable(_)),
            Self::Operator => matches!(value, Value::Operator(_)),
        }
    }
}

/// A named free symbol.
///
/// A variable with a [`MatchClass`] is a *pattern variable*: inside a rewrite rule it stands for
/// whatever subtree it is matched against. Plain variables only ever match a variable with the
/// same name.
///
/// Two variables are equal if their names are equal.
#[derive(Debug, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable {
    /// The name of the variable.
    pub name: String,

    /// The match class of the variable, if it is a pattern variable.
    pub class: Option<MatchClass>,
}

impl Variable {
    /// Creates a plain variable.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), class: None }
    }

    /// Creates a pattern variable whose match class is inferred from its name.
    pub fn pattern(name: impl Into<String>) -> Self {
        let name = name.into();
        let class = MatchClass::infer(&name);
        Self { name, class: Some(class) }
    }

    /// Creates a pattern variable with the given match class.
    pub fn pattern_with(name: impl Into<String>, class: MatchClass) -> Self {
        Self { name: name.into(), class: Some(class) }
    }

    /// Returns true if this is a pattern variable.
    pub fn is_pattern(&self) -> bool {
        self.class.is_some()
    }

    /// Renames the variable in place.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The value of a node in an expression tree.
#[derive(Debug, Clone)]
pub enum Value {
    /// A floating-point literal.
    Scalar(f64),

    /// A free symbol.
    Variable(Variable),

    /// An operator, applied to the node's children.
    Operator(Arc<Operator>),
}

impl Value {
    /// Returns the scalar, if this is a [`Value::Scalar`].
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the variable, if this is a [`Value::Variable`].
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Self::Variable(var) => Some(var),
            _ => None,
        }
    }

    /// Returns the operator, if this is a [`Value::Operator`].
    pub fn as_operator(&self) -> Option<&Arc<Operator>> {
        match self {
            Self::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Returns true if this is a scalar equal to `n`.
    pub fn is_scalar(&self, n: f64) -> bool {
        self.as_scalar() == Some(n)
    }
}

/// Scalars compare numerically, variables by name and operators by name.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Variable(a), Self::Variable(b)) => a == b,
            (Self::Operator(a), Self::Operator(b)) => a == b,
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Scalar(n) => write!(f, "{}", n),
            Self::Variable(var) => write!(f, "{}", var),
            Self::Operator(op) => write!(f, "{}", op),
        }
    }
}

impl Expr {
    /// Creates a scalar leaf.
    pub fn scalar(n: f64) -> Self {
        Tree::leaf(Value::Scalar(n))
    }

    /// Creates a plain variable leaf.
    pub fn variable(name: impl Into<String>) -> Self {
        Tree::leaf(Value::Variable(Variable::new(name)))
    }

    /// Creates an operator node over the given operands.
    pub fn operator(op: Arc<Operator>, children: Vec<Expr>) -> Self {
        Tree::join(Value::Operator(op), children)
    }

    /// Returns the operator of this node, if it is an operator node.
    pub fn op(&self) -> Option<&Arc<Operator>> {
        self.value.as_operator()
    }

    /// Returns true if this node applies the operator with the given name.
    pub fn is_operator(&self, name: &str) -> bool {
        self.op().map_or(false, |op| op.name == name)
    }

    /// Returns the scalar stored in this node, if it is a scalar leaf.
    pub fn as_scalar(&self) -> Option<f64> {
        self.value.as_scalar()
    }

    /// Joins the operands under the operator with the given name in the process-wide table.
    fn apply(name: &str, operands: Vec<Expr>) -> Self {
        match symbol::lookup(name) {
            Some(op) => Self::operator(op, operands),
            // the process-wide table starts out with the standard operators and only grows
            None => unreachable!("standard operator `{}` is not registered", name),
        }
    }

    /// Builds `self ^ exponent`. No simplification is done.
    pub fn pow(self, exponent: impl Into<Expr>) -> Self {
        Self::apply("^", vec![self, exponent.into()])
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Self::scalar(n)
    }
}

/// Implements an arithmetic operator trait for [`Expr`] by joining both operands under the
/// standard operator of the same symbol. No simplification is done, so `a + b + c` builds
/// `(a + b) + c`, exactly like parsing the same text.
macro_rules! impl_arithmetic {
    ($($trait:ident :: $method:ident => $name:literal),* $(,)?) => {
        $(
            impl<T: Into<Expr>> $trait<T> for Expr {
                type Output = Expr;

                fn $method(self, rhs: T) -> Expr {
                    Expr::apply($name, vec![self, rhs.into()])
                }
            }

            impl $trait<Expr> for f64 {
                type Output = Expr;

                fn $method(self, rhs: Expr) -> Expr {
                    Expr::apply($name, vec![Expr::scalar(self), rhs])
                }
            }
        )*
    };
}

impl_arithmetic! {
    Add::add => "+",
    Sub::sub => "-",
    Mul::mul => "*",
    Div::div => "/",
}

/// Negates an [`Expr`] by multiplying it by `-1`.
impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::apply("*", vec![Expr::scalar(-1.0), self])
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::parse;
    use super::*;

    #[test]
    fn infer_class() {
        assert_eq!(MatchClass::infer("s"), MatchClass::Scalar);
        assert_eq!(MatchClass::infer("s12"), MatchClass::Scalar);
        assert_eq!(MatchClass::infer("sx"), MatchClass::Any);
        assert_eq!(MatchClass::infer("f"), MatchClass::Any);
    }

    #[test]
    fn class_accepts() {
        assert!(MatchClass::Scalar.accepts(&Value::Scalar(1.0)));
        assert!(!MatchClass::Scalar.accepts(&Value::Variable(Variable::new("x"))));
        assert!(MatchClass::Variable.accepts(&Value::Variable(Variable::new("x"))));
        assert!(MatchClass::Any.accepts(&Value::Scalar(1.0)));
    }

    #[test]
    fn variables_equal_by_name() {
        assert_eq!(Variable::new("x"), Variable::pattern("x"));
        assert_ne!(Variable::new("x"), Variable::new("y"));
    }

    #[test]
    fn copy_is_independent() {
        let original = Expr::operator(
            crate::symbol::lookup("+").unwrap(),
            vec![Expr::variable("x"), Expr::scalar(2.0)],
        );
        let mut copy = original.copy();
        assert_eq!(copy, original);

        if let Value::Variable(var) = &mut copy.children[0].value {
            var.rename("y");
        }
        assert_ne!(copy, original);
        assert_eq!(original.children[0], Expr::variable("x"));
        assert!(Arc::ptr_eq(copy.op().unwrap(), original.op().unwrap()));
    }

    #[test]
    fn arithmetic_builds_parsed_shape() {
        let x = || Expr::variable("x");
        assert_eq!(x().pow(2.0) + 3.0 * x() - 5.0, parse("x ^ 2 + 3 * x - 5").unwrap());
        assert_eq!(x() / (Expr::variable("y") + 1.0), parse("x / ( y + 1 )").unwrap());
        assert_eq!(x().pow(x().pow(2.0)), parse("x ^ x ^ 2").unwrap());
    }

    #[test]
    fn negation() {
        let expr = -(Expr::variable("a") - Expr::variable("b"));
        assert_eq!(expr, parse("-1 * ( a - b )").unwrap());
        assert_eq!(expr.to_string(), "-1 * ( a - b )");
    }
}
