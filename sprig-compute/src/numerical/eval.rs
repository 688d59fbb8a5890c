use sprig_parser::{Associativity, Evaluator, Expr, Value};
use super::{ctxt::Ctxt, error::EvalError};

/// Any type that can be evaluated to produce a number.
pub trait Eval {
    /// Evaluate the expression to produce a number, using the given context.
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError>;

    /// Evaluate the expression to produce a number, using the default context.
    fn eval_default(&self) -> Result<f64, EvalError> {
        self.eval(&Default::default())
    }

    /// Evaluate the expression with every variable set to `x`.
    fn eval_at(&self, x: f64) -> Result<f64, EvalError> {
        self.eval(&Ctxt::uniform(x))
    }
}

/// Operator nodes fold their operands through the operator's evaluator. A fully-associative binary
/// operator accepts two or more operands and folds them from left to right; any other operator
/// needs exactly as many operands as its evaluator takes.
impl Eval for Expr {
    fn eval(&self, ctxt: &Ctxt) -> Result<f64, EvalError> {
        let op = match &self.value {
            Value::Scalar(n) => return Ok(*n),
            Value::Variable(var) => {
                return ctxt.get_var(&var.name).ok_or_else(|| EvalError::UnboundVariable {
                    name: var.name.clone(),
                });
            },
            Value::Operator(op) => op,
        };

        let evaluator = op.evaluator.ok_or_else(|| EvalError::NoEvaluator {
            operator: op.name.clone(),
        })?;
        let arity_mismatch = || EvalError::ArityMismatch {
            operator: op.name.clone(),
            operands: self.child_count(),
        };

        match (evaluator, self.children.as_slice()) {
            (Evaluator::Unary(f), [operand]) => Ok(f(operand.eval(ctxt)?)),
            (Evaluator::Binary(f), [lhs, rhs]) => Ok(f(lhs.eval(ctxt)?, rhs.eval(ctxt)?)),
            (Evaluator::Binary(f), [first, rest @ ..])
                if rest.len() > 1 && op.associativity == Associativity::Full =>
            {
                rest.iter().try_fold(first.eval(ctxt)?, |acc, operand| Ok(f(acc, operand.eval(ctxt)?)))
            },
            _ => Err(arity_mismatch()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use sprig_parser::{parse, symbol};
    use crate::symbolic::transform::{CanonicalOrdering, Flattening, Transformation};
    use super::*;

    #[test]
    fn binary_expr() {
        assert_eq!(parse("1 + 2 * 3").unwrap().eval_default().unwrap(), 7.0);
        assert_eq!(parse("( ( 1 + 9 ) / 5 ) * 3").unwrap().eval_default().unwrap(), 6.0);
        assert_eq!(parse("2 ^ 3 ^ 2").unwrap().eval_default().unwrap(), 512.0);
    }

    #[test]
    fn constants() {
        let value = parse("90 * 2 * pi / 360").unwrap().eval_default().unwrap();
        assert_float_absolute_eq!(value, std::f64::consts::FRAC_PI_2, 1e-12);
    }

    #[test]
    fn variables() {
        let expr = parse("sq ( x ) - y").unwrap();
        let ctxt = Ctxt::new().with_var("x", 3.0).with_var("y", 4.0);
        assert_eq!(expr.eval(&ctxt).unwrap(), 5.0);
        assert_eq!(expr.eval_at(2.0).unwrap(), 2.0);
    }

    #[test]
    fn unbound_variable() {
        let err = parse("x + 1").unwrap().eval(&Ctxt::new()).unwrap_err();
        assert_eq!(err, EvalError::UnboundVariable { name: "x".to_string() });
    }

    #[test]
    fn no_evaluator() {
        let err = parse("x D x").unwrap().eval_at(1.0).unwrap_err();
        assert_eq!(err, EvalError::NoEvaluator { operator: "D".to_string() });
    }

    #[test]
    fn flattened_nodes() {
        let mul = symbol::lookup("*").unwrap();
        let node = Expr::operator(mul, vec![Expr::scalar(2.0), Expr::variable("x"), Expr::scalar(5.0)]);
        assert_eq!(node.eval_at(3.0).unwrap(), 30.0);

        let sub = symbol::lookup("-").unwrap();
        let node = Expr::operator(sub, vec![Expr::scalar(1.0), Expr::scalar(2.0), Expr::scalar(3.0)]);
        assert_eq!(
            node.eval_default().unwrap_err(),
            EvalError::ArityMismatch { operator: "-".to_string(), operands: 3 },
        );
    }

    /// Builds a random tree of sums and products over small integers and the variables `x` and
    /// `y`.
    fn random_tree(rng: &mut StdRng, depth: usize) -> Expr {
        if depth == 0 || rng.gen_bool(0.3) {
            return match rng.gen_range(0..3) {
                0 => Expr::variable("x"),
                1 => Expr::variable("y"),
                _ => Expr::scalar(rng.gen_range(-5..=5) as f64),
            };
        }

        let op = symbol::lookup(if rng.gen_bool(0.5) { "+" } else { "*" }).unwrap();
        Expr::operator(op, vec![random_tree(rng, depth - 1), random_tree(rng, depth - 1)])
    }

    #[test]
    fn restructuring_preserves_value() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let ctxt = Ctxt::new().with_var("x", 3.0).with_var("y", -2.0);

        for _ in 0..200 {
            let tree = random_tree(&mut rng, 5);
            let expected = tree.eval(&ctxt).unwrap();

            let mut restructured = tree.copy();
            Flattening.apply_recursively(&mut restructured);
            CanonicalOrdering.apply_recursively(&mut restructured);
            assert_float_absolute_eq!(restructured.eval(&ctxt).unwrap(), expected, 1e-9);
        }
    }
}
