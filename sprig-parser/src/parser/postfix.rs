use crate::value::Expr;
use std::ops::Range;
use super::{error::{kind, Error}, Symbol, SymbolKind};

/// Reduces postfix symbols into a single expression tree.
///
/// Scalars, variables and subtrees push a tree onto a stack. An operator of arity `k` takes the
/// top `k` trees, in the order they were pushed, as its operands. Exactly one tree must remain at
/// the end.
pub fn from_postfix(symbols: Vec<Symbol>) -> Result<Expr, Error> {
    // each tree is paired with the region of source text it covers
    let mut stack: Vec<(Expr, Range<usize>)> = Vec::new();

    for Symbol { span, kind: symbol_kind } in symbols {
        match symbol_kind {
            SymbolKind::Scalar(n) => stack.push((Expr::scalar(n), span)),
            SymbolKind::Variable(name) => stack.push((Expr::variable(name), span)),
            SymbolKind::Subtree(tree) => stack.push((tree, span)),
            SymbolKind::Operator(op) => {
                if stack.len() < op.arity {
                    return Err(Error::new(vec![span], kind::StackUnderflow {
                        operator: op.name.clone(),
                        arity: op.arity,
                        found: stack.len(),
                    }));
                }

                let operands = stack.split_off(stack.len() - op.arity);
                let start = operands.iter().map(|(_, s)| s.start).fold(span.start, usize::min);
                let end = operands.iter().map(|(_, s)| s.end).fold(span.end, usize::max);
                let children = operands.into_iter().map(|(tree, _)| tree).collect();
                stack.push((Expr::operator(op, children), start..end));
            },
            SymbolKind::OpenParen | SymbolKind::CloseParen => {
                return Err(Error::new(vec![span], kind::UnexpectedParenthesis));
            },
        }
    }

    match stack.len() {
        0 => Err(Error::new(vec![0..0], kind::EmptyExpression)),
        1 => Ok(stack.remove(0).0),
        count => Err(Error::new(
            stack.into_iter().map(|(_, span)| span).collect(),
            kind::TrailingTokens { count },
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{parser::{lex, parse_postfix}, symbol::{lookup, SymbolTable}};
    use super::*;

    fn reduce(source: &str) -> Result<Expr, Error> {
        from_postfix(lex(source, &SymbolTable::standard()).unwrap())
    }

    #[test]
    fn operands_keep_order() {
        let expr = parse_postfix("a b -").unwrap();
        assert_eq!(expr, Expr::operator(lookup("-").unwrap(), vec![
            Expr::variable("a"),
            Expr::variable("b"),
        ]));
    }

    #[test]
    fn nested_reduction() {
        let expr = parse_postfix("x sq 3 x * + 5 -").unwrap();
        assert_eq!(expr.height(), 3);
        assert!(expr.is_operator("-"));
        assert!(expr.children[0].is_operator("+"));
        assert!(expr.children[0].children[0].is_operator("sq"));
        assert_eq!(expr.children[1], Expr::scalar(5.0));
    }

    #[test]
    fn subtree_symbols() {
        let inner = parse_postfix("x y *").unwrap();
        let symbols = vec![
            Symbol::new(0..0, SymbolKind::Subtree(inner.clone())),
            Symbol::new(0..0, SymbolKind::Scalar(1.0)),
            Symbol::new(0..0, SymbolKind::Operator(lookup("+").unwrap())),
        ];
        let expr = from_postfix(symbols).unwrap();
        assert_eq!(expr.children[0], inner);
    }

    #[test]
    fn stack_underflow() {
        let err = reduce("1 +").unwrap_err();
        assert_eq!(err.spans, vec![2..3]);
        assert_eq!(
            err.downcast_ref::<kind::StackUnderflow>(),
            Some(&kind::StackUnderflow { operator: "+".to_string(), arity: 2, found: 1 }),
        );
    }

    #[test]
    fn trailing_tokens() {
        let err = reduce("1 2 + 3").unwrap_err();
        assert_eq!(err.spans, vec![0..5, 6..7]);
        assert!(err.is::<kind::TrailingTokens>());
    }

    #[test]
    fn empty_expression() {
        let err = reduce("   ").unwrap_err();
        assert!(err.is::<kind::EmptyExpression>());
    }

    #[test]
    fn parenthesis_in_postfix() {
        let err = reduce("( 1 )").unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert!(err.is::<kind::UnexpectedParenthesis>());
    }
}
