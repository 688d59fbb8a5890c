use crate::symbol::Associativity;
use super::{error::{kind, Error}, Symbol, SymbolKind};

/// Returns true if `top`, an operator waiting on the stack, must be output before the binary
/// operator `incoming` is pushed.
fn yields_to(top: &Symbol, incoming: &Symbol) -> bool {
    let (Some(top), Some(incoming)) = (top.operator(), incoming.operator()) else {
        return false;
    };

    top.precedence > incoming.precedence
        || (top.precedence == incoming.precedence
            && incoming.associativity != Associativity::Right)
}

/// Returns true if the symbol is an operator of one operand.
fn is_unary(symbol: &Symbol) -> bool {
    symbol.operator().map_or(false, |op| op.arity == 1)
}

/// Reorders infix symbols into postfix order using the shunting-yard algorithm.
///
/// Operators of one operand are function-like: they are held on the stack until their argument
/// is complete, which is when the `)` closing the argument is reached, or when an operator of
/// lower precedence arrives. Binary operators first output the stacked operators that bind at
/// least as tightly, unless both have the same precedence and the incoming operator is
/// right-associative.
///
/// Parentheses do not appear in the output. An unmatched parenthesis is an
/// [`UnbalancedParens`](kind::UnbalancedParens) error pointing at it.
pub fn shunting_yard(symbols: Vec<Symbol>) -> Result<Vec<Symbol>, Error> {
    let mut output = Vec::with_capacity(symbols.len());
    let mut stack: Vec<Symbol> = Vec::new();

    for symbol in symbols {
        match &symbol.kind {
            SymbolKind::Scalar(_) | SymbolKind::Variable(_) | SymbolKind::Subtree(_) => {
                output.push(symbol);
            },
            SymbolKind::OpenParen => stack.push(symbol),
            SymbolKind::CloseParen => {
                loop {
                    match stack.pop() {
                        Some(Symbol { kind: SymbolKind::OpenParen, .. }) => break,
                        Some(top) => output.push(top),
                        None => return Err(Error::new(
                            vec![symbol.span],
                            kind::UnbalancedParens { opening: false },
                        )),
                    }
                }

                // a function call's argument is complete
                if stack.last().map_or(false, is_unary) {
                    output.extend(stack.pop());
                }
            },
            SymbolKind::Operator(op) if op.arity == 1 => stack.push(symbol),
            SymbolKind::Operator(_) => {
                while stack.last().map_or(false, |top| yields_to(top, &symbol)) {
                    output.extend(stack.pop());
                }
                stack.push(symbol);
            },
        }
    }

    while let Some(top) = stack.pop() {
        if top.kind == SymbolKind::OpenParen {
            return Err(Error::new(vec![top.span], kind::UnbalancedParens { opening: true }));
        }
        output.push(top);
    }

    tracing::trace!(target: "sprig::parser", symbols = output.len(), "converted to postfix");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{parser::lex, symbol::SymbolTable};
    use super::*;

    /// Converts the infix source to postfix and renders the result as words.
    fn postfix(source: &str) -> String {
        let table = SymbolTable::standard();
        shunting_yard(lex(source, &table).unwrap())
            .unwrap()
            .into_iter()
            .map(|symbol| match symbol.kind {
                SymbolKind::Scalar(n) => n.to_string(),
                SymbolKind::Variable(name) => name,
                SymbolKind::Operator(op) => op.name.clone(),
                other => format!("{:?}", other),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn binary_precedence() {
        assert_eq!(postfix("1 + 2 * 3"), "1 2 3 * +");
        assert_eq!(postfix("1 * 2 + 3"), "1 2 * 3 +");
        assert_eq!(postfix("a - b + c"), "a b - c +");
    }

    #[test]
    fn right_associativity() {
        assert_eq!(postfix("a ^ b ^ c"), "a b c ^ ^");
    }

    #[test]
    fn unary_flush_on_close() {
        assert_eq!(postfix("sin ( x + 1 ) * 2"), "x 1 + sin 2 *");
        assert_eq!(postfix("ln ( exp ( x ) )"), "x exp ln");
    }

    #[test]
    fn unary_without_parens() {
        assert_eq!(postfix("sq x + 1"), "x sq 1 +");
    }

    #[test]
    fn derivative_operator() {
        assert_eq!(postfix("x D ( x * y )"), "x x y * D");
    }

    #[test]
    fn unclosed_paren() {
        let table = SymbolTable::standard();
        let err = shunting_yard(lex("( 1 + 2", &table).unwrap()).unwrap_err();
        assert_eq!(err.spans, vec![0..1]);
        assert_eq!(
            err.downcast_ref::<kind::UnbalancedParens>(),
            Some(&kind::UnbalancedParens { opening: true }),
        );
    }

    #[test]
    fn unopened_paren() {
        let table = SymbolTable::standard();
        let err = shunting_yard(lex("1 + 2 )", &table).unwrap()).unwrap_err();
        assert_eq!(err.spans, vec![6..7]);
        assert_eq!(
            err.downcast_ref::<kind::UnbalancedParens>(),
            Some(&kind::UnbalancedParens { opening: false }),
        );
    }
}
