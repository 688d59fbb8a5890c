//! Structural pattern matching and template instantiation.
//!
//! A *pattern* is an expression tree whose variables may be pattern variables (see
//! [`Variable::pattern`]). Matching a tree against a pattern binds every pattern variable to the
//! subtree at the same position, and [`instantiate`] builds a new tree from a template by
//! replacing pattern variables with copies of what they were bound to.

use sprig_parser::{Expr, MatchClass, Tree, Value, Variable};
use std::collections::HashMap;

/// Maps the names of pattern variables to the subtrees they matched.
///
/// The subtrees are borrowed from the matched tree, so bindings cannot outlive a mutation of that
/// tree.
pub type Bindings<'t> = HashMap<String, &'t Expr>;

/// Matches `expr` against `pattern`, recording pattern variable bindings in `bindings`.
///
/// Matching is purely structural and never backtracks:
///
/// - a scalar matches an equal scalar;
/// - a plain variable matches a variable with the same name;
/// - a pattern variable matches any node its [`MatchClass`] accepts. The first match binds it,
///   and later occurrences must match a subtree equal to the bound one;
/// - an operator node matches a node with the same operator and the same number of children, if
///   every pair of children matches, from left to right.
///
/// Child order matters, even for commutative operators. On failure, `bindings` may hold partial
/// results and should be discarded.
pub fn matches<'t>(expr: &'t Expr, pattern: &Expr, bindings: &mut Bindings<'t>) -> bool {
    match &pattern.value {
        Value::Scalar(n) => expr.is_leaf() && expr.value.is_scalar(*n),
        Value::Variable(var) => match var.class {
            None => expr.is_leaf()
                && matches!(&expr.value, Value::Variable(other) if other.name == var.name),
            Some(class) => {
                if !class.accepts(&expr.value) {
                    return false;
                }

                match bindings.get(&var.name) {
                    Some(bound) => *bound == expr,
                    None => {
                        bindings.insert(var.name.clone(), expr);
                        true
                    },
                }
            },
        },
        Value::Operator(op) => {
            if expr.op() != Some(op) || expr.child_count() != pattern.child_count() {
                return false;
            }

            for (child, child_pattern) in expr.children.iter().zip(&pattern.children) {
                if !matches(child, child_pattern, bindings) {
                    return false;
                }
            }
            true
        },
    }
}

/// Matches `expr` against `pattern` with an empty set of bindings, returning the bindings on
/// success.
pub fn match_root<'t>(expr: &'t Expr, pattern: &Expr) -> Option<Bindings<'t>> {
    let mut bindings = Bindings::new();
    matches(expr, pattern, &mut bindings).then_some(bindings)
}

/// Builds a new tree from the template, replacing each bound pattern variable with a copy of its
/// bound subtree. Unbound pattern variables are copied as they are.
pub fn instantiate(template: &Expr, bindings: &Bindings) -> Expr {
    if let Value::Variable(var @ Variable { class: Some(_), .. }) = &template.value {
        if let Some(bound) = bindings.get(&var.name) {
            return (*bound).copy();
        }
    }

    Tree::join(
        template.value.clone(),
        template.children.iter().map(|child| instantiate(child, bindings)).collect(),
    )
}

/// Converts every plain variable in the tree into a pattern variable, inferring its match class
/// from its name.
pub fn patternify(tree: &mut Expr) {
    tree.visit_post_order_mut(&mut |node| {
        if let Value::Variable(var) = &mut node.value {
            if !var.is_pattern() {
                var.class = Some(MatchClass::infer(&var.name));
            }
        }
    });
}

/// Sets the class of every variable with the given name. A class of [`None`] turns the variables
/// back into plain variables.
pub fn set_class(tree: &mut Expr, name: &str, class: Option<MatchClass>) {
    tree.visit_post_order_mut(&mut |node| {
        if let Value::Variable(var) = &mut node.value {
            if var.name == name {
                var.class = class;
            }
        }
    });
}

/// Returns the names of the pattern variables in the tree, in post-order, without duplicates.
pub fn pattern_variables(tree: &Expr) -> Vec<&str> {
    let mut names = Vec::new();
    for node in tree.post_order() {
        if let Value::Variable(var @ Variable { class: Some(_), .. }) = &node.value {
            if !names.contains(&var.name.as_str()) {
                names.push(var.name.as_str());
            }
        }
    }
    names
}

/// Returns the names of the plain variables in the tree, in post-order, without duplicates.
pub fn variables(tree: &Expr) -> Vec<&str> {
    let mut names = Vec::new();
    for node in tree.post_order() {
        if let Value::Variable(var @ Variable { class: None, .. }) = &node.value {
            if !names.contains(&var.name.as_str()) {
                names.push(var.name.as_str());
            }
        }
    }
    names
}

/// Replaces every plain variable named `name` with a copy of `value`, returning the number of
/// replacements.
///
/// Pattern variables are left alone. The copies are not visited again, so `value` may itself
/// contain the variable.
pub fn substitute(tree: &mut Expr, name: &str, value: &Expr) -> usize {
    let mut count = 0;
    tree.visit_post_order_mut(&mut |node| {
        if matches!(&node.value, Value::Variable(var) if var.class.is_none() && var.name == name) {
            *node = value.copy();
            count += 1;
        }
    });
    count
}
