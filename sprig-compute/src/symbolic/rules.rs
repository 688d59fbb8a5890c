//! Standard rule sets and the groups and pipelines built from them.
//!
//! Rules are written in postfix notation, where `x f g * D` is `x D (f * g)`, the derivative of
//! `f * g` with respect to `x`.

use sprig_parser::MatchClass;
use super::transform::{
    CanonicalOrdering,
    Evaluation,
    Flattening,
    PatternRule,
    Pipeline,
    RuleError,
    Simplification,
    TemplateDifferentiation,
    TransformationGroup,
};

/// Rewrites subtraction and division into addition and multiplication, so that the
/// fully-associative operators can absorb them.
pub const NORMALIZATION_RULES: &[(&str, &str, &str)] = &[
    ("subtract", "f g -", "f -1 g * +"),
    ("double negative", "-1 -1 f * *", "f"),
    ("divide", "f g /", "f g -1 ^ *"),
];

/// Differentiation rules. `x` matches the variable of differentiation, `v` any other variable,
/// and `s` a scalar.
///
/// The rules are binary, so they must run before any flattening.
pub const DIFFERENTIATION_RULES: &[(&str, &str, &str)] = &[
    ("constant", "x s D", "0"),
    ("variable", "x x D", "1"),
    ("independent", "x v D", "0"),
    ("sum", "x f g + D", "x f D x g D +"),
    ("difference", "x f g - D", "x f D x g D -"),
    ("product", "x f g * D", "x f D g * f x g D * +"),
    ("quotient", "x f g / D", "x f D g * f x g D * - g sq /"),
    ("power", "x f s ^ D", "s f s 1 - ^ * x f D *"),
    ("general power", "x f g ^ D", "f g ^ x g D f ln * g x f D * f / + *"),
    ("square", "x f sq D", "2 f * x f D *"),
    ("exp", "x f exp D", "f exp x f D *"),
    ("sin", "x f sin D", "f cos x f D *"),
    ("cos", "x f cos D", "-1 f sin * x f D *"),
    ("ln", "x f ln D", "x f D f /"),
];

/// Builds pattern rules from a table of `(name, pattern, replacement)` in postfix notation.
pub fn build_rules(table: &[(&str, &str, &str)]) -> Result<Vec<PatternRule>, RuleError> {
    table
        .iter()
        .map(|&(name, pattern, replacement)| PatternRule::postfix(name, pattern, replacement))
        .collect()
}

/// Puts an expression into a normal form: subtraction and division are rewritten, nested sums and
/// products are flattened and sorted, constants are folded and identities are removed.
pub fn normalization() -> Result<TransformationGroup, RuleError> {
    Ok(TransformationGroup::new("normalize")
        .with_all(build_rules(NORMALIZATION_RULES)?)
        .with(Flattening)
        .with(CanonicalOrdering)
        .with(Evaluation)
        .with(Simplification))
}

/// Folds constants.
pub fn evaluation() -> TransformationGroup {
    TransformationGroup::new("evaluate").with(Evaluation)
}

/// Removes the identities of addition and multiplication.
pub fn simplification() -> TransformationGroup {
    TransformationGroup::new("simplify").with(Simplification)
}

/// Differentiates `x D f` nodes with the pattern rules in [`DIFFERENTIATION_RULES`].
pub fn differentiation() -> Result<TransformationGroup, RuleError> {
    let rules = build_rules(DIFFERENTIATION_RULES)?
        .into_iter()
        .map(|rule| rule
            .with_class("x", MatchClass::Variable)
            .with_class("v", MatchClass::Variable));
    Ok(TransformationGroup::new("differentiate by rules").with_all(rules))
}

/// Differentiates `x D f` nodes with the operators' derivative templates.
pub fn template_differentiation() -> TransformationGroup {
    TransformationGroup::new("differentiate").with(TemplateDifferentiation)
}

/// Differentiates with the operators' derivative templates, then normalizes the result.
pub fn differentiate() -> Result<Pipeline, RuleError> {
    Ok(Pipeline::new()
        .then(template_differentiation())
        .then(normalization()?))
}

/// Differentiates with the pattern rules, then normalizes the result.
pub fn differentiate_by_rules() -> Result<Pipeline, RuleError> {
    Ok(Pipeline::new()
        .then(differentiation()?)
        .then(normalization()?))
}
