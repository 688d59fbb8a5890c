use sprig_parser::{parse, parse_postfix, Expr, MatchClass};
use std::fmt;
use crate::symbolic::pattern::{self, match_root, pattern_variables, patternify, set_class};
use super::Transformation;

/// An error that can occur when building a [`PatternRule`].
#[derive(Debug)]
pub enum RuleError {
    /// The pattern or replacement could not be parsed.
    Parse {
        /// The name of the rule.
        rule: String,

        /// The text that failed to parse.
        source: String,

        /// The parse error.
        error: sprig_error::Error,
    },

    /// The replacement uses a pattern variable that the pattern never binds.
    UnboundVariable {
        /// The name of the rule.
        rule: String,

        /// The name of the unbound variable.
        variable: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse { rule, source, error } => {
                write!(f, "rule `{}`: could not parse `{}`: {}", rule, source, error)
            },
            Self::UnboundVariable { rule, variable } => write!(
                f,
                "rule `{}`: replacement uses `{}`, which the pattern does not bind",
                rule,
                variable,
            ),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { error, .. } => Some(error),
            Self::UnboundVariable { .. } => None,
        }
    }
}

/// A rewrite rule: any node matching the pattern is replaced by the replacement, with the pattern
/// variables substituted by copies of what they matched.
///
/// Variables in the pattern and replacement become pattern variables when the rule is built (see
/// [`patternify`]). A variable named `s` or `s` followed by digits only matches scalars; every
/// other variable matches anything. [`PatternRule::with_class`] and [`PatternRule::with_literal`]
/// adjust this afterwards.
///
/// ```
/// use sprig_compute::symbolic::transform::{PatternRule, Transformation};
/// use sprig_parser::parse;
///
/// let rule = PatternRule::infix("double", "f + f", "2 * f").unwrap();
/// let mut expr = parse("sin ( x ) + sin ( x )").unwrap();
/// assert!(rule.apply_at_root(&mut expr));
/// assert_eq!(expr.to_string(), "2 * sin ( x )");
/// ```
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    pattern: Expr,
    replacement: Expr,
}

impl PatternRule {
    /// Creates a rule from a pattern and a replacement tree.
    ///
    /// Returns an error if the replacement uses a pattern variable that does not appear in the
    /// pattern.
    pub fn new(name: impl Into<String>, mut pattern: Expr, mut replacement: Expr) -> Result<Self, RuleError> {
        let name = name.into();
        patternify(&mut pattern);
        patternify(&mut replacement);

        let bound = pattern_variables(&pattern);
        if let Some(unbound) = pattern_variables(&replacement)
            .into_iter()
            .find(|var| !bound.contains(var))
        {
            return Err(RuleError::UnboundVariable { rule: name, variable: unbound.to_string() });
        }

        Ok(Self { name, pattern, replacement })
    }

    /// Creates a rule from an infix pattern and replacement.
    pub fn infix(name: impl Into<String>, pattern: &str, replacement: &str) -> Result<Self, RuleError> {
        Self::from_source(name.into(), pattern, replacement, parse)
    }

    /// Creates a rule from a postfix (reverse-Polish) pattern and replacement.
    pub fn postfix(name: impl Into<String>, pattern: &str, replacement: &str) -> Result<Self, RuleError> {
        Self::from_source(name.into(), pattern, replacement, parse_postfix)
    }

    fn from_source(
        name: String,
        pattern: &str,
        replacement: &str,
        parse: fn(&str) -> Result<Expr, sprig_error::Error>,
    ) -> Result<Self, RuleError> {
        let parse_one = |source: &str| parse(source).map_err(|error| RuleError::Parse {
            rule: name.clone(),
            source: source.to_string(),
            error,
        });
        let pattern = parse_one(pattern)?;
        let replacement = parse_one(replacement)?;
        Self::new(name, pattern, replacement)
    }

    /// Restricts the pattern variable with the given name to the given class of nodes.
    pub fn with_class(mut self, variable: &str, class: MatchClass) -> Self {
        set_class(&mut self.pattern, variable, Some(class));
        set_class(&mut self.replacement, variable, Some(class));
        self
    }

    /// Makes the variable with the given name literal: it only matches a variable of the same
    /// name, and is copied verbatim into the replacement.
    pub fn with_literal(mut self, variable: &str) -> Self {
        set_class(&mut self.pattern, variable, None);
        set_class(&mut self.replacement, variable, None);
        self
    }

    /// Returns the pattern of the rule.
    pub fn pattern(&self) -> &Expr {
        &self.pattern
    }

    /// Returns the replacement of the rule.
    pub fn replacement(&self) -> &Expr {
        &self.replacement
    }
}

impl Transformation for PatternRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply_at_root(&self, node: &mut Expr) -> bool {
        let new = match match_root(node, &self.pattern) {
            Some(bindings) => pattern::instantiate(&self.replacement, &bindings),
            None => return false,
        };
        *node = new;
        true
    }
}
