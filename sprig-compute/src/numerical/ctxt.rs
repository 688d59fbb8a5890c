use std::collections::HashMap;
use super::consts;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A context to use when evaluating an expression, containing the values of the variables that
/// can be used within the expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ctxt {
    /// The variables in the context.
    vars: HashMap<String, f64>,

    /// The value of every variable that is not in `vars`.
    fallback: Option<f64>,
}

impl Default for Ctxt {
    /// Creates a context with the constants in [`consts::ALL`].
    fn default() -> Self {
        Self {
            vars: consts::ALL
                .iter()
                .map(|(&name, &value)| (name.to_string(), value))
                .collect(),
            fallback: None,
        }
    }
}

impl Ctxt {
    /// Creates a new empty context.
    pub fn new() -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            fallback: None,
        }
    }

    /// Creates an empty context in which every variable has the given value.
    pub fn uniform(value: f64) -> Ctxt {
        Ctxt {
            vars: HashMap::new(),
            fallback: Some(value),
        }
    }

    /// Add a variable to the context.
    pub fn add_var(&mut self, name: &str, value: f64) {
        self.vars.insert(name.to_string(), value);
    }

    /// Add a variable to the context, returning the context.
    pub fn with_var(mut self, name: &str, value: f64) -> Ctxt {
        self.add_var(name, value);
        self
    }

    /// Get the value of a variable in the context, falling back to the uniform value if there is
    /// one.
    pub fn get_var(&self, name: &str) -> Option<f64> {
        self.vars.get(name).copied().or(self.fallback)
    }

    /// Returns the variables in the context.
    pub fn get_vars(&self) -> &HashMap<String, f64> {
        &self.vars
    }
}
