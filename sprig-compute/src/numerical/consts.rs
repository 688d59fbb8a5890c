//! Constants available in the default [`Ctxt`](super::Ctxt).

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Euler's number.
pub const E: f64 = std::f64::consts::E;

pub const PI: f64 = std::f64::consts::PI;

pub const TAU: f64 = std::f64::consts::TAU;

/// The golden ratio.
pub static PHI: Lazy<f64> = Lazy::new(|| (1.0 + 5.0_f64.sqrt()) / 2.0);

/// The named constants, by name.
pub static ALL: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| HashMap::from([
    ("e", E),
    ("phi", *PHI),
    ("pi", PI),
    ("tau", TAU),
]));
