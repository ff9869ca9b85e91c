//! # Design Settings
//!
//! Defaults applied when an input omits them. Every field has a serde
//! default so a JSON input may leave out the whole `settings` block.
//!
//! ```rust
//! use mc2010_core::settings::DesignSettings;
//!
//! let settings: DesignSettings = serde_json::from_str("{}").unwrap();
//! assert_eq!(settings.gamma_c, 1.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::factors::ApproximationLevel;
use crate::errors::{CalcError, CalcResult};

/// Partial safety factor for concrete, persistent and transient design situations
pub const DEFAULT_GAMMA_C: f64 = 1.5;

/// Design code edition the equations follow
pub const DESIGN_CODE: &str = "fib Model Code 2010";

/// Project-wide defaults for the torsion and shear checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignSettings {
    /// Partial safety factor γ_c for concrete
    pub gamma_c: f64,

    /// Approximation level used when an input does not name one
    pub approx_level: ApproximationLevel,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            gamma_c: DEFAULT_GAMMA_C,
            approx_level: ApproximationLevel::default(),
        }
    }
}

impl DesignSettings {
    /// Override γ_c, e.g. 1.2 for accidental design situations
    pub fn with_gamma_c(mut self, gamma_c: f64) -> Self {
        self.gamma_c = gamma_c;
        self
    }

    /// Override the default approximation level
    pub fn with_approx_level(mut self, level: ApproximationLevel) -> Self {
        self.approx_level = level;
        self
    }

    /// Validate settings.
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.gamma_c > 0.0) {
            return Err(CalcError::invalid_input(
                "gamma_c",
                self.gamma_c.to_string(),
                "Safety factor must be positive",
            ));
        }
        Ok(())
    }
}
