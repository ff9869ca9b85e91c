//! # Unit Types
//!
//! Type-safe wrappers for angles. Model Code inputs give every angle in
//! degrees while `f64` trigonometry works in radians; keeping the two as
//! distinct types makes a missed conversion a compile error.
//!
//! Forces, moments and lengths stay plain `f64` in N, Nmm and mm. Each
//! field documents its unit in its name or doc comment.
//!
//! ## Example
//!
//! ```rust
//! use mc2010_core::units::{Degrees, Radians};
//!
//! let theta = Degrees(45.0);
//! let rad: Radians = theta.into();
//! assert!((rad.0 - std::f64::consts::FRAC_PI_4).abs() < 1e-12);
//! assert!((theta.cot() - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Convert to radians
    #[inline]
    pub fn to_radians(self) -> Radians {
        self.into()
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.to_radians().0.sin()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.to_radians().0.cos()
    }

    #[inline]
    pub fn tan(self) -> f64 {
        self.to_radians().0.tan()
    }

    /// Cotangent, `1 / tan`. Infinite at 0°.
    #[inline]
    pub fn cot(self) -> f64 {
        1.0 / self.tan()
    }
}

impl std::fmt::Display for Degrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.0)
    }
}
