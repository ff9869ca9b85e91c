//! # Strength Reduction Factors
//!
//! Reduction factors shared by the shear and torsion resistances of
//! fib Model Code 2010, 7.3.3 and 7.3.4.
//!
//! ```text
//! k_c = η_fc × k_ε
//!
//! η_fc = min((30 / f_ck)^(1/3), 1.0)
//! k_ε  = 0.55                                  Level I
//! k_ε  = min(1 / (1.2 + 55 ε_1), 0.65)         Level II / III
//! ε_1  = ε_x + (ε_x + 0.002) cot²θ
//! θ_min = 20° + 10000 ε_x                      Level III
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::Degrees;

/// Fixed k_ε for Level I approximation
pub const K_EPSILON_LEVEL_1: f64 = 0.55;

/// Upper bound on k_ε for Levels II and III
pub const K_EPSILON_MAX: f64 = 0.65;

/// Reference strength in the brittleness factor η_fc (MPa)
pub const NFC_REFERENCE_STRENGTH_MPA: f64 = 30.0;

/// Approximation level for members with shear reinforcement.
///
/// Level I is the simplest and most conservative, Level III the most
/// refined. Only these three levels exist; converting any other integer
/// fails with [`CalcError::InvalidApproximationLevel`].
///
/// Serializes as the bare integer `1`, `2` or `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "i64", into = "i64")]
pub enum ApproximationLevel {
    /// Level I: constant k_ε = 0.55
    Level1,
    /// Level II: k_ε from the longitudinal strain with the given θ
    #[default]
    Level2,
    /// Level III: k_ε from the longitudinal strain with θ_min
    Level3,
}

impl ApproximationLevel {
    /// All levels, for UI selection
    pub const ALL: [ApproximationLevel; 3] = [
        ApproximationLevel::Level1,
        ApproximationLevel::Level2,
        ApproximationLevel::Level3,
    ];

    /// Numeric level (1, 2 or 3)
    pub fn number(&self) -> u8 {
        match self {
            ApproximationLevel::Level1 => 1,
            ApproximationLevel::Level2 => 2,
            ApproximationLevel::Level3 => 3,
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ApproximationLevel::Level1 => "Level I",
            ApproximationLevel::Level2 => "Level II",
            ApproximationLevel::Level3 => "Level III",
        }
    }
}

impl TryFrom<i64> for ApproximationLevel {
    type Error = CalcError;

    fn try_from(level: i64) -> CalcResult<Self> {
        match level {
            1 => Ok(ApproximationLevel::Level1),
            2 => Ok(ApproximationLevel::Level2),
            3 => Ok(ApproximationLevel::Level3),
            other => Err(CalcError::invalid_approximation_level(other)),
        }
    }
}

impl TryFrom<u8> for ApproximationLevel {
    type Error = CalcError;

    fn try_from(level: u8) -> CalcResult<Self> {
        ApproximationLevel::try_from(i64::from(level))
    }
}

impl From<ApproximationLevel> for i64 {
    fn from(level: ApproximationLevel) -> Self {
        i64::from(level.number())
    }
}

impl std::fmt::Display for ApproximationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Effective wall thickness of the idealised hollow section, t_ef = d_k / 8
#[inline]
pub fn effective_wall_thickness(d_k: f64) -> f64 {
    d_k / 8.0
}

/// Brittleness factor η_fc = min((30 / f_ck)^(1/3), 1.0).
///
/// # Errors
///
/// [`CalcError::DomainError`] when `f_ck` is not strictly positive: the
/// cube root of a negative ratio has no meaning for a concrete strength.
pub fn nfc(f_ck: f64) -> CalcResult<f64> {
    // Also rejects NaN
    if !(f_ck > 0.0) {
        return Err(CalcError::domain_error(
            "f_ck",
            f_ck.to_string(),
            "Characteristic strength must be positive for (30/f_ck)^(1/3)",
        ));
    }
    Ok((NFC_REFERENCE_STRENGTH_MPA / f_ck).cbrt().min(1.0))
}

/// Principal tensile strain ε_1 = ε_x + (ε_x + 0.002) cot²θ
#[inline]
pub fn epsilon_1(epsilon_x: f64, theta: Degrees) -> f64 {
    epsilon_x + (epsilon_x + 0.002) * theta.cot().powi(2)
}

/// Minimum compression field inclination for Level III, θ_min = 20° + 10000 ε_x
#[inline]
pub fn theta_min(epsilon_x: f64) -> Degrees {
    Degrees(20.0 + 10_000.0 * epsilon_x)
}

/// Strain reduction factor k_ε for the given approximation level.
///
/// `theta` is the compression field inclination supplied by the caller.
/// Level III ignores it and uses [`theta_min`] instead.
pub fn k_epsilon(level: ApproximationLevel, epsilon_x: f64, theta: Degrees) -> f64 {
    let theta_for_strain = match level {
        ApproximationLevel::Level1 => return K_EPSILON_LEVEL_1,
        ApproximationLevel::Level2 => theta,
        ApproximationLevel::Level3 => theta_min(epsilon_x),
    };
    let eps_1 = epsilon_1(epsilon_x, theta_for_strain);
    (1.0 / (1.2 + 55.0 * eps_1)).min(K_EPSILON_MAX)
}
