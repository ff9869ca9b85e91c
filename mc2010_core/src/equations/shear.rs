//! # Shear Helpers
//!
//! Longitudinal strain ε_x and the crushing resistance V_Rd,max of the
//! compression field, fib Model Code 2010, 7.3.3.
//!
//! The torsion checks consume these through the [`ShearModel`] trait so
//! that any shear implementation (or a stub in tests) can be injected.
//! [`Mc2010Shear`] is the implementation that ships with the crate.
//!
//! ## Sign Conventions
//!
//! - `n_ed`: positive for tension, negative for compression
//! - `m_ed`, `v_ed`: absolute design values
//!
//! ## Example
//!
//! ```rust
//! use mc2010_core::equations::shear::{Mc2010Shear, ShearModel, StrainParams};
//!
//! let strain = StrainParams {
//!     e_s: 200_000.0,
//!     a_s: 1000.0,
//!     m_ed: 50e6,
//!     v_ed: 100e3,
//!     n_ed: 0.0,
//!     z: 400.0,
//!     delta_e: 0.0,
//! };
//! let eps_x = Mc2010Shear.epsilon_x(&strain);
//! assert!(eps_x > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::factors::{self, ApproximationLevel, K_EPSILON_LEVEL_1};
use crate::errors::CalcResult;
use crate::settings::DEFAULT_GAMMA_C;
use crate::units::Degrees;

/// Arguments of ε_x: reinforcement, internal forces and lever arm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainParams {
    /// Modulus of elasticity of the longitudinal reinforcement E_s (MPa)
    pub e_s: f64,
    /// Area of longitudinal tension reinforcement A_s (mm²)
    pub a_s: f64,
    /// Design bending moment M_Ed (Nmm)
    pub m_ed: f64,
    /// Design shear force V_Ed (N)
    pub v_ed: f64,
    /// Design axial force N_Ed (N), tension positive
    pub n_ed: f64,
    /// Lever arm between compression chord and reinforcement centroid (mm)
    pub z: f64,
    /// Load eccentricity Δe (mm)
    pub delta_e: f64,
}

/// Arguments of V_Rd,max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShearCapacityParams {
    pub approx_level: ApproximationLevel,
    /// Characteristic cylinder strength f_ck (MPa)
    pub fck: f64,
    /// Web width b_w (mm)
    pub bw: f64,
    /// Compression field inclination θ
    pub theta: Degrees,
    /// Stirrup inclination α
    pub alfa: Degrees,
    /// Partial safety factor γ_c
    #[serde(default = "default_gamma_c")]
    pub gamma_c: f64,
    /// Strain state; `strain.z` is the lever arm of the web
    pub strain: StrainParams,
}

pub(crate) fn default_gamma_c() -> f64 {
    DEFAULT_GAMMA_C
}

/// Shear formulas consumed by the torsion checks.
///
/// Both methods must be deterministic. Implementations are free to ignore
/// parameters they do not need.
pub trait ShearModel {
    /// Longitudinal strain at mid-depth of the effective shear depth, ε_x
    fn epsilon_x(&self, strain: &StrainParams) -> f64;

    /// Maximum shear resistance limited by crushing of the compression field (N)
    fn v_rd_max(&self, params: &ShearCapacityParams) -> CalcResult<f64>;
}

impl<M: ShearModel + ?Sized> ShearModel for &M {
    fn epsilon_x(&self, strain: &StrainParams) -> f64 {
        (**self).epsilon_x(strain)
    }

    fn v_rd_max(&self, params: &ShearCapacityParams) -> CalcResult<f64> {
        (**self).v_rd_max(params)
    }
}

/// Shear formulas of fib Model Code 2010, 7.3.3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mc2010Shear;

impl ShearModel for Mc2010Shear {
    /// Eq. (7.3-16):
    ///
    /// ```text
    /// ε_x = (M_Ed / z + V_Ed + N_Ed (1/2 + Δe / z)) / (2 E_s A_s)
    /// ```
    ///
    /// with `M_Ed >= V_Ed Δe`. Negative strains are taken as zero.
    fn epsilon_x(&self, s: &StrainParams) -> f64 {
        let m_ed = s.m_ed.max(s.v_ed * s.delta_e);
        let eps = (m_ed / s.z + s.v_ed + s.n_ed * (0.5 + s.delta_e / s.z)) / (2.0 * s.e_s * s.a_s);
        eps.max(0.0)
    }

    /// Level I, eq. (7.3-26):
    ///
    /// ```text
    /// V_Rd,max = k_c f_ck / γ_c b_w z sinθ cosθ,   k_c = 0.55 η_fc
    /// ```
    ///
    /// Levels II and III, eq. (7.3-24):
    ///
    /// ```text
    /// V_Rd,max = k_c f_ck / γ_c b_w z (cotθ + cotα) / (1 + cot²θ)
    /// ```
    fn v_rd_max(&self, p: &ShearCapacityParams) -> CalcResult<f64> {
        let nfc = factors::nfc(p.fck)?;
        let z = p.strain.z;
        let design_strength = p.fck / p.gamma_c;

        let v = match p.approx_level {
            ApproximationLevel::Level1 => {
                let k_c = nfc * K_EPSILON_LEVEL_1;
                k_c * design_strength * p.bw * z * p.theta.sin() * p.theta.cos()
            }
            ApproximationLevel::Level2 | ApproximationLevel::Level3 => {
                let eps_x = self.epsilon_x(&p.strain);
                let k_c = nfc * factors::k_epsilon(p.approx_level, eps_x, p.theta);
                let cot_theta = p.theta.cot();
                k_c * design_strength * p.bw * z * (cot_theta + p.alfa.cot()) / (1.0 + cot_theta.powi(2))
            }
        };

        tracing::trace!(level = p.approx_level.number(), v_rd_max = v, "v_rd_max");
        Ok(v)
    }
}
