//! # Torsion Formulas
//!
//! Torsion of reinforced concrete members per fib Model Code 2010, 7.3.4.
//! The cross-section is idealised as a thin-walled closed section with
//! effective wall thickness t_ef = d_k / 8 (figure 7.3-18).
//!
//! ## Notation
//!
//! - `T_Ed` = Acting torsional moment (Nmm)
//! - `A_k` = Area enclosed by the centreline of the shear flow (mm²)
//! - `d_k` = Diameter of the largest circle inscribed in the section (mm)
//! - `z_i` = Length of wall segment *i* between shear flow intersections (mm)
//! - `θ` = Inclination of the compression field (degrees)
//!
//! ## Example
//!
//! ```rust
//! use mc2010_core::equations::factors::ApproximationLevel;
//! use mc2010_core::equations::shear::{Mc2010Shear, StrainParams};
//! use mc2010_core::equations::torsion::{t_rd_max, TorsionCapacityParams};
//! use mc2010_core::units::Degrees;
//!
//! let params = TorsionCapacityParams {
//!     f_ck: 30.0,
//!     gamma_c: 1.5,
//!     d_k: 400.0,
//!     a_k: 80_000.0,
//!     theta: Degrees(45.0),
//!     approx_level: ApproximationLevel::Level1,
//!     strain: StrainParams {
//!         e_s: 200_000.0,
//!         a_s: 1000.0,
//!         m_ed: 0.0,
//!         v_ed: 0.0,
//!         n_ed: 0.0,
//!         z: 400.0,
//!         delta_e: 0.0,
//!     },
//! };
//! let t = t_rd_max(&Mc2010Shear, &params).unwrap();
//! assert!((t - 44e6).abs() / 44e6 < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::factors::{self, ApproximationLevel};
use crate::equations::shear::{default_gamma_c, ShearCapacityParams, ShearModel, StrainParams};
use crate::errors::CalcResult;
use crate::units::Degrees;

/// Arguments of T_Rd,max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionCapacityParams {
    /// Characteristic cylinder strength f_ck (MPa)
    pub f_ck: f64,
    /// Partial safety factor γ_c
    #[serde(default = "default_gamma_c")]
    pub gamma_c: f64,
    /// Diameter of the largest inscribed circle d_k (mm)
    pub d_k: f64,
    /// Area enclosed by the shear flow centreline A_k (mm²)
    pub a_k: f64,
    /// Compression field inclination θ
    pub theta: Degrees,
    pub approx_level: ApproximationLevel,
    pub strain: StrainParams,
}

/// Arguments of the combined torsion and shear check.
///
/// `fck` feeds the shear resistance and `f_ck` the torsion resistance.
/// They normally hold the same strength; they are kept apart so each
/// resistance can be evaluated with the value its own clause asks for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TorsionInteractionParams {
    /// Acting torsional moment T_Ed (Nmm)
    pub t_ed: f64,
    pub approx_level: ApproximationLevel,
    /// Strength passed to V_Rd,max (MPa)
    pub fck: f64,
    /// Web width b_w (mm)
    pub bw: f64,
    pub theta: Degrees,
    /// Stirrup inclination α
    pub alfa: Degrees,
    /// Strength passed to T_Rd,max (MPa)
    pub f_ck: f64,
    pub d_k: f64,
    pub a_k: f64,
    #[serde(default = "default_gamma_c")]
    pub gamma_c: f64,
    /// Strain state; `strain.v_ed` is the acting shear force V_Ed
    pub strain: StrainParams,
}

impl TorsionInteractionParams {
    /// Parameters forwarded to T_Rd,max
    pub fn torsion_capacity(&self) -> TorsionCapacityParams {
        TorsionCapacityParams {
            f_ck: self.f_ck,
            gamma_c: self.gamma_c,
            d_k: self.d_k,
            a_k: self.a_k,
            theta: self.theta,
            approx_level: self.approx_level,
            strain: self.strain,
        }
    }

    /// Parameters forwarded to V_Rd,max
    pub fn shear_capacity(&self) -> ShearCapacityParams {
        ShearCapacityParams {
            approx_level: self.approx_level,
            fck: self.fck,
            bw: self.bw,
            theta: self.theta,
            alfa: self.alfa,
            gamma_c: self.gamma_c,
            strain: self.strain,
        }
    }
}

/// Shear force in wall *i* due to torsion, eq. (7.3-53)
///
/// ```text
/// V_Ed,i = T_Ed z_i / (2 A_k)
/// ```
///
/// `a_k == 0` is not guarded and yields an infinite or NaN result.
#[inline]
pub fn v_ed_ti(t_ed: f64, a_k: f64, z_i: f64) -> f64 {
    t_ed * z_i / (2.0 * a_k)
}

/// Maximum torsional resistance, eq. (7.3-55)
///
/// ```text
/// T_Rd,max = k_c f_ck / γ_c t_ef 2 A_k sinθ cosθ
/// k_c = η_fc k_ε
/// ```
///
/// For Level III, k_ε is found with θ_min but the sinθ cosθ term still
/// uses the θ given in `params`.
///
/// # Errors
///
/// [`crate::CalcError::DomainError`] when `f_ck <= 0`.
pub fn t_rd_max<M: ShearModel + ?Sized>(model: &M, params: &TorsionCapacityParams) -> CalcResult<f64> {
    let t_ef = factors::effective_wall_thickness(params.d_k);
    let nfc = factors::nfc(params.f_ck)?;

    let k_epsilon = match params.approx_level {
        ApproximationLevel::Level1 => factors::K_EPSILON_LEVEL_1,
        level @ (ApproximationLevel::Level2 | ApproximationLevel::Level3) => {
            let eps_x = model.epsilon_x(&params.strain);
            factors::k_epsilon(level, eps_x, params.theta)
        }
    };
    let k_c = nfc * k_epsilon;

    let t = k_c * params.f_ck * t_ef * 2.0 * params.a_k * params.theta.sin() * params.theta.cos()
        / params.gamma_c;

    tracing::debug!(
        level = params.approx_level.number(),
        t_ef,
        nfc,
        k_epsilon,
        t_rd_max = t,
        "t_rd_max"
    );
    Ok(t)
}

/// Left-hand side of the interaction criterion, eq. (7.3-56)
///
/// ```text
/// (T_Ed / T_Rd,max)² + (V_Ed / V_Rd,max)²
/// ```
#[inline]
pub fn interaction_ratio(t_ed: f64, t_rd_max: f64, v_ed: f64, v_rd_max: f64) -> f64 {
    (t_ed / t_rd_max).powi(2) + (v_ed / v_rd_max).powi(2)
}

/// Combined torsion and shear check, eq. (7.3-56)
///
/// Returns `true` when the interaction ratio does not exceed 1.0. A ratio
/// of exactly 1.0 passes. A zero resistance gives an infinite or NaN
/// ratio, which fails.
pub fn t_rd<M: ShearModel + ?Sized>(model: &M, params: &TorsionInteractionParams) -> CalcResult<bool> {
    let t_max = t_rd_max(model, &params.torsion_capacity())?;
    let v_max = model.v_rd_max(&params.shear_capacity())?;

    let ratio = interaction_ratio(params.t_ed, t_max, params.strain.v_ed, v_max);
    if !ratio.is_finite() {
        tracing::warn!(t_rd_max = t_max, v_rd_max = v_max, ratio, "non-finite interaction ratio");
    }
    Ok(ratio <= 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::shear::Mc2010Shear;
    use crate::errors::CalcError;
    use proptest::prelude::*;

    /// Shear model returning fixed values, for testing the torsion formulas alone
    struct FixedShear {
        epsilon_x: f64,
        v_rd_max: f64,
    }

    impl ShearModel for FixedShear {
        fn epsilon_x(&self, _strain: &StrainParams) -> f64 {
            self.epsilon_x
        }

        fn v_rd_max(&self, _params: &ShearCapacityParams) -> CalcResult<f64> {
            Ok(self.v_rd_max)
        }
    }

    fn strain() -> StrainParams {
        StrainParams {
            e_s: 200_000.0,
            a_s: 1500.0,
            m_ed: 100e6,
            v_ed: 150e3,
            n_ed: 0.0,
            z: 450.0,
            delta_e: 0.0,
        }
    }

    fn capacity(level: ApproximationLevel) -> TorsionCapacityParams {
        TorsionCapacityParams {
            f_ck: 30.0,
            gamma_c: 1.5,
            d_k: 400.0,
            a_k: 80_000.0,
            theta: Degrees(45.0),
            approx_level: level,
            strain: strain(),
        }
    }

    fn interaction(t_ed: f64) -> TorsionInteractionParams {
        TorsionInteractionParams {
            t_ed,
            approx_level: ApproximationLevel::Level1,
            fck: 30.0,
            bw: 300.0,
            theta: Degrees(45.0),
            alfa: Degrees(90.0),
            f_ck: 30.0,
            d_k: 400.0,
            a_k: 80_000.0,
            gamma_c: 1.5,
            strain: strain(),
        }
    }

    #[test]
    fn test_v_ed_ti() {
        // 5e6 × 300 / (2 × 80000) = 9375 N
        assert!((v_ed_ti(5e6, 80_000.0, 300.0) - 9375.0).abs() < 1e-9);
    }

    #[test]
    fn test_v_ed_ti_zero_area_not_guarded() {
        assert!(v_ed_ti(5e6, 0.0, 300.0).is_infinite());
        assert!(v_ed_ti(0.0, 0.0, 300.0).is_nan());
    }

    #[test]
    fn test_t_rd_max_worked_example() {
        // t_ef = 50, η_fc = 1, k_ε = 0.55
        // 0.55 × 30 × 50 × 2 × 80000 × 0.5 / 1.5 = 44_000_000 Nmm
        let t = t_rd_max(&Mc2010Shear, &capacity(ApproximationLevel::Level1)).unwrap();
        assert!((t - 44e6).abs() / 44e6 < 1e-6);
    }

    #[test]
    fn test_t_rd_max_level_1_ignores_strain() {
        let base = t_rd_max(&Mc2010Shear, &capacity(ApproximationLevel::Level1)).unwrap();

        let mut params = capacity(ApproximationLevel::Level1);
        params.strain = StrainParams {
            e_s: 1.0,
            a_s: 1.0,
            m_ed: 1e12,
            v_ed: 1e9,
            n_ed: 1e9,
            z: 10.0,
            delta_e: 500.0,
        };
        let other = t_rd_max(&Mc2010Shear, &params).unwrap();
        assert_eq!(base, other);

        // Stub strain is never consulted either
        let stub = FixedShear { epsilon_x: f64::NAN, v_rd_max: 1.0 };
        assert_eq!(t_rd_max(&stub, &params).unwrap(), base);
    }

    #[test]
    fn test_t_rd_max_nfc_clamped_below_30_mpa() {
        // f_ck = 20: η_fc would be 1.145 unclamped
        let mut params = capacity(ApproximationLevel::Level1);
        params.f_ck = 20.0;
        let t = t_rd_max(&Mc2010Shear, &params).unwrap();
        let expected = 0.55 * 20.0 * 50.0 * 2.0 * 80_000.0 * 0.5 / 1.5;
        assert!((t - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_t_rd_max_high_strength_reduced() {
        let mut params = capacity(ApproximationLevel::Level1);
        params.f_ck = 60.0;
        let t = t_rd_max(&Mc2010Shear, &params).unwrap();
        let expected = 0.5_f64.cbrt() * 0.55 * 60.0 * 50.0 * 2.0 * 80_000.0 * 0.5 / 1.5;
        assert!((t - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_t_rd_max_level_2_with_stub() {
        // ε_x = 0.002, θ = 45°: ε_1 = 0.002 + 0.004 = 0.006, k_ε = 1/(1.2 + 0.33) = 0.65359 → 0.65
        let stub = FixedShear { epsilon_x: 0.002, v_rd_max: 1.0 };
        let t = t_rd_max(&stub, &capacity(ApproximationLevel::Level2)).unwrap();
        let expected = 0.65 * 30.0 * 50.0 * 2.0 * 80_000.0 * 0.5 / 1.5;
        assert!((t - expected).abs() / expected < 1e-9);

        // ε_x = 0.004: ε_1 = 0.004 + 0.006 = 0.010, k_ε = 1/1.75
        let stub = FixedShear { epsilon_x: 0.004, v_rd_max: 1.0 };
        let t = t_rd_max(&stub, &capacity(ApproximationLevel::Level2)).unwrap();
        let expected = (1.0 / 1.75) * 30.0 * 50.0 * 2.0 * 80_000.0 * 0.5 / 1.5;
        assert!((t - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_t_rd_max_level_3_keeps_input_theta_for_trig() {
        // ε_x = 0.001 → θ_min = 30°, ε_1 = 0.001 + 0.003 × 3 = 0.010, k_ε = 1/1.75
        // Trig term uses θ = 35° from the input, not θ_min
        let stub = FixedShear { epsilon_x: 0.001, v_rd_max: 1.0 };
        let mut params = capacity(ApproximationLevel::Level3);
        params.theta = Degrees(35.0);
        let t = t_rd_max(&stub, &params).unwrap();

        let theta = 35.0_f64.to_radians();
        let expected = (1.0 / 1.75) * 30.0 * 50.0 * 2.0 * 80_000.0 * theta.sin() * theta.cos() / 1.5;
        assert!((t - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_t_rd_max_domain_error() {
        let mut params = capacity(ApproximationLevel::Level1);
        params.f_ck = -10.0;
        let err = t_rd_max(&Mc2010Shear, &params).unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_invalid_level_from_integer() {
        let err = ApproximationLevel::try_from(4u8).unwrap_err();
        assert!(matches!(err, CalcError::InvalidApproximationLevel { level: 4 }));
    }

    #[test]
    fn test_t_rd_passes_light_load() {
        let stub = FixedShear { epsilon_x: 0.0, v_rd_max: 1e6 };
        let mut params = interaction(5e6);
        params.strain.v_ed = 100e3;
        // (5/44)² + (0.1)² = 0.0229
        assert!(t_rd(&stub, &params).unwrap());
    }

    #[test]
    fn test_t_rd_fails_overload() {
        let stub = FixedShear { epsilon_x: 0.0, v_rd_max: 1e6 };
        let params = interaction(50e6);
        assert!(!t_rd(&stub, &params).unwrap());
    }

    #[test]
    fn test_t_rd_boundary_inclusive() {
        let stub = FixedShear { epsilon_x: 0.0, v_rd_max: 1e6 };
        let mut params = interaction(0.0);
        params.strain.v_ed = 0.0;

        // T_Ed equal to T_Rd,max gives a ratio of exactly 1.0
        params.t_ed = t_rd_max(&stub, &params.torsion_capacity()).unwrap();
        assert!(t_rd(&stub, &params).unwrap());

        params.t_ed *= 1.0 + 1e-12;
        assert!(!t_rd(&stub, &params).unwrap());
    }

    #[test]
    fn test_t_rd_zero_shear_capacity_fails() {
        let stub = FixedShear { epsilon_x: 0.0, v_rd_max: 0.0 };
        let params = interaction(1e6);
        assert!(!t_rd(&stub, &params).unwrap());
    }

    #[test]
    fn test_t_rd_routes_strengths_separately() {
        struct RecordingShear;
        impl ShearModel for RecordingShear {
            fn epsilon_x(&self, _strain: &StrainParams) -> f64 {
                0.0
            }
            fn v_rd_max(&self, params: &ShearCapacityParams) -> CalcResult<f64> {
                // Shear side must see `fck`, not `f_ck`
                assert_eq!(params.fck, 40.0);
                Ok(1e9)
            }
        }

        let mut params = interaction(1e6);
        params.fck = 40.0;
        params.f_ck = -1.0;
        // Torsion side sees the invalid `f_ck`
        assert!(t_rd(&RecordingShear, &params).is_err());

        params.f_ck = 30.0;
        assert!(t_rd(&RecordingShear, &params).unwrap());
    }

    #[test]
    fn test_interaction_ratio() {
        assert_eq!(interaction_ratio(1.0, 2.0, 1.0, 2.0), 0.5);
        assert_eq!(interaction_ratio(0.0, 1.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn test_t_rd_default_gamma_c_from_json() {
        let json = r#"{
            "t_ed": 5e6, "approx_level": 1, "fck": 30.0, "bw": 300.0,
            "theta": 45.0, "alfa": 90.0, "f_ck": 30.0, "d_k": 400.0, "a_k": 80000.0,
            "strain": {"e_s": 200000.0, "a_s": 1500.0, "m_ed": 0.0, "v_ed": 0.0,
                       "n_ed": 0.0, "z": 450.0, "delta_e": 0.0}
        }"#;
        let params: TorsionInteractionParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.gamma_c, 1.5);

        let bad = json.replace("\"approx_level\": 1", "\"approx_level\": 4");
        assert!(serde_json::from_str::<TorsionInteractionParams>(&bad).is_err());
    }

    proptest! {
        #[test]
        fn prop_v_ed_ti_linear_in_torsion(t_ed in 1.0..1e9f64, a_k in 1.0..1e7f64, z_i in 1.0..5e3f64) {
            let single = v_ed_ti(t_ed, a_k, z_i);
            let double = v_ed_ti(2.0 * t_ed, a_k, z_i);
            prop_assert!((double - 2.0 * single).abs() <= 1e-12 * double.abs());

            let double_z = v_ed_ti(t_ed, a_k, 2.0 * z_i);
            prop_assert!((double_z - 2.0 * single).abs() <= 1e-12 * double_z.abs());

            let double_a = v_ed_ti(t_ed, 2.0 * a_k, z_i);
            prop_assert!((2.0 * double_a - single).abs() <= 1e-12 * single.abs());
        }

        #[test]
        fn prop_t_rd_max_monotonic_in_area(
            a_k in 1e3..1e6f64,
            extra in 0.0..1e6f64,
            level in 1u8..=3,
            eps_x in 0.0..0.003f64,
        ) {
            let stub = FixedShear { epsilon_x: eps_x, v_rd_max: 1.0 };
            let mut params = capacity(ApproximationLevel::try_from(level).unwrap());
            params.a_k = a_k;
            let small = t_rd_max(&stub, &params).unwrap();
            params.a_k = a_k + extra;
            let large = t_rd_max(&stub, &params).unwrap();
            prop_assert!(large >= small);
        }

        #[test]
        fn prop_k_epsilon_never_above_cap(
            eps_x in 0.0..0.01f64,
            theta in 20.0..45.0f64,
            level in 2u8..=3,
            f_ck in 12.0..90.0f64,
        ) {
            let stub = FixedShear { epsilon_x: eps_x, v_rd_max: 1.0 };
            let mut params = capacity(ApproximationLevel::try_from(level).unwrap());
            params.theta = Degrees(theta);
            params.f_ck = f_ck;
            let t = t_rd_max(&stub, &params).unwrap();

            // Largest possible value: η_fc = 1, k_ε = 0.65
            let th = theta.to_radians();
            let bound = 0.65 * f_ck * 50.0 * 2.0 * 80_000.0 * th.sin() * th.cos() / 1.5;
            prop_assert!(t <= bound * (1.0 + 1e-12));
        }
    }
}
