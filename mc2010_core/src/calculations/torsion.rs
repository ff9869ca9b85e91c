//! # Torsion Member Check
//!
//! Checks a reinforced concrete member under combined torsion and shear
//! per fib Model Code 2010, 7.3.4, and reports every intermediate value.
//!
//! ## Assumptions
//!
//! - Cross-section idealised as a thin-walled closed section (t_ef = d_k / 8)
//! - Same compression field inclination θ for shear and torsion
//! - Longitudinal strain ε_x from the bundled [`Mc2010Shear`] model unless
//!   another [`ShearModel`] is passed to [`calculate_with`]
//!
//! ## Example
//!
//! ```rust
//! use mc2010_core::calculations::torsion::{calculate, TorsionInput};
//!
//! let input = TorsionInput::example();
//! let result = calculate(&input).unwrap();
//! assert!(result.passes());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::factors::{self, ApproximationLevel};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::shear::{Mc2010Shear, ShearModel, StrainParams};
use crate::equations::torsion::{self as formulas, TorsionInteractionParams};
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;
use crate::units::Degrees;

/// Geometry of the idealised hollow section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionSection {
    /// Diameter of the largest circle inscribed in the cross-section (mm)
    pub d_k_mm: f64,
    /// Area enclosed by the centreline of the shear flow (mm²)
    pub a_k_mm2: f64,
    /// Web width for the shear check (mm)
    pub bw_mm: f64,
    /// Lever arm of the internal forces (mm)
    pub z_mm: f64,
    /// Lengths z_i of the walls between shear flow intersections (mm).
    /// Optional; when given, the wall shear forces V_Ed,i are reported.
    #[serde(default)]
    pub wall_lengths_mm: Vec<f64>,
}

/// Concrete strengths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteStrength {
    /// Characteristic cylinder strength f_ck used for T_Rd,max (MPa)
    pub f_ck_mpa: f64,
    /// Strength used for V_Rd,max (MPa); defaults to `f_ck_mpa`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fck_shear_mpa: Option<f64>,
}

impl ConcreteStrength {
    /// Strength passed to the shear resistance
    pub fn shear_strength_mpa(&self) -> f64 {
        self.fck_shear_mpa.unwrap_or(self.f_ck_mpa)
    }
}

/// Longitudinal tension reinforcement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalReinforcement {
    /// Modulus of elasticity E_s (MPa)
    #[serde(default = "default_e_s")]
    pub e_s_mpa: f64,
    /// Area A_s (mm²)
    pub a_s_mm2: f64,
}

fn default_e_s() -> f64 {
    200_000.0
}

/// Design actions at the checked section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignActions {
    /// Torsional moment T_Ed (Nmm)
    pub t_ed_nmm: f64,
    /// Bending moment M_Ed (Nmm)
    pub m_ed_nmm: f64,
    /// Shear force V_Ed (N)
    pub v_ed_n: f64,
    /// Axial force N_Ed (N), tension positive
    #[serde(default)]
    pub n_ed_n: f64,
    /// Load eccentricity Δe (mm)
    #[serde(default)]
    pub delta_e_mm: f64,
}

fn default_alfa() -> Degrees {
    Degrees(90.0)
}

/// Input parameters for a torsion and shear member check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "B-1",
///   "section": { "d_k_mm": 400.0, "a_k_mm2": 80000.0, "bw_mm": 300.0, "z_mm": 450.0 },
///   "concrete": { "f_ck_mpa": 30.0 },
///   "reinforcement": { "a_s_mm2": 1500.0 },
///   "actions": { "t_ed_nmm": 5e6, "m_ed_nmm": 60e6, "v_ed_n": 80e3 },
///   "theta": 40.0,
///   "approx_level": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionInput {
    /// User label for this member (e.g., "B-1", "Edge Beam")
    pub label: String,
    pub section: TorsionSection,
    pub concrete: ConcreteStrength,
    pub reinforcement: LongitudinalReinforcement,
    pub actions: DesignActions,
    /// Compression field inclination θ
    pub theta: Degrees,
    /// Stirrup inclination α (90° for vertical stirrups)
    #[serde(default = "default_alfa")]
    pub alfa: Degrees,
    /// Approximation level; falls back to `settings.approx_level`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approx_level: Option<ApproximationLevel>,
    #[serde(default)]
    pub settings: DesignSettings,
}

impl TorsionInput {
    /// A representative rectangular edge beam, used for templates and docs
    pub fn example() -> Self {
        TorsionInput {
            label: "B-1".to_string(),
            section: TorsionSection {
                d_k_mm: 400.0,
                a_k_mm2: 80_000.0,
                bw_mm: 300.0,
                z_mm: 450.0,
                wall_lengths_mm: vec![200.0, 400.0, 200.0, 400.0],
            },
            concrete: ConcreteStrength {
                f_ck_mpa: 30.0,
                fck_shear_mpa: None,
            },
            reinforcement: LongitudinalReinforcement {
                e_s_mpa: 200_000.0,
                a_s_mm2: 1500.0,
            },
            actions: DesignActions {
                t_ed_nmm: 5e6,
                m_ed_nmm: 60e6,
                v_ed_n: 80e3,
                n_ed_n: 0.0,
                delta_e_mm: 0.0,
            },
            theta: Degrees(40.0),
            alfa: Degrees(90.0),
            approx_level: Some(ApproximationLevel::Level2),
            settings: DesignSettings::default(),
        }
    }

    /// Approximation level in effect
    pub fn level(&self) -> ApproximationLevel {
        self.approx_level.unwrap_or(self.settings.approx_level)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("section.d_k_mm", self.section.d_k_mm),
            ("section.a_k_mm2", self.section.a_k_mm2),
            ("section.bw_mm", self.section.bw_mm),
            ("section.z_mm", self.section.z_mm),
            ("concrete.f_ck_mpa", self.concrete.f_ck_mpa),
            ("concrete.fck_shear_mpa", self.concrete.shear_strength_mpa()),
            ("reinforcement.e_s_mpa", self.reinforcement.e_s_mpa),
            ("reinforcement.a_s_mm2", self.reinforcement.a_s_mm2),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be positive"));
            }
        }

        let finite = [
            ("actions.t_ed_nmm", self.actions.t_ed_nmm),
            ("actions.m_ed_nmm", self.actions.m_ed_nmm),
            ("actions.v_ed_n", self.actions.v_ed_n),
            ("actions.n_ed_n", self.actions.n_ed_n),
            ("actions.delta_e_mm", self.actions.delta_e_mm),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be a finite number"));
            }
        }

        for (field, angle) in [("theta", self.theta), ("alfa", self.alfa)] {
            if !(angle.0 > 0.0 && angle.0 <= 90.0) {
                return Err(CalcError::invalid_input(
                    field,
                    angle.0.to_string(),
                    "Angle must be greater than 0° and at most 90°",
                ));
            }
        }

        for (i, z_i) in self.section.wall_lengths_mm.iter().enumerate() {
            if !(*z_i > 0.0) {
                return Err(CalcError::invalid_input(
                    format!("section.wall_lengths_mm[{}]", i),
                    z_i.to_string(),
                    "Wall length must be positive",
                ));
            }
        }

        self.settings.validate()
    }

    /// Arguments of ε_x
    pub fn strain_params(&self) -> StrainParams {
        StrainParams {
            e_s: self.reinforcement.e_s_mpa,
            a_s: self.reinforcement.a_s_mm2,
            m_ed: self.actions.m_ed_nmm,
            v_ed: self.actions.v_ed_n,
            n_ed: self.actions.n_ed_n,
            z: self.section.z_mm,
            delta_e: self.actions.delta_e_mm,
        }
    }

    /// Arguments of the interaction check
    pub fn interaction_params(&self) -> TorsionInteractionParams {
        TorsionInteractionParams {
            t_ed: self.actions.t_ed_nmm,
            approx_level: self.level(),
            fck: self.concrete.shear_strength_mpa(),
            bw: self.section.bw_mm,
            theta: self.theta,
            alfa: self.alfa,
            f_ck: self.concrete.f_ck_mpa,
            d_k: self.section.d_k_mm,
            a_k: self.section.a_k_mm2,
            gamma_c: self.settings.gamma_c,
            strain: self.strain_params(),
        }
    }
}

/// Results from the torsion and shear check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorsionResult {
    pub label: String,
    pub approx_level: ApproximationLevel,

    /// Effective wall thickness t_ef (mm)
    pub t_ef_mm: f64,

    /// Longitudinal strain ε_x (not used by Level I)
    pub epsilon_x: f64,

    /// Maximum torsional resistance T_Rd,max (Nmm)
    pub t_rd_max_nmm: f64,

    /// Maximum shear resistance V_Rd,max (N)
    pub v_rd_max_n: f64,

    /// T_Ed / T_Rd,max
    pub torsion_ratio: f64,

    /// V_Ed / V_Rd,max
    pub shear_ratio: f64,

    /// (T_Ed / T_Rd,max)² + (V_Ed / V_Rd,max)²
    pub interaction_ratio: f64,

    /// Shear force V_Ed,i in each wall listed in the input (N)
    pub wall_shear_forces_n: Vec<f64>,

    /// Interaction ratio ≤ 1.0
    pub passes: bool,

    /// Equations applied, for reports
    pub equations: EquationTracker,
}

impl TorsionResult {
    /// Check if the member passes (interaction ratio ≤ 1.0)
    pub fn passes(&self) -> bool {
        self.passes
    }

    /// Which action contributes most to the interaction ratio
    pub fn governing_condition(&self) -> &'static str {
        if self.torsion_ratio.abs() >= self.shear_ratio.abs() {
            "Torsion"
        } else {
            "Shear"
        }
    }
}

/// Check a member with the bundled Model Code shear formulas.
///
/// # Returns
///
/// * `Ok(TorsionResult)` - Calculation results
/// * `Err(CalcError)` - If inputs are invalid
pub fn calculate(input: &TorsionInput) -> CalcResult<TorsionResult> {
    calculate_with(&Mc2010Shear, input)
}

/// Check a member with a caller-supplied shear model.
pub fn calculate_with<M: ShearModel + ?Sized>(model: &M, input: &TorsionInput) -> CalcResult<TorsionResult> {
    input.validate()?;

    let _span = tracing::debug_span!("torsion_check", label = %input.label).entered();

    let params = input.interaction_params();
    let level = params.approx_level;
    let context = input.label.as_str();
    let mut equations = EquationTracker::new();

    let t_ef_mm = factors::effective_wall_thickness(params.d_k);
    equations.record(Equation::EffectiveWallThickness, context);

    let epsilon_x = model.epsilon_x(&params.strain);
    equations.record(Equation::BrittlenessFactor, context);
    if level != ApproximationLevel::Level1 {
        equations.record(Equation::LongitudinalStrain, context);
        if level == ApproximationLevel::Level3 {
            equations.record(Equation::MinimumInclination, context);
        }
        equations.record(Equation::PrincipalStrain, context);
    }
    equations.record(Equation::StrainReductionFactor, context);

    let t_rd_max_nmm = formulas::t_rd_max(model, &params.torsion_capacity())?;
    equations.record(Equation::TorsionCrushing, context);

    let v_rd_max_n = model.v_rd_max(&params.shear_capacity())?;
    equations.record(
        match level {
            ApproximationLevel::Level1 => Equation::ShearCrushingLevel1,
            ApproximationLevel::Level2 | ApproximationLevel::Level3 => Equation::ShearCrushingRefined,
        },
        context,
    );

    let torsion_ratio = params.t_ed / t_rd_max_nmm;
    let shear_ratio = params.strain.v_ed / v_rd_max_n;
    let interaction_ratio = formulas::interaction_ratio(params.t_ed, t_rd_max_nmm, params.strain.v_ed, v_rd_max_n);
    equations.record(Equation::TorsionShearInteraction, context);

    let wall_shear_forces_n: Vec<f64> = input
        .section
        .wall_lengths_mm
        .iter()
        .map(|&z_i| formulas::v_ed_ti(params.t_ed, params.a_k, z_i))
        .collect();
    if !wall_shear_forces_n.is_empty() {
        equations.record(Equation::TorsionWallShear, context);
    }

    let passes = interaction_ratio <= 1.0;
    tracing::info!(
        level = level.number(),
        t_rd_max_nmm,
        v_rd_max_n,
        interaction_ratio,
        passes,
        "torsion check complete"
    );

    Ok(TorsionResult {
        label: input.label.clone(),
        approx_level: level,
        t_ef_mm,
        epsilon_x,
        t_rd_max_nmm,
        v_rd_max_n,
        torsion_ratio,
        shear_ratio,
        interaction_ratio,
        wall_shear_forces_n,
        passes,
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::torsion::t_rd;

    fn level_1_input() -> TorsionInput {
        let mut input = TorsionInput::example();
        input.theta = Degrees(45.0);
        input.approx_level = Some(ApproximationLevel::Level1);
        input
    }

    #[test]
    fn test_example_passes() {
        let result = calculate(&TorsionInput::example()).unwrap();
        assert!(result.passes());
        assert_eq!(result.approx_level, ApproximationLevel::Level2);
        assert!(result.interaction_ratio > 0.0);
    }

    #[test]
    fn test_level_1_worked_example() {
        let result = calculate(&level_1_input()).unwrap();
        assert_eq!(result.t_ef_mm, 50.0);
        assert!((result.t_rd_max_nmm - 44e6).abs() / 44e6 < 1e-6);
        // 0.55 × 20 × 300 × 450 × 0.5 = 742_500 N
        assert!((result.v_rd_max_n - 742_500.0).abs() / 742_500.0 < 1e-9);
    }

    #[test]
    fn test_matches_interaction_check() {
        for level in ApproximationLevel::ALL {
            let mut input = TorsionInput::example();
            input.approx_level = Some(level);
            input.actions.t_ed_nmm = 30e6;
            input.actions.v_ed_n = 300e3;

            let result = calculate(&input).unwrap();
            let check = t_rd(&Mc2010Shear, &input.interaction_params()).unwrap();
            assert_eq!(result.passes(), check, "level {}", level);
        }
    }

    #[test]
    fn test_overloaded_member_fails() {
        let mut input = level_1_input();
        input.actions.t_ed_nmm = 50e6;
        let result = calculate(&input).unwrap();
        assert!(!result.passes());
        assert_eq!(result.governing_condition(), "Torsion");
    }

    #[test]
    fn test_shear_governs() {
        let mut input = level_1_input();
        input.actions.t_ed_nmm = 1e6;
        input.actions.v_ed_n = 700e3;
        let result = calculate(&input).unwrap();
        assert_eq!(result.governing_condition(), "Shear");
    }

    #[test]
    fn test_wall_shear_forces() {
        let result = calculate(&level_1_input()).unwrap();
        // 5e6 × 200 / 160000 = 6250 N, 5e6 × 400 / 160000 = 12500 N
        assert_eq!(result.wall_shear_forces_n.len(), 4);
        assert!((result.wall_shear_forces_n[0] - 6250.0).abs() < 1e-9);
        assert!((result.wall_shear_forces_n[1] - 12_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_separate_shear_strength() {
        let mut input = level_1_input();
        input.concrete.fck_shear_mpa = Some(45.0);
        let result = calculate(&input).unwrap();
        // Torsion side still uses 30 MPa
        assert!((result.t_rd_max_nmm - 44e6).abs() / 44e6 < 1e-6);
        // Shear side: η_fc = (30/45)^(1/3)
        let expected = (30.0_f64 / 45.0).cbrt() * 0.55 * 30.0 * 300.0 * 450.0 * 0.5;
        assert!((result.v_rd_max_n - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_level_falls_back_to_settings() {
        let mut input = TorsionInput::example();
        input.approx_level = None;
        input.settings.approx_level = ApproximationLevel::Level3;
        let result = calculate(&input).unwrap();
        assert_eq!(result.approx_level, ApproximationLevel::Level3);
        assert!(result.equations.unique_equations().contains(&Equation::MinimumInclination));
    }

    #[test]
    fn test_equations_recorded() {
        let result = calculate(&level_1_input()).unwrap();
        let used = result.equations.unique_equations();
        assert!(used.contains(&Equation::TorsionCrushing));
        assert!(used.contains(&Equation::ShearCrushingLevel1));
        assert!(!used.contains(&Equation::LongitudinalStrain));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = TorsionInput::example();
        input.section.a_k_mm2 = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = TorsionInput::example();
        input.theta = Degrees(0.0);
        assert!(calculate(&input).is_err());

        let mut input = TorsionInput::example();
        input.concrete.f_ck_mpa = -30.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut input = TorsionInput::example();
        input.settings.gamma_c = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = TorsionInput::example();
        input.section.wall_lengths_mm.push(-1.0);
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "label": "B-2",
            "section": { "d_k_mm": 400.0, "a_k_mm2": 80000.0, "bw_mm": 300.0, "z_mm": 450.0 },
            "concrete": { "f_ck_mpa": 30.0 },
            "reinforcement": { "a_s_mm2": 1500.0 },
            "actions": { "t_ed_nmm": 5e6, "m_ed_nmm": 60e6, "v_ed_n": 80e3 },
            "theta": 40.0
        }"#;
        let input: TorsionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.alfa, Degrees(90.0));
        assert_eq!(input.reinforcement.e_s_mpa, 200_000.0);
        assert_eq!(input.settings.gamma_c, 1.5);
        assert_eq!(input.level(), ApproximationLevel::Level2);
        assert!(calculate(&input).is_ok());
    }

    #[test]
    fn test_json_rejects_unknown_level() {
        let mut value = serde_json::to_value(TorsionInput::example()).unwrap();
        value["approx_level"] = serde_json::json!(4);
        assert!(serde_json::from_value::<TorsionInput>(value).is_err());
    }

    #[test]
    fn test_result_json_carries_verdict() {
        let result = calculate(&TorsionInput::example()).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["passes"], serde_json::json!(true));

        let mut input = level_1_input();
        input.actions.t_ed_nmm = 50e6;
        let value = serde_json::to_value(calculate(&input).unwrap()).unwrap();
        assert_eq!(value["passes"], serde_json::json!(false));
    }

    #[test]
    fn test_serialization() {
        let input = TorsionInput::example();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: TorsionInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
