//! # Equation Registry
//!
//! Central registry of the Model Code equations used in calculations.
//! Each equation has metadata including its code reference, formula, and
//! variable definitions.
//!
//! ## Usage
//!
//! ```rust
//! use mc2010_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record(Equation::TorsionCrushing, "Beam B-1");
//!
//! let meta = Equation::TorsionCrushing.metadata();
//! assert!(meta.reference.citation().contains("7.3-55"));
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::DESIGN_CODE;

// ============================================================================
// Code References
// ============================================================================

/// Reference to the clause an equation comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// fib Model Code for Concrete Structures 2010
    ModelCode2010 {
        section: &'static str,
        equation: Option<&'static str>,
    },
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::ModelCode2010 { section, equation: Some(eq) } => {
                format!("{} {}, eq. ({})", DESIGN_CODE, section, eq)
            }
            CodeReference::ModelCode2010 { section, equation: None } => {
                format!("{} {}", DESIGN_CODE, section)
            }
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::ModelCode2010 { .. } => "MC2010",
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Idealised thin-walled section (t_ef, wall forces)
    SectionProperties,
    /// Longitudinal and principal strains
    Strains,
    /// η_fc, k_ε and k_c
    ReductionFactors,
    /// V_Rd,max and T_Rd,max
    Resistances,
    /// Interaction (unity) checks
    DesignChecks,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SectionProperties => "Section Properties",
            EquationCategory::Strains => "Strains",
            EquationCategory::ReductionFactors => "Reduction Factors",
            EquationCategory::Resistances => "Resistances",
            EquationCategory::DesignChecks => "Design Checks",
        }
    }

    /// Sort order for reports (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SectionProperties => 1,
            EquationCategory::Strains => 2,
            EquationCategory::ReductionFactors => 3,
            EquationCategory::Resistances => 4,
            EquationCategory::DesignChecks => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "T_Ed", "A_k")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units (e.g., "Nmm", "mm^2")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the torsion and shear checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// t_ef = d_k / 8
    EffectiveWallThickness,
    /// V_Ed,i = T_Ed z_i / (2 A_k)
    TorsionWallShear,
    /// ε_x from M_Ed, V_Ed, N_Ed
    LongitudinalStrain,
    /// ε_1 = ε_x + (ε_x + 0.002) cot²θ
    PrincipalStrain,
    /// θ_min = 20° + 10000 ε_x
    MinimumInclination,
    /// η_fc = min((30/f_ck)^(1/3), 1)
    BrittlenessFactor,
    /// k_ε by approximation level
    StrainReductionFactor,
    /// V_Rd,max, Level I
    ShearCrushingLevel1,
    /// V_Rd,max, Levels II and III
    ShearCrushingRefined,
    /// T_Rd,max
    TorsionCrushing,
    /// (T_Ed/T_Rd,max)² + (V_Ed/V_Rd,max)² <= 1
    TorsionShearInteraction,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::EffectiveWallThickness => EquationMetadata {
                name: "Effective Wall Thickness",
                description: "Wall thickness of the idealised thin-walled closed section",
                formula_plain: "t_ef = d_k / 8",
                reference: CodeReference::ModelCode2010 { section: "7.3.4", equation: None },
                variables: vec![
                    Variable::new("t_ef", "Effective wall thickness", "mm"),
                    Variable::new("d_k", "Diameter of the largest inscribed circle", "mm"),
                ],
                assumptions: vec!["Solid section idealised as hollow (figure 7.3-18)"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/factors.rs",
                source_function: "effective_wall_thickness",
            },

            Equation::TorsionWallShear => EquationMetadata {
                name: "Wall Shear Force from Torsion",
                description: "Shear force in wall i of the idealised section caused by the torsional moment",
                formula_plain: "V_Ed,i = T_Ed * z_i / (2 * A_k)",
                reference: CodeReference::ModelCode2010 { section: "7.3.4", equation: Some("7.3-53") },
                variables: vec![
                    Variable::new("V_Ed,i", "Shear force in wall i", "N"),
                    Variable::new("T_Ed", "Acting torsional moment", "Nmm"),
                    Variable::new("z_i", "Length of wall i", "mm"),
                    Variable::new("A_k", "Area enclosed by the shear flow centreline", "mm^2"),
                ],
                assumptions: vec!["Constant shear flow around the closed section"],
                category: EquationCategory::SectionProperties,
                source_module: "equations/torsion.rs",
                source_function: "v_ed_ti",
            },

            Equation::LongitudinalStrain => EquationMetadata {
                name: "Longitudinal Strain",
                description: "Strain at mid-depth of the effective shear depth",
                formula_plain: "eps_x = (M_Ed/z + V_Ed + N_Ed*(1/2 + de/z)) / (2*E_s*A_s) >= 0",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: Some("7.3-16") },
                variables: vec![
                    Variable::new("eps_x", "Longitudinal strain", "-"),
                    Variable::new("M_Ed", "Design moment, not less than V_Ed*de", "Nmm"),
                    Variable::new("V_Ed", "Design shear force", "N"),
                    Variable::new("N_Ed", "Design axial force, tension positive", "N"),
                    Variable::new("de", "Load eccentricity", "mm"),
                    Variable::new("E_s", "Modulus of the longitudinal reinforcement", "MPa"),
                    Variable::new("A_s", "Area of the longitudinal reinforcement", "mm^2"),
                ],
                assumptions: vec!["Negative strains taken as zero"],
                category: EquationCategory::Strains,
                source_module: "equations/shear.rs",
                source_function: "Mc2010Shear::epsilon_x",
            },

            Equation::PrincipalStrain => EquationMetadata {
                name: "Principal Tensile Strain",
                description: "Principal tensile strain used to reduce the compression field strength",
                formula_plain: "eps_1 = eps_x + (eps_x + 0.002) * cot^2(theta)",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: None },
                variables: vec![
                    Variable::new("eps_1", "Principal tensile strain", "-"),
                    Variable::new("theta", "Compression field inclination", "deg"),
                ],
                assumptions: vec![],
                category: EquationCategory::Strains,
                source_module: "equations/factors.rs",
                source_function: "epsilon_1",
            },

            Equation::MinimumInclination => EquationMetadata {
                name: "Minimum Compression Field Inclination",
                description: "Inclination used for the strain reduction at Level III",
                formula_plain: "theta_min = 20 + 10000 * eps_x",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: None },
                variables: vec![Variable::new("theta_min", "Minimum inclination", "deg")],
                assumptions: vec!["Level III approximation only"],
                category: EquationCategory::Strains,
                source_module: "equations/factors.rs",
                source_function: "theta_min",
            },

            Equation::BrittlenessFactor => EquationMetadata {
                name: "Brittleness Factor",
                description: "Strength reduction for the more brittle behaviour of high strength concrete",
                formula_plain: "eta_fc = min((30 / f_ck)^(1/3), 1.0)",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: None },
                variables: vec![
                    Variable::new("eta_fc", "Brittleness factor", "-"),
                    Variable::new("f_ck", "Characteristic cylinder strength", "MPa"),
                ],
                assumptions: vec!["f_ck > 0"],
                category: EquationCategory::ReductionFactors,
                source_module: "equations/factors.rs",
                source_function: "nfc",
            },

            Equation::StrainReductionFactor => EquationMetadata {
                name: "Strain Reduction Factor",
                description: "Reduction of the compression field strength for transverse tensile strain",
                formula_plain: "k_eps = 0.55 (Level I); k_eps = min(1 / (1.2 + 55 * eps_1), 0.65) (Levels II, III)",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: None },
                variables: vec![
                    Variable::new("k_eps", "Strain reduction factor", "-"),
                    Variable::new("k_c", "eta_fc * k_eps", "-"),
                ],
                assumptions: vec!["Level III evaluates eps_1 with theta_min"],
                category: EquationCategory::ReductionFactors,
                source_module: "equations/factors.rs",
                source_function: "k_epsilon",
            },

            Equation::ShearCrushingLevel1 => EquationMetadata {
                name: "Shear Crushing Resistance (Level I)",
                description: "Maximum shear resistance limited by crushing of the compression field",
                formula_plain: "V_Rd,max = k_c * f_ck / gamma_c * b_w * z * sin(theta) * cos(theta)",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: Some("7.3-26") },
                variables: vec![
                    Variable::new("V_Rd,max", "Maximum shear resistance", "N"),
                    Variable::new("b_w", "Web width", "mm"),
                    Variable::new("z", "Lever arm", "mm"),
                    Variable::new("gamma_c", "Partial safety factor for concrete", "-"),
                ],
                assumptions: vec!["k_c = 0.55 * eta_fc"],
                category: EquationCategory::Resistances,
                source_module: "equations/shear.rs",
                source_function: "Mc2010Shear::v_rd_max",
            },

            Equation::ShearCrushingRefined => EquationMetadata {
                name: "Shear Crushing Resistance (Levels II, III)",
                description: "Maximum shear resistance with inclined stirrups",
                formula_plain: "V_Rd,max = k_c * f_ck / gamma_c * b_w * z * (cot(theta) + cot(alpha)) / (1 + cot^2(theta))",
                reference: CodeReference::ModelCode2010 { section: "7.3.3.3", equation: Some("7.3-24") },
                variables: vec![
                    Variable::new("V_Rd,max", "Maximum shear resistance", "N"),
                    Variable::new("alpha", "Stirrup inclination", "deg"),
                ],
                assumptions: vec!["k_c = eta_fc * k_eps"],
                category: EquationCategory::Resistances,
                source_module: "equations/shear.rs",
                source_function: "Mc2010Shear::v_rd_max",
            },

            Equation::TorsionCrushing => EquationMetadata {
                name: "Torsion Crushing Resistance",
                description: "Maximum torsional resistance of the idealised thin-walled section",
                formula_plain: "T_Rd,max = k_c * f_ck / gamma_c * t_ef * 2 * A_k * sin(theta) * cos(theta)",
                reference: CodeReference::ModelCode2010 { section: "7.3.4", equation: Some("7.3-55") },
                variables: vec![
                    Variable::new("T_Rd,max", "Maximum torsional resistance", "Nmm"),
                    Variable::new("t_ef", "Effective wall thickness", "mm"),
                    Variable::new("A_k", "Area enclosed by the shear flow centreline", "mm^2"),
                ],
                assumptions: vec!["Trigonometric term always uses the input theta, also at Level III"],
                category: EquationCategory::Resistances,
                source_module: "equations/torsion.rs",
                source_function: "t_rd_max",
            },

            Equation::TorsionShearInteraction => EquationMetadata {
                name: "Torsion and Shear Interaction",
                description: "Elliptical interaction of torsion and shear crushing",
                formula_plain: "(T_Ed / T_Rd,max)^2 + (V_Ed / V_Rd,max)^2 <= 1",
                reference: CodeReference::ModelCode2010 { section: "7.3.4", equation: Some("7.3-56") },
                variables: vec![
                    Variable::new("T_Ed", "Acting torsional moment", "Nmm"),
                    Variable::new("V_Ed", "Acting shear force", "N"),
                ],
                assumptions: vec!["A ratio of exactly 1.0 passes"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/torsion.rs",
                source_function: "t_rd",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in report order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![SectionProperties, Strains, ReductionFactors, Resistances, DesignChecks];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::EffectiveWallThickness,
    Equation::TorsionWallShear,
    Equation::LongitudinalStrain,
    Equation::PrincipalStrain,
    Equation::MinimumInclination,
    Equation::BrittlenessFactor,
    Equation::StrainReductionFactor,
    Equation::ShearCrushingLevel1,
    Equation::ShearCrushingRefined,
    Equation::TorsionCrushing,
    Equation::TorsionShearInteraction,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Context describing where/why it was used (e.g., "Beam B-1")
    pub context: String,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = std::collections::HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Citations of every unique equation used, in first-use order
    pub fn citations(&self) -> Vec<String> {
        self.unique_equations()
            .iter()
            .map(|eq| format!("{} ({})", eq.metadata().name, eq.metadata().reference.citation()))
            .collect()
    }
}

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference document.
///
/// ```rust
/// use mc2010_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Equations Reference"));
/// assert!(markdown.contains("Resistances"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(12_000);

    output.push_str(
        r#"# MC2010 Torsion Checks - Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Each equation lists its formula, code reference, source location, and assumptions.

## Units and Sign Conventions

| Quantity | Unit | Convention |
|----------|------|------------|
| Forces | N | N_Ed positive in tension |
| Moments | Nmm | Absolute design values |
| Lengths | mm | |
| Stresses | MPa | |
| Angles | degrees | Converted to radians before trigonometry |

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}
