//! # Model Code Equations
//!
//! Closed-form equations for shear and torsion of reinforced concrete
//! members, kept in one place so each can be checked against its clause.
//!
//! ## Modules
//!
//! - [`factors`] - Approximation levels and strength reduction factors (η_fc, k_ε)
//! - [`shear`] - Longitudinal strain ε_x and shear crushing resistance V_Rd,max
//! - [`torsion`] - Wall shear from torsion, T_Rd,max, and the interaction check
//! - [`registry`] - Equation metadata and tracking for reports
//!
//! ## Units
//!
//! - Forces in N, moments in Nmm, lengths in mm, stresses in MPa
//! - Angles in degrees ([`crate::units::Degrees`])
//! - N_Ed positive in tension
//!
//! ## References
//!
//! - fib Model Code for Concrete Structures 2010, 7.3.3 (shear) and 7.3.4 (torsion)

pub mod factors;
pub mod registry;
pub mod shear;
pub mod torsion;

pub use factors::{
    effective_wall_thickness,
    epsilon_1,
    k_epsilon,
    nfc,
    theta_min,
    ApproximationLevel,
};

pub use shear::{Mc2010Shear, ShearCapacityParams, ShearModel, StrainParams};

pub use torsion::{
    interaction_ratio,
    t_rd,
    t_rd_max,
    v_ed_ti,
    TorsionCapacityParams,
    TorsionInteractionParams,
};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
