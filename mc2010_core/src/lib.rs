//! # mc2010_core - Torsion Checks for Reinforced Concrete
//!
//! `mc2010_core` implements the torsion clauses of fib Model Code 2010
//! (7.3.4) together with the shear helpers they rely on. All inputs and
//! outputs are JSON-serializable so the checks can sit behind a CLI, a
//! report generator or an AI assistant.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Injected shear model**: Torsion formulas consume ε_x and V_Rd,max
//!   through the [`ShearModel`] trait
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use mc2010_core::calculations::torsion::{calculate, TorsionInput};
//!
//! let input = TorsionInput::example();
//! let result = calculate(&input).unwrap();
//!
//! println!("T_Rd,max = {:.0} Nmm", result.t_rd_max_nmm);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("interaction_ratio"));
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Model Code formulas (η_fc, k_ε, ε_x, V_Rd,max, T_Rd,max)
//! - [`calculations`] - Member checks with full result breakdown
//! - [`settings`] - Design defaults (γ_c, approximation level)
//! - [`units`] - Angle newtypes
//! - [`errors`] - Structured error types
//! - [`file_io`] - Reading inputs from JSON

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use equations::{
    t_rd, t_rd_max, v_ed_ti, ApproximationLevel, Mc2010Shear, ShearCapacityParams, ShearModel,
    StrainParams, TorsionCapacityParams, TorsionInteractionParams,
};
pub use errors::{CalcError, CalcResult};
pub use settings::DesignSettings;
pub use units::Degrees;
