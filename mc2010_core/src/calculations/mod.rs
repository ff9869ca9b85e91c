//! # Member Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`torsion`] - Combined torsion and shear check of a concrete member

pub mod torsion;

pub use torsion::{
    ConcreteStrength,
    DesignActions,
    LongitudinalReinforcement,
    TorsionInput,
    TorsionResult,
    TorsionSection,
};
