//! # File I/O Module
//!
//! Reads member inputs from JSON. Nothing is written back: results are
//! returned to the caller, which decides how to present them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mc2010_core::file_io::load_input;
//! use std::path::Path;
//!
//! let input = load_input(Path::new("edge_beam.json"))?;
//! println!("Loaded member: {}", input.label);
//! # Ok::<(), mc2010_core::errors::CalcError>(())
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::calculations::torsion::TorsionInput;
use crate::errors::{CalcError, CalcResult};

/// Load a member input from a JSON file.
///
/// # Returns
///
/// * `Ok(TorsionInput)` - Successfully parsed input
/// * `Err(CalcError::SerializationError)` - Invalid JSON or approximation level
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_input(path: &Path) -> CalcResult<TorsionInput> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "read input file");

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Parse a member input from a JSON string.
pub fn parse_input(json: &str) -> CalcResult<TorsionInput> {
    serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}

/// Serialize any result or input as pretty JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })
}
