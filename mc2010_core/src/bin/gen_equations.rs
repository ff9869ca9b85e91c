//! Write the markdown equation reference.
//!
//! ```bash
//! cargo run --bin gen-equations              # mc2010_core/EQUATIONS.md
//! cargo run --bin gen-equations -- out.md    # any other path
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use mc2010_core::equations::generate_equations_markdown;
use mc2010_core::errors::{CalcError, CalcResult};

/// Output path: first argument, or `EQUATIONS.md` next to this crate's manifest
fn output_path(arg: Option<String>) -> PathBuf {
    arg.map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("EQUATIONS.md"))
}

fn write_reference(path: &Path) -> CalcResult<usize> {
    let markdown = generate_equations_markdown();
    fs::write(path, &markdown)
        .map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))?;
    Ok(markdown.len())
}

fn main() {
    let path = output_path(std::env::args().nth(1));
    match write_reference(&path) {
        Ok(bytes) => println!("Wrote {} bytes to {}", bytes, path.display()),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
