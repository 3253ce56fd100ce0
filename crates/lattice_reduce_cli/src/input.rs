//! Input parsing for the CLI
//!
//! Vectors are whitespace-separated numbers; matrices are rows separated by
//! `;` inline or by newlines in a file.

use std::fs;
use std::path::Path;

use lattice_reduce_core::{Basis, Vector};

/// Parse a single vector from a whitespace-separated string.
pub fn parse_vector(s: &str) -> Result<Vector, String> {
    let components: Result<Vec<f64>, String> = s
        .split_whitespace()
        .map(|tok| tok.parse::<f64>().map_err(|_| format!("not a number: {}", tok)))
        .collect();
    let components = components?;
    if components.is_empty() {
        return Err("empty vector".into());
    }
    Ok(Vector::new(components))
}

/// Parse a matrix from inline `row; row; ...` syntax.
pub fn parse_matrix(s: &str) -> Result<Basis, String> {
    let rows: Result<Vec<Vector>, String> = s
        .split(';')
        .map(|row| parse_vector(row.trim()))
        .collect();
    Basis::new(rows?).map_err(|e| e.to_string())
}

/// Parse a matrix from a file, one whitespace-separated row per
/// non-empty line.
pub fn read_matrix(path: &Path) -> Result<Basis, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let rows: Result<Vec<Vector>, String> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(parse_vector)
        .collect();
    Basis::new(rows?).map_err(|e| e.to_string())
}
