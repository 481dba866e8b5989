//! Error types for power resolution.
//!
//! Only configuration problems are errors. Malformed formulas and missing
//! optional keys degrade gracefully and never reach this enum.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Format a list of attempted paths as a readable string.
fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return String::from("(no paths)");
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that can occur while loading data or resolving powers.
///
/// # Examples
///
/// ```rust
/// use squadron::PowerError;
///
/// let err = PowerError::MissingPower("Armour".to_string());
/// assert_eq!(err.to_string(), "Power not found in catalog: Armour");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PowerError {
    /// The catalog has no row for a power that a rule needs.
    ///
    /// There is no sensible partial result, so the build must stop.
    #[error("Power not found in catalog: {0}")]
    MissingPower(String),

    /// No resolution rule is registered under this name.
    #[error("Unknown power: {0}")]
    UnknownPower(String),

    /// A data file could not be found at any candidate location.
    #[error("Data file not found (tried: {})", format_paths(.attempted))]
    DataFileNotFound { attempted: Vec<PathBuf> },

    /// A data file exists but could not be decoded.
    #[error("Malformed data in {}: {message}", .path.display())]
    MalformedData { path: PathBuf, message: String },

    /// The catalog contains two rows with the same power name.
    #[error("Duplicate power in catalog: {0}")]
    DuplicatePower(String),
}

impl PowerError {
    pub(crate) fn malformed(path: &Path, err: impl std::fmt::Display) -> Self {
        PowerError::MalformedData {
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PowerError::UnknownPower("Laser Eyes".into());
        assert!(err.to_string().contains("Laser Eyes"));
    }

    #[test]
    fn test_not_found_lists_every_path() {
        let err = PowerError::DataFileNotFound {
            attempted: vec![
                PathBuf::from("data/power_details.csv"),
                PathBuf::from("/opt/squadron/data/power_details.csv"),
            ],
        };
        let display = err.to_string();
        assert!(display.contains("data/power_details.csv"));
        assert!(display.contains("/opt/squadron/data/power_details.csv"));
        assert!(display.contains(", "));
    }

    #[test]
    fn test_not_found_without_paths() {
        let err = PowerError::DataFileNotFound { attempted: vec![] };
        assert!(err.to_string().contains("(no paths)"));
    }
}
