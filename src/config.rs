//! Data file locations.
//!
//! The power catalog and the gimmick list live in CSV files. By default they
//! are read from `data/` relative to the working directory, falling back to
//! the copies bundled with the crate.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`DataConfig::data_dir`].
pub const DATA_DIR_ENV: &str = "SQUADRON_DATA_DIR";

const BUNDLED_DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// Where to find the data files.
///
/// # Examples
///
/// ```rust
/// use squadron::DataConfig;
///
/// let config: DataConfig = serde_json::from_str(r#"{"data_dir": "/srv/squadron"}"#).unwrap();
/// assert_eq!(config.powers_file, "power_details.csv");
/// assert_eq!(
///     config.candidate_paths(&config.powers_file)[0],
///     std::path::Path::new("/srv/squadron/power_details.csv"),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_dir: PathBuf,
    pub powers_file: String,
    pub gimmicks_file: String,
    /// Also look in the crate's own `data/` directory.
    pub use_bundled: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            powers_file: "power_details.csv".to_string(),
            gimmicks_file: "gimmicks.csv".to_string(),
            use_bundled: true,
        }
    }
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the data directory taken from `SQUADRON_DATA_DIR`
    /// when set.
    pub fn from_env() -> Self {
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::default(),
        }
    }

    /// Paths to try, in order, for a file under the data directory.
    pub fn candidate_paths(&self, file: &str) -> Vec<PathBuf> {
        let mut paths = vec![self.data_dir.join(file)];
        if self.use_bundled {
            let bundled = Path::new(BUNDLED_DATA_DIR).join(file);
            if !paths.contains(&bundled) {
                paths.push(bundled);
            }
        }
        paths
    }

    /// Every location tried for the power catalog, in order.
    pub fn powers_paths(&self) -> Vec<PathBuf> {
        self.candidate_paths(&self.powers_file)
    }

    /// Every location tried for the gimmick list, in order.
    pub fn gimmicks_paths(&self) -> Vec<PathBuf> {
        self.candidate_paths(&self.gimmicks_file)
    }
}
