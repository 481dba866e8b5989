//! Power catalog and gimmick list.
//!
//! The catalog is loaded once and only read afterwards, so it can be shared
//! between concurrent character builds behind an `Arc`.

use crate::config::DataConfig;
use crate::dice::Formula;
use crate::error::PowerError;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};

/// One catalog row as it appears in the CSV file.
#[derive(Debug, Clone, Deserialize)]
struct PowerRow {
    #[serde(rename = "Power")]
    power: String,
    #[serde(rename = "APCost", default)]
    ap_cost: String,
    #[serde(rename = "MaxAP", default)]
    max_ap: String,
    #[serde(rename = "AreaEffect", default)]
    area_effect: String,
    #[serde(rename = "DeviceAP", default)]
    device_ap: String,
    #[serde(rename = "DamageAP", default)]
    damage_ap: String,
    #[serde(rename = "Duration", default)]
    duration: String,
    #[serde(rename = "DurationUnit", default)]
    duration_unit: String,
    #[serde(rename = "Range", default)]
    range: String,
    #[serde(rename = "DeviceRange", default)]
    device_range: String,
    #[serde(rename = "Choices", default)]
    choices: String,
}

/// Default attributes of a power before any character-specific derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerBaseline {
    pub name: String,
    pub ap_cost: Formula,
    pub max_ap: Formula,
    pub area_effect: Formula,
    pub device_ap: Formula,
    pub damage_ap: Formula,
    pub duration: Formula,
    pub duration_unit: Formula,
    pub range: Formula,
    pub device_range: Formula,
    pub choices: Formula,
}

impl From<PowerRow> for PowerBaseline {
    fn from(row: PowerRow) -> Self {
        Self {
            name: row.power.trim().to_string(),
            ap_cost: Formula::parse(&row.ap_cost),
            max_ap: Formula::parse(&row.max_ap),
            area_effect: Formula::parse(&row.area_effect),
            device_ap: Formula::parse(&row.device_ap),
            damage_ap: Formula::parse(&row.damage_ap),
            duration: Formula::parse(&row.duration),
            duration_unit: Formula::parse(&row.duration_unit),
            range: Formula::parse(&row.range),
            device_range: Formula::parse(&row.device_range),
            choices: Formula::parse(&row.choices),
        }
    }
}

impl PowerBaseline {
    /// A baseline with every field blank.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ap_cost: Formula::Blank,
            max_ap: Formula::Blank,
            area_effect: Formula::Blank,
            device_ap: Formula::Blank,
            damage_ap: Formula::Blank,
            duration: Formula::Blank,
            duration_unit: Formula::Blank,
            range: Formula::Blank,
            device_range: Formula::Blank,
            choices: Formula::Blank,
        }
    }

    /// The fields copied into every detail block, keyed as they appear in
    /// a character record.
    pub fn record_fields(&self) -> [(&'static str, &Formula); 8] {
        [
            ("APCost", &self.ap_cost),
            ("MaxAP", &self.max_ap),
            ("AreaEffect", &self.area_effect),
            ("DamageAP", &self.damage_ap),
            ("Duration", &self.duration),
            ("DurationUnit", &self.duration_unit),
            ("Range", &self.range),
            ("Choices", &self.choices),
        ]
    }
}

/// All power baselines keyed by exact power name.
///
/// # Examples
///
/// ```rust
/// use squadron::PowerCatalog;
///
/// let csv = "Power,APCost,MaxAP,AreaEffect,DeviceAP,DamageAP,Duration,DurationUnit,Range,DeviceRange,Choices\n\
///            Armour,2,20,NotApplicable,1d6+2,NotApplicable,Variable,Turns,Self,NotApplicable,\n";
/// let catalog = PowerCatalog::from_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.get("Armour").is_ok());
/// assert!(catalog.get("Flight").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PowerCatalog {
    powers: HashMap<String, PowerBaseline>,
}

impl PowerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the first candidate location in `config` that exists.
    pub fn load(config: &DataConfig) -> Result<Self, PowerError> {
        let path = first_existing(config.powers_paths())?;
        Self::from_path(&path)
    }

    /// Load from a specific CSV file.
    pub fn from_path(path: &Path) -> Result<Self, PowerError> {
        if !path.is_file() {
            return Err(PowerError::DataFileNotFound {
                attempted: vec![path.to_path_buf()],
            });
        }
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PowerError::malformed(path, e))?;
        let catalog = Self::from_csv(reader, path)?;
        tracing::info!(path = %path.display(), powers = catalog.len(), "loaded power catalog");
        Ok(catalog)
    }

    /// Load from any reader producing CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PowerError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader, Path::new("<reader>"))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Self, PowerError> {
        let mut catalog = Self::new();
        for row in reader.deserialize::<PowerRow>() {
            let row = row.map_err(|e| PowerError::malformed(path, e))?;
            catalog.insert(row.into())?;
        }
        Ok(catalog)
    }

    /// Add a baseline. Names are unique.
    pub fn insert(&mut self, baseline: PowerBaseline) -> Result<(), PowerError> {
        if self.powers.contains_key(&baseline.name) {
            return Err(PowerError::DuplicatePower(baseline.name));
        }
        self.powers.insert(baseline.name.clone(), baseline);
        Ok(())
    }

    /// Look up a baseline by exact name. A miss is a configuration error.
    pub fn get(&self, name: &str) -> Result<&PowerBaseline, PowerError> {
        self.powers
            .get(name)
            .ok_or_else(|| PowerError::MissingPower(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.powers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Power names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.powers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Free-text gimmick names, one per row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GimmickList {
    names: Vec<String>,
}

impl GimmickList {
    /// A list built in memory, in draw order.
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Load from the first candidate location in `config` that exists.
    pub fn load(config: &DataConfig) -> Result<Self, PowerError> {
        let path = first_existing(config.gimmicks_paths())?;
        Self::from_path(&path)
    }

    /// Load a one-column CSV file with a `Gimmick` header.
    pub fn from_path(path: &Path) -> Result<Self, PowerError> {
        if !path.is_file() {
            return Err(PowerError::DataFileNotFound {
                attempted: vec![path.to_path_buf()],
            });
        }
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| PowerError::malformed(path, e))?;
        let list = Self::from_csv(reader, path)?;
        tracing::info!(path = %path.display(), gimmicks = list.len(), "loaded gimmick list");
        Ok(list)
    }

    /// Read a single-column CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PowerError> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(reader, Path::new("<reader>"))
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>, path: &Path) -> Result<Self, PowerError> {
        let mut names = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PowerError::malformed(path, e))?;
            if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
                names.push(name.to_string());
            }
        }
        Ok(Self { names })
    }

    /// Gimmick at a zero-based position.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn first_existing(candidates: Vec<PathBuf>) -> Result<PathBuf, PowerError> {
    match candidates.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(PowerError::DataFileNotFound {
            attempted: candidates,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Sentinel;

    const HEADER: &str =
        "Power,APCost,MaxAP,AreaEffect,DeviceAP,DamageAP,Duration,DurationUnit,Range,DeviceRange,Choices\n";

    #[test]
    fn test_row_fields_are_classified() {
        let csv = format!(
            "{HEADER}Air Generation, 2 ,20,Variable,2d6,1d6+2,Stamina,Turns,Stamina+Agility,1d10x10,\n"
        );
        let catalog = PowerCatalog::from_reader(csv.as_bytes()).unwrap();
        let air = catalog.get("Air Generation").unwrap();
        assert_eq!(air.ap_cost, Formula::Literal(2));
        assert!(matches!(air.area_effect, Formula::Sentinel(Sentinel::Variable, _)));
        assert!(matches!(air.device_ap, Formula::Dice { .. }));
        assert!(matches!(air.range, Formula::StatRef(_)));
        assert!(air.choices.is_blank());
    }

    #[test]
    fn test_duplicate_rows_rejected() {
        let csv = format!("{HEADER}Flight,1,,,,,,,,,\nFlight,2,,,,,,,,,\n");
        let err = PowerCatalog::from_reader(csv.as_bytes()).unwrap_err();
        assert_eq!(err, PowerError::DuplicatePower("Flight".into()));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = PowerCatalog::from_path(Path::new("no/such/power_details.csv")).unwrap_err();
        assert!(err.to_string().contains("no/such/power_details.csv"));
    }

    #[test]
    fn test_gimmicks_skip_blank_rows() {
        let list = GimmickList::from_reader("Gimmick\nGrappling hook\n\nSmoke pellets\n".as_bytes())
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Some("Smoke pellets"));
    }
}
