//! Per-power detail blocks.
//!
//! A detail block is an open-ended JSON object: the common baseline fields,
//! whatever sub-tables a power adds, and optionally a `Device` object that
//! only the caller may create.

use crate::catalog::PowerBaseline;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the caller-owned device sub-block.
pub const DEVICE_KEY: &str = "Device";

/// Fields every resolved power carries.
pub const COMMON_FIELDS: [&str; 9] = [
    "StrDetails",
    "APCost",
    "MaxAP",
    "AreaEffect",
    "DamageAP",
    "Duration",
    "DurationUnit",
    "Range",
    "Choices",
];

/// The detail entry for one power.
///
/// # Examples
///
/// ```rust
/// use squadron::PowerDetail;
///
/// let mut detail = PowerDetail::new();
/// detail.set("Range", 40);
/// assert_eq!(detail.get_i64("Range"), Some(40));
///
/// // A device exists only if the caller put one there.
/// assert!(detail.device().is_none());
/// detail.seed_device();
/// assert!(detail.device().is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PowerDetail(Map<String, Value>);

impl PowerDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.0.get(key).and_then(Value::as_i64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// True when the caller seeded a `Device` object.
    pub fn has_device(&self) -> bool {
        self.device().is_some()
    }

    /// The device sub-block, if the caller seeded one as an object. Any
    /// other value under `Device` counts as no device.
    pub fn device(&self) -> Option<&Map<String, Value>> {
        self.0.get(DEVICE_KEY).and_then(Value::as_object)
    }

    /// Mutable access to the device block, if it is an object.
    pub fn device_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(DEVICE_KEY).and_then(Value::as_object_mut)
    }

    /// Mark the power as device-granted. Callers only; rules never call
    /// this.
    pub fn seed_device(&mut self) {
        self.0
            .entry(DEVICE_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
    }

    /// Drop everything except the device block, so a rule that runs again
    /// replaces its earlier output instead of merging with it.
    pub fn reset(&mut self) {
        self.0.retain(|key, _| key == DEVICE_KEY);
    }

    /// Copy the baseline fields verbatim.
    pub fn apply_baseline(&mut self, baseline: &PowerBaseline) {
        for (key, formula) in baseline.record_fields() {
            self.set(key, formula.to_value());
        }
    }

    /// Names of common fields this block is missing.
    pub fn missing_common_fields(&self) -> Vec<&'static str> {
        COMMON_FIELDS
            .into_iter()
            .filter(|f| !self.0.contains_key(*f))
            .collect()
    }
}

impl From<Map<String, Value>> for PowerDetail {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
