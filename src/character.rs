//! The character record that power rules write into.

use crate::detail::PowerDetail;
use crate::origin::Origin;
use crate::stats::Statistics;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// The `Powers` block: how many powers, in what order, and their details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Powers {
    #[serde(rename = "Number")]
    pub number: usize,
    #[serde(rename = "List")]
    pub list: Vec<String>,
    #[serde(rename = "Detail")]
    pub detail: BTreeMap<String, PowerDetail>,
}

/// A character being built.
///
/// Owned by one build session and passed by `&mut` into each rule. Keys
/// this crate does not model are kept in `extra` and written back out.
///
/// # Examples
///
/// ```rust
/// use squadron::{Character, Stat};
///
/// let json = r#"{
///     "Name": "Gale",
///     "Statistics": {"Strength": 10, "Stamina": 15, "Agility": 5},
///     "Origin": {"Origin": "Mutant", "Age": 19},
///     "Powers": {"Number": 0, "List": [], "Detail": {}}
/// }"#;
/// let character: Character = serde_json::from_str(json).unwrap();
///
/// assert_eq!(character.statistics.get(Stat::Stamina), 15);
/// assert_eq!(character.extra["Name"], "Gale");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Character {
    #[serde(rename = "Statistics", default)]
    pub statistics: Statistics,
    #[serde(rename = "Origin", default)]
    pub origin: Origin,
    #[serde(rename = "Powers", default)]
    pub powers: Powers,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Character {
    pub fn new(statistics: Statistics) -> Self {
        Self {
            statistics,
            ..Self::default()
        }
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn detail(&self, power: &str) -> Option<&PowerDetail> {
        self.powers.detail.get(power)
    }

    pub fn detail_mut(&mut self, power: &str) -> Option<&mut PowerDetail> {
        self.powers.detail.get_mut(power)
    }

    /// Ensure an (empty) detail entry exists for `power`.
    pub fn seed_power(&mut self, power: &str) -> &mut PowerDetail {
        self.powers.detail.entry(power.to_string()).or_default()
    }

    /// Mark `power` as granted by a device the character owns.
    pub fn seed_device(&mut self, power: &str) {
        self.seed_power(power).seed_device();
    }

    /// Record that the character has `power`: append it to the list, bump
    /// the count and seed its detail entry.
    pub fn add_to_list(&mut self, power: &str) {
        self.powers.list.push(power.to_string());
        self.powers.number = self.powers.list.len();
        self.seed_power(power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stat;

    #[test]
    fn test_round_trip_keeps_unknown_keys() {
        let json = r#"{"Name":"Nova","Statistics":{"Luck":3},"Secret":{"Identity":"Dana"}}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.statistics.get(Stat::Luck), 3);
        let back = serde_json::to_value(&character).unwrap();
        assert_eq!(back["Secret"]["Identity"], "Dana");
        assert_eq!(back["Powers"]["Number"], 0);
    }

    #[test]
    fn test_add_to_list_seeds_detail() {
        let mut character = Character::default();
        character.add_to_list("Flight");
        character.add_to_list("Armour");
        assert_eq!(character.powers.number, 2);
        assert_eq!(character.powers.list, vec!["Flight", "Armour"]);
        assert!(character.detail("Armour").is_some());
    }

    #[test]
    fn test_seed_device() {
        let mut character = Character::default();
        character.seed_device("Armour");
        assert!(character.detail("Armour").unwrap().has_device());
    }
}
