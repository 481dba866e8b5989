//! Character statistics.
//!
//! Statistics are stored by name, exactly as they appear in a character
//! file, so unknown stats survive a round trip. [`Stat`] names the ones the
//! power rules read and write.

use crate::roll::Roller;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The statistics power rules know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stat {
    Strength,
    Agility,
    Stamina,
    Intelligence,
    Charisma,
    Luck,
    Experience,
    Ego,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Strength,
        Stat::Agility,
        Stat::Stamina,
        Stat::Intelligence,
        Stat::Charisma,
        Stat::Luck,
        Stat::Experience,
        Stat::Ego,
    ];

    /// The five statistics rolled at character creation.
    pub const MAIN: [Stat; 5] = [
        Stat::Strength,
        Stat::Agility,
        Stat::Stamina,
        Stat::Intelligence,
        Stat::Charisma,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Strength => "Strength",
            Stat::Agility => "Agility",
            Stat::Stamina => "Stamina",
            Stat::Intelligence => "Intelligence",
            Stat::Charisma => "Charisma",
            Stat::Luck => "Luck",
            Stat::Experience => "Experience",
            Stat::Ego => "Ego",
        }
    }

    /// Every key this stat may be stored under. Experience is often
    /// abbreviated to `Exp` in character files.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Stat::Experience => &["Experience", "Exp"],
            Stat::Strength => &["Strength"],
            Stat::Agility => &["Agility"],
            Stat::Stamina => &["Stamina"],
            Stat::Intelligence => &["Intelligence"],
            Stat::Charisma => &["Charisma"],
            Stat::Luck => &["Luck"],
            Stat::Ego => &["Ego"],
        }
    }

    /// Look a stat up by any of its record keys, `Exp` included.
    pub fn from_name(name: &str) -> Option<Stat> {
        Self::ALL
            .into_iter()
            .find(|s| s.keys().iter().any(|k| *k == name))
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stat name to value.
///
/// # Examples
///
/// ```rust
/// use squadron::{Stat, Statistics};
///
/// let mut stats = Statistics::new();
/// stats.set(Stat::Strength, 12);
/// stats.set(Stat::Agility, 8);
///
/// assert_eq!(stats.get(Stat::Strength), 12);
/// assert_eq!(stats.add(Stat::Strength, 5), 17);
/// assert_eq!(stats.evaluate_formula("Agility+Strength"), Some(25));
/// assert_eq!(stats.evaluate_formula("Stamina*2"), Some(0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics(BTreeMap<String, i64>);

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a stat; missing stats read as 0.
    pub fn get(&self, stat: Stat) -> i64 {
        stat.keys()
            .iter()
            .find_map(|k| self.0.get(*k))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, stat: Stat) -> bool {
        stat.keys().iter().any(|k| self.0.contains_key(*k))
    }

    /// Set a stat, writing through to whichever key it is already stored
    /// under.
    pub fn set(&mut self, stat: Stat, value: i64) {
        let key = stat
            .keys()
            .iter()
            .find(|k| self.0.contains_key(**k))
            .copied()
            .unwrap_or(stat.as_str());
        self.0.insert(key.to_string(), value);
    }

    /// Add to a stat and return the new value, saturating at the `i64`
    /// bounds.
    pub fn add(&mut self, stat: Stat, delta: i64) -> i64 {
        let value = self.get(stat).saturating_add(delta);
        self.set(stat, value);
        value
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Resolve a stat formula such as `"Agility+Strength"` or
    /// `"Stamina*2+10"`.
    ///
    /// Terms are separated by `+` or `-`, factors within a term by `*` or
    /// `x`. A factor is a stat name or an integer. Returns `None` if any
    /// factor is neither, so the caller can keep the text as-is.
    pub fn evaluate_formula(&self, expr: &str) -> Option<i64> {
        let mut total: i64 = 0;
        let mut sign: i64 = 1;
        let mut term = String::new();
        for c in expr.chars().chain(std::iter::once('+')) {
            match c {
                '+' | '-' => {
                    if term.trim().is_empty() {
                        if c == '-' {
                            sign = -sign;
                        }
                        continue;
                    }
                    total = total.saturating_add(sign.saturating_mul(self.evaluate_term(&term)?));
                    term.clear();
                    sign = if c == '-' { -1 } else { 1 };
                }
                _ => term.push(c),
            }
        }
        Some(total)
    }

    fn evaluate_term(&self, term: &str) -> Option<i64> {
        term.split('*')
            .map(|factor| self.evaluate_factor(factor.trim()))
            .try_fold(1i64, |acc, f| f.map(|f| acc.saturating_mul(f)))
    }

    // `x` doubles as a multiplication sign, but stat names such as
    // Experience contain it, so names are tried before splitting.
    fn evaluate_factor(&self, factor: &str) -> Option<i64> {
        if let Ok(n) = factor.parse::<i64>() {
            return Some(n);
        }
        if let Some(stat) = Stat::from_name(factor) {
            return Some(self.get(stat));
        }
        if let Some(value) = self.0.get(factor) {
            return Some(*value);
        }
        let (left, right) = factor.rsplit_once('x')?;
        Some(self.evaluate_factor(left.trim())?.saturating_mul(self.evaluate_factor(right.trim())?))
    }
}

impl FromIterator<(Stat, i64)> for Statistics {
    fn from_iter<I: IntoIterator<Item = (Stat, i64)>>(iter: I) -> Self {
        let mut stats = Statistics::new();
        for (stat, value) in iter {
            stats.set(stat, value);
        }
        stats
    }
}

/// Roll a fresh set of statistics.
///
/// The five main statistics are rerolled together until their total
/// exceeds 60. Luck is rolled separately; Experience and Ego start at 0.
pub fn roll_main_statistics<R: Roller + ?Sized>(roller: &mut R) -> Statistics {
    let mut stats = Statistics::new();
    loop {
        let mut total = 0;
        for stat in Stat::MAIN {
            let value = roller.roll_statistic();
            stats.set(stat, value);
            total += value;
        }
        tracing::debug!(total, "rolled main statistics");
        if total > 60 {
            break;
        }
    }
    stats.set(Stat::Luck, roller.roll_luck());
    stats.set(Stat::Experience, 0);
    stats.set(Stat::Ego, 0);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::DiceRoller;

    #[test]
    fn test_missing_stat_reads_zero() {
        let stats = Statistics::new();
        assert_eq!(stats.get(Stat::Ego), 0);
        assert!(!stats.contains(Stat::Ego));
    }

    #[test]
    fn test_exp_alias() {
        let stats: Statistics = serde_json::from_str(r#"{"Exp": 4}"#).unwrap();
        assert_eq!(stats.get(Stat::Experience), 4);

        let mut stats = stats;
        stats.add(Stat::Experience, 1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Exp"], 5);
        assert!(json.get("Experience").is_none());
    }

    #[test]
    fn test_formula() {
        let stats: Statistics = [(Stat::Stamina, 15), (Stat::Agility, 5)]
            .into_iter()
            .collect();
        assert_eq!(stats.evaluate_formula("Stamina+Agility"), Some(20));
        assert_eq!(stats.evaluate_formula("Stamina + Agility x2"), Some(25));
        assert_eq!(stats.evaluate_formula("Stamina*2-Agility"), Some(25));
        assert_eq!(stats.evaluate_formula("-Agility+10"), Some(5));
        assert_eq!(stats.evaluate_formula("Stamina+Speed"), None);
        assert_eq!(stats.evaluate_formula("Experience+Stamina"), Some(15));
        assert_eq!(stats.evaluate_formula("Agilityx3"), Some(15));
    }

    #[test]
    fn test_unknown_named_stat_round_trips() {
        let stats: Statistics = serde_json::from_str(r#"{"Strength": 9, "Psyche": 3}"#).unwrap();
        assert!(!stats.contains(Stat::Luck));
        assert_eq!(stats.evaluate_formula("Psyche+Strength"), Some(12));
    }

    #[test]
    fn test_huge_values_saturate() {
        let mut stats: Statistics = [(Stat::Stamina, i64::MAX / 2), (Stat::Agility, i64::MAX)]
            .into_iter()
            .collect();
        assert_eq!(stats.evaluate_formula("Stamina*4"), Some(i64::MAX));
        assert_eq!(stats.evaluate_formula("Stamina+Agility"), Some(i64::MAX));
        assert_eq!(stats.evaluate_formula("-Agility-Agility"), Some(-i64::MAX - 1));
        assert_eq!(stats.evaluate_formula("Staminax3"), Some(i64::MAX));
        assert_eq!(stats.add(Stat::Agility, 10), i64::MAX);
    }

    #[test]
    fn test_roll_main_statistics_total() {
        let mut roller = DiceRoller::seeded(11);
        for _ in 0..20 {
            let stats = roll_main_statistics(&mut roller);
            let total: i64 = Stat::MAIN.iter().map(|s| stats.get(*s)).sum();
            assert!(total > 60);
            assert!((0..=10).contains(&stats.get(Stat::Luck)));
        }
    }
}
