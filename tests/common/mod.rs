#![allow(dead_code)]

use squadron::*;
use std::sync::Arc;

/// A roller that always lands on the same face.
///
/// `roll_range` returns `face` clamped into the requested range. When
/// `effects` is set, every dice pool totals exactly that much.
#[derive(Debug, Clone, Copy)]
pub struct FixedRoller {
    pub face: i64,
    pub effects: Option<i64>,
}

impl FixedRoller {
    pub fn new(face: i64) -> Self {
        Self {
            face,
            effects: None,
        }
    }

    pub fn with_effects(total: i64) -> Self {
        Self {
            face: 1,
            effects: Some(total),
        }
    }
}

impl Roller for FixedRoller {
    fn roll_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.face.clamp(low, high)
    }

    fn roll_effects(&mut self, count: i64, sides: i64) -> i64 {
        match self.effects {
            Some(total) => total,
            None => (0..count.max(0)).map(|_| self.roll_die(sides)).sum(),
        }
    }
}

/// A resolver over the data files bundled with the crate.
pub fn bundled_resolver() -> PowerResolver {
    PowerResolver::from_config(&DataConfig::default()).unwrap()
}

pub fn shared_resolver() -> Arc<PowerResolver> {
    Arc::new(bundled_resolver())
}

pub fn character(stats: &[(Stat, i64)]) -> Character {
    Character::new(stats.iter().copied().collect())
}
