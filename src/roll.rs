//! Random distribution primitives.
//!
//! Every random draw in the crate goes through the [`Roller`] trait so that
//! a build can be replayed from a seed or driven by a scripted roller in
//! tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integer rolls.
///
/// Only [`Roller::roll_range`] is required. The other methods are built on
/// top of it and may be overridden individually, which is how tests pin the
/// total of a dice pool without scripting every die.
///
/// # Examples
///
/// ```rust
/// use squadron::{DiceRoller, Roller};
///
/// let mut roller = DiceRoller::seeded(42);
/// let total = roller.roll_effects(3, 6);
/// assert!((3..=18).contains(&total));
/// ```
pub trait Roller {
    /// Uniform integer in `[low, high]`, both inclusive.
    fn roll_range(&mut self, low: i64, high: i64) -> i64;

    /// A single die with the given number of sides. Dice with fewer than one
    /// side roll 0.
    fn roll_die(&mut self, sides: i64) -> i64 {
        if sides < 1 {
            return 0;
        }
        self.roll_range(1, sides)
    }

    /// Sum of `count` independent dice. `count <= 0` yields 0; the sum
    /// saturates rather than overflowing.
    ///
    /// Rolls one die per call to [`Roller::roll_range`], so callers bound
    /// `count` (see [`crate::dice::MAX_DICE`]).
    fn roll_effects(&mut self, count: i64, sides: i64) -> i64 {
        (0..count.max(0)).fold(0i64, |total, _| total.saturating_add(self.roll_die(sides)))
    }

    /// Percentile roll in `[1, 100]`.
    fn percentile(&mut self) -> i64 {
        self.roll_range(1, 100)
    }

    /// True when a percentile roll lands at or below `percent`.
    fn chance(&mut self, percent: i64) -> bool {
        self.percentile() <= percent
    }

    /// A core statistic in `[1, 20]`.
    fn roll_statistic(&mut self) -> i64 {
        self.roll_range(1, 20)
    }

    /// Luck only exists on a good roll: a percentile of 10 or less gives
    /// `11 - roll`, anything else gives 0.
    fn roll_luck(&mut self) -> i64 {
        let roll = self.percentile();
        if roll <= 10 {
            11 - roll
        } else {
            0
        }
    }
}

/// [`Roller`] backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct DiceRoller<R = StdRng> {
    rng: R,
}

impl DiceRoller<StdRng> {
    /// Roller seeded from the operating system. Not reproducible.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible roller: the same seed replays the same build.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> DiceRoller<R> {
    /// Wrap an existing generator.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Roller for DiceRoller<R> {
    fn roll_range(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rollers_agree() {
        let mut a = DiceRoller::seeded(7);
        let mut b = DiceRoller::seeded(7);
        for _ in 0..100 {
            assert_eq!(a.roll_range(1, 1000), b.roll_range(1, 1000));
        }
    }

    #[test]
    fn test_zero_dice_roll_nothing() {
        let mut roller = DiceRoller::seeded(1);
        for sides in [1, 6, 20, 100] {
            assert_eq!(roller.roll_effects(0, sides), 0);
        }
        assert_eq!(roller.roll_effects(-3, 6), 0);
    }

    #[test]
    fn test_statistic_and_luck_bounds() {
        let mut roller = DiceRoller::seeded(99);
        for _ in 0..1000 {
            let stat = roller.roll_statistic();
            assert!((1..=20).contains(&stat));
            let luck = roller.roll_luck();
            assert!((0..=10).contains(&luck));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut roller = DiceRoller::seeded(3);
        assert_eq!(roller.roll_range(5, 5), 5);
        assert_eq!(roller.roll_range(9, 2), 9);
        assert_eq!(roller.roll_die(0), 0);
    }

    #[test]
    fn test_effects_saturate() {
        struct Max;
        impl Roller for Max {
            fn roll_range(&mut self, _low: i64, high: i64) -> i64 {
                high
            }
        }
        assert_eq!(Max.roll_effects(3, i64::MAX), i64::MAX);
        assert_eq!(Max.roll_effects(3, 6), 18);
    }
}
