//! Context handed to each power rule.
//!
//! A `PowerContext` borrows everything a rule may read (baseline, catalog,
//! gimmicks, origin) and the two things it may write: the power's detail
//! block and the character statistics.

use crate::catalog::{GimmickList, PowerBaseline, PowerCatalog};
use crate::detail::PowerDetail;
use crate::dice::{Evaluated, Formula};
use crate::numeric::div_round;
use crate::origin::Origin;
use crate::roll::Roller;
use crate::stats::{Stat, Statistics};
use serde_json::{Map, Value};

/// Everything one rule invocation works with.
pub struct PowerContext<'a> {
    pub baseline: &'a PowerBaseline,
    pub catalog: &'a PowerCatalog,
    pub gimmicks: &'a GimmickList,
    pub origin: &'a Origin,
    pub stats: &'a mut Statistics,
    pub detail: &'a mut PowerDetail,
    pub roller: &'a mut dyn Roller,
    /// Formula for the device's AP. Starts as the baseline value; rules
    /// that pick a variant may replace it.
    pub device_ap: Formula,
    /// Formula for the device's range, as for `device_ap`.
    pub device_range: Formula,
}

impl<'a> PowerContext<'a> {
    /// Current value of a statistic, 0 if the character lacks it.
    pub fn stat(&self, stat: Stat) -> i64 {
        self.stats.get(stat)
    }

    /// `stat * factor`, saturating at the `i64` bounds.
    pub fn stat_times(&self, stat: Stat, factor: i64) -> i64 {
        self.stat(stat).saturating_mul(factor)
    }

    /// Sum of several statistics, saturating at the `i64` bounds.
    pub fn stat_sum(&self, stats: &[Stat]) -> i64 {
        stats
            .iter()
            .fold(0i64, |total, stat| total.saturating_add(self.stat(*stat)))
    }

    /// `stat / divisor`, rounded half up.
    pub fn stat_div(&self, stat: Stat, divisor: i64) -> i64 {
        div_round(self.stat(stat), divisor)
    }

    /// Write a field into the power's detail block.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.detail.set(key, value);
    }

    /// Sum of `count` dice.
    pub fn roll(&mut self, count: i64, sides: i64) -> i64 {
        self.roller.roll_effects(count, sides)
    }

    /// Uniform integer in `[low, high]`.
    pub fn roll_range(&mut self, low: i64, high: i64) -> i64 {
        self.roller.roll_range(low, high)
    }

    /// True with a `percent` in 100 chance.
    pub fn chance(&mut self, percent: i64) -> bool {
        self.roller.chance(percent)
    }

    /// Uniform pick from a fixed, non-empty table.
    pub fn pick<'t, T>(&mut self, table: &'t [T]) -> &'t T {
        let last = table.len().saturating_sub(1);
        let roll = self.roller.roll_range(1, table.len() as i64);
        &table[((roll - 1).max(0) as usize).min(last)]
    }

    /// Run a formula through the dice evaluator. Stat references are left
    /// as text.
    pub fn roll_formula(&mut self, formula: &Formula) -> Value {
        formula.evaluate(&mut *self.roller).into()
    }

    /// Evaluate a formula, resolving stat references against the
    /// character. Unresolvable references stay as text.
    pub fn evaluate(&mut self, formula: &Formula) -> Value {
        match formula.evaluate(&mut *self.roller) {
            Evaluated::Text(text) => match self.stats.evaluate_formula(&text) {
                Some(n) if matches!(formula, Formula::StatRef(_)) => Value::from(n),
                _ => Value::String(text),
            },
            number => number.into(),
        }
    }

    /// Evaluate an expression string, see [`PowerContext::evaluate`].
    pub fn eval(&mut self, expr: &str) -> Value {
        self.evaluate(&Formula::parse(expr))
    }

    /// Evaluate an expression string to a number, 0 if it is not one.
    pub fn eval_i64(&mut self, expr: &str) -> i64 {
        self.eval(expr).as_i64().unwrap_or(0)
    }

    /// Whether the caller seeded a `Device` object for this power.
    pub fn has_device(&self) -> bool {
        self.detail.has_device()
    }

    /// The caller-seeded device block, if any.
    pub fn device(&mut self) -> Option<&mut Map<String, Value>> {
        self.detail.device_mut()
    }

    /// Insert into the device block if it exists; otherwise do nothing.
    pub fn set_device(&mut self, key: &str, value: impl Into<Value>) {
        if let Some(device) = self.detail.device_mut() {
            device.insert(key.to_string(), value.into());
        }
    }

    /// Fill `DeviceAP` and `DeviceRange` in the device block, if present.
    pub fn fill_device(&mut self) {
        if !self.has_device() {
            return;
        }
        let ap_formula = self.device_ap.clone();
        let range_formula = self.device_range.clone();
        let ap = self.roll_formula(&ap_formula);
        let range = self.roll_formula(&range_formula);
        self.set_device("DeviceAP", ap);
        self.set_device("DeviceRange", range);
    }
}

/// Build a JSON object from key/value pairs.
pub(crate) fn object<I, K, V>(entries: I) -> Value
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    Value::Object(
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::DiceRoller;

    struct Fixture {
        baseline: PowerBaseline,
        catalog: PowerCatalog,
        gimmicks: GimmickList,
        origin: Origin,
        stats: Statistics,
        detail: PowerDetail,
        roller: DiceRoller,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                baseline: PowerBaseline::named("Test"),
                catalog: PowerCatalog::new(),
                gimmicks: GimmickList::default(),
                origin: Origin::default(),
                stats: [(Stat::Stamina, 15), (Stat::Agility, 5)].into_iter().collect(),
                detail: PowerDetail::new(),
                roller: DiceRoller::seeded(8),
            }
        }

        fn context(&mut self) -> PowerContext<'_> {
            PowerContext {
                baseline: &self.baseline,
                catalog: &self.catalog,
                gimmicks: &self.gimmicks,
                origin: &self.origin,
                stats: &mut self.stats,
                detail: &mut self.detail,
                roller: &mut self.roller,
                device_ap: Formula::parse("2d6"),
                device_range: Formula::parse("Agility"),
            }
        }
    }

    #[test]
    fn test_evaluate_resolves_stat_refs() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        assert_eq!(ctx.eval("Stamina+Agility"), Value::from(20));
        assert_eq!(ctx.eval("Stamina+Speed"), Value::from("Stamina+Speed"));
        assert_eq!(ctx.eval("NotApplicable"), Value::from("NotApplicable"));
        assert_eq!(ctx.eval("12"), Value::from(12));
    }

    #[test]
    fn test_roll_formula_leaves_stat_refs() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        assert_eq!(
            ctx.roll_formula(&Formula::parse("Agility")),
            Value::from("Agility")
        );
    }

    #[test]
    fn test_pick_stays_in_table() {
        let mut fixture = Fixture::new();
        let mut ctx = fixture.context();
        let table = ["a", "b", "c"];
        for _ in 0..100 {
            assert!(table.contains(ctx.pick(&table)));
        }
    }

    #[test]
    fn test_fill_device_without_device_is_noop() {
        let mut fixture = Fixture::new();
        fixture.context().fill_device();
        assert!(!fixture.detail.contains_key("Device"));
    }

    #[test]
    fn test_fill_device() {
        let mut fixture = Fixture::new();
        fixture.detail.seed_device();
        fixture.context().fill_device();
        let device = fixture.detail.device().unwrap();
        let ap = device["DeviceAP"].as_i64().unwrap();
        assert!((2..=12).contains(&ap));
        assert_eq!(device["DeviceRange"], "Agility");
    }
}
