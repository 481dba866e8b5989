//! Dice-expression evaluator.
//!
//! Catalog cells mix integer literals, dice notation, stat formulas and
//! sentinel words. [`Formula::parse`] classifies a cell once, and
//! [`Formula::evaluate`] turns it into either a number or the untouched
//! text. Nothing in this module returns an error: anything that does not
//! parse is handed back verbatim.
//!
//! Recognised shapes:
//!
//! ```text
//! NdM        2d6        sum of N dice
//! NdM+K      1d6+3      sum plus K
//! NdMxJ      3d8x2      sum times J
//! NdMxJ+K    2d4x4+3    sum times J plus K
//! K          12         integer literal
//! A or B     20 or 10   percentile split: <= 50 gives 20, otherwise 10
//! ```
//!
//! Dice terms larger than [`MAX_DICE`] dice of [`MAX_SIDES`] sides, and
//! terms whose total would overflow an `i64`, are treated as malformed.

use crate::roll::Roller;
use serde_json::Value;
use std::fmt;

/// Words that mark a cell as "not a number" for the caller.
///
/// Detection is a case-sensitive substring match, so `"HTH+2"` is still a
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    NotApplicable,
    Unlimited,
    Variable,
    /// Hand-to-hand.
    Hth,
}

impl Sentinel {
    pub const ALL: [Sentinel; 4] = [
        Sentinel::NotApplicable,
        Sentinel::Unlimited,
        Sentinel::Variable,
        Sentinel::Hth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sentinel::NotApplicable => "NotApplicable",
            Sentinel::Unlimited => "Unlimited",
            Sentinel::Variable => "Variable",
            Sentinel::Hth => "HTH",
        }
    }

    /// First sentinel contained in `expr`, if any.
    pub fn find(expr: &str) -> Option<Sentinel> {
        Self::ALL.into_iter().find(|s| expr.contains(s.as_str()))
    }
}

/// Most dice a single term may roll.
pub const MAX_DICE: i64 = 1_000;

/// Most sides a single die may have.
pub const MAX_SIDES: i64 = 1_000_000;

/// A parsed dice term: `count`d`sides`, times `multiplier`, plus `bonus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    pub count: i64,
    pub sides: i64,
    pub multiplier: i64,
    pub bonus: i64,
}

impl DiceRoll {
    /// Plain `NdM` roll.
    pub fn new(count: i64, sides: i64) -> Self {
        Self {
            count,
            sides,
            multiplier: 1,
            bonus: 0,
        }
    }

    /// Multiply the dice total by `multiplier`.
    pub fn times(mut self, multiplier: i64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Add `bonus` after any multiplier.
    pub fn plus(mut self, bonus: i64) -> Self {
        self.bonus = bonus;
        self
    }

    /// Parse dice notation. Returns `None` when any numeric part is
    /// malformed, no `d` marker is present, or the pool is larger than
    /// [`MAX_DICE`] dice of [`MAX_SIDES`] sides.
    pub fn parse(expr: &str) -> Option<Self> {
        if let Some((dice, rest)) = expr.split_once('x') {
            let (count, sides) = parse_dice_term(dice)?;
            let (multiplier, bonus) = match rest.split_once('+') {
                Some((mult, bonus)) => (parse_int(mult)?, parse_int(bonus)?),
                None => (parse_int(rest)?, 0),
            };
            return Some(DiceRoll::new(count, sides).times(multiplier).plus(bonus));
        }
        if let Some((dice, bonus)) = expr.split_once('+') {
            let (count, sides) = parse_dice_term(dice)?;
            return Some(DiceRoll::new(count, sides).plus(parse_int(bonus)?));
        }
        let (count, sides) = parse_dice_term(expr)?;
        Some(DiceRoll::new(count, sides))
    }

    /// Roll the term. `None` if multiplying or adding the bonus overflows.
    pub fn roll<R: Roller + ?Sized>(&self, roller: &mut R) -> Option<i64> {
        roller
            .roll_effects(self.count, self.sides)
            .checked_mul(self.multiplier)?
            .checked_add(self.bonus)
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.multiplier != 1 {
            write!(f, "x{}", self.multiplier)?;
        }
        if self.bonus != 0 {
            write!(f, "+{}", self.bonus)?;
        }
        Ok(())
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

fn parse_dice_term(s: &str) -> Option<(i64, i64)> {
    let (count, sides) = s.split_once('d')?;
    let (count, sides) = (parse_int(count)?, parse_int(sides)?);
    if count > MAX_DICE || sides > MAX_SIDES {
        return None;
    }
    Some((count, sides))
}

/// A classified catalog cell.
///
/// Every variant except [`Formula::Literal`] and [`Formula::Blank`] keeps its
/// original text so it can be copied into a character record verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    Literal(i64),
    Dice { raw: String, roll: DiceRoll },
    /// The `"A or B"` form.
    Alternative(String),
    /// Letters but no dice marker, e.g. `"Agility+Strength"`. Resolved by
    /// the caller against character statistics.
    StatRef(String),
    Sentinel(Sentinel, String),
    /// Anything else, including malformed dice notation.
    Text(String),
    Blank,
}

impl Formula {
    /// Classify an expression. Never fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use squadron::dice::{Formula, Sentinel};
    ///
    /// assert_eq!(Formula::parse("12"), Formula::Literal(12));
    /// assert!(matches!(Formula::parse("2d6+1"), Formula::Dice { .. }));
    /// assert!(matches!(Formula::parse("Agility+Strength"), Formula::StatRef(_)));
    /// assert!(matches!(Formula::parse("HTH"), Formula::Sentinel(Sentinel::Hth, _)));
    /// assert!(matches!(Formula::parse("2dx6"), Formula::Text(_)));
    /// ```
    pub fn parse(expr: &str) -> Formula {
        if expr.trim().is_empty() {
            return Formula::Blank;
        }
        if let Some(sentinel) = Sentinel::find(expr) {
            return Formula::Sentinel(sentinel, expr.to_owned());
        }
        if expr.contains(" or ") {
            return Formula::Alternative(expr.to_owned());
        }
        let has_dice = expr.contains('d');
        if !has_dice && expr.chars().any(|c| c.is_ascii_alphabetic()) {
            return Formula::StatRef(expr.to_owned());
        }
        if has_dice {
            return match DiceRoll::parse(expr) {
                Some(roll) => Formula::Dice {
                    raw: expr.to_owned(),
                    roll,
                },
                None => Formula::Text(expr.to_owned()),
            };
        }
        match parse_int(expr) {
            Some(n) => Formula::Literal(n),
            None => Formula::Text(expr.to_owned()),
        }
    }

    /// Original text of the cell.
    pub fn raw(&self) -> String {
        match self {
            Formula::Literal(n) => n.to_string(),
            Formula::Dice { raw, .. }
            | Formula::Alternative(raw)
            | Formula::StatRef(raw)
            | Formula::Sentinel(_, raw)
            | Formula::Text(raw) => raw.clone(),
            Formula::Blank => String::new(),
        }
    }

    /// True for an empty cell.
    pub fn is_blank(&self) -> bool {
        matches!(self, Formula::Blank)
    }

    /// Evaluate, rolling dice through `roller`. Stat references, sentinels
    /// and unparseable text come back unchanged.
    pub fn evaluate<R: Roller + ?Sized>(&self, roller: &mut R) -> Evaluated {
        match self {
            Formula::Literal(n) => Evaluated::Number(*n),
            Formula::Dice { raw, roll } => match roll.roll(roller) {
                Some(n) => Evaluated::Number(n),
                None => {
                    tracing::warn!(expr = %raw, "dice total overflowed, keeping text");
                    Evaluated::Text(raw.clone())
                }
            },
            Formula::Alternative(_) => {
                // Only one catalog row uses this form; its split is fixed.
                if roller.percentile() <= 50 {
                    Evaluated::Number(20)
                } else {
                    Evaluated::Number(10)
                }
            }
            Formula::StatRef(raw) | Formula::Sentinel(_, raw) | Formula::Text(raw) => {
                tracing::trace!(expr = %raw, "formula passed through unevaluated");
                Evaluated::Text(raw.clone())
            }
            Formula::Blank => Evaluated::Text(String::new()),
        }
    }

    /// The cell as it should appear when copied verbatim into a record.
    pub fn to_value(&self) -> Value {
        match self {
            Formula::Literal(n) => Value::from(*n),
            Formula::Blank => Value::Null,
            other => Value::String(other.raw()),
        }
    }
}

impl From<&str> for Formula {
    fn from(expr: &str) -> Self {
        Formula::parse(expr)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw())
    }
}

/// Result of evaluating a [`Formula`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluated {
    Number(i64),
    Text(String),
}

impl Evaluated {
    /// The number, if the formula produced one.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Evaluated::Number(n) => Some(*n),
            Evaluated::Text(_) => None,
        }
    }
}

impl From<Evaluated> for Value {
    fn from(value: Evaluated) -> Self {
        match value {
            Evaluated::Number(n) => Value::from(n),
            Evaluated::Text(s) => Value::String(s),
        }
    }
}

/// Parse and evaluate in one step.
///
/// # Examples
///
/// ```rust
/// use squadron::dice::{evaluate, Evaluated};
/// use squadron::DiceRoller;
///
/// let mut roller = DiceRoller::seeded(1);
/// assert_eq!(evaluate("NotApplicable", &mut roller), Evaluated::Text("NotApplicable".into()));
/// assert_eq!(evaluate("7", &mut roller), Evaluated::Number(7));
/// let rolled = evaluate("2d6", &mut roller).as_number().unwrap();
/// assert!((2..=12).contains(&rolled));
/// ```
pub fn evaluate<R: Roller + ?Sized>(expr: &str, roller: &mut R) -> Evaluated {
    Formula::parse(expr).evaluate(roller)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::DiceRoller;

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            DiceRoll::parse("2d6"),
            Some(DiceRoll::new(2, 6))
        );
        assert_eq!(
            DiceRoll::parse("1d6+3"),
            Some(DiceRoll::new(1, 6).plus(3))
        );
        assert_eq!(
            DiceRoll::parse("3d8x2"),
            Some(DiceRoll::new(3, 8).times(2))
        );
        assert_eq!(
            DiceRoll::parse("2d4x4+3"),
            Some(DiceRoll::new(2, 4).times(4).plus(3))
        );
    }

    #[test]
    fn test_malformed_dice_fall_back() {
        for expr in ["d6", "2d", "2dx6", "ad6", "2d6+", "2d6xq", "2d6x3+z"] {
            assert_eq!(DiceRoll::parse(expr), None, "{expr}");
            let mut roller = DiceRoller::seeded(0);
            assert_eq!(evaluate(expr, &mut roller), Evaluated::Text(expr.to_string()));
        }
    }

    #[test]
    fn test_sentinels_pass_through() {
        let mut roller = DiceRoller::seeded(0);
        for expr in ["NotApplicable", "Unlimited", "Variable", "HTH", "HTH+2"] {
            assert!(matches!(Formula::parse(expr), Formula::Sentinel(..)));
            assert_eq!(evaluate(expr, &mut roller), Evaluated::Text(expr.to_string()));
        }
    }

    #[test]
    fn test_sentinel_match_is_case_sensitive() {
        assert!(matches!(Formula::parse("hth"), Formula::StatRef(_)));
        assert!(matches!(Formula::parse("variable"), Formula::StatRef(_)));
    }

    #[test]
    fn test_alternative_is_not_a_stat_reference() {
        assert!(matches!(
            Formula::parse("20 or 10"),
            Formula::Alternative(_)
        ));
    }

    #[test]
    fn test_alternative_split() {
        let mut roller = DiceRoller::seeded(5);
        for _ in 0..200 {
            let n = evaluate("20 or 10", &mut roller).as_number().unwrap();
            assert!(n == 20 || n == 10);
        }
    }

    #[test]
    fn test_literals() {
        assert_eq!(Formula::parse(" 15 "), Formula::Literal(15));
        assert_eq!(Formula::parse("-2"), Formula::Literal(-2));
        assert!(matches!(Formula::parse("1.5"), Formula::Text(_)));
        assert_eq!(Formula::parse(""), Formula::Blank);
    }

    #[test]
    fn test_verbatim_values() {
        assert_eq!(Formula::parse("4").to_value(), Value::from(4));
        assert_eq!(Formula::parse("2d6").to_value(), Value::from("2d6"));
        assert_eq!(Formula::parse("").to_value(), Value::Null);
        assert_eq!(
            Formula::parse("Stamina+Agility").to_value(),
            Value::from("Stamina+Agility")
        );
    }

    #[test]
    fn test_display_roundtrip() {
        let roll = DiceRoll::new(2, 4).times(4).plus(3);
        assert_eq!(roll.to_string(), "2d4x4+3");
        assert_eq!(DiceRoll::parse(&roll.to_string()), Some(roll));
    }

    #[test]
    fn test_overflowing_totals_keep_text() {
        let mut roller = DiceRoller::seeded(0);
        for expr in [
            "2d6x9223372036854775807",
            "1d6+9223372036854775807",
            "3d6x4611686018427387904",
        ] {
            assert!(matches!(Formula::parse(expr), Formula::Dice { .. }), "{expr}");
            assert_eq!(evaluate(expr, &mut roller), Evaluated::Text(expr.to_string()));
        }
    }

    #[test]
    fn test_oversized_pools_are_malformed() {
        let mut roller = DiceRoller::seeded(0);
        for expr in ["50000000d6", "99999999999d6", "2d9223372036854775807", "1001d6x2+1"] {
            assert_eq!(DiceRoll::parse(expr), None, "{expr}");
            assert_eq!(evaluate(expr, &mut roller), Evaluated::Text(expr.to_string()));
        }
        assert_eq!(DiceRoll::parse("1000d6"), Some(DiceRoll::new(1000, 6)));
    }
}
