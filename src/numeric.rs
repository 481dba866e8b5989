//! Integer rounding helpers used by stat-scaled derivations.
//!
//! Table values are whole numbers, so derived areas and rates are computed
//! with exact integer arithmetic instead of going through `f64`.

/// Divide and round half up (towards positive infinity on a tie).
///
/// A zero divisor yields 0 rather than panicking, and a quotient outside
/// the `i64` range saturates.
///
/// # Examples
///
/// ```rust
/// use squadron::numeric::div_round;
///
/// assert_eq!(div_round(15, 5), 3);
/// assert_eq!(div_round(12, 5), 2);
/// assert_eq!(div_round(13, 5), 3);
/// assert_eq!(div_round(5, 2), 3);
/// ```
pub fn div_round(numerator: i64, denominator: i64) -> i64 {
    if denominator == 0 {
        return 0;
    }
    let (n, d) = (i128::from(numerator), i128::from(denominator));
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    let quotient = (2 * n + d).div_euclid(2 * d);
    i64::try_from(quotient).unwrap_or(if quotient < 0 { i64::MIN } else { i64::MAX })
}

/// Round a float half up.
///
/// ```rust
/// use squadron::numeric::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(-2.5), -2);
/// assert_eq!(round_half_up(2.49), 2);
/// ```
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Exact fraction as a float, for damage multipliers such as one third.
pub fn fraction(numerator: i64, denominator: i64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_ties_go_up() {
        assert_eq!(div_round(1, 2), 1);
        assert_eq!(div_round(3, 2), 2);
        assert_eq!(div_round(-1, 2), 0);
        assert_eq!(div_round(7, 2), 4);
    }

    #[test]
    fn test_div_round_matches_float_rounding() {
        for n in -50..50 {
            for d in 1..12 {
                assert_eq!(div_round(n, d), round_half_up(n as f64 / d as f64), "{n}/{d}");
            }
        }
    }

    #[test]
    fn test_zero_divisor() {
        assert_eq!(div_round(10, 0), 0);
        assert_eq!(fraction(1, 0), 0.0);
    }

    #[test]
    fn test_div_round_saturates() {
        assert_eq!(div_round(i64::MAX, 1), i64::MAX);
        assert_eq!(div_round(i64::MIN, -1), i64::MAX);
        assert_eq!(div_round(i64::MIN, 1), i64::MIN);
        assert_eq!(div_round(i64::MAX, 2), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_negative_divisor() {
        assert_eq!(div_round(10, -4), div_round(-10, 4));
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(1, 2), 0.5);
        assert!((fraction(1, 3) - 0.3333).abs() < 0.001);
    }
}
