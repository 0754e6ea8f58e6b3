//! Calorie estimation for parsed workout entries.
//!
//! The estimate is a flat approximation: truncated minutes times truncated
//! kilograms times a fixed rate. Totals and averages downstream are defined
//! in terms of this exact value, so the truncation must not become rounding.

/// Kilocalories per minute per kilogram
pub const KCAL_PER_MIN_PER_KG: i64 = 5;

/// Estimate calories burned for one entry
///
/// Both inputs are truncated toward zero before multiplying, so `72.9` kg
/// counts as `72`. Negative inputs propagate unchanged. The product saturates
/// at the `i64` bounds.
pub fn estimate(weight_kg: f64, duration_min: f64) -> i64 {
    let weight = weight_kg.trunc() as i64;
    let duration = duration_min.trunc() as i64;

    duration
        .saturating_mul(KCAL_PER_MIN_PER_KG)
        .saturating_mul(weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncates_instead_of_rounding() {
        assert_eq!(estimate(72.9, 30.7), 30 * 5 * 72);
        assert_eq!(estimate(72.9, 30.7), 10800);
    }

    #[test]
    fn test_zero_inputs() {
        assert_eq!(estimate(0.0, 10.0), 0);
        assert_eq!(estimate(10.0, 0.0), 0);
        assert_eq!(estimate(0.99, 45.0), 0);
    }

    #[test]
    fn test_negative_values_propagate() {
        assert_eq!(estimate(-10.0, 3.0), -150);
        assert_eq!(estimate(10.0, -3.0), -150);
        assert_eq!(estimate(-10.0, -3.0), 150);
        // toward zero, not floor
        assert_eq!(estimate(-10.9, 2.0), -100);
    }

    #[test]
    fn test_huge_values_saturate() {
        assert_eq!(estimate(1e300, 1e300), i64::MAX);
        assert_eq!(estimate(-1e300, 1e300), i64::MIN);
    }
}
