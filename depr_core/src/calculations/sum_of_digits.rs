//! # Sum-of-Digits Depreciation
//!
//! Each period gets a weight proportional to the number of periods left,
//! so the first period carries the largest share:
//!
//! ```text
//! sum_of_digits = n(n + 1) / 2
//! factor_p      = (n - p + 1) / sum_of_digits
//! quota_p       = factor_p * asset_value
//! ```
//!
//! The factors sum to 1 over the full schedule.

use crate::errors::DeprResult;

use super::schedule::{accumulate, PeriodCharge, RowDetail, Schedule};
use super::{validate_asset_value, validate_useful_life, Method};

/// Sum of the digits 1..=n, i.e. n(n+1)/2
pub fn sum_of_digits(useful_life: u32) -> f64 {
    let n = u64::from(useful_life);
    (n * (n + 1) / 2) as f64
}

/// Compute a sum-of-digits schedule.
///
/// # Example
///
/// ```rust
/// use depr_core::calculations::{sum_of_digits, RowDetail};
///
/// let schedule = sum_of_digits::compute(10_000.0, 4).unwrap();
/// match schedule.rows()[0].detail {
///     RowDetail::SumOfDigits { factor, .. } => assert!((factor - 0.4).abs() < 1e-12),
///     _ => unreachable!(),
/// }
/// ```
pub fn compute(asset_value: f64, useful_life: u32) -> DeprResult<Schedule> {
    validate_asset_value(asset_value)?;
    validate_useful_life(useful_life)?;

    let digits = sum_of_digits(useful_life);

    Ok(accumulate(Method::SumOfDigits, asset_value, useful_life, |period| {
        let factor = f64::from(useful_life - period.number + 1) / digits;
        PeriodCharge {
            quota: factor * asset_value,
            detail: RowDetail::SumOfDigits {
                factor,
                percentage: factor * 100.0,
                asset_value,
            },
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::*;

    fn factors(schedule: &Schedule) -> Vec<f64> {
        schedule
            .iter()
            .map(|row| match row.detail {
                RowDetail::SumOfDigits { factor, .. } => factor,
                _ => panic!("unexpected row detail"),
            })
            .collect()
    }

    #[test]
    fn test_sum_of_digits() {
        assert_eq!(sum_of_digits(1), 1.0);
        assert_eq!(sum_of_digits(4), 10.0);
        assert_eq!(sum_of_digits(10), 55.0);
        assert_eq!(sum_of_digits(u32::MAX), 9_223_372_034_707_292_160.0);
    }

    #[test]
    fn test_four_period_example() {
        let schedule = compute(10_000.0, 4).unwrap();
        let quotas: Vec<f64> = schedule.iter().map(|r| r.depreciation_quota).collect();
        let expected = [4000.0, 3000.0, 2000.0, 1000.0];
        for (q, e) in quotas.iter().zip(expected) {
            assert!((q - e).abs() < TOLERANCE * 10_000.0);
        }

        let f = factors(&schedule);
        assert!((f[0] - 0.4).abs() < 1e-12);
        assert!((f[3] - 0.1).abs() < 1e-12);

        assert_schedule_invariants(&schedule);
        assert_fully_amortized(&schedule);
    }

    #[test]
    fn test_factors_strictly_decrease_and_sum_to_one() {
        let schedule = compute(52_000.0, 12).unwrap();
        let f = factors(&schedule);
        assert!(f.windows(2).all(|w| w[0] > w[1]));
        assert!((f.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_echoes_asset_value_and_percentage() {
        let schedule = compute(2500.0, 3).unwrap();
        for row in &schedule {
            match row.detail {
                RowDetail::SumOfDigits {
                    factor,
                    percentage,
                    asset_value,
                } => {
                    assert_eq!(asset_value, 2500.0);
                    assert!((percentage - factor * 100.0).abs() < 1e-12);
                }
                _ => panic!("unexpected row detail"),
            }
        }
    }

    #[test]
    fn test_single_period_full_factor() {
        let schedule = compute(800.0, 1).unwrap();
        assert_eq!(factors(&schedule), vec![1.0]);
        assert_eq!(schedule.rows()[0].depreciation_quota, 800.0);
        assert_eq!(schedule.final_book_value(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute(0.0, 4).is_err());
        assert!(compute(1000.0, 0).is_err());
    }
}
