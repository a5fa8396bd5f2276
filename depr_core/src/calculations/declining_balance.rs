//! # Declining-Balance Depreciation
//!
//! A constant rate is applied to the book value still undepreciated at the
//! start of each period. The rate is the one that decays the asset value to
//! a salvage value of 10% over the useful life:
//!
//! ```text
//! salvage = asset_value * 0.1
//! rate    = 1 - (salvage / asset_value)^(1 / n)
//! quota_p = rate * undepreciated_p
//! ```
//!
//! Book value never reaches zero; it ends at (approximately) the salvage
//! value.
//!
//! ## Example
//!
//! ```rust
//! use depr_core::calculations::declining_balance;
//!
//! let schedule = declining_balance::compute(10_000.0, 5).unwrap();
//! assert!((schedule.final_book_value() - 1000.0).abs() < 1e-6);
//! ```

use crate::errors::DeprResult;

use super::schedule::{accumulate, PeriodCharge, RowDetail, Schedule};
use super::{validate_asset_value, validate_useful_life, Method};

/// Share of the asset value assumed to remain at the end of the useful life
pub const SALVAGE_FRACTION: f64 = 0.1;

/// Salvage value for an asset: 10% of its value
pub fn salvage_value(asset_value: f64) -> f64 {
    asset_value * SALVAGE_FRACTION
}

/// Per-period rate that decays `asset_value` to its salvage value in `useful_life` periods.
///
/// Rejects a non-positive asset value instead of returning NaN.
pub fn depreciation_rate(asset_value: f64, useful_life: u32) -> DeprResult<f64> {
    validate_asset_value(asset_value)?;
    validate_useful_life(useful_life)?;

    let ratio = salvage_value(asset_value) / asset_value;
    Ok(1.0 - ratio.powf(1.0 / f64::from(useful_life)))
}

/// Compute a declining-balance schedule.
pub fn compute(asset_value: f64, useful_life: u32) -> DeprResult<Schedule> {
    let rate = depreciation_rate(asset_value, useful_life)?;

    Ok(accumulate(Method::DecliningBalance, asset_value, useful_life, |period| {
        let undepreciated_value = period.opening_book_value;
        PeriodCharge {
            quota: rate * undepreciated_value,
            detail: RowDetail::DecliningBalance {
                depreciation_rate: rate,
                undepreciated_value,
            },
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::test_support::*;

    fn detail(row: &crate::calculations::ScheduleRow) -> (f64, f64) {
        match row.detail {
            RowDetail::DecliningBalance {
                depreciation_rate,
                undepreciated_value,
            } => (depreciation_rate, undepreciated_value),
            _ => panic!("unexpected row detail"),
        }
    }

    #[test]
    fn test_rate_for_five_periods() {
        let rate = depreciation_rate(10_000.0, 5).unwrap();
        // 1 - 0.1^0.2
        assert!((rate - 0.369_042_656).abs() < 1e-6);
    }

    #[test]
    fn test_rate_is_constant_across_rows() {
        let schedule = compute(10_000.0, 5).unwrap();
        let expected = depreciation_rate(10_000.0, 5).unwrap();
        for row in &schedule {
            assert_eq!(detail(row).0, expected);
        }
    }

    #[test]
    fn test_undepreciated_value_recurrence() {
        let schedule = compute(10_000.0, 5).unwrap();
        let rows = schedule.rows();

        assert_eq!(detail(&rows[0]).1, 10_000.0);
        for pair in rows.windows(2) {
            let (_, prev_undepreciated) = detail(&pair[0]);
            let (rate, undepreciated) = detail(&pair[1]);
            assert!((undepreciated - (prev_undepreciated - pair[0].depreciation_quota)).abs() < 1e-9);
            assert!((pair[1].depreciation_quota - rate * undepreciated).abs() < 1e-9);
        }

        assert!((rows[0].depreciation_quota - 3690.426_56).abs() < 1e-3);
    }

    #[test]
    fn test_ends_near_salvage_not_zero() {
        let schedule = compute(10_000.0, 5).unwrap();
        assert_schedule_invariants(&schedule);
        let final_value = schedule.final_book_value();
        assert!(final_value > 0.0);
        assert!((final_value - salvage_value(10_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_single_period_drops_to_salvage() {
        let schedule = compute(5000.0, 1).unwrap();
        let (rate, _) = detail(&schedule.rows()[0]);
        assert!((rate - 0.9).abs() < 1e-12);
        assert!((schedule.final_book_value() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_asset_value_is_rejected() {
        assert_eq!(compute(0.0, 5).unwrap_err().error_code(), "INVALID_ASSET_VALUE");
        assert!(depreciation_rate(0.0, 5).is_err());
    }

    #[test]
    fn test_zero_useful_life_is_rejected() {
        assert_eq!(compute(100.0, 0).unwrap_err().error_code(), "INVALID_USEFUL_LIFE");
    }
}
