//! # Straight-Line Depreciation
//!
//! The asset value is charged in equal quotas over the useful life:
//!
//! ```text
//! quota = asset_value / useful_life
//! ```
//!
//! ## Example
//!
//! ```rust
//! use depr_core::calculations::straight_line;
//!
//! let schedule = straight_line::compute(10_000.0, 5).unwrap();
//! assert!(schedule.iter().all(|row| row.depreciation_quota == 2000.0));
//! assert_eq!(schedule.final_book_value(), 0.0);
//! ```

use crate::errors::DeprResult;

use super::schedule::{accumulate, PeriodCharge, RowDetail, Schedule};
use super::{validate_asset_value, validate_useful_life, Method};

/// Compute a straight-line schedule.
///
/// # Arguments
///
/// * `asset_value` - Value to depreciate (> 0)
/// * `useful_life` - Number of periods (>= 1)
pub fn compute(asset_value: f64, useful_life: u32) -> DeprResult<Schedule> {
    validate_asset_value(asset_value)?;
    validate_useful_life(useful_life)?;

    let quota = asset_value / f64::from(useful_life);

    Ok(accumulate(Method::StraightLine, asset_value, useful_life, |_| PeriodCharge {
        quota,
        detail: RowDetail::StraightLine,
    }))
}
