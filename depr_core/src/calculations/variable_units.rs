//! # Production-Units Depreciation (variable per-period units)
//!
//! Each period declares how many units it produced. The asset value is
//! spread over the total in proportion:
//!
//! ```text
//! total_units           = sum(period_units)
//! depreciation_per_unit = asset_value / total_units
//! quota_p               = period_units[p] * depreciation_per_unit
//! ```
//!
//! The period count is the length of `period_units`. Callers that also
//! collect a useful life must check the two agree before calling; the
//! input collector does this (see [`crate::input`]).

use crate::errors::{DeprError, DeprResult};

use super::schedule::{accumulate, PeriodCharge, RowDetail, Schedule};
use super::{validate_asset_value, Method};

/// Compute a production-units schedule from explicit per-period units.
///
/// # Example
///
/// ```rust
/// use depr_core::calculations::variable_units;
///
/// let schedule = variable_units::compute(9000.0, &[1000.0, 2000.0, 3000.0]).unwrap();
/// let quotas: Vec<f64> = schedule.iter().map(|r| r.depreciation_quota).collect();
/// assert_eq!(quotas, vec![1500.0, 3000.0, 4500.0]);
/// ```
pub fn compute(asset_value: f64, period_units: &[f64]) -> DeprResult<Schedule> {
    validate_asset_value(asset_value)?;
    let periods = validate_period_units(period_units)?;

    let total_units: f64 = period_units.iter().sum();
    let depreciation_per_unit = asset_value / total_units;
    if !depreciation_per_unit.is_finite() {
        return Err(DeprError::invalid_units(
            "period_units",
            total_units.to_string(),
            "Total units are too small to give a finite depreciation per unit",
        ));
    }

    Ok(accumulate(Method::VariableProductionUnits, asset_value, periods, |period| {
        let units_produced = period_units[(period.number - 1) as usize];
        PeriodCharge {
            quota: units_produced * depreciation_per_unit,
            detail: RowDetail::ProductionUnits {
                units_produced,
                depreciation_per_unit,
            },
        }
    }))
}

/// Check the unit sequence and return its length as a period count.
fn validate_period_units(period_units: &[f64]) -> DeprResult<u32> {
    if period_units.is_empty() {
        return Err(DeprError::invalid_useful_life(
            "0",
            "At least one period of production units is required",
        ));
    }

    let periods = u32::try_from(period_units.len()).map_err(|_| {
        DeprError::invalid_useful_life(period_units.len().to_string(), "Too many periods")
    })?;

    for (index, units) in period_units.iter().enumerate() {
        if !units.is_finite() || *units < 0.0 {
            return Err(DeprError::invalid_units(
                format!("period_units[{}]", index),
                units.to_string(),
                "Units per period must be a non-negative number",
            ));
        }
    }

    let total: f64 = period_units.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(DeprError::invalid_units(
            "period_units",
            total.to_string(),
            "Total units across all periods must be positive",
        ));
    }

    Ok(periods)
}
