//! # Production-Units Depreciation (fixed total)
//!
//! Depreciation follows units produced. The total expected production is
//! assumed to be spread evenly over the useful life:
//!
//! ```text
//! depreciation_per_unit = asset_value / total_production_units
//! units_per_period      = total_production_units / useful_life
//! quota                 = units_per_period * depreciation_per_unit
//! ```
//!
//! For production that varies period by period see
//! [`super::variable_units`].

use crate::errors::{DeprError, DeprResult};

use super::schedule::{accumulate, PeriodCharge, RowDetail, Schedule};
use super::{validate_asset_value, validate_useful_life, Method};

/// Compute a production-units schedule with evenly allocated production.
///
/// # Example
///
/// ```rust
/// use depr_core::calculations::production_units;
///
/// let schedule = production_units::compute(9000.0, 3, 9000.0).unwrap();
/// assert_eq!(schedule.rows()[0].depreciation_quota, 3000.0);
/// assert_eq!(schedule.total_depreciation(), 9000.0);
/// ```
pub fn compute(asset_value: f64, useful_life: u32, total_production_units: f64) -> DeprResult<Schedule> {
    validate_asset_value(asset_value)?;
    validate_useful_life(useful_life)?;
    validate_total_units(total_production_units)?;

    let depreciation_per_unit = asset_value / total_production_units;
    let units_per_period = total_production_units / f64::from(useful_life);
    let quota = units_per_period * depreciation_per_unit;
    if !depreciation_per_unit.is_finite() || !quota.is_finite() {
        return Err(DeprError::invalid_units(
            "total_production_units",
            total_production_units.to_string(),
            "Total production units are too small to give a finite depreciation per unit",
        ));
    }

    Ok(accumulate(Method::ProductionUnits, asset_value, useful_life, |_| PeriodCharge {
        quota,
        detail: RowDetail::ProductionUnits {
            units_produced: units_per_period,
            depreciation_per_unit,
        },
    }))
}

fn validate_total_units(total_production_units: f64) -> DeprResult<()> {
    if !total_production_units.is_finite() || total_production_units <= 0.0 {
        return Err(DeprError::invalid_units(
            "total_production_units",
            total_production_units.to_string(),
            "Total production units must be a positive number",
        ));
    }
    Ok(())
}
