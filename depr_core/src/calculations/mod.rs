//! # Depreciation Calculations
//!
//! This module contains the depreciation engine. Each method follows the
//! pattern:
//!
//! - `compute(...) -> DeprResult<Schedule>` - Pure calculation function
//! - Inputs are validated eagerly; an invalid input fails the whole call
//!
//! [`ScheduleInput`] bundles validated parameters for any method and
//! [`calculate`] dispatches to the matching generator.
//!
//! ## Available Methods
//!
//! - [`straight_line`] - Constant quota every period
//! - [`sum_of_digits`] - Descending year-digit weights
//! - [`declining_balance`] - Geometric decay toward a 10% salvage value
//! - [`production_units`] - Total units spread evenly over the useful life
//! - [`variable_units`] - Explicit units per period
//!
//! ## Example
//!
//! ```rust
//! use depr_core::calculations::{calculate, ScheduleInput};
//!
//! let input = ScheduleInput::SumOfDigits { asset_value: 10_000.0, useful_life: 4 };
//! let schedule = calculate(&input).unwrap();
//!
//! assert_eq!(schedule.len(), 4);
//! assert!((schedule.rows()[0].depreciation_quota - 4000.0).abs() < 1e-9);
//! assert!(schedule.final_book_value().abs() < 1e-9);
//! ```

pub mod declining_balance;
pub mod production_units;
pub mod schedule;
pub mod straight_line;
pub mod sum_of_digits;
pub mod variable_units;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DeprError, DeprResult};

// Re-export commonly used types
pub use schedule::{RowDetail, Schedule, ScheduleRow};

/// Depreciation method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Same quota every period
    StraightLine,
    /// Reverse year-digit weighting
    SumOfDigits,
    /// Constant rate on the undepreciated value
    DecliningBalance,
    /// Even production over the useful life
    ProductionUnits,
    /// Explicit production per period
    VariableProductionUnits,
}

impl Method {
    /// All methods in menu order
    pub const ALL: [Method; 5] = [
        Method::StraightLine,
        Method::SumOfDigits,
        Method::DecliningBalance,
        Method::ProductionUnits,
        Method::VariableProductionUnits,
    ];

    /// Stable identifier used on the command line and in file names
    pub fn slug(&self) -> &'static str {
        match self {
            Method::StraightLine => "straight-line",
            Method::SumOfDigits => "sum-of-digits",
            Method::DecliningBalance => "declining-balance",
            Method::ProductionUnits => "production-units",
            Method::VariableProductionUnits => "variable-production-units",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::StraightLine => "Straight-Line",
            Method::SumOfDigits => "Sum-of-Digits",
            Method::DecliningBalance => "Declining Balance",
            Method::ProductionUnits => "Production Units",
            Method::VariableProductionUnits => "Variable Production Units",
        }
    }

    /// Whether the schedule ends at zero book value
    pub fn amortizes_fully(&self) -> bool {
        !matches!(self, Method::DecliningBalance)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Method {
    type Err = DeprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase().replace('_', "-");
        Method::ALL
            .into_iter()
            .find(|m| m.slug() == needle)
            .ok_or_else(|| {
                DeprError::invalid_input(
                    "method",
                    s,
                    "Expected one of: straight-line, sum-of-digits, declining-balance, production-units, variable-production-units",
                )
            })
    }
}

/// Validated parameters for one calculation run.
///
/// `asset_value` is already VAT-adjusted. Build this directly or through
/// [`crate::input::DepreciationRequest::validate`].
///
/// ## JSON Example
///
/// ```json
/// { "method": "variable-production-units", "asset_value": 9000.0, "period_units": [1000.0, 2000.0, 3000.0] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum ScheduleInput {
    StraightLine {
        asset_value: f64,
        useful_life: u32,
    },
    SumOfDigits {
        asset_value: f64,
        useful_life: u32,
    },
    DecliningBalance {
        asset_value: f64,
        useful_life: u32,
    },
    ProductionUnits {
        asset_value: f64,
        useful_life: u32,
        total_production_units: f64,
    },
    VariableProductionUnits {
        asset_value: f64,
        period_units: Vec<f64>,
    },
}

impl ScheduleInput {
    /// The method this input selects
    pub fn method(&self) -> Method {
        match self {
            ScheduleInput::StraightLine { .. } => Method::StraightLine,
            ScheduleInput::SumOfDigits { .. } => Method::SumOfDigits,
            ScheduleInput::DecliningBalance { .. } => Method::DecliningBalance,
            ScheduleInput::ProductionUnits { .. } => Method::ProductionUnits,
            ScheduleInput::VariableProductionUnits { .. } => Method::VariableProductionUnits,
        }
    }

    /// The asset value the schedule starts from
    pub fn asset_value(&self) -> f64 {
        match self {
            ScheduleInput::StraightLine { asset_value, .. }
            | ScheduleInput::SumOfDigits { asset_value, .. }
            | ScheduleInput::DecliningBalance { asset_value, .. }
            | ScheduleInput::ProductionUnits { asset_value, .. }
            | ScheduleInput::VariableProductionUnits { asset_value, .. } => *asset_value,
        }
    }

    /// Number of rows the schedule will have
    pub fn period_count(&self) -> usize {
        match self {
            ScheduleInput::StraightLine { useful_life, .. }
            | ScheduleInput::SumOfDigits { useful_life, .. }
            | ScheduleInput::DecliningBalance { useful_life, .. }
            | ScheduleInput::ProductionUnits { useful_life, .. } => *useful_life as usize,
            ScheduleInput::VariableProductionUnits { period_units, .. } => period_units.len(),
        }
    }
}

/// Compute the schedule for any method.
///
/// # Returns
///
/// * `Ok(Schedule)` - One row per period
/// * `Err(DeprError)` - If any parameter is invalid; nothing is computed
pub fn calculate(input: &ScheduleInput) -> DeprResult<Schedule> {
    tracing::debug!(
        method = input.method().slug(),
        asset_value = input.asset_value(),
        periods = input.period_count(),
        "calculating depreciation schedule"
    );

    match input {
        ScheduleInput::StraightLine {
            asset_value,
            useful_life,
        } => straight_line::compute(*asset_value, *useful_life),
        ScheduleInput::SumOfDigits {
            asset_value,
            useful_life,
        } => sum_of_digits::compute(*asset_value, *useful_life),
        ScheduleInput::DecliningBalance {
            asset_value,
            useful_life,
        } => declining_balance::compute(*asset_value, *useful_life),
        ScheduleInput::ProductionUnits {
            asset_value,
            useful_life,
            total_production_units,
        } => production_units::compute(*asset_value, *useful_life, *total_production_units),
        ScheduleInput::VariableProductionUnits {
            asset_value,
            period_units,
        } => variable_units::compute(*asset_value, period_units),
    }
}

/// Reject non-finite or non-positive asset values.
pub(crate) fn validate_asset_value(asset_value: f64) -> DeprResult<()> {
    if !asset_value.is_finite() {
        return Err(DeprError::invalid_asset_value(
            asset_value.to_string(),
            "Asset value must be a finite number",
        ));
    }
    if asset_value <= 0.0 {
        return Err(DeprError::invalid_asset_value(
            asset_value.to_string(),
            "Asset value must be positive",
        ));
    }
    Ok(())
}

/// Reject a useful life of zero periods.
pub(crate) fn validate_useful_life(useful_life: u32) -> DeprResult<()> {
    if useful_life < 1 {
        return Err(DeprError::invalid_useful_life(
            useful_life.to_string(),
            "Useful life must be at least one period",
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn all_inputs() -> Vec<ScheduleInput> {
        vec![
            ScheduleInput::StraightLine {
                asset_value: 10_000.0,
                useful_life: 5,
            },
            ScheduleInput::SumOfDigits {
                asset_value: 10_000.0,
                useful_life: 4,
            },
            ScheduleInput::DecliningBalance {
                asset_value: 10_000.0,
                useful_life: 5,
            },
            ScheduleInput::ProductionUnits {
                asset_value: 9_000.0,
                useful_life: 3,
                total_production_units: 9_000.0,
            },
            ScheduleInput::VariableProductionUnits {
                asset_value: 9_000.0,
                period_units: vec![1_000.0, 2_000.0, 3_000.0],
            },
        ]
    }

    #[test]
    fn test_dispatch_matches_method() {
        for input in all_inputs() {
            let schedule = calculate(&input).unwrap();
            assert_eq!(schedule.method(), input.method());
            assert_eq!(schedule.len(), input.period_count());
            assert_eq!(schedule.asset_value(), input.asset_value());
            assert_schedule_invariants(&schedule);
            if input.method().amortizes_fully() {
                assert_fully_amortized(&schedule);
            }
        }
    }

    #[test]
    fn test_calculation_is_deterministic() {
        for input in all_inputs() {
            let first = calculate(&input).unwrap();
            let second = calculate(&input).unwrap();
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_method_slug_roundtrip() {
        for method in Method::ALL {
            assert_eq!(method.slug().parse::<Method>().unwrap(), method);
            let json = serde_json::to_string(&method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.slug()));
        }
        assert_eq!("SUM_OF_DIGITS".parse::<Method>().unwrap(), Method::SumOfDigits);
        assert!("double-declining".parse::<Method>().is_err());
    }

    #[test]
    fn test_schedule_input_json() {
        let json = r#"{ "method": "production-units", "asset_value": 9000.0, "useful_life": 3, "total_production_units": 9000.0 }"#;
        let input: ScheduleInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.method(), Method::ProductionUnits);
        assert_eq!(input.period_count(), 3);
    }

    #[test]
    fn test_invalid_input_fails_whole_call() {
        let input = ScheduleInput::StraightLine {
            asset_value: 10_000.0,
            useful_life: 0,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_USEFUL_LIFE");
    }

    #[test]
    fn test_validate_asset_value() {
        assert!(validate_asset_value(1.0).is_ok());
        assert!(validate_asset_value(0.0).is_err());
        assert!(validate_asset_value(-10.0).is_err());
        assert!(validate_asset_value(f64::NAN).is_err());
        assert!(validate_asset_value(f64::INFINITY).is_err());
    }
}
