//! # Input Collection
//!
//! Raw request fields as a form, CLI, or JSON file supplies them, and the
//! validation that turns them into a [`ScheduleInput`] for the engine.
//!
//! This is also where the flat VAT adjustment happens: the engine only ever
//! sees an asset value with VAT already applied.
//!
//! ## Example
//!
//! ```rust
//! use depr_core::calculations::Method;
//! use depr_core::input::{DepreciationRequest, VatAdjustment};
//!
//! let request = DepreciationRequest::new(Method::StraightLine, 1000.0)
//!     .with_useful_life(4.0)
//!     .with_vat(VatAdjustment::excluded(12.0));
//!
//! let input = request.validate().unwrap();
//! assert!((input.asset_value() - 1120.0).abs() < 1e-9);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::{Method, ScheduleInput};
use crate::errors::{DeprError, DeprResult};
use crate::units::{Percent, TimeUnit};

/// Upper bound on the number of periods accepted from a request
pub const MAX_USEFUL_LIFE: u32 = 10_000;

/// Flat VAT applied to the asset value before calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VatAdjustment {
    /// True if the entered asset value already includes VAT
    pub included: bool,
    /// VAT rate (12.0 means 12%)
    pub percentage: Percent,
}

impl VatAdjustment {
    /// VAT still has to be added to the entered value
    pub fn excluded(percentage: f64) -> Self {
        VatAdjustment {
            included: false,
            percentage: Percent(percentage),
        }
    }

    /// The entered value already includes VAT
    pub fn included(percentage: f64) -> Self {
        VatAdjustment {
            included: true,
            percentage: Percent(percentage),
        }
    }

    /// Apply the adjustment to a raw asset value.
    pub fn apply(&self, asset_value: f64) -> DeprResult<f64> {
        let pct = self.percentage.value();
        if !pct.is_finite() || pct < 0.0 {
            return Err(DeprError::invalid_input(
                "vat.percentage",
                pct.to_string(),
                "VAT percentage must be a non-negative number",
            ));
        }
        if self.included {
            Ok(asset_value)
        } else {
            Ok(asset_value * (1.0 + self.percentage.as_fraction()))
        }
    }
}

/// A depreciation request as collected from the user, before validation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "method": "production-units",
///   "asset_value": 9000.0,
///   "useful_life": 3,
///   "time_unit": "years",
///   "total_production_units": 9000.0,
///   "vat": { "included": false, "percentage": 12.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationRequest {
    /// Selected depreciation method
    pub method: Method,

    /// Asset value as entered (VAT not yet applied)
    pub asset_value: f64,

    /// Useful life in periods; must be a whole number.
    /// Optional for the variable production-units method.
    #[serde(default)]
    pub useful_life: Option<f64>,

    /// Display label for the periods
    #[serde(default)]
    pub time_unit: TimeUnit,

    /// Total units over the useful life (production-units method)
    #[serde(default)]
    pub total_production_units: Option<f64>,

    /// Units produced per period (variable production-units method)
    #[serde(default)]
    pub period_units: Option<Vec<f64>>,

    /// Optional VAT adjustment
    #[serde(default)]
    pub vat: Option<VatAdjustment>,
}

impl DepreciationRequest {
    /// Start a request for `method` with the entered asset value.
    pub fn new(method: Method, asset_value: f64) -> Self {
        DepreciationRequest {
            method,
            asset_value,
            useful_life: None,
            time_unit: TimeUnit::default(),
            total_production_units: None,
            period_units: None,
            vat: None,
        }
    }

    /// Builder: set the useful life
    pub fn with_useful_life(mut self, useful_life: f64) -> Self {
        self.useful_life = Some(useful_life);
        self
    }

    /// Builder: set the display time unit
    pub fn with_time_unit(mut self, time_unit: TimeUnit) -> Self {
        self.time_unit = time_unit;
        self
    }

    /// Builder: set total production units
    pub fn with_total_production_units(mut self, units: f64) -> Self {
        self.total_production_units = Some(units);
        self
    }

    /// Builder: set per-period production units
    pub fn with_period_units(mut self, units: Vec<f64>) -> Self {
        self.period_units = Some(units);
        self
    }

    /// Builder: set the VAT adjustment
    pub fn with_vat(mut self, vat: VatAdjustment) -> Self {
        self.vat = Some(vat);
        self
    }

    /// Asset value after the VAT adjustment, if any.
    pub fn adjusted_asset_value(&self) -> DeprResult<f64> {
        if !self.asset_value.is_finite() || self.asset_value <= 0.0 {
            return Err(DeprError::invalid_asset_value(
                self.asset_value.to_string(),
                "Asset value must be a positive number",
            ));
        }
        let adjusted = match &self.vat {
            Some(vat) => vat.apply(self.asset_value)?,
            None => self.asset_value,
        };
        if !adjusted.is_finite() {
            return Err(DeprError::invalid_asset_value(
                adjusted.to_string(),
                "Asset value with VAT applied is out of range",
            ));
        }
        Ok(adjusted)
    }

    /// Validate every field and build the engine input.
    pub fn validate(&self) -> DeprResult<ScheduleInput> {
        let asset_value = self.adjusted_asset_value()?;

        let input = match self.method {
            Method::StraightLine => ScheduleInput::StraightLine {
                asset_value,
                useful_life: self.required_useful_life()?,
            },
            Method::SumOfDigits => ScheduleInput::SumOfDigits {
                asset_value,
                useful_life: self.required_useful_life()?,
            },
            Method::DecliningBalance => ScheduleInput::DecliningBalance {
                asset_value,
                useful_life: self.required_useful_life()?,
            },
            Method::ProductionUnits => {
                let useful_life = self.required_useful_life()?;
                let total = self
                    .total_production_units
                    .ok_or_else(|| DeprError::missing_field("total_production_units"))?;
                if !total.is_finite() || total <= 0.0 {
                    return Err(DeprError::invalid_units(
                        "total_production_units",
                        total.to_string(),
                        "Total production units must be a positive number",
                    ));
                }
                ScheduleInput::ProductionUnits {
                    asset_value,
                    useful_life,
                    total_production_units: total,
                }
            }
            Method::VariableProductionUnits => {
                let period_units = self
                    .period_units
                    .clone()
                    .ok_or_else(|| DeprError::missing_field("period_units"))?;
                if period_units.len() > MAX_USEFUL_LIFE as usize {
                    return Err(DeprError::invalid_useful_life(
                        period_units.len().to_string(),
                        format!("Useful life cannot exceed {} periods", MAX_USEFUL_LIFE),
                    ));
                }
                if let Some(raw) = self.useful_life {
                    let useful_life = parse_useful_life(raw)?;
                    if useful_life as usize != period_units.len() {
                        return Err(DeprError::InconsistentPeriodCount {
                            useful_life,
                            period_units: period_units.len(),
                        });
                    }
                }
                ScheduleInput::VariableProductionUnits {
                    asset_value,
                    period_units,
                }
            }
        };

        tracing::debug!(method = self.method.slug(), asset_value, "request validated");
        Ok(input)
    }

    fn required_useful_life(&self) -> DeprResult<u32> {
        let raw = self
            .useful_life
            .ok_or_else(|| DeprError::missing_field("useful_life"))?;
        parse_useful_life(raw)
    }
}

/// Convert an entered useful life into a whole number of periods.
pub fn parse_useful_life(raw: f64) -> DeprResult<u32> {
    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err(DeprError::invalid_useful_life(
            raw.to_string(),
            "Useful life must be a whole number of periods",
        ));
    }
    if raw < 1.0 {
        return Err(DeprError::invalid_useful_life(
            raw.to_string(),
            "Useful life must be at least one period",
        ));
    }
    if raw > f64::from(MAX_USEFUL_LIFE) {
        return Err(DeprError::invalid_useful_life(
            raw.to_string(),
            format!("Useful life cannot exceed {} periods", MAX_USEFUL_LIFE),
        ));
    }
    Ok(raw as u32)
}

/// Load a request from a JSON file.
pub fn load_request(path: &Path) -> DeprResult<DepreciationRequest> {
    let contents = fs::read_to_string(path)
        .map_err(|e| DeprError::file_error("read request", path.display().to_string(), e.to_string()))?;

    serde_json::from_str(&contents).map_err(|e| DeprError::serialization(e.to_string()))
}
