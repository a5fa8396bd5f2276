//! # Schedule Rows and Accumulation
//!
//! Every generator produces the same shape: rows in strictly increasing
//! period order, where each row's running totals are carried forward from
//! the previous row. That loop lives here once, in [`accumulate`], and each
//! method only supplies the quota for a given period.

use serde::{Deserialize, Serialize};

use super::Method;

/// Method-specific columns attached to a schedule row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RowDetail {
    /// Straight-line rows carry only the common columns
    StraightLine,

    /// Sum-of-digits weight for the period
    SumOfDigits {
        /// Share of the asset value charged this period, in (0, 1]
        factor: f64,
        /// `factor * 100`
        percentage: f64,
        /// Asset value, repeated on every row for display
        asset_value: f64,
    },

    /// Declining-balance state entering the period
    DecliningBalance {
        /// Rate applied to the undepreciated value (same on every row)
        depreciation_rate: f64,
        /// Book value before this period's quota is subtracted
        undepreciated_value: f64,
    },

    /// Production-units figures (fixed and variable variants)
    ProductionUnits {
        /// Units produced in this period
        units_produced: f64,
        /// Depreciation charged per unit (same on every row)
        depreciation_per_unit: f64,
    },
}

/// One period of a depreciation schedule.
///
/// ## JSON Example (sum-of-digits)
///
/// ```json
/// {
///   "period": 1,
///   "depreciation_quota": 4000.0,
///   "accumulated_depreciation": 4000.0,
///   "net_book_value": 6000.0,
///   "kind": "sum-of-digits",
///   "factor": 0.4,
///   "percentage": 40.0,
///   "asset_value": 10000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based period number
    pub period: u32,

    /// Depreciation expense recognized in this period
    pub depreciation_quota: f64,

    /// Sum of quotas from period 1 through this period
    pub accumulated_depreciation: f64,

    /// Asset value minus accumulated depreciation
    pub net_book_value: f64,

    /// Method-specific columns
    #[serde(flatten)]
    pub detail: RowDetail,
}

/// An ordered depreciation schedule produced by one calculation run.
///
/// Schedules are read-only: the engine builds them and callers only
/// inspect, render, or export them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    method: Method,
    asset_value: f64,
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    /// The method that produced this schedule
    pub fn method(&self) -> Method {
        self.method
    }

    /// The (VAT-adjusted) asset value the schedule starts from
    pub fn asset_value(&self) -> f64 {
        self.asset_value
    }

    /// All rows in period order
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    /// Number of periods
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the schedule has no periods
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in period order
    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleRow> {
        self.rows.iter()
    }

    /// The final period, if any
    pub fn last(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }

    /// Accumulated depreciation at the end of the schedule
    pub fn total_depreciation(&self) -> f64 {
        self.last().map_or(0.0, |row| row.accumulated_depreciation)
    }

    /// Net book value at the end of the schedule
    pub fn final_book_value(&self) -> f64 {
        self.last().map_or(self.asset_value, |row| row.net_book_value)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleRow;
    type IntoIter = std::slice::Iter<'a, ScheduleRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// State handed to a generator for one period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Period {
    /// 1-based period number
    pub number: u32,
    /// Book value entering the period
    pub opening_book_value: f64,
}

/// A generator's charge for one period.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PeriodCharge {
    pub quota: f64,
    pub detail: RowDetail,
}

/// Build a schedule of `periods` rows, asking `charge` for each quota.
///
/// Accumulated depreciation and the opening book value are carried forward
/// row by row. Net book value is always `asset_value - accumulated`.
pub(crate) fn accumulate<F>(method: Method, asset_value: f64, periods: u32, mut charge: F) -> Schedule
where
    F: FnMut(Period) -> PeriodCharge,
{
    let mut rows = Vec::with_capacity(periods as usize);
    let mut accumulated = 0.0;
    let mut opening_book_value = asset_value;

    for number in 1..=periods {
        let PeriodCharge { quota, detail } = charge(Period {
            number,
            opening_book_value,
        });

        accumulated += quota;
        opening_book_value -= quota;

        rows.push(ScheduleRow {
            period: number,
            depreciation_quota: quota,
            accumulated_depreciation: accumulated,
            net_book_value: asset_value - accumulated,
            detail,
        });
    }

    Schedule {
        method,
        asset_value,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(quota: f64) -> impl FnMut(Period) -> PeriodCharge {
        move |_| PeriodCharge {
            quota,
            detail: RowDetail::StraightLine,
        }
    }

    #[test]
    fn test_periods_are_one_based_and_contiguous() {
        let schedule = accumulate(Method::StraightLine, 300.0, 3, flat(100.0));
        let periods: Vec<u32> = schedule.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![1, 2, 3]);
    }

    #[test]
    fn test_accumulation_carries_forward() {
        let quotas = [50.0, 30.0, 20.0];
        let schedule = accumulate(Method::StraightLine, 100.0, 3, |p| PeriodCharge {
            quota: quotas[(p.number - 1) as usize],
            detail: RowDetail::StraightLine,
        });

        let accumulated: Vec<f64> = schedule.iter().map(|r| r.accumulated_depreciation).collect();
        assert_eq!(accumulated, vec![50.0, 80.0, 100.0]);
        let nbv: Vec<f64> = schedule.iter().map(|r| r.net_book_value).collect();
        assert_eq!(nbv, vec![50.0, 20.0, 0.0]);
    }

    #[test]
    fn test_opening_book_value_is_previous_opening_minus_quota() {
        let mut seen = Vec::new();
        accumulate(Method::DecliningBalance, 1000.0, 3, |p| {
            seen.push(p.opening_book_value);
            PeriodCharge {
                quota: p.opening_book_value * 0.5,
                detail: RowDetail::StraightLine,
            }
        });
        assert_eq!(seen, vec![1000.0, 500.0, 250.0]);
    }

    #[test]
    fn test_zero_periods_gives_empty_schedule() {
        let schedule = accumulate(Method::StraightLine, 100.0, 0, flat(1.0));
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_depreciation(), 0.0);
        assert_eq!(schedule.final_book_value(), 100.0);
    }

    #[test]
    fn test_row_serialization_flattens_detail() {
        let row = ScheduleRow {
            period: 1,
            depreciation_quota: 4000.0,
            accumulated_depreciation: 4000.0,
            net_book_value: 6000.0,
            detail: RowDetail::SumOfDigits {
                factor: 0.4,
                percentage: 40.0,
                asset_value: 10000.0,
            },
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["kind"], "sum-of-digits");
        assert_eq!(value["factor"], 0.4);
        assert_eq!(value["net_book_value"], 6000.0);
    }
}
