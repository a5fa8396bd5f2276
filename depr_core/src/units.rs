//! # Unit Types
//!
//! Small wrappers for the units a depreciation run touches: the period
//! time unit shown in tables and exports, and percentages.
//!
//! The time unit is purely cosmetic. A schedule over 60 months and one over
//! 60 years are computed identically; only the column label changes.
//!
//! ## Example
//!
//! ```rust
//! use depr_core::units::{Percent, TimeUnit};
//!
//! let vat = Percent(12.0);
//! assert_eq!(vat.as_fraction(), 0.12);
//!
//! assert_eq!(TimeUnit::Months.period_label(), "Month");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Time Units
// ============================================================================

/// Length of one schedule period, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    /// One period = one year
    #[default]
    Years,
    /// One period = one month
    Months,
    /// One period = one day
    Days,
}

impl TimeUnit {
    /// Singular column label for the period column (e.g., "Year")
    pub fn period_label(&self) -> &'static str {
        match self {
            TimeUnit::Years => "Year",
            TimeUnit::Months => "Month",
            TimeUnit::Days => "Day",
        }
    }

    /// Lowercase plural used in prose (e.g., "5 years")
    pub fn plural(&self) -> &'static str {
        match self {
            TimeUnit::Years => "years",
            TimeUnit::Months => "months",
            TimeUnit::Days => "days",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

// ============================================================================
// Percentages
// ============================================================================

/// A percentage expressed on the 0-100 scale (12.0 means 12%)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// The value as a fraction (12% -> 0.12)
    pub fn as_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_fraction_conversion() {
        assert_eq!(Percent(25.0).as_fraction(), 0.25);
        assert_eq!(Percent(12.5).value(), 12.5);
    }

    #[test]
    fn test_time_unit_labels() {
        assert_eq!(TimeUnit::Days.period_label(), "Day");
        assert_eq!(TimeUnit::Months.to_string(), "months");
        assert_eq!(TimeUnit::default(), TimeUnit::Years);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&TimeUnit::Months).unwrap();
        assert_eq!(json, "\"months\"");
        assert_eq!(serde_json::to_string(&Percent(12.5)).unwrap(), "12.5");

        let roundtrip: TimeUnit = serde_json::from_str("\"days\"").unwrap();
        assert_eq!(roundtrip, TimeUnit::Days);
    }
}
