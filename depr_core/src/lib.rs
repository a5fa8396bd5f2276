//! # depr_core - Asset Depreciation Engine
//!
//! `depr_core` computes period-by-period depreciation schedules under
//! straight-line, sum-of-digits, declining-balance and production-units
//! methods. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return a schedule
//! - **All-or-nothing**: Invalid input fails the call; no partial schedules
//! - **Full precision**: Rounding happens only when a schedule is displayed
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use depr_core::calculations::{calculate, Method};
//! use depr_core::input::DepreciationRequest;
//!
//! let request = DepreciationRequest::new(Method::StraightLine, 10_000.0).with_useful_life(5.0);
//! let schedule = calculate(&request.validate().unwrap()).unwrap();
//!
//! assert_eq!(schedule.len(), 5);
//! assert_eq!(schedule.rows()[0].depreciation_quota, 2000.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The schedule generators and their shared accumulation
//! - [`input`] - Raw request validation and VAT adjustment
//! - [`export`] - Display formatting and CSV export
//! - [`equations`] - Formula descriptions per method
//! - [`units`] - Time units and percentages
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod export;
pub mod input;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, Method, RowDetail, Schedule, ScheduleInput, ScheduleRow};
pub use errors::{DeprError, DeprResult};
pub use input::{DepreciationRequest, VatAdjustment};
pub use units::{Percent, TimeUnit};
