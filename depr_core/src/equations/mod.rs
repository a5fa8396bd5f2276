//! # Depreciation Formulas
//!
//! Descriptions of the formulas each method applies, kept in one place so
//! presenters can show users exactly how a schedule was derived.
//!
//! ## Modules
//!
//! - [`registry`] - Equation metadata and per-method formula listings
//!
//! ## Notation
//!
//! - `V` = Asset value (VAT applied)
//! - `n` = Useful life in periods
//! - `p` = Period number (1-based)
//! - `Q_p` = Quota for period p
//! - `A_p` = Accumulated depreciation after period p
//! - `B_p` = Net book value after period p

pub mod registry;

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
