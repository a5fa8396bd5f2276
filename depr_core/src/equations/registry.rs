//! # Equation Registry
//!
//! Every formula the engine applies, with a plain-text rendering and variable
//! definitions, so a user can check the arithmetic behind a schedule.
//!
//! ## Usage
//!
//! ```rust
//! use depr_core::calculations::Method;
//! use depr_core::equations::Equation;
//!
//! let steps = Method::DecliningBalance.equations();
//! assert_eq!(steps[1], Equation::DecliningBalanceRate);
//! println!("{}", steps[1].metadata().formula_plain);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Method;

// ============================================================================
// Equation Categories
// ============================================================================

/// Role an equation plays in building a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Adjustments made to the entered values before calculation
    InputAdjustment,
    /// Constants derived once per run (rates, per-unit amounts)
    RunConstants,
    /// The per-period depreciation quota
    PeriodQuota,
    /// Running totals carried from row to row
    Accumulation,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::InputAdjustment => "Input Adjustment",
            EquationCategory::RunConstants => "Run Constants",
            EquationCategory::PeriodQuota => "Period Quota",
            EquationCategory::Accumulation => "Accumulation",
        }
    }

    /// Sort order for listings (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::InputAdjustment => 1,
            EquationCategory::RunConstants => 2,
            EquationCategory::PeriodQuota => 3,
            EquationCategory::Accumulation => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Symbol (e.g., "V", "n")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str) -> Self {
        Self { symbol, description }
    }
}

const ASSET_VALUE: Variable = Variable::new("V", "Asset value (VAT applied)");
const USEFUL_LIFE: Variable = Variable::new("n", "Useful life in periods");
const PERIOD: Variable = Variable::new("p", "Period number, starting at 1");
const QUOTA: Variable = Variable::new("Q_p", "Depreciation quota for period p");

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Depreciation Rate")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the depreciation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Equation {
    /// V = V0 (1 + vat/100)
    VatAdjustedValue,

    /// Q = V / n
    StraightLineQuota,

    /// S = n(n+1)/2
    SumOfDigits,
    /// f_p = (n - p + 1) / S
    SumOfDigitsFactor,
    /// Q_p = f_p V
    SumOfDigitsQuota,

    /// R = 0.1 V
    SalvageValue,
    /// r = 1 - (R/V)^(1/n)
    DecliningBalanceRate,
    /// Q_p = r U_p
    DecliningBalanceQuota,

    /// d = V / U
    DepreciationPerUnit,
    /// u = U / n
    UnitsPerPeriod,
    /// Q = u d
    ProductionUnitsQuota,

    /// U = sum(u_i)
    TotalUnits,
    /// Q_i = u_i d
    VariableUnitsQuota,

    /// A_p = A_(p-1) + Q_p
    AccumulatedDepreciation,
    /// B_p = V - A_p
    NetBookValue,
}

/// Every registered equation, in listing order
pub const ALL_EQUATIONS: [Equation; 15] = [
    Equation::VatAdjustedValue,
    Equation::StraightLineQuota,
    Equation::SumOfDigits,
    Equation::SumOfDigitsFactor,
    Equation::SumOfDigitsQuota,
    Equation::SalvageValue,
    Equation::DecliningBalanceRate,
    Equation::DecliningBalanceQuota,
    Equation::DepreciationPerUnit,
    Equation::UnitsPerPeriod,
    Equation::ProductionUnitsQuota,
    Equation::TotalUnits,
    Equation::VariableUnitsQuota,
    Equation::AccumulatedDepreciation,
    Equation::NetBookValue,
];

impl Equation {
    /// Full metadata for this equation.
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::VatAdjustedValue => EquationMetadata {
                name: "VAT-Adjusted Asset Value",
                description: "Adds VAT to the entered value when it does not already include it.",
                formula_plain: "V = V0 × (1 + vat / 100)",
                variables: vec![
                    Variable::new("V0", "Asset value as entered"),
                    Variable::new("vat", "VAT percentage"),
                    ASSET_VALUE,
                ],
                category: EquationCategory::InputAdjustment,
                source_function: "input::VatAdjustment::apply",
            },
            Equation::StraightLineQuota => EquationMetadata {
                name: "Straight-Line Quota",
                description: "Equal depreciation in every period.",
                formula_plain: "Q = V / n",
                variables: vec![ASSET_VALUE, USEFUL_LIFE, Variable::new("Q", "Quota for every period")],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::straight_line::compute",
            },
            Equation::SumOfDigits => EquationMetadata {
                name: "Sum of Digits",
                description: "Sum of the period numbers 1 through n.",
                formula_plain: "S = n × (n + 1) / 2",
                variables: vec![USEFUL_LIFE, Variable::new("S", "Sum of digits")],
                category: EquationCategory::RunConstants,
                source_function: "calculations::sum_of_digits::sum_of_digits",
            },
            Equation::SumOfDigitsFactor => EquationMetadata {
                name: "Depreciation Factor",
                description: "Share of the asset value charged in period p; largest in period 1.",
                formula_plain: "f_p = (n - p + 1) / S",
                variables: vec![USEFUL_LIFE, PERIOD, Variable::new("S", "Sum of digits")],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::sum_of_digits::compute",
            },
            Equation::SumOfDigitsQuota => EquationMetadata {
                name: "Sum-of-Digits Quota",
                description: "Factor applied to the full asset value.",
                formula_plain: "Q_p = f_p × V",
                variables: vec![Variable::new("f_p", "Factor for period p"), ASSET_VALUE, QUOTA],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::sum_of_digits::compute",
            },
            Equation::SalvageValue => EquationMetadata {
                name: "Salvage Value",
                description: "Residual value assumed at the end of the useful life.",
                formula_plain: "R = V × 0.1",
                variables: vec![ASSET_VALUE, Variable::new("R", "Salvage value")],
                category: EquationCategory::RunConstants,
                source_function: "calculations::declining_balance::salvage_value",
            },
            Equation::DecliningBalanceRate => EquationMetadata {
                name: "Depreciation Rate",
                description: "Constant rate that decays V to R over n periods.",
                formula_plain: "r = 1 - (R / V)^(1 / n)",
                variables: vec![Variable::new("R", "Salvage value"), ASSET_VALUE, USEFUL_LIFE],
                category: EquationCategory::RunConstants,
                source_function: "calculations::declining_balance::depreciation_rate",
            },
            Equation::DecliningBalanceQuota => EquationMetadata {
                name: "Declining-Balance Quota",
                description: "Rate applied to the value not yet depreciated.",
                formula_plain: "Q_p = r × U_p",
                variables: vec![
                    Variable::new("r", "Depreciation rate"),
                    Variable::new("U_p", "Undepreciated value entering period p"),
                    QUOTA,
                ],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::declining_balance::compute",
            },
            Equation::DepreciationPerUnit => EquationMetadata {
                name: "Depreciation per Unit",
                description: "Asset value spread over every unit produced.",
                formula_plain: "d = V / U",
                variables: vec![ASSET_VALUE, Variable::new("U", "Total units produced")],
                category: EquationCategory::RunConstants,
                source_function: "calculations::production_units::compute",
            },
            Equation::UnitsPerPeriod => EquationMetadata {
                name: "Units per Period",
                description: "Total production split evenly across the useful life.",
                formula_plain: "u = U / n",
                variables: vec![Variable::new("U", "Total units produced"), USEFUL_LIFE],
                category: EquationCategory::RunConstants,
                source_function: "calculations::production_units::compute",
            },
            Equation::ProductionUnitsQuota => EquationMetadata {
                name: "Production-Units Quota",
                description: "Units of one period times depreciation per unit.",
                formula_plain: "Q = u × d",
                variables: vec![
                    Variable::new("u", "Units per period"),
                    Variable::new("d", "Depreciation per unit"),
                ],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::production_units::compute",
            },
            Equation::TotalUnits => EquationMetadata {
                name: "Total Units",
                description: "Sum of the units entered for each period.",
                formula_plain: "U = Σ u_i, i = 1..n",
                variables: vec![Variable::new("u_i", "Units produced in period i")],
                category: EquationCategory::RunConstants,
                source_function: "calculations::variable_units::compute",
            },
            Equation::VariableUnitsQuota => EquationMetadata {
                name: "Variable-Units Quota",
                description: "Each period is charged for the units it actually produced.",
                formula_plain: "Q_i = u_i × d",
                variables: vec![
                    Variable::new("u_i", "Units produced in period i"),
                    Variable::new("d", "Depreciation per unit"),
                ],
                category: EquationCategory::PeriodQuota,
                source_function: "calculations::variable_units::compute",
            },
            Equation::AccumulatedDepreciation => EquationMetadata {
                name: "Accumulated Depreciation",
                description: "Running total of quotas through period p.",
                formula_plain: "A_p = A_(p-1) + Q_p, A_0 = 0",
                variables: vec![Variable::new("A_p", "Accumulated depreciation after period p"), QUOTA],
                category: EquationCategory::Accumulation,
                source_function: "calculations::schedule::accumulate",
            },
            Equation::NetBookValue => EquationMetadata {
                name: "Net Book Value",
                description: "Asset value not yet depreciated after period p.",
                formula_plain: "B_p = V - A_p",
                variables: vec![ASSET_VALUE, Variable::new("A_p", "Accumulated depreciation after period p")],
                category: EquationCategory::Accumulation,
                source_function: "calculations::schedule::accumulate",
            },
        }
    }
}

impl Method {
    /// Equations applied by this method, in the order they are evaluated.
    ///
    /// The shared accumulation steps are listed last for every method.
    pub fn equations(&self) -> &'static [Equation] {
        match self {
            Method::StraightLine => &[
                Equation::StraightLineQuota,
                Equation::AccumulatedDepreciation,
                Equation::NetBookValue,
            ],
            Method::SumOfDigits => &[
                Equation::SumOfDigits,
                Equation::SumOfDigitsFactor,
                Equation::SumOfDigitsQuota,
                Equation::AccumulatedDepreciation,
                Equation::NetBookValue,
            ],
            Method::DecliningBalance => &[
                Equation::SalvageValue,
                Equation::DecliningBalanceRate,
                Equation::DecliningBalanceQuota,
                Equation::AccumulatedDepreciation,
                Equation::NetBookValue,
            ],
            Method::ProductionUnits => &[
                Equation::DepreciationPerUnit,
                Equation::UnitsPerPeriod,
                Equation::ProductionUnitsQuota,
                Equation::AccumulatedDepreciation,
                Equation::NetBookValue,
            ],
            Method::VariableProductionUnits => &[
                Equation::TotalUnits,
                Equation::DepreciationPerUnit,
                Equation::VariableUnitsQuota,
                Equation::AccumulatedDepreciation,
                Equation::NetBookValue,
            ],
        }
    }
}

/// Render the formulas of one method as markdown.
///
/// `with_vat` prepends the VAT adjustment step.
pub fn generate_equations_markdown(method: Method, with_vat: bool) -> String {
    let mut output = String::with_capacity(2_048);
    output.push_str(&format!("# {} Formulas\n\n", method.display_name()));

    let vat_step = with_vat.then_some(Equation::VatAdjustedValue);
    let steps = vat_step.into_iter().chain(method.equations().iter().copied());

    for (index, equation) in steps.enumerate() {
        let meta = equation.metadata();
        output.push_str(&format!("## {}. {}\n\n", index + 1, meta.name));
        output.push_str(&format!("{}\n\n", meta.description));
        output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));
        output.push_str(&format!(
            "*{}* | computed in `depr_core::{}`\n\n",
            meta.category.display_name(),
            meta.source_function
        ));

        if !meta.variables.is_empty() {
            output.push_str("| Symbol | Description |\n");
            output.push_str("|--------|-------------|\n");
            for var in &meta.variables {
                output.push_str(&format!("| {} | {} |\n", var.symbol, var.description));
            }
            output.push('\n');
        }
    }

    output
}
