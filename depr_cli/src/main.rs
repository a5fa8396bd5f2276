//! # Depr CLI Application
//!
//! Terminal interface for depreciation schedules. Collects the inputs from
//! flags or a JSON request file, runs the engine, and prints the schedule as
//! a table, JSON, or CSV export.
//!
//! ```text
//! depr calc --method sum-of-digits --asset-value 10000 --useful-life 4
//! depr calc --method variable-production-units --asset-value 9000 --period-units 1000,2000,3000
//! depr formulas --method declining-balance
//! ```

mod table;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use depr_core::calculations::{calculate, Method};
use depr_core::equations::generate_equations_markdown;
use depr_core::errors::{DeprError, DeprResult};
use depr_core::export::export_csv;
use depr_core::input::{load_request, DepreciationRequest, VatAdjustment};
use depr_core::units::TimeUnit;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodArg {
    StraightLine,
    SumOfDigits,
    DecliningBalance,
    ProductionUnits,
    VariableProductionUnits,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::StraightLine => Method::StraightLine,
            MethodArg::SumOfDigits => Method::SumOfDigits,
            MethodArg::DecliningBalance => Method::DecliningBalance,
            MethodArg::ProductionUnits => Method::ProductionUnits,
            MethodArg::VariableProductionUnits => Method::VariableProductionUnits,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TimeUnitArg {
    Years,
    Months,
    Days,
}

impl From<TimeUnitArg> for TimeUnit {
    fn from(arg: TimeUnitArg) -> Self {
        match arg {
            TimeUnitArg::Years => TimeUnit::Years,
            TimeUnitArg::Months => TimeUnit::Months,
            TimeUnitArg::Days => TimeUnit::Days,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "depr", version, about = "Asset depreciation schedules")]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a depreciation schedule
    Calc(CalcArgs),

    /// Show the formulas a method applies
    Formulas {
        #[arg(long, value_enum)]
        method: MethodArg,

        /// Include the VAT adjustment step
        #[arg(long)]
        vat: bool,
    },

    /// List the available methods
    Methods,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("vat_source").args(["vat", "request"]).multiple(true)))]
struct CalcArgs {
    /// JSON request file; flags given alongside it override its fields
    #[arg(long)]
    request: Option<PathBuf>,

    /// Depreciation method
    #[arg(long, value_enum)]
    method: Option<MethodArg>,

    /// Asset value, before VAT
    #[arg(long, allow_negative_numbers = true)]
    asset_value: Option<f64>,

    /// Useful life in periods
    #[arg(long, allow_negative_numbers = true)]
    useful_life: Option<f64>,

    /// Total units produced over the useful life (production-units)
    #[arg(long, allow_negative_numbers = true)]
    production_units: Option<f64>,

    /// Units produced per period, comma separated (variable-production-units)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    period_units: Option<Vec<f64>>,

    /// VAT percentage to apply to the asset value
    #[arg(long, allow_negative_numbers = true)]
    vat: Option<f64>,

    /// The asset value already includes VAT (needs --vat or a request file with VAT)
    #[arg(long, requires = "vat_source")]
    vat_included: bool,

    /// Label for the periods (display only)
    #[arg(long, value_enum)]
    time_unit: Option<TimeUnitArg>,

    /// Print the schedule as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Also export the schedule as CSV into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Merge the request file (if any) with the flags.
fn build_request(args: &CalcArgs) -> DeprResult<DepreciationRequest> {
    let mut request = match &args.request {
        Some(path) => load_request(path)?,
        None => {
            let method = args.method.ok_or_else(|| DeprError::missing_field("method"))?;
            let asset_value = args
                .asset_value
                .ok_or_else(|| DeprError::missing_field("asset_value"))?;
            DepreciationRequest::new(method.into(), asset_value)
        }
    };

    if let Some(method) = args.method {
        request.method = method.into();
    }
    if let Some(asset_value) = args.asset_value {
        request.asset_value = asset_value;
    }
    if let Some(useful_life) = args.useful_life {
        request.useful_life = Some(useful_life);
    }
    if let Some(units) = args.production_units {
        request.total_production_units = Some(units);
    }
    if let Some(units) = &args.period_units {
        request.period_units = Some(units.clone());
    }
    if let Some(pct) = args.vat {
        request.vat = Some(if args.vat_included {
            VatAdjustment::included(pct)
        } else {
            VatAdjustment::excluded(pct)
        });
    } else if args.vat_included {
        match request.vat.as_mut() {
            Some(vat) => vat.included = true,
            None => return Err(DeprError::missing_field("vat")),
        }
    }
    if let Some(unit) = args.time_unit {
        request.time_unit = unit.into();
    }

    Ok(request)
}

fn run_calc(args: &CalcArgs) -> DeprResult<()> {
    let request = build_request(args)?;
    let input = request.validate()?;
    let schedule = calculate(&input)?;
    let unit = request.time_unit;

    if args.json {
        let json = serde_json::to_string_pretty(&schedule)
            .map_err(|e| DeprError::serialization(e.to_string()))?;
        println!("{}", json);
    } else {
        println!("{} Depreciation", schedule.method());
        println!();
        print!("{}", table::render(&schedule, unit));
        println!();
        print!("{}", table::summary(&schedule, unit));
    }

    if let Some(dir) = &args.csv_dir {
        let today = chrono::Local::now().date_naive();
        match export_csv(&schedule, unit, dir, today)? {
            Some(path) => eprintln!("CSV written to {}", path.display()),
            None => eprintln!("Nothing to export."),
        }
    }

    Ok(())
}

fn run(cli: &Cli) -> DeprResult<()> {
    match &cli.command {
        Command::Calc(args) => run_calc(args),
        Command::Formulas { method, vat } => {
            print!("{}", generate_equations_markdown((*method).into(), *vat));
            Ok(())
        }
        Command::Methods => {
            for method in Method::ALL {
                println!("{:<27} {}", method.slug(), method.display_name());
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), input = e.is_input_error(), "command failed");
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// 2 for rejected input, 1 for I/O and serialization failures.
fn exit_status(error: &DeprError) -> u8 {
    if error.is_input_error() {
        2
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("depr").chain(args.iter().copied())).unwrap()
    }

    fn calc_args(cli: Cli) -> CalcArgs {
        match cli.command {
            Command::Calc(args) => args,
            other => panic!("expected calc, got {:?}", other),
        }
    }

    #[test]
    fn test_build_request_from_flags() {
        let args = calc_args(parse(&[
            "calc",
            "--method",
            "straight-line",
            "--asset-value",
            "1000",
            "--useful-life",
            "4",
            "--vat",
            "12",
            "--time-unit",
            "months",
        ]));
        let request = build_request(&args).unwrap();
        assert_eq!(request.method, Method::StraightLine);
        assert_eq!(request.useful_life, Some(4.0));
        assert_eq!(request.vat, Some(VatAdjustment::excluded(12.0)));
        assert_eq!(request.time_unit, TimeUnit::Months);
        assert!((request.validate().unwrap().asset_value() - 1120.0).abs() < 1e-9);
    }

    #[test]
    fn test_period_units_are_comma_separated() {
        let args = calc_args(parse(&[
            "calc",
            "--method",
            "variable-production-units",
            "--asset-value",
            "9000",
            "--period-units",
            "1000,2000,3000",
        ]));
        let request = build_request(&args).unwrap();
        assert_eq!(request.period_units, Some(vec![1000.0, 2000.0, 3000.0]));
    }

    #[test]
    fn test_vat_included_flag() {
        let args = calc_args(parse(&[
            "calc",
            "--method",
            "sum-of-digits",
            "--asset-value",
            "1000",
            "--useful-life",
            "3",
            "--vat",
            "15",
            "--vat-included",
        ]));
        let request = build_request(&args).unwrap();
        assert_eq!(request.adjusted_asset_value().unwrap(), 1000.0);
    }

    #[test]
    fn test_vat_included_requires_vat() {
        let result = Cli::try_parse_from([
            "depr",
            "calc",
            "--method",
            "straight-line",
            "--asset-value",
            "1000",
            "--vat-included",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_vat_included_applies_to_request_file_vat() {
        let path = std::env::temp_dir().join("depr_cli_test_vat_request.json");
        let request = DepreciationRequest::new(Method::StraightLine, 1120.0)
            .with_useful_life(4.0)
            .with_vat(VatAdjustment::excluded(12.0));
        std::fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();

        let args = calc_args(parse(&["calc", "--request", path.to_str().unwrap(), "--vat-included"]));
        let merged = build_request(&args).unwrap();
        assert_eq!(merged.vat, Some(VatAdjustment::included(12.0)));
        assert_eq!(merged.adjusted_asset_value().unwrap(), 1120.0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_vat_included_without_any_vat_in_request() {
        let path = std::env::temp_dir().join("depr_cli_test_no_vat_request.json");
        let request = DepreciationRequest::new(Method::StraightLine, 1000.0).with_useful_life(4.0);
        std::fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();

        let args = calc_args(parse(&["calc", "--request", path.to_str().unwrap(), "--vat-included"]));
        assert_eq!(build_request(&args).unwrap_err(), DeprError::missing_field("vat"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_exit_status_separates_input_errors() {
        assert_eq!(exit_status(&DeprError::missing_field("method")), 2);
        assert_eq!(exit_status(&DeprError::file_error("write", "/tmp/x.csv", "denied")), 1);
    }

    #[test]
    fn test_missing_method_without_request() {
        let args = calc_args(parse(&["calc", "--asset-value", "1000"]));
        assert_eq!(build_request(&args).unwrap_err(), DeprError::missing_field("method"));
    }

    #[test]
    fn test_negative_asset_value_reaches_validation() {
        let args = calc_args(parse(&[
            "calc",
            "--method",
            "declining-balance",
            "--asset-value",
            "-5",
            "--useful-life",
            "3",
        ]));
        let err = build_request(&args).unwrap().validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ASSET_VALUE");
    }

    #[test]
    fn test_flags_override_request_file() {
        let path = std::env::temp_dir().join("depr_cli_test_request.json");
        let request = DepreciationRequest::new(Method::SumOfDigits, 5000.0).with_useful_life(5.0);
        std::fs::write(&path, serde_json::to_string(&request).unwrap()).unwrap();

        let args = calc_args(parse(&[
            "calc",
            "--request",
            path.to_str().unwrap(),
            "--useful-life",
            "10",
        ]));
        let merged = build_request(&args).unwrap();
        assert_eq!(merged.method, Method::SumOfDigits);
        assert_eq!(merged.asset_value, 5000.0);
        assert_eq!(merged.useful_life, Some(10.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_method_args_cover_every_method() {
        let mapped: Vec<Method> = MethodArg::value_variants()
            .iter()
            .map(|arg| Method::from(*arg))
            .collect();
        assert_eq!(mapped, Method::ALL.to_vec());
    }
}
