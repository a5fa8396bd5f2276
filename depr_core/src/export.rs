//! # Schedule Presentation and CSV Export
//!
//! Turns a [`Schedule`] into display columns and CSV files. Nothing here
//! feeds back into the engine: values are rounded only when formatted.
//!
//! - **Columns**: header and cell text shared by the CSV writer and the
//!   CLI table, so both show the same figures
//! - **CSV**: one header record plus one record per period
//! - **Atomic saves**: write to `.tmp`, sync, rename into place
//!
//! ## File Names
//!
//! Exports are named `depreciation_<method>_<YYYY-MM-DD>.csv`.
//!
//! ## Example
//!
//! ```rust
//! use depr_core::calculations::straight_line;
//! use depr_core::export::to_csv_string;
//! use depr_core::units::TimeUnit;
//!
//! let schedule = straight_line::compute(10_000.0, 5).unwrap();
//! let csv = to_csv_string(&schedule, TimeUnit::Years).unwrap();
//! assert!(csv.starts_with("Year,Depreciation Quota"));
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::WriterBuilder;

use crate::calculations::{Method, RowDetail, Schedule, ScheduleRow};
use crate::errors::{DeprError, DeprResult};
use crate::units::TimeUnit;

const QUOTA: &str = "Depreciation Quota";
const ACCUMULATED: &str = "Accumulated Depreciation";
const NET_BOOK_VALUE: &str = "Net Book Value";

/// Format a number with a fixed number of decimals, never printing `-0.00`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => text,
    }
}

/// Format a fraction as a percentage with two decimals (0.369 -> "36.90%").
pub fn format_percent(fraction: f64) -> String {
    format!("{}%", format_fixed(fraction * 100.0, 2))
}

/// Column headers for a schedule of `method`, the first naming the time unit.
pub fn column_headers(method: Method, unit: TimeUnit) -> Vec<String> {
    let extra: &[&str] = match method {
        Method::StraightLine => &[],
        Method::SumOfDigits => &["Factor", "Percentage", "Asset Value"],
        Method::DecliningBalance => &["Depreciation Rate", "Undepreciated Value"],
        Method::ProductionUnits | Method::VariableProductionUnits => {
            &["Units Produced", "Depreciation per Unit"]
        }
    };

    std::iter::once(unit.period_label())
        .chain(extra.iter().copied())
        .chain([QUOTA, ACCUMULATED, NET_BOOK_VALUE])
        .map(str::to_string)
        .collect()
}

/// Display cells for one row, in the same order as [`column_headers`].
pub fn row_cells(row: &ScheduleRow) -> Vec<String> {
    let mut cells = vec![row.period.to_string()];

    match &row.detail {
        RowDetail::StraightLine => {}
        RowDetail::SumOfDigits {
            factor,
            percentage,
            asset_value,
        } => {
            cells.push(format_fixed(*factor, 4));
            cells.push(format!("{}%", format_fixed(*percentage, 2)));
            cells.push(format_fixed(*asset_value, 2));
        }
        RowDetail::DecliningBalance {
            depreciation_rate,
            undepreciated_value,
        } => {
            cells.push(format_percent(*depreciation_rate));
            cells.push(format_fixed(*undepreciated_value, 2));
        }
        RowDetail::ProductionUnits {
            units_produced,
            depreciation_per_unit,
        } => {
            cells.push(format_fixed(*units_produced, 2));
            cells.push(format_fixed(*depreciation_per_unit, 4));
        }
    }

    cells.push(format_fixed(row.depreciation_quota, 2));
    cells.push(format_fixed(row.accumulated_depreciation, 2));
    cells.push(format_fixed(row.net_book_value, 2));
    cells
}

/// Write a schedule as CSV.
///
/// An empty schedule writes nothing.
pub fn write_csv<W: Write>(writer: W, schedule: &Schedule, unit: TimeUnit) -> DeprResult<()> {
    if schedule.is_empty() {
        return Ok(());
    }

    let mut wrt = WriterBuilder::new().from_writer(writer);
    wrt.write_record(column_headers(schedule.method(), unit))?;
    for row in schedule {
        wrt.write_record(row_cells(row))?;
    }
    wrt.flush()
        .map_err(|e| DeprError::serialization(e.to_string()))?;
    Ok(())
}

/// Render a schedule as a CSV string.
pub fn to_csv_string(schedule: &Schedule, unit: TimeUnit) -> DeprResult<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, schedule, unit)?;
    String::from_utf8(buffer).map_err(|e| DeprError::serialization(e.to_string()))
}

/// Default export file name, e.g. `depreciation_straight-line_2025-01-31.csv`.
pub fn export_file_name(method: Method, date: NaiveDate) -> String {
    format!("depreciation_{}_{}.csv", method.slug(), date.format("%Y-%m-%d"))
}

/// Save a schedule as CSV into `dir`, named by [`export_file_name`].
///
/// The file is written to a `.tmp` sibling, synced, then renamed so an
/// interrupted export never leaves a truncated CSV behind.
///
/// # Returns
///
/// * `Ok(Some(path))` - The file that was written
/// * `Ok(None)` - The schedule was empty; nothing to export
/// * `Err(DeprError)` - Writing failed
pub fn export_csv(
    schedule: &Schedule,
    unit: TimeUnit,
    dir: &Path,
    date: NaiveDate,
) -> DeprResult<Option<PathBuf>> {
    if schedule.is_empty() {
        return Ok(None);
    }

    let csv = to_csv_string(schedule, unit)?;
    let path = dir.join(export_file_name(schedule.method(), date));
    let tmp_path = path.with_extension("csv.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        DeprError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    discard_on_error(tmp_file.write_all(csv.as_bytes()), &tmp_path, "write temp file")?;
    discard_on_error(tmp_file.sync_all(), &tmp_path, "sync temp file")?;

    // Close before rename (required on Windows)
    drop(tmp_file);

    discard_on_error(fs::rename(&tmp_path, &path), &tmp_path, "rename temp file")?;

    tracing::info!(path = %path.display(), rows = schedule.len(), "exported schedule");
    Ok(Some(path))
}

/// Map an I/O failure to a [`DeprError`], removing the temp file first.
fn discard_on_error<T>(result: std::io::Result<T>, tmp_path: &Path, operation: &str) -> DeprResult<T> {
    result.map_err(|e| {
        let _ = fs::remove_file(tmp_path);
        DeprError::file_error(operation, tmp_path.display().to_string(), e.to_string())
    })
}
