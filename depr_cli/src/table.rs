//! Plain-text table rendering for schedules.

use depr_core::export::{column_headers, format_fixed, row_cells};
use depr_core::{Schedule, TimeUnit};

/// Render a schedule as a right-aligned text table.
///
/// An empty schedule renders as a short notice instead of a table.
pub fn render(schedule: &Schedule, unit: TimeUnit) -> String {
    if schedule.is_empty() {
        return "Nothing to display.\n".to_string();
    }

    let headers = column_headers(schedule.method(), unit);
    let body: Vec<Vec<String>> = schedule.iter().map(row_cells).collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            body.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let mut out = String::new();

    out.push_str(&line(&headers, &widths));
    out.push_str(&"─".repeat(total_width));
    out.push('\n');
    for cells in &body {
        out.push_str(&line(cells, &widths));
    }
    out
}

/// One-paragraph summary printed under the table.
pub fn summary(schedule: &Schedule, unit: TimeUnit) -> String {
    let mut out = format!(
        "{} over {} {}: asset value {}, total depreciation {}, final book value {}",
        schedule.method(),
        schedule.len(),
        unit,
        format_fixed(schedule.asset_value(), 2),
        format_fixed(schedule.total_depreciation(), 2),
        format_fixed(schedule.final_book_value(), 2),
    );
    if !schedule.method().amortizes_fully() {
        out.push_str(" (declining balance stops near the 10% salvage value)");
    }
    out.push('\n');
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
        .collect();
    let mut text = padded.join("  ");
    text.push('\n');
    text
}
