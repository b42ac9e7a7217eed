use crate::stats::{LabelStat, OverallStats};

pub const COLUMN_COUNT: usize = 7;

/// Column headers shared by all tabular reports.
pub const HEADERS: [&str; COLUMN_COUNT] = [
    "Label",
    "Open",
    "Closed",
    "Total",
    "Open %",
    "Average Time to close (days)",
    "Median Time to close (days)",
];

/// Label shown in the row carrying the overall statistics.
pub const TOTAL_LABEL: &str = "Total";

pub fn format_percentage(value: f64) -> String {
    format!("{value:.2}")
}

/// Percentage as shown in a table cell, with a `%` suffix.
pub fn format_percentage_cell(value: f64) -> String {
    format!("{value:.2}%")
}

pub fn format_days(value: f64) -> String {
    format!("{value:.0}")
}

/// Cells for one label, in column order.
///
/// `percentage` formats the open percentage cell.
pub fn label_row(stat: &LabelStat, percentage: fn(f64) -> String) -> [String; COLUMN_COUNT] {
    [
        stat.name.clone(),
        stat.open.to_string(),
        stat.closed.to_string(),
        stat.total.to_string(),
        percentage(stat.open_percentage),
        format_days(stat.avg_days_to_close),
        format_days(stat.median_days_to_close),
    ]
}

/// Cells for the overall statistics, in column order.
pub fn total_row(overall: &OverallStats, percentage: fn(f64) -> String) -> [String; COLUMN_COUNT] {
    [
        TOTAL_LABEL.to_string(),
        overall.open.to_string(),
        overall.closed.to_string(),
        overall.total.to_string(),
        percentage(overall.open_percentage),
        format_days(overall.avg_days_to_close),
        format_days(overall.median_days_to_close),
    ]
}
