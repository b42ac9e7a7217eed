use super::common::{self, COLUMN_COUNT, HEADERS};
use crate::Result;
use crate::stats::Statistics;
use core::fmt::Write;
use core::iter::once;
use owo_colors::OwoColorize;

/// Render the statistics as a table with rounded box-drawing borders.
///
/// The label column is left-aligned and numeric columns are right-aligned. Percentages carry
/// a `%` suffix. The overall statistics appear in a trailing `Total` row.
pub fn generate<W: Write>(stats: &Statistics, use_colors: bool, writer: &mut W) -> Result<()> {
    let body: Vec<[String; COLUMN_COUNT]> = stats
        .label_stats
        .iter()
        .map(|stat| common::label_row(stat, common::format_percentage_cell))
        .collect();
    let total = common::total_row(&stats.overall_stats, common::format_percentage_cell);

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in body.iter().chain(once(&total)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    write_border(writer, &widths, '╭', '┬', '╮')?;
    write_row(writer, &widths, &HEADERS, use_colors)?;
    write_border(writer, &widths, '├', '┼', '┤')?;

    for row in &body {
        write_row(writer, &widths, row, false)?;
    }

    if !body.is_empty() {
        write_border(writer, &widths, '├', '┼', '┤')?;
    }

    write_row(writer, &widths, &total, false)?;
    write_border(writer, &widths, '╰', '┴', '╯')?;

    Ok(())
}

fn write_border<W: Write>(writer: &mut W, widths: &[usize], left: char, junction: char, right: char) -> Result<()> {
    let segments: Vec<String> = widths.iter().map(|width| "─".repeat(width + 2)).collect();
    writeln!(writer, "{left}{}{right}", segments.join(&junction.to_string()))?;
    Ok(())
}

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, widths: &[usize], cells: &[S], bold: bool) -> Result<()> {
    write!(writer, "│")?;

    for (index, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        let cell = cell.as_ref();
        let padded = if index == 0 {
            format!("{cell:<width$}")
        } else {
            format!("{cell:>width$}")
        };

        if bold {
            write!(writer, " {} │", padded.bold())?;
        } else {
            write!(writer, " {padded} │")?;
        }
    }

    writeln!(writer)?;
    Ok(())
}
