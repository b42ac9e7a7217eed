use super::common::{self, HEADERS};
use crate::Result;
use crate::stats::Statistics;
use core::fmt::Write;
use core::iter::once;
use ohno::app_err;

/// Render the statistics as delimiter-separated rows (CSV with `b','`, TSV with `b'\t'`).
///
/// The first row holds the headers and the last row the overall statistics.
pub fn generate<W: Write>(stats: &Statistics, delimiter: u8, writer: &mut W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().delimiter(delimiter).from_writer(Vec::new());

    wtr.write_record(HEADERS)?;

    let rows = stats
        .label_stats
        .iter()
        .map(|stat| common::label_row(stat, common::format_percentage))
        .chain(once(common::total_row(&stats.overall_stats, common::format_percentage)));

    for row in rows {
        wtr.write_record(&row)?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| app_err!("could not flush delimited output: {}", e.error()))?;

    write!(writer, "{}", String::from_utf8(bytes)?)?;
    Ok(())
}
