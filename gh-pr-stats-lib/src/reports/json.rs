use crate::Result;
use crate::stats::Statistics;
use core::fmt::Write;

/// Render the statistics as pretty-printed JSON, keeping full floating point precision.
pub fn generate<W: Write>(stats: &Statistics, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", serde_json::to_string_pretty(stats)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{LabelStat, OverallStats};

    #[test]
    fn test_full_precision() {
        let stats = Statistics {
            label_stats: vec![LabelStat {
                name: "bug".to_string(),
                open: 0,
                closed: 1,
                total: 1,
                open_percentage: 0.0,
                avg_days_to_close: 1.041_666_666_666_666_7,
                median_days_to_close: 1.041_666_666_666_666_7,
            }],
            overall_stats: OverallStats::default(),
        };

        let mut output = String::new();
        generate(&stats, &mut output).unwrap();

        let parsed: Statistics = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, stats);
    }
}
