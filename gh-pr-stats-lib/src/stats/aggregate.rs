use super::{LabelStat, OverallStats, PullRequestRecord, PullRequestState, Statistics, UNLABELED_LABEL};
use std::collections::HashMap;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Running counters for a single label.
#[derive(Debug, Default)]
struct LabelAccumulator {
    open: u64,
    closed: u64,
    close_days: Vec<f64>,
}

impl LabelAccumulator {
    const fn count(&mut self, state: PullRequestState) {
        match state {
            PullRequestState::Open => self.open += 1,
            PullRequestState::Closed => self.closed += 1,
        }
    }

    /// The average divides by the closed counter rather than by the number of samples,
    /// so closed records with unusable timestamps pull the average down.
    #[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
    fn into_label_stat(mut self, name: &str) -> LabelStat {
        let total = self.open + self.closed;

        let (avg_days_to_close, median_days_to_close) = if self.closed > 0 {
            let sum: f64 = self.close_days.iter().sum();
            (sum / self.closed as f64, median(&mut self.close_days))
        } else {
            (0.0, 0.0)
        };

        LabelStat {
            name: name.to_string(),
            open: self.open,
            closed: self.closed,
            total,
            open_percentage: percentage(self.open, total),
            avg_days_to_close,
            median_days_to_close,
        }
    }
}

/// Compute per-label and overall statistics for a set of pull requests.
///
/// Each record counts once toward the overall numbers and once toward every label it
/// carries. Records without labels are attributed to [`UNLABELED_LABEL`]. Duplicate
/// label names on a single record are counted once per occurrence.
///
/// Labels are ranked by descending total, with ties broken by ascending name.
///
/// The overall open percentage is 0 for an empty input.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
pub fn compute(records: &[PullRequestRecord]) -> Statistics {
    let mut open = 0u64;
    let mut closed = 0u64;
    let mut labels: HashMap<&str, LabelAccumulator> = HashMap::new();
    let mut all_close_days = Vec::new();

    for record in records {
        match record.state {
            PullRequestState::Open => open += 1,
            PullRequestState::Closed => closed += 1,
        }

        let close_days = close_time_days(record);
        if let Some(days) = close_days {
            all_close_days.push(days);
        }

        for label in resolve_labels(record) {
            let acc = labels.entry(label).or_default();
            acc.count(record.state);
            if let Some(days) = close_days {
                acc.close_days.push(days);
            }
        }
    }

    let mut label_stats: Vec<LabelStat> = labels
        .into_iter()
        .map(|(name, acc)| acc.into_label_stat(name))
        .collect();

    label_stats.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));

    let total = open + closed;
    let (avg_days_to_close, median_days_to_close) = if all_close_days.is_empty() {
        (0.0, 0.0)
    } else {
        let sum: f64 = all_close_days.iter().sum();
        (sum / all_close_days.len() as f64, median(&mut all_close_days))
    };

    Statistics {
        label_stats,
        overall_stats: OverallStats {
            total,
            open,
            closed,
            open_percentage: percentage(open, total),
            avg_days_to_close,
            median_days_to_close,
        },
    }
}

/// Median of a set of samples. Sorts the samples in place.
///
/// Returns 0 for an empty set and the mean of the two middle values for an even count.
#[must_use]
pub fn median(samples: &mut [f64]) -> f64 {
    samples.sort_by(f64::total_cmp);

    let middle = samples.len() / 2;
    match samples.len() {
        0 => 0.0,
        len if len % 2 == 0 => (samples[middle - 1] + samples[middle]) / 2.0,
        _ => samples[middle],
    }
}

/// Labels a record is attributed to.
fn resolve_labels(record: &PullRequestRecord) -> impl Iterator<Item = &str> {
    let unlabeled = record.labels.is_empty().then_some(UNLABELED_LABEL);
    record.labels.iter().map(String::as_str).chain(unlabeled)
}

/// Days from creation to close, or `None` when the record is open, lacks a timestamp,
/// or was closed before it was created.
#[expect(clippy::cast_precision_loss, reason = "acceptable for duration")]
fn close_time_days(record: &PullRequestRecord) -> Option<f64> {
    if record.state != PullRequestState::Closed {
        return None;
    }

    let created_at = record.created_at?;
    let closed_at = record.closed_at?;

    (closed_at >= created_at).then(|| (closed_at - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY)
}

#[expect(clippy::cast_precision_loss, reason = "acceptable for statistics")]
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
