//! Pull request statistics
//!
//! This module turns a sequence of pull request records into per-label and overall
//! statistics: open/closed counts, the open percentage, and the mean and median
//! time-to-close in days.
//!
//! # Implementation Model
//!
//! [`compute`] is a pure function. It makes a single pass over the records, keeping
//! one running accumulator per label (records without labels go to the synthetic
//! [`UNLABELED_LABEL`] bucket) and a flat list of close durations for the overall
//! figures. After the pass the labels are ranked by descending total, ties broken
//! by label name, so the output is deterministic for a given input.
//!
//! Close durations are only sampled from closed records that carry both timestamps
//! with `closed_at >= created_at`. Records that fail this check are still counted
//! as closed.

mod aggregate;
mod label_stat;
mod overall_stats;
mod pull_request;
mod statistics;

pub use aggregate::{compute, median};
pub use label_stat::LabelStat;
pub use overall_stats::OverallStats;
pub use pull_request::{PullRequestRecord, PullRequestState};
pub use statistics::Statistics;

/// Label name used for pull requests that carry no labels.
pub const UNLABELED_LABEL: &str = "*unlabeled*";
