use serde::{Deserialize, Serialize};

/// Statistics across all pull requests.
///
/// A pull request with several labels counts once here, unlike in the per-label
/// breakdown, so these numbers are not a sum of the [`LabelStat`](super::LabelStat) values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total: u64,
    pub open: u64,
    pub closed: u64,
    pub open_percentage: f64,
    pub avg_days_to_close: f64,
    pub median_days_to_close: f64,
}
