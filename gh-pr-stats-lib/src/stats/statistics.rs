use super::{LabelStat, OverallStats};
use serde::{Deserialize, Serialize};

/// Per-label and overall pull request statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Ranked by descending total, then by name.
    pub label_stats: Vec<LabelStat>,
    pub overall_stats: OverallStats,
}
