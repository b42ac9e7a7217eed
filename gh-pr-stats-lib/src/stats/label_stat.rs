use serde::{Deserialize, Serialize};

/// Statistics for the pull requests carrying one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStat {
    pub name: String,
    pub open: u64,
    pub closed: u64,
    pub total: u64,
    pub open_percentage: f64,
    pub avg_days_to_close: f64,
    pub median_days_to_close: f64,
}
