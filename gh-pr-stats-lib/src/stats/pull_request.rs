use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
}

/// A pull request as consumed by [`compute`](super::compute).
///
/// `closed_at` and `created_at` are optional because partial data does show up in
/// practice; such records still count toward the open/closed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,

    #[serde(default)]
    pub title: String,

    pub state: PullRequestState,

    #[serde(default)]
    pub labels: Vec<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl PullRequestRecord {
    /// Create a record with no labels, no title, and no timestamps.
    #[must_use]
    pub const fn new(number: u64, state: PullRequestState) -> Self {
        Self {
            number,
            title: String::new(),
            state,
            labels: Vec::new(),
            created_at: None,
            closed_at: None,
        }
    }

    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    #[must_use]
    pub fn with_closed_at(mut self, closed_at: DateTime<Utc>) -> Self {
        self.closed_at = Some(closed_at);
        self
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.state, PullRequestState::Open)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_state_deserialize() {
        let open: PullRequestState = serde_json::from_str(r#""open""#).unwrap();
        let closed: PullRequestState = serde_json::from_str(r#""closed""#).unwrap();
        assert_eq!(open, PullRequestState::Open);
        assert_eq!(closed, PullRequestState::Closed);
    }

    #[test]
    fn test_state_rejects_unknown_value() {
        let _ = serde_json::from_str::<PullRequestState>(r#""merged""#).unwrap_err();
    }

    #[test]
    fn test_builder() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let closed = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let record = PullRequestRecord::new(7, PullRequestState::Closed)
            .with_labels(["bug", "docs"])
            .with_created_at(created)
            .with_closed_at(closed);

        assert_eq!(record.number, 7);
        assert_eq!(record.labels, vec!["bug".to_string(), "docs".to_string()]);
        assert_eq!(record.created_at, Some(created));
        assert_eq!(record.closed_at, Some(closed));
        assert!(!record.is_open());
    }

    #[test]
    fn test_deserialize_with_missing_optional_fields() {
        let json = r#"{
            "number": 12,
            "state": "closed",
            "created_at": null,
            "closed_at": null
        }"#;

        let record: PullRequestRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.number, 12);
        assert!(record.title.is_empty());
        assert!(record.labels.is_empty());
        assert!(record.created_at.is_none());
        assert!(record.closed_at.is_none());
    }
}
