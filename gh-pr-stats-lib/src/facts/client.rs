//! GitHub API client
//!
//! Minimal GitHub API client for paging through a repository's issues.

use super::resilient_http::{RETRY_BASE_DELAY, RetryPolicy, resilient_get};
use crate::stats::{PullRequestRecord, PullRequestState};
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::app_err;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::IgnoredAny;

const USER_AGENT: &str = "gh-pr-stats";
const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Minimal GitHub issue info with only the fields we need.
///
/// The issues endpoint returns pull requests too; those carry a `pull_request` member.
#[derive(Debug, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub state: PullRequestState,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pull_request: Option<IgnoredAny>,
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

impl Issue {
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }

    #[must_use]
    pub fn into_record(self) -> PullRequestRecord {
        PullRequestRecord {
            number: self.number,
            title: self.title.unwrap_or_default(),
            state: self.state,
            labels: self.labels.into_iter().map(|label| label.name).collect(),
            created_at: self.created_at,
            closed_at: self.closed_at,
        }
    }
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Result of a hosting API call
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded
    Success(T),

    /// The rate limit is exhausted
    RateLimited(Option<RateLimitInfo>),

    /// The requested resource was not found (404)
    NotFound,

    /// Request failed permanently
    Failed(ohno::AppError),
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    retry_policy: RetryPolicy,
}

impl Client {
    /// Create a new API client with optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>, timeout: Duration, max_retries: u32) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            retry_policy: RetryPolicy {
                max_retry_attempts: max_retries,
                base_delay: RETRY_BASE_DELAY,
                timeout,
            },
        })
    }

    /// Override the base delay used for exponential backoff.
    #[must_use]
    pub const fn with_retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_policy.base_delay = delay;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an API call and classify the result
    pub async fn api_call(&self, url: &str) -> ApiResult<reqwest::Response> {
        let resp = match resilient_get(&self.client, url, self.retry_policy).await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e),
        };

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp);
        }

        let rate_limit = extract_rate_limit_from_headers(resp.headers());
        let exhausted = rate_limit.is_some_and(|rl| rl.remaining == 0);

        match status {
            StatusCode::TOO_MANY_REQUESTS => ApiResult::RateLimited(rate_limit),
            StatusCode::FORBIDDEN if exhausted => ApiResult::RateLimited(rate_limit),
            StatusCode::NOT_FOUND => ApiResult::NotFound,
            _ => ApiResult::Failed(app_err!("HTTP status {status} for {url}")),
        }
    }
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;

    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;

    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str, max_retries: u32) -> Client {
        Client::new(None, base_url, Duration::from_secs(5), max_retries)
            .unwrap()
            .with_retry_base_delay(Duration::from_millis(1))
    }

    #[test]
    fn test_issue_deserialize_pull_request() {
        let json = r#"{
            "number": 42,
            "title": "Fix the thing",
            "state": "closed",
            "labels": [{"id": 1, "name": "bug", "color": "d73a4a"}, {"id": 2, "name": "docs"}],
            "created_at": "2024-01-01T00:00:00Z",
            "closed_at": "2024-01-02T12:00:00Z",
            "pull_request": {
                "url": "https://api.github.com/repos/owner/repo/pulls/42",
                "merged_at": null
            }
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(issue.is_pull_request());

        let record = issue.into_record();
        assert_eq!(record.number, 42);
        assert_eq!(record.title, "Fix the thing");
        assert_eq!(record.state, PullRequestState::Closed);
        assert_eq!(record.labels, vec!["bug".to_string(), "docs".to_string()]);
        assert!(record.created_at.is_some());
        assert!(record.closed_at.is_some());
    }

    #[test]
    fn test_issue_deserialize_plain_issue() {
        let json = r#"{
            "number": 7,
            "title": "Question",
            "state": "open",
            "labels": [],
            "created_at": "2024-01-01T00:00:00Z",
            "closed_at": null
        }"#;

        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(!issue.is_pull_request());
    }

    #[test]
    fn test_issue_deserialize_null_pull_request() {
        let json = r#"{"number": 1, "state": "open", "pull_request": null}"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert!(!issue.is_pull_request());
        assert!(issue.created_at.is_none());
        assert!(issue.labels.is_empty());
    }

    #[test]
    fn test_extract_rate_limit_from_headers() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("4999"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1704067200"));

        let rate_limit = extract_rate_limit_from_headers(&headers).unwrap();

        assert_eq!(rate_limit.remaining, 4999);
        assert_eq!(rate_limit.reset_at.timestamp(), 1_704_067_200);
    }

    #[test]
    fn test_extract_rate_limit_missing_headers() {
        assert!(extract_rate_limit_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_extract_rate_limit_invalid_remaining() {
        let mut headers = HeaderMap::new();
        let _ = headers.insert("x-ratelimit-remaining", HeaderValue::from_static("invalid"));
        let _ = headers.insert("x-ratelimit-reset", HeaderValue::from_static("1704067200"));

        assert!(extract_rate_limit_from_headers(&headers).is_none());
    }

    #[test]
    fn test_client_base_url_trailing_slash() {
        let client = Client::new(Some("token"), "https://ghe.example.com/api/v3/", Duration::from_secs(1), 0).unwrap();
        assert_eq!(client.base_url(), "https://ghe.example.com/api/v3");
    }

    #[tokio::test]
    async fn test_api_call_success_sends_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("accept", GITHUB_MEDIA_TYPE))
            .and(header("authorization", "token secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(Some("secret"), server.uri(), Duration::from_secs(5), 0).unwrap();
        let result = client.api_call(&format!("{}/ping", server.uri())).await;
        assert!(matches!(result, ApiResult::Success(_)));
    }

    #[tokio::test]
    async fn test_api_call_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 2);
        let result = client.api_call(&format!("{}/missing", server.uri())).await;
        assert!(matches!(result, ApiResult::NotFound));
    }

    #[tokio::test]
    async fn test_api_call_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .insert_header("x-ratelimit-remaining", "0")
                    .insert_header("x-ratelimit-reset", "1704067200"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 2);
        match client.api_call(&format!("{}/limited", server.uri())).await {
            ApiResult::RateLimited(Some(info)) => assert_eq!(info.remaining, 0),
            other => panic!("expected rate limit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_api_call_forbidden_without_rate_limit_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 2);
        let result = client.api_call(&format!("{}/forbidden", server.uri())).await;
        assert!(matches!(result, ApiResult::Failed(_)));
    }

    #[tokio::test]
    async fn test_api_call_retries_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 3);
        let result = client.api_call(&format!("{}/flaky", server.uri())).await;
        assert!(matches!(result, ApiResult::Success(_)));
    }

    #[tokio::test]
    async fn test_api_call_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let client = test_client(&server.uri(), 2);
        let result = client.api_call(&format!("{}/broken", server.uri())).await;
        assert!(matches!(result, ApiResult::Failed(_)));
    }
}
