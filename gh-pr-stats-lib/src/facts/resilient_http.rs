//! Resilient HTTP GET using retry and timeout middleware.
//!
//! Requests go through [`seatbelt`] retry and timeout layers so that transient
//! network and server failures are masked automatically.

use core::time::Duration;
use layered::{Execute, Service, Stack};
use ohno::app_err;
use reqwest::StatusCode;
use seatbelt::retry::{Backoff, Retry};
use seatbelt::timeout::Timeout;
use seatbelt::{RecoveryInfo, ResilienceContext};
use tick::Clock;

const LOG_TARGET: &str = "      http";

/// Base delay for exponential backoff between retries.
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// How a request is retried and bounded in time.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retry attempts on top of the original request.
    pub max_retry_attempts: u32,

    /// Delay before the first retry, doubled on each subsequent one.
    pub base_delay: Duration,

    /// Time allowed for each individual attempt.
    pub timeout: Duration,
}

/// Classify an HTTP response for retry purposes.
///
/// Rate limited responses (403/429) are never retried, the caller reports them instead.
fn should_retry_response(result: &crate::Result<reqwest::Response>) -> RecoveryInfo {
    match result {
        Err(_) => RecoveryInfo::retry(),
        Ok(resp) if matches!(resp.status(), StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS) => RecoveryInfo::never(),
        Ok(resp) if resp.status().is_server_error() => RecoveryInfo::retry(),
        Ok(_) => RecoveryInfo::never(),
    }
}

/// Send an HTTP GET request with automatic retry and timeout.
///
/// Network errors, timeouts, and 5xx responses are retried with exponential backoff.
/// Once the attempts are exhausted, the last outcome is returned as is.
pub async fn resilient_get(client: &reqwest::Client, url: &str, policy: RetryPolicy) -> crate::Result<reqwest::Response> {
    let clock = Clock::new_tokio();
    let context = ResilienceContext::new(&clock).name("github_get");

    let client = client.clone();
    let service = (
        Retry::layer("retry", &context)
            .clone_input()
            .recovery_with(|result: &crate::Result<reqwest::Response>, _| should_retry_response(result))
            .max_retry_attempts(policy.max_retry_attempts)
            .base_delay(policy.base_delay)
            .backoff(Backoff::Exponential)
            .on_retry(|_output, args| {
                log::debug!(
                    target: LOG_TARGET,
                    "Retrying HTTP GET (attempt {}, delay {}ms)",
                    args.attempt().index() + 1,
                    args.retry_delay().as_millis(),
                );
            }),
        Timeout::layer("timeout", &context)
            .timeout_error(|_| app_err!("HTTP request timed out"))
            .timeout(policy.timeout),
        Execute::new(move |url: String| {
            let client = client.clone();
            async move { client.get(&url).send().await.map_err(ohno::AppError::from) }
        }),
    )
        .into_service();

    service.execute(url.to_string()).await
}
