use super::client::{ApiResult, Client, Issue, RateLimitInfo};
use crate::Failure;
use crate::facts::{Progress, RepoSpec};
use crate::stats::PullRequestRecord;
use core::sync::atomic::{AtomicU64, Ordering};
use regex::Regex;
use reqwest::header::LINK;
use std::sync::{Arc, LazyLock};

const LOG_TARGET: &str = "  provider";

/// Extracts the last page number from a `Link` response header.
static PAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"page=(\d+)>; rel=.last.").expect("invalid regex"));

#[derive(Debug, Default)]
struct PageCounters {
    pages_fetched: AtomicU64,
    last_page: AtomicU64,
    pull_requests: AtomicU64,
}

/// Retrieves every pull request of a repository, page by page.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
    page_size: u8,
    max_pages: u32,
}

impl Provider {
    /// Create a provider.
    ///
    /// A `max_pages` of 0 means no limit.
    #[must_use]
    pub const fn new(client: Client, page_size: u8, max_pages: u32) -> Self {
        Self {
            client,
            page_size,
            max_pages,
        }
    }

    /// Fetch all pull requests, open and closed, for the given repository.
    ///
    /// Plain issues returned by the issues endpoint are skipped.
    pub async fn fetch_pull_requests(&self, repo_spec: &RepoSpec, progress: &dyn Progress) -> Result<Vec<PullRequestRecord>, Failure> {
        let owner = repo_spec.owner();
        let repo = repo_spec.repo();

        log::info!(target: LOG_TARGET, "Querying GitHub for pull requests in '{repo_spec}'");

        let counters = Arc::new(PageCounters::default());
        progress.set_phase("Fetching");
        progress.set_indeterminate(Box::new({
            let counters = Arc::clone(&counters);
            move || {
                format!(
                    "{} pages, {} pull requests",
                    counters.pages_fetched.load(Ordering::Relaxed),
                    counters.pull_requests.load(Ordering::Relaxed)
                )
            }
        }));

        let mut records = Vec::new();
        let mut page_num = 1u32;

        loop {
            let url = format!(
                "{}/repos/{owner}/{repo}/issues?state=all&per_page={}&page={page_num}",
                self.client.base_url(),
                self.page_size
            );

            log::debug!(target: LOG_TARGET, "Fetching page {page_num} of pull requests for '{repo_spec}'");

            let resp = match self.client.api_call(&url).await {
                ApiResult::Success(resp) => resp,
                ApiResult::RateLimited(rate_limit) => return Err(Failure::retrieval(repo_spec, rate_limit_reason(rate_limit))),
                ApiResult::NotFound => return Err(Failure::retrieval(repo_spec, "repository not found")),
                ApiResult::Failed(e) => return Err(Failure::retrieval(repo_spec, format!("{e:#}"))),
            };

            let link = resp.headers().get(LINK).and_then(|h| h.to_str().ok()).map(str::to_string);
            let has_next_page = link.as_deref().is_some_and(|link_str| link_str.contains(r#"rel="next""#));

            if page_num == 1
                && let Some(last_page) = link.as_deref().and_then(last_page_from_link)
            {
                counters.last_page.store(last_page, Ordering::Relaxed);
                progress.set_determinate(Box::new({
                    let counters = Arc::clone(&counters);
                    move || {
                        let fetched = counters.pages_fetched.load(Ordering::Relaxed);
                        let total = counters.last_page.load(Ordering::Relaxed);
                        let prs = counters.pull_requests.load(Ordering::Relaxed);
                        (total, fetched, format!("{fetched}/{total} pages, {prs} pull requests"))
                    }
                }));
            }

            let issues: Vec<Issue> = resp
                .json()
                .await
                .map_err(|e| Failure::retrieval(repo_spec, format!("could not decode page {page_num}: {e}")))?;

            if issues.is_empty() {
                break;
            }

            let before = records.len();
            records.extend(issues.into_iter().filter(Issue::is_pull_request).map(Issue::into_record));

            log::debug!(
                target: LOG_TARGET,
                "Page {page_num}: found {} pull requests (total so far: {})",
                records.len() - before,
                records.len()
            );

            let _ = counters.pages_fetched.fetch_add(1, Ordering::Relaxed);
            counters.pull_requests.store(records.len() as u64, Ordering::Relaxed);

            if !has_next_page {
                break;
            }

            if self.max_pages > 0 && page_num >= self.max_pages {
                log::debug!(
                    target: LOG_TARGET,
                    "Reached maximum page limit ({}) for '{repo_spec}', stopping pagination after {} pull requests",
                    self.max_pages,
                    records.len()
                );
                break;
            }

            page_num += 1;
        }

        log::info!(target: LOG_TARGET, "Retrieved {} pull requests for '{repo_spec}'", records.len());

        Ok(records)
    }
}

fn last_page_from_link(link: &str) -> Option<u64> {
    PAGE_REGEX.captures(link)?.get(1)?.as_str().parse().ok()
}

fn rate_limit_reason(rate_limit: Option<RateLimitInfo>) -> String {
    rate_limit.map_or_else(
        || "GitHub API rate limit exceeded".to_string(),
        |rl| format!("GitHub API rate limit exceeded, resets at {}", rl.reset_at.to_rfc3339()),
    )
}
