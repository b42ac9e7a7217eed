use crate::Failure;
use core::fmt::{Display, Formatter};
use core::str::FromStr;
use std::sync::Arc;
use tokio::process::Command;
use url::Url;

const LOG_TARGET: &str = "      repo";
const DEFAULT_HOST: &str = "github.com";
const EXPECTED_FORMAT: &str = "expected format: owner/repo";

/// A repository on a hosting service, identified by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    host: Arc<str>,
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    /// Parse `owner/repo` or a repository URL such as `https://github.com/owner/repo`.
    ///
    /// Extra path segments and a trailing `.git` are stripped from URLs.
    pub fn parse(text: &str) -> Result<Self, Failure> {
        let text = text.trim();

        if text.contains("://") {
            let url = Url::parse(text).map_err(|e| Failure::invalid_target(text, e.to_string()))?;
            let segments: Vec<_> = url.path_segments().map(Iterator::collect).unwrap_or_default();
            let host = url.host_str().unwrap_or(DEFAULT_HOST);

            return match segments.as_slice() {
                [owner, repo, ..] => Self::from_parts(text, host, owner, repo.trim_end_matches(".git")),
                _ => Err(Failure::invalid_target(text, EXPECTED_FORMAT)),
            };
        }

        match text.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] => Self::from_parts(text, DEFAULT_HOST, owner, repo),
            _ => Err(Failure::invalid_target(text, EXPECTED_FORMAT)),
        }
    }

    /// Determine the repository of the current directory using the `gh` CLI.
    pub async fn current() -> Result<Self, Failure> {
        const TARGET: &str = "current directory";

        log::debug!(target: LOG_TARGET, "Asking gh for the repository of the current directory");

        let output = Command::new("gh")
            .args(["repo", "view", "--json", "nameWithOwner", "-q", ".nameWithOwner"])
            .output()
            .await
            .map_err(|e| Failure::invalid_target(TARGET, format!("could not run gh: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Failure::invalid_target(TARGET, stderr.trim().to_string()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse(stdout.trim())
    }

    fn from_parts(text: &str, host: &str, owner: &str, repo: &str) -> Result<Self, Failure> {
        let is_valid = |s: &str| !s.is_empty() && !s.chars().any(char::is_whitespace);

        if !is_valid(owner) || !is_valid(repo) {
            return Err(Failure::invalid_target(text, EXPECTED_FORMAT));
        }

        Ok(Self {
            host: Arc::from(host),
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// REST API base URL implied by the host, for GitHub Enterprise Server hosts.
    ///
    /// Returns `None` for `github.com`, whose API lives at the configured URL.
    #[must_use]
    pub fn api_url(&self) -> Option<String> {
        let host = self.host.strip_prefix("www.").unwrap_or(&self.host);
        (!host.eq_ignore_ascii_case(DEFAULT_HOST)).then(|| format!("https://{}/api/v3", self.host))
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }
}

impl FromStr for RepoSpec {
    type Err = Failure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
