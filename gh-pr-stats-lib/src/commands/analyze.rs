use super::common::{ColorMode, LogLevel, OutputFormat, init_logging};
use super::config::Config;
use super::{Host, ProgressReporter};
use crate::facts::{Client, Progress, Provider, RepoSpec};
use crate::reports::{generate_delimited, generate_json, generate_table};
use crate::stats;
use crate::{Failure, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use ohno::IntoAppError;
use serde::Serialize;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   analyze";

/// Environment variable consulted for a token when `--github-token` and `GITHUB_TOKEN` are absent
const FALLBACK_TOKEN_VAR: &str = "GH_TOKEN";

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Repository to analyze (format: `owner/repo` or a GitHub URL); defaults to the repository of the current directory
    #[arg(value_name = "REPOSITORY")]
    pub repository: Option<String>,

    /// Format of the report written to standard output
    #[arg(long, short = 'f', value_name = "FORMAT", default_value = "table")]
    pub format: OutputFormat,

    /// Write the raw pull request records to a JSON file
    #[arg(long, short = 'o', value_name = "PATH", help_heading = "File Output")]
    pub output: Option<Utf8PathBuf>,

    /// Write the computed statistics to a JSON file
    #[arg(long, short = 's', value_name = "PATH", help_heading = "File Output")]
    pub stats: Option<Utf8PathBuf>,

    /// GitHub personal access token (falls back to `GH_TOKEN`)
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API, overriding the configuration file
    #[arg(long, value_name = "URL", env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Path to configuration file (default is `pr-stats.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Enable debug logging (same as `--log-level debug`)
    #[arg(long, short = 'v')]
    pub debug: bool,
}

impl AnalyzeArgs {
    const fn effective_log_level(&self) -> LogLevel {
        match self.log_level {
            LogLevel::Trace => LogLevel::Trace,
            level if !self.debug => level,
            _ => LogLevel::Debug,
        }
    }

    fn token(&self) -> Option<String> {
        self.github_token
            .clone()
            .or_else(|| std::env::var(FALLBACK_TOKEN_VAR).ok())
            .filter(|token| !token.trim().is_empty())
    }
}

/// Fetch the pull requests of a repository, compute their statistics, and report them.
pub async fn analyze_repository<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    let log_level = args.effective_log_level();
    init_logging(log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

    let repo_spec = match &args.repository {
        Some(text) => RepoSpec::parse(text)?,
        None => RepoSpec::current().await?,
    };

    let api_url = resolve_api_url(args.api_url.as_deref(), &config, &repo_spec);
    log::debug!(target: LOG_TARGET, "Using GitHub API at '{api_url}' for '{repo_spec}'");

    let client = Client::new(args.token().as_deref(), api_url, config.request_timeout(), config.max_retries)?;
    let provider = Provider::new(client, config.page_size, config.max_pages);

    let progress = ProgressReporter::new(log_level.progress_delay(), args.color.for_stderr());
    let fetched = provider.fetch_pull_requests(&repo_spec, &progress).await;
    progress.done();
    let records = fetched?;

    if records.is_empty() {
        writeln!(host.error(), "No pull requests found in '{repo_spec}'").into_app_err("writing to stderr")?;
    }

    if let Some(path) = &args.output {
        write_json_file(path, &records)?;
    }

    let statistics = stats::compute(&records);

    if let Some(path) = &args.stats {
        write_json_file(path, &statistics)?;
    }

    let mut report = String::new();
    match args.format {
        OutputFormat::Table => generate_table(&statistics, args.color.for_stdout(), &mut report)?,
        OutputFormat::Json => generate_json(&statistics, &mut report)?,
        OutputFormat::Csv => generate_delimited(&statistics, b',', &mut report)?,
        OutputFormat::Tsv => generate_delimited(&statistics, b'\t', &mut report)?,
    }

    write!(host.output(), "{report}").into_app_err("writing report")?;

    Ok(())
}

/// Pick the API base URL: `--api-url` first, then a GitHub Enterprise host named by the
/// repository URL, then the configured URL.
///
/// A configured non-default URL wins over the repository host.
fn resolve_api_url(explicit: Option<&str>, config: &Config, repo_spec: &RepoSpec) -> String {
    if let Some(url) = explicit {
        return url.to_string();
    }

    if config.has_default_api_url()
        && let Some(url) = repo_spec.api_url()
    {
        return url;
    }

    config.api_url.clone()
}

/// Serialize a value as pretty-printed JSON into a file.
fn write_json_file<T: Serialize + ?Sized>(path: &Utf8Path, value: &T) -> Result<(), Failure> {
    let text = serde_json::to_string_pretty(value).map_err(|e| Failure::persistence(path.to_path_buf(), e.to_string()))?;
    fs::write(path, text).map_err(|e| Failure::persistence(path.to_path_buf(), e.to_string()))?;

    log::info!(target: LOG_TARGET, "Wrote '{path}'");
    Ok(())
}
