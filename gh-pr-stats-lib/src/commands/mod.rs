//! Command-line interface and orchestration for gh-pr-stats
//!
//! This module implements the CLI and coordinates the other modules to perform
//! end-to-end pull request analysis. It handles argument parsing, configuration
//! management, logging setup, progress display, and file output.
//!
//! # Execution Flow
//!
//! The `run` function parses command-line arguments using clap and hands them to
//! the analysis workflow:
//!
//! 1. Initialize logging and load configuration
//! 2. Resolve the repository, from the argument or the current directory via `gh`
//! 3. Fetch the pull request records while displaying progress
//! 4. Optionally write the raw records to a JSON file
//! 5. Compute the statistics and optionally write them to a JSON file
//! 6. Render the report in the chosen format to the host's output
//!
//! Configuration is an optional TOML file (`pr-stats.toml`) that controls the API
//! endpoint, paging, retries, and request timeouts.

mod analyze;
mod common;
mod config;
mod host;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use analyze::{AnalyzeArgs, analyze_repository};
pub use host::Host;
pub use progress_reporter::ProgressReporter;
pub use run::run;
