//! Command dispatch logic for gh-pr-stats

use super::{AnalyzeArgs, analyze_repository};
use crate::{Host, Result};
use clap::Parser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gh-pr-stats", bin_name = "gh-pr-stats", version, long_about = None)]
#[command(about = "Summarize a GitHub repository's pull requests by label")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    args: AnalyzeArgs,
}

/// Parse command-line arguments and run the tool
///
/// This function is designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the repository cannot be resolved, its pull requests cannot
/// be retrieved, or a report cannot be written
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    analyze_repository(host, &cli.args).await
}
