//! Settings and setup shared by the command layer.

use clap::ValueEnum;
use core::time::Duration;
use std::io::{IsTerminal, stderr, stdout};

/// Delay before the progress indicator appears when logging is off.
const PROGRESS_DELAY: Duration = Duration::from_millis(300);

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether to colorize standard output.
    #[must_use]
    pub fn for_stdout(self) -> bool {
        self.resolve(|| stdout().is_terminal())
    }

    /// Whether to colorize standard error.
    #[must_use]
    pub fn for_stderr(self) -> bool {
        self.resolve(|| stderr().is_terminal())
    }

    fn resolve(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// How long the progress indicator waits before showing itself.
    ///
    /// While logging is on, the indicator is kept out of the way of log lines.
    #[must_use]
    pub const fn progress_delay(self) -> Duration {
        match self {
            Self::None => PROGRESS_DELAY,
            _ => Duration::from_hours(365 * 24),
        }
    }
}

/// Report format written to standard output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,

    /// Pretty-printed JSON
    Json,

    /// Comma-separated values
    Csv,

    /// Tab-separated values
    Tsv,
}

/// Initialize logger based on log level
///
/// `RUST_LOG` takes precedence over the requested level. Repeated initialization is ignored.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
