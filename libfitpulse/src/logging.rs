//! Tracing subscriber setup for the `fitpulse` binary
//!
//! The library only emits `tracing` events. Reducers stay silent; the effect
//! runner, the services and the persist gate log. Everything goes to stderr
//! because stdout carries command output (often JSON piped into `jq`).
//!
//! ```no_run
//! use libfitpulse::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new(LogFormat::Json).with_level("libfitpulse=trace").init();
//! ```

use std::str::FromStr;

/// Default filter when nothing else is configured
const QUIET: &str = "warn";

/// Filter for `--verbose`: our crates at debug, HTTP internals stay quiet
const VERBOSE: &str = "libfitpulse=debug,fitpulse=debug,warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain lines without colour
    #[default]
    Text,
    /// One JSON object per event
    Json,
    /// Multi-line and coloured, for local debugging
    Pretty,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LogFormat::Text, LogFormat::Json, LogFormat::Pretty]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown log format '{}' (expected text, json or pretty)", s))
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive; wins over `verbose`
    pub level: Option<String>,
    pub verbose: bool,
}

impl LoggingConfig {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Read `FITPULSE_LOG_FORMAT` and `FITPULSE_LOG_LEVEL`
    ///
    /// An unparseable format falls back to text.
    pub fn from_env(verbose: bool) -> Self {
        let format = std::env::var("FITPULSE_LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        Self {
            format,
            level: std::env::var("FITPULSE_LOG_LEVEL").ok(),
            verbose,
        }
    }

    /// Directive used when `RUST_LOG` is unset
    pub fn directive(&self) -> &str {
        match (&self.level, self.verbose) {
            (Some(level), _) => level,
            (None, true) => VERBOSE,
            (None, false) => QUIET,
        }
    }

    /// Install the global subscriber; later calls are no-ops
    pub fn init(&self) {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.directive()));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Text => builder.with_target(false).without_time().try_init(),
            LogFormat::Json => builder
                .json()
                .flatten_event(true)
                .with_current_span(true)
                .try_init(),
            LogFormat::Pretty => builder.pretty().with_file(true).with_line_number(true).try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Subscriber already installed");
        }
    }
}

/// Environment-driven setup used by the binary
pub fn init_with_verbosity(verbose: bool) {
    LoggingConfig::from_env(verbose).init();
}
