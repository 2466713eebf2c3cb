//! Logging setup for cl-media-tools.
//!
//! Everything is written to stderr: `clmt serve` owns stdout for replies.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crates whose events pass the default filter.
const LOG_TARGETS: [&str; 4] = [
    "cl_media_tools",
    "cl_media_tools_linux",
    "cl_media_tools_mac",
    "cl_media_tools_windows",
];

/// How much the CLI should log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Warnings and above. Probe fallbacks show up here.
    #[default]
    Normal,
    /// Registration and dispatch decisions.
    Verbose,
    /// Every handled call.
    Trace,
}

impl Verbosity {
    /// Derive a verbosity from `-q` and the number of `-v` flags.
    ///
    /// `quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level emitted at this verbosity.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// `EnvFilter` directives covering this workspace's crates.
    #[must_use]
    pub fn directives(self) -> String {
        let level = self.level();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG`, when set and valid, replaces the verbosity-derived filter.
/// Calling this more than once is harmless; later calls are ignored.
///
/// ```no_run
/// use cl_media_tools::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    // Allow RUST_LOG to override the verbosity flags
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));

    // Stdout belongs to `serve`; a second init is a no-op
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
}
