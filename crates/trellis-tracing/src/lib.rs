//! Shared tracing configuration utilities for the trellis workspace.
//!
//! The helpers in this crate centralise how executables, integration tests,
//! and supporting tools install `tracing` subscribers. By routing setup
//! through a single crate we avoid copy-pasting builder logic and keep the
//! logging surface consistent across binaries.

use std::env;

pub use tracing::{debug, error, info, trace, warn};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter, Registry};

/// Errors raised while installing the shared subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// The computed filter directives failed to parse.
    #[error("invalid tracing directives: {0}")]
    InvalidDirectives(String),

    /// A global subscriber is already installed.
    #[error("global tracing subscriber already installed")]
    AlreadyInstalled,
}

/// Output format for the formatter layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TracingOutput {
    /// Multi-line, human-oriented output for local development.
    Pretty,
    /// Single-line output, useful when logs are grepped.
    Compact,
    /// Machine-readable JSON, one event per line.
    Json,
}

impl TracingOutput {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration describing how the shared tracing subscriber should behave.
#[derive(Clone, Debug)]
pub struct TracingConfig {
    /// Optional tracing directives (e.g. `trellis_core=debug,info`). When
    /// absent the crate falls back to `RUST_LOG` and finally to
    /// [`default_directive`](Self::default_directive).
    pub directives: Option<String>,
    /// Fallback directive used when neither [`directives`](Self::directives)
    /// nor `RUST_LOG` resolve to a valid filter.
    pub default_directive: String,
    /// Controls whether event targets (module paths) appear in output.
    pub include_targets: bool,
    /// Controls ANSI formatting. Disable for CI logs that strip colour codes.
    pub ansi: bool,
    /// Span lifecycle events to emit. Defaults to [`FmtSpan::NONE`].
    pub span_events: FmtSpan,
    /// Output format for the formatter layer.
    pub output: TracingOutput,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_local()
    }
}

impl TracingConfig {
    /// Returns a configuration tuned for local development (pretty, ANSI-enabled output).
    pub fn for_local() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: true,
            span_events: FmtSpan::NONE,
            output: TracingOutput::Pretty,
        }
    }

    /// Returns a configuration tuned for CI or log collection environments (JSON, no ANSI).
    pub fn for_ci() -> Self {
        Self {
            directives: None,
            default_directive: "info".to_string(),
            include_targets: true,
            ansi: false,
            span_events: FmtSpan::NONE,
            output: TracingOutput::Json,
        }
    }

    /// Build a configuration using environment hints.
    ///
    /// # Environment Variables
    ///
    /// - `TRELLIS_TRACING_PROFILE` - Profile preset: `local` (default) or `ci`
    /// - `TRELLIS_TRACING_DIRECTIVES` - Overrides tracing directives
    /// - `TRELLIS_TRACING_FORMAT` - Output format: `pretty`, `compact`, or `json`
    pub fn from_env() -> Self {
        let profile = env::var("TRELLIS_TRACING_PROFILE")
            .unwrap_or_else(|_| "local".to_string())
            .to_ascii_lowercase();

        let mut config = match profile.as_str() {
            "ci" => Self::for_ci(),
            _ => Self::for_local(),
        };

        if let Ok(directives) = env::var("TRELLIS_TRACING_DIRECTIVES") {
            if !directives.trim().is_empty() {
                config.directives = Some(directives);
            }
        }

        if let Ok(format) = env::var("TRELLIS_TRACING_FORMAT") {
            if let Some(parsed) = TracingOutput::from_env_value(&format) {
                config.output = parsed;
                if matches!(config.output, TracingOutput::Json) {
                    config.ansi = false;
                }
            }
        }

        config
    }

    fn env_filter(&self) -> Result<EnvFilter, TracingError> {
        if let Some(directives) = &self.directives {
            return EnvFilter::try_new(directives)
                .map_err(|e| TracingError::InvalidDirectives(e.to_string()));
        }

        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        EnvFilter::try_new(&self.default_directive)
            .map_err(|e| TracingError::InvalidDirectives(e.to_string()))
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails when the directives do not parse or when another subscriber is
/// already installed. Use [`init`] when the caller does not care about the
/// latter (integration tests install the subscriber once per process).
pub fn try_init(config: &TracingConfig) -> Result<(), TracingError> {
    let filter = config.env_filter()?;
    let registry = Registry::default().with(filter);

    let base = tracing_fmt::layer()
        .with_ansi(config.ansi)
        .with_target(config.include_targets)
        .with_span_events(config.span_events.clone());

    let result = match config.output {
        TracingOutput::Pretty => registry.with(base.pretty()).try_init(),
        TracingOutput::Compact => registry.with(base.compact()).try_init(),
        TracingOutput::Json => registry.with(base.json()).try_init(),
    };

    result.map_err(|_| TracingError::AlreadyInstalled)
}

/// Install the global subscriber, tolerating an already-installed one.
///
/// Invalid directives still fail loudly; double initialisation does not.
pub fn init(config: &TracingConfig) -> Result<(), TracingError> {
    match try_init(config) {
        Ok(()) | Err(TracingError::AlreadyInstalled) => Ok(()),
        Err(e) => Err(e),
    }
}

/// Install the environment-driven configuration. Convenience for binaries
/// and test harnesses that have no opinions of their own.
pub fn init_from_env() -> Result<(), TracingError> {
    init(&TracingConfig::from_env())
}
