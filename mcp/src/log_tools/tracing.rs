use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use strum::{AsRefStr, EnumString};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use super::lazy_file_writer::LazyFileWriter;
use crate::constants::{LOG_LEVEL_ENV_VAR, TRACE_LOG_FILE_NAME};
use crate::error::{Error, Result};

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(TracingLevel::Warn as u8);

/// Dynamic tracing filter that reads the level from [`CURRENT_LEVEL`] on every event
#[derive(Clone)]
pub struct DynamicFilter;

impl<S> Layer<S> for DynamicFilter
where
    S: Subscriber,
{
    fn enabled(
        &self,
        metadata: &tracing::Metadata<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) -> bool {
        // HTTP client internals are noise next to the remote call log lines
        let target = metadata.target();
        if target.starts_with("reqwest::")
            || target.starts_with("hyper")
            || target.starts_with("h2::")
            || target.starts_with("rustls::")
            || target.starts_with("want::")
        {
            return false;
        }

        TracingLevel::from(*metadata.level()) as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
    }
}

/// Tracing levels that can be set at startup or at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[repr(u8)]
pub enum TracingLevel {
    Error = 0,
    Warn  = 1,
    Info  = 2,
    Debug = 3,
    Trace = 4,
}

impl From<Level> for TracingLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Info,
            Level::DEBUG => Self::Debug,
            Level::TRACE => Self::Trace,
        }
    }
}

impl TracingLevel {
    /// Parse a user supplied level name
    pub fn parse(raw: &str) -> Result<Self> {
        Self::from_str(raw.trim()).map_err(|_| {
            Error::invalid(
                "tracing level",
                format!("'{raw}'. Valid levels are: error, warn, info, debug, trace"),
            )
            .into()
        })
    }

    /// Initial level taken from the environment, if set and valid
    pub fn from_env() -> Option<Self> {
        std::env::var(LOG_LEVEL_ENV_VAR)
            .ok()
            .and_then(|raw| Self::parse(&raw).ok())
    }

    /// Initialize file-based tracing with a fixed filename in the temp directory
    ///
    /// The log file is only created on the first write, so a server that never logs
    /// above the current level leaves nothing behind.
    pub fn init_file_tracing(initial: Self) {
        CURRENT_LEVEL.store(initial as u8, Ordering::Relaxed);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(LazyFileWriter::new(Self::trace_log_path()))
            .with_ansi(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        Registry::default()
            .with(DynamicFilter)
            .with(file_layer)
            .init();
    }

    /// Get the current tracing level
    pub fn current() -> Self {
        match CURRENT_LEVEL.load(Ordering::Relaxed) {
            0 => Self::Error,
            2 => Self::Info,
            3 => Self::Debug,
            4 => Self::Trace,
            _ => Self::Warn,
        }
    }

    /// Set the current tracing level and log the change at that level
    pub fn set(level: Self) {
        CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);

        match level {
            Self::Error => tracing::error!("Tracing level set to: error"),
            Self::Warn => tracing::warn!("Tracing level set to: warn"),
            Self::Info => tracing::info!("Tracing level set to: info"),
            Self::Debug => tracing::debug!("Tracing level set to: debug"),
            Self::Trace => tracing::trace!("Tracing level set to: trace"),
        }
    }

    /// Path to the trace log file
    pub fn trace_log_path() -> PathBuf {
        std::env::temp_dir().join(TRACE_LOG_FILE_NAME)
    }
}
