use std::collections::VecDeque;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Mutex, Once};

use nt_core::Result;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "info";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    /// Drop everything. Used while the terminal screen owns the tty.
    Discard,
}

#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn prefixed(&self, message: &str) -> String {
        let prefix = self.prefixes.iter().map(|p| format!("{} ", p)).collect::<String>();
        format!("{}{}", prefix, message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.prefixed(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.prefixed(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.prefixed(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.prefixed(message));
    }
}

/// Installs the global subscriber once. Later calls are no-ops.
///
/// The filter comes from `RUST_LOG` and defaults to `info`.
pub fn init_logging(target: &LogTarget) -> Result<Logger> {
    if tracing::dispatcher::has_been_set() {
        return Ok(Logger::new());
    }

    // Open the file before entering call_once so a failure can be reported.
    let file = match target {
        LogTarget::File(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        _ => None,
    };

    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false);
        match (target, file) {
            (LogTarget::File(_), Some(file)) => builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init(),
            (LogTarget::Discard, _) => builder.with_writer(std::io::sink).init(),
            _ => builder.with_writer(std::io::stderr).init(),
        }
    });
    Ok(Logger::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        let logger = Logger::new().with_prefix("[search]").with_prefix("[Colombia]");
        assert_eq!(logger.prefixed("done"), "[search] [Colombia] done");
        assert_eq!(Logger::new().prefixed("done"), "done");
    }
}
