// Tracing log adapter - Structured logging using tracing crate

use crate::ports::*;
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Tracing log adapter
pub struct TracingLogAdapter {
    min_level: LogLevel,
}

impl TracingLogAdapter {
    /// Create new tracing log adapter
    pub fn new() -> Self {
        Self::with_level(LogLevel::Trace)
    }

    /// Create adapter that drops messages below `min_level`
    ///
    /// The global subscriber filter still applies on top of this.
    pub fn with_level(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// Check if log level should be logged
    fn should_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Default for TracingLogAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogPort for TracingLogAdapter {
    async fn info(&self, message: &str) {
        if self.should_log(LogLevel::Info) {
            info!("{}", message);
        }
    }

    async fn error(&self, message: &str) {
        if self.should_log(LogLevel::Error) {
            error!("{}", message);
        }
    }

    async fn debug(&self, message: &str) {
        if self.should_log(LogLevel::Debug) {
            debug!("{}", message);
        }
    }

    async fn log_event(&self, event: &LogEvent) {
        if !self.should_log(event.level) {
            return;
        }

        match event.level {
            LogLevel::Error => {
                tracing::error!(message = %event.message, context = ?event.context);
            }
            LogLevel::Warn => {
                warn!(message = %event.message, context = ?event.context);
            }
            LogLevel::Info => {
                tracing::info!(message = %event.message, context = ?event.context);
            }
            LogLevel::Debug => {
                tracing::debug!(message = %event.message, context = ?event.context);
            }
            LogLevel::Trace => {
                tracing::trace!(message = %event.message, context = ?event.context);
            }
        }
    }
}
