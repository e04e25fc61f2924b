use crate::event::{LogEvent, LogLevel};
use async_trait::async_trait;
use tracing::{debug, error, info, warn};

/// Fire-and-forget destination for structured log events.
///
/// Implementations absorb their own failures; `emit` cannot fail and
/// must never abort the workflow it is reporting on.
#[async_trait]
pub trait LogSink: Send + Sync {
    /// Delivers one event, best-effort.
    async fn emit(&self, event: LogEvent);
}

/// Sink that discards everything.
pub struct NullSink;

#[async_trait]
impl LogSink for NullSink {
    async fn emit(&self, _event: LogEvent) {}
}

/// Sink that forwards events onto the process-local `tracing` pipeline.
pub struct TracingSink;

#[async_trait]
impl LogSink for TracingSink {
    async fn emit(&self, event: LogEvent) {
        match event.level {
            LogLevel::Debug => {
                debug!(stack = %event.stack, package = %event.package, "{}", event.message)
            }
            LogLevel::Info => {
                info!(stack = %event.stack, package = %event.package, "{}", event.message)
            }
            LogLevel::Warn => {
                warn!(stack = %event.stack, package = %event.package, "{}", event.message)
            }
            LogLevel::Error | LogLevel::Fatal => {
                error!(stack = %event.stack, package = %event.package, level = %event.level, "{}", event.message)
            }
        }
    }
}
