//! Notification module for announcing run summaries
//!
//! Sinks are chosen by configuration:
//! - `console`: plain line on stdout
//! - `log`: tracing event
//! - `memory`: retained in process, for embedding and tests

mod sinks;
mod traits;

pub use sinks::{ConsoleNotifier, LogNotifier, MemoryNotifier};
pub use traits::Notifier;

use crate::config::{NotificationConfig, NotificationSink};
use std::sync::Arc;

/// Builds the notification sink selected in the configuration
pub fn open_notifier(config: &NotificationConfig) -> Arc<dyn Notifier> {
    match config.sink {
        NotificationSink::Console => Arc::new(ConsoleNotifier),
        NotificationSink::Log => Arc::new(LogNotifier),
        NotificationSink::Memory => Arc::new(MemoryNotifier::new()),
    }
}
