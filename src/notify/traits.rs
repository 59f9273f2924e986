//! Notification sink trait

/// Destination for end-of-run summaries
///
/// Delivery is best effort: a sink that cannot deliver logs the problem
/// instead of failing the scrape that produced the message.
pub trait Notifier: Send + Sync {
    /// Delivers one summary message
    fn send(&self, message: &str);
}
