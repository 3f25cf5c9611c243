//! Port for transient user feedback.

/// Shows short-lived success messages to the operator.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Show a success message. Nothing is returned to the caller.
    fn success(&self, message: &str);
}

/// Notifier that drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn success(&self, _message: &str) {}
}
