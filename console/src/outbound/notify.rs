//! Notifier that reports success messages through `tracing`.

use tracing::info;

use crate::domain::ports::Notifier;

/// Emits each success message as an `info` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!(target: "asset_console::notify", %message, "success");
    }
}
