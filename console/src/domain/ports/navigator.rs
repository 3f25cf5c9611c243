//! Port for moving the console to another view.

use super::define_port_error;

define_port_error! {
    /// Errors raised by navigation adapters.
    pub enum NavigationError {
        /// The target path does not resolve to any registered route.
        UnknownRoute { path: String } => "no route matches {path}",
    }
}

/// Pushes a new location onto the console's history.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `path`.
    fn push(&self, path: &str) -> Result<(), NavigationError>;
}

/// Navigator that accepts every path and goes nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticNavigator;

impl Navigator for StaticNavigator {
    fn push(&self, _path: &str) -> Result<(), NavigationError> {
        Ok(())
    }
}
