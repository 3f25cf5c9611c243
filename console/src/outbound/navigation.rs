//! Navigator that validates targets against the route table.

use std::sync::{Mutex, PoisonError};

use tracing::{info, warn};

use crate::domain::ports::{NavigationError, Navigator};
use crate::routes::RouteTable;

/// In-process history stack. Pushes to unknown paths are rejected.
#[derive(Debug)]
pub struct HistoryNavigator {
    routes: RouteTable,
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    /// Navigator over `routes` with an empty history.
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Most recent location, if any.
    pub fn current(&self) -> Option<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Every location pushed so far, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, path: &str) -> Result<(), NavigationError> {
        let Some(matched) = self.routes.resolve(path) else {
            warn!(%path, "navigation to unknown route");
            return Err(NavigationError::unknown_route(path));
        };
        info!(%path, route = matched.name, "navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(matched.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn known_routes_are_recorded_and_unknown_ones_rejected() {
        let navigator = HistoryNavigator::new(RouteTable::console());

        navigator.push("/assets").expect("assets route");
        navigator.push("/assets/edit/7").expect("edit route");
        let err = navigator.push("/nowhere").expect_err("unknown route");

        assert_eq!(err, NavigationError::unknown_route("/nowhere"));
        assert_eq!(navigator.history(), vec!["/assets", "/assets/edit/7"]);
        assert_eq!(navigator.current().as_deref(), Some("/assets/edit/7"));
    }
}
