//! Write operations with a uniform success contract.
//!
//! On success a mutation, in order: shows the action's success message,
//! navigates when configured to, runs its follow-up hook, and invalidates
//! every endpoint it touches. Nothing is invalidated before the server
//! confirms the write. Failures are logged at `warn`, recorded as the
//! mutation's last error, and returned to the caller.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::BoxFuture;
use tracing::{info, warn};

use super::cache::QueryCache;
use super::read::Fetcher;
use crate::domain::ports::{Navigator, Notifier};
use crate::domain::{Endpoint, Error};

/// Follow-up run after a confirmed write and before invalidation.
pub type SuccessHook = Arc<dyn Fn() -> BoxFuture<'static, Result<(), Error>> + Send + Sync>;

/// Kind of write, which fixes the success message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    /// Record creation.
    Create,
    /// Record update, including the profile update.
    Update,
    /// Record deletion.
    Delete,
    /// Asset checkout.
    Checkout,
    /// Asset checkin.
    Checkin,
}

impl MutationAction {
    /// Message shown when the write succeeds.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Create => "Created successfully",
            Self::Update => "Updated successfully",
            Self::Delete => "Deleted successfully",
            Self::Checkout => "Checkout successfully",
            Self::Checkin => "Checkin successfully",
        }
    }

    /// Short label used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Checkout => "checkout",
            Self::Checkin => "checkin",
        }
    }
}

/// Collaborators a mutation reports its success through.
#[derive(Clone)]
pub struct MutationEffects {
    /// Cache invalidated after confirmed writes.
    pub cache: QueryCache,
    /// Receives the success message.
    pub notifier: Arc<dyn Notifier>,
    /// Follows post-write navigation.
    pub navigator: Arc<dyn Navigator>,
}

#[derive(Debug, Default)]
struct MutationStatus {
    pending: usize,
    last_error: Option<Error>,
}

// Counts one trigger as pending until dropped, so an abandoned trigger
// future does not leave the mutation pending.
struct PendingGuard {
    status: Arc<Mutex<MutationStatus>>,
}

impl PendingGuard {
    fn enter(status: &Arc<Mutex<MutationStatus>>) -> Self {
        {
            let mut current = status.lock().unwrap_or_else(PoisonError::into_inner);
            current.pending += 1;
            current.last_error = None;
        }
        Self {
            status: Arc::clone(status),
        }
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut current = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        current.pending = current.pending.saturating_sub(1);
    }
}

/// One write operation bound to its side effects.
///
/// Clones share their pending/error status.
pub struct Mutation<I, O> {
    resource: Endpoint,
    action: MutationAction,
    run: Fetcher<I, O>,
    effects: MutationEffects,
    navigate_to: Option<&'static str>,
    after_success: Option<SuccessHook>,
    invalidates: Vec<Endpoint>,
    status: Arc<Mutex<MutationStatus>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            action: self.action,
            run: Arc::clone(&self.run),
            effects: self.effects.clone(),
            navigate_to: self.navigate_to,
            after_success: self.after_success.clone(),
            invalidates: self.invalidates.clone(),
            status: Arc::clone(&self.status),
        }
    }
}

impl<I, O> fmt::Debug for Mutation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("resource", &self.resource)
            .field("action", &self.action)
            .field("navigate_to", &self.navigate_to)
            .field("invalidates", &self.invalidates)
            .finish_non_exhaustive()
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    /// Bind `run` to `resource`. The resource's endpoint is invalidated on
    /// success.
    pub fn new(
        effects: MutationEffects,
        resource: Endpoint,
        action: MutationAction,
        run: Fetcher<I, O>,
    ) -> Self {
        Self {
            resource,
            action,
            run,
            effects,
            navigate_to: None,
            after_success: None,
            invalidates: vec![resource],
            status: Arc::default(),
        }
    }

    /// Navigate to `path` after a confirmed write.
    #[must_use]
    pub fn navigate_to(mut self, path: &'static str) -> Self {
        self.navigate_to = Some(path);
        self
    }

    /// Also invalidate `endpoint` after a confirmed write.
    #[must_use]
    pub fn also_invalidates(mut self, endpoint: Endpoint) -> Self {
        if !self.invalidates.contains(&endpoint) {
            self.invalidates.push(endpoint);
        }
        self
    }

    /// Run `hook` after the notification and before invalidation.
    ///
    /// A failing hook is logged; the write itself still counts as
    /// successful.
    #[must_use]
    pub fn after_success(mut self, hook: SuccessHook) -> Self {
        self.after_success = Some(hook);
        self
    }

    fn status(&self) -> MutexGuard<'_, MutationStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Endpoints invalidated on success.
    pub fn invalidates(&self) -> &[Endpoint] {
        &self.invalidates
    }

    /// Whether a trigger is awaiting the server.
    pub fn is_pending(&self) -> bool {
        self.status().pending > 0
    }

    /// Failure of the most recent trigger, if it failed.
    pub fn last_error(&self) -> Option<Error> {
        self.status().last_error.clone()
    }

    /// Forget the last error.
    pub fn reset(&self) {
        self.status().last_error = None;
    }

    /// Perform the write and, once confirmed, apply the success contract.
    ///
    /// # Errors
    ///
    /// Returns the server or transport failure unchanged.
    pub async fn trigger(&self, input: I) -> Result<O, Error> {
        let _pending = PendingGuard::enter(&self.status);
        let outcome = (self.run)(input).await;
        let outcome = match outcome {
            Ok(output) => {
                self.on_success().await;
                Ok(output)
            }
            Err(error) => {
                warn!(
                    resource = %self.resource,
                    action = self.action.as_str(),
                    code = ?error.code(),
                    error = %error,
                    "mutation failed"
                );
                Err(error)
            }
        };
        if let Err(error) = &outcome {
            self.status().last_error = Some(error.clone());
        }
        outcome
    }

    async fn on_success(&self) {
        let message = self.action.success_message();
        info!(resource = %self.resource, action = self.action.as_str(), "mutation succeeded");
        self.effects.notifier.success(message);

        if let Some(path) = self.navigate_to {
            if let Err(error) = self.effects.navigator.push(path) {
                warn!(resource = %self.resource, %path, %error, "post-mutation navigation failed");
            }
        }

        if let Some(hook) = &self.after_success {
            if let Err(error) = hook().await {
                warn!(
                    resource = %self.resource,
                    action = self.action.as_str(),
                    %error,
                    "post-mutation follow-up failed"
                );
            }
        }

        for endpoint in &self.invalidates {
            self.effects.cache.invalidate(*endpoint);
        }
    }
}

#[cfg(test)]
mod tests;
