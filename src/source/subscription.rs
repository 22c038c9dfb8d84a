//! Cancellation handle for system-preference subscriptions.

use std::fmt;

/// Handle returned by [`SystemScheme::subscribe`](crate::SystemScheme::subscribe).
///
/// Cancelling stops further notifications. The handle follows the
/// "subscribe returns a disposer" contract:
///
/// - [`cancel`](Subscription::cancel) is idempotent — calling it twice is a
///   no-op, not an error.
/// - Cancelling after the subscribed source is gone is safe.
/// - Dropping an uncancelled handle cancels it, so a host framework can bind
///   teardown to scope exit.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps a cancellation action. The action runs at most once.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A handle with nothing to cancel.
    ///
    /// Returned by sources that could not actually start delivering
    /// notifications, so callers can hold and cancel it uniformly.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// Stops further notifications. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// True until the first [`cancel`](Subscription::cancel) (or drop).
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
