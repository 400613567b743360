//! Platform dark-mode signal.
//!
//! A [`SystemSchemeWatcher`] exposes one externally-owned boolean — "does
//! the platform currently prefer dark?" — and optionally notifies
//! subscribers when it flips. The signal is read-only from this crate's
//! point of view and may change at any time.
//!
//! When the platform cannot report the signal at all, watchers degrade to
//! [`FALLBACK_DARK`] (light) rather than erroring. Watchers without any
//! change-delivery mechanism hand back an inert [`Subscription`].

mod manual;
mod os;

use std::fmt;

pub use manual::ManualWatcher;
pub use os::{set_system_probe, OsWatcher, SystemProbe};

/// Change callback, invoked with no arguments on each signal transition.
pub type Listener = Box<dyn Fn() + Send + Sync>;

/// The signal value used whenever the platform cannot be queried: before
/// any probe has run, in non-interactive contexts, or after a probe
/// failure. A constant, never a probe.
pub const FALLBACK_DARK: bool = false;

/// Read access to the platform dark-mode signal, with change delivery.
pub trait SystemSchemeWatcher: Send + Sync {
    /// The current signal. [`FALLBACK_DARK`] when the capability is
    /// unavailable or the query fails; errors never propagate.
    fn current_value(&self) -> bool;

    /// Registers `listener` for signal transitions. Delivery stops when
    /// the returned [`Subscription`] is dropped.
    ///
    /// The default implementation is for watchers with no delivery
    /// mechanism: the listener is discarded and an inert subscription is
    /// returned.
    fn subscribe(&self, listener: Listener) -> Subscription {
        let _ = listener;
        Subscription::inert()
    }
}

/// RAII handle for an active change subscription.
///
/// Dropping the handle cancels delivery. An inert handle (from a watcher
/// without change delivery) cancels nothing.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// A subscription with nothing to cancel.
    pub fn inert() -> Self {
        Self { cancel: None }
    }

    /// A subscription that runs `cancel` exactly once, on drop.
    pub fn on_drop(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// True when dropping this handle will actually cancel something.
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
