//! Host-fed dark-mode signal.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Listener, Subscription, SystemSchemeWatcher};

/// A [`SystemSchemeWatcher`] whose signal is set by the host.
///
/// Hosts that receive platform dark-mode events through their own channel
/// (a UI toolkit callback, a D-Bus signal, a test harness) push them in
/// with [`ManualWatcher::set`]; subscribers are notified synchronously, and
/// only on actual transitions.
///
/// Clones share the same signal and subscriber list.
#[derive(Clone, Default)]
pub struct ManualWatcher {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    dark: Mutex<bool>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl Inner {
    fn dark(&self) -> MutexGuard<'_, bool> {
        self.dark.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ManualWatcher {
    /// Creates a watcher with the given initial signal.
    pub fn new(dark: bool) -> Self {
        let watcher = Self::default();
        *watcher.inner.dark() = dark;
        watcher
    }

    /// Updates the signal, notifying subscribers on transitions.
    ///
    /// Setting the current value again is a no-op: listeners fire once per
    /// transition, not once per call.
    pub fn set(&self, dark: bool) {
        {
            let mut current = self.inner.dark();
            if *current == dark {
                return;
            }
            *current = dark;
        }
        // The signal lock is released before listeners run, so a listener
        // may call current_value() freely.
        for (_, listener) in self.inner.listeners().iter() {
            listener();
        }
    }
}

impl SystemSchemeWatcher for ManualWatcher {
    fn current_value(&self) -> bool {
        *self.inner.dark()
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners().push((id, listener));

        let inner = Arc::downgrade(&self.inner);
        Subscription::on_drop(move || {
            if let Some(inner) = inner.upgrade() {
                inner.listeners().retain(|(lid, _)| *lid != id);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_listener() -> (Arc<AtomicUsize>, Listener) {
        let count = Arc::new(AtomicUsize::new(0));
        let counted = count.clone();
        let listener: Listener = Box::new(move || {
            counted.fetch_add(1, Ordering::SeqCst);
        });
        (count, listener)
    }

    #[test]
    fn test_current_value_reflects_set() {
        let watcher = ManualWatcher::new(false);
        assert!(!watcher.current_value());
        watcher.set(true);
        assert!(watcher.current_value());
    }

    #[test]
    fn test_notifies_only_on_transitions() {
        let watcher = ManualWatcher::new(false);
        let (count, listener) = counting_listener();
        let _sub = watcher.subscribe(listener);

        watcher.set(false); // no transition
        assert_eq!(count.load(Ordering::SeqCst), 0);

        watcher.set(true);
        watcher.set(true); // no transition
        watcher.set(false);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_subscription_stops_delivery() {
        let watcher = ManualWatcher::new(false);
        let (count, listener) = counting_listener();
        let sub = watcher.subscribe(listener);

        watcher.set(true);
        assert_eq!(count.load(Ordering::SeqCst), 1);

        drop(sub);
        watcher.set(false);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multiple_subscribers_each_notified() {
        let watcher = ManualWatcher::new(false);
        let (a_count, a) = counting_listener();
        let (b_count, b) = counting_listener();
        let _a_sub = watcher.subscribe(a);
        let _b_sub = watcher.subscribe(b);

        watcher.set(true);
        assert_eq!(a_count.load(Ordering::SeqCst), 1);
        assert_eq!(b_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clones_share_signal_and_subscribers() {
        let watcher = ManualWatcher::new(false);
        let clone = watcher.clone();
        let (count, listener) = counting_listener();
        let _sub = watcher.subscribe(listener);

        clone.set(true);
        assert!(watcher.current_value());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
