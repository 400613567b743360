//! OS-level dark-mode probing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use once_cell::sync::Lazy;

use super::{Listener, Subscription, SystemSchemeWatcher, FALLBACK_DARK};

/// Probe signature: `Some(dark)` on a definite answer, `None` when the
/// platform cannot report.
pub type SystemProbe = fn() -> Option<bool>;

static SYSTEM_PROBE: Lazy<Mutex<SystemProbe>> = Lazy::new(|| Mutex::new(os_probe));

/// Overrides the probe used by every [`OsWatcher`] in the process.
///
/// This is useful for testing or when you want to force a specific signal.
///
/// # Example
///
/// ```rust
/// use shade::set_system_probe;
///
/// // Force a dark platform for testing
/// set_system_probe(|| Some(true));
/// ```
pub fn set_system_probe(probe: SystemProbe) {
    let mut guard = SYSTEM_PROBE.lock().unwrap_or_else(|e| e.into_inner());
    *guard = probe;
}

fn run_probe() -> Option<bool> {
    let probe = *SYSTEM_PROBE.lock().unwrap_or_else(|e| e.into_inner());
    probe()
}

/// Queries the OS through `dark-light` first, falling back to the legacy
/// per-platform probe when it reports nothing usable.
fn os_probe() -> Option<bool> {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => return Some(true),
        Ok(dark_light::Mode::Light) => return Some(false),
        Ok(dark_light::Mode::Unspecified) => {}
        Err(e) => debug!("dark-light probe failed: {e}"),
    }
    legacy_probe()
}

/// Legacy probe: reads the global interface style directly.
///
/// A missing `AppleInterfaceStyle` key means light mode; a failure to run
/// the command at all means the capability is absent.
#[cfg(target_os = "macos")]
fn legacy_probe() -> Option<bool> {
    std::process::Command::new("defaults")
        .args(["read", "-g", "AppleInterfaceStyle"])
        .output()
        .ok()
        .map(|output| {
            output.status.success()
                && String::from_utf8_lossy(&output.stdout)
                    .trim()
                    .eq_ignore_ascii_case("dark")
        })
}

#[cfg(not(target_os = "macos"))]
fn legacy_probe() -> Option<bool> {
    None
}

/// A [`SystemSchemeWatcher`] backed by the OS color-scheme capability.
///
/// `current_value` probes synchronously on each call. Change delivery is
/// opt-in: the OS exposes no portable change feed, so
/// [`OsWatcher::poll_every`] re-probes on a background interval and
/// notifies on transitions. The poller lives exactly as long as the
/// [`Subscription`] it hands out; a watcher built with [`OsWatcher::new`]
/// returns inert subscriptions.
#[derive(Debug, Clone, Default)]
pub struct OsWatcher {
    poll_interval: Option<Duration>,
}

impl OsWatcher {
    /// A probe-on-read watcher with no change delivery.
    pub fn new() -> Self {
        Self::default()
    }

    /// A watcher whose subscriptions re-probe every `interval` and notify
    /// on transitions. Cancellation (dropping the subscription) takes
    /// effect within one interval.
    pub fn poll_every(interval: Duration) -> Self {
        Self {
            poll_interval: Some(interval),
        }
    }
}

impl SystemSchemeWatcher for OsWatcher {
    fn current_value(&self) -> bool {
        run_probe().unwrap_or(FALLBACK_DARK)
    }

    fn subscribe(&self, listener: Listener) -> Subscription {
        let Some(interval) = self.poll_interval else {
            return Subscription::inert();
        };

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();
        let spawned = thread::Builder::new()
            .name("shade-os-watch".to_string())
            .spawn(move || {
                let mut last = run_probe().unwrap_or(FALLBACK_DARK);
                loop {
                    thread::sleep(interval);
                    if stop_flag.load(Ordering::Relaxed) {
                        break;
                    }
                    let now = run_probe().unwrap_or(FALLBACK_DARK);
                    if now != last {
                        last = now;
                        listener();
                    }
                }
            });

        match spawned {
            Ok(_handle) => Subscription::on_drop(move || {
                stop.store(true, Ordering::Relaxed);
            }),
            Err(e) => {
                warn!("could not start scheme poller: {e}");
                Subscription::inert()
            }
        }
    }
}
