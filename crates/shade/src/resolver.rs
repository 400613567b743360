//! Effective-scheme resolution and preference mutation.
//!
//! [`SchemeResolver`] is the single authority for the effective
//! [`Scheme`]. It reconciles the persisted [`Preference`] with the live
//! platform signal, persists every mutation, keeps the presentation
//! surface synchronized, and adopts changes written by other instances
//! sharing the same durable record.
//!
//! Every operation is synchronous, infallible, and totally ordered per
//! instance; underlying storage and platform failures are absorbed by the
//! store and watcher contracts.
//!
//! # Quick start
//!
//! ```rust
//! use shade::{ManualWatcher, MemoryStore, Preference, RootMarkers, Scheme, SchemeResolver};
//!
//! let root = RootMarkers::new();
//! let resolver = SchemeResolver::builder()
//!     .store(MemoryStore::new())
//!     .watcher(ManualWatcher::new(true)) // platform prefers dark
//!     .surface(root.clone())
//!     .build();
//!
//! assert_eq!(resolver.scheme(), Scheme::Dark);
//!
//! resolver.set_preference(Preference::Light);
//! assert_eq!(resolver.scheme(), Scheme::Light);
//! assert_eq!(root.scheme_attr(), Some("light"));
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::store::{MemoryStore, PreferenceStore};
use crate::surface::PresentationSurface;
use crate::watch::{OsWatcher, Subscription, SystemSchemeWatcher};
use crate::{Preference, Scheme};

/// Single authority for the effective scheme and for mutating the stated
/// preference. Construct with [`SchemeResolver::builder`].
///
/// The resolver is `Send + Sync` and intended to be shared as
/// `Arc<SchemeResolver>`; all interior locking is private.
pub struct SchemeResolver {
    store: Arc<dyn PreferenceStore>,
    watcher: Arc<dyn SystemSchemeWatcher>,
    surface: Option<Arc<dyn PresentationSurface>>,
    state: Mutex<State>,
}

struct State {
    preference: Preference,
    system_dark: bool,
    applied: Option<Scheme>,
}

/// Chaining builder for [`SchemeResolver`].
///
/// Every knob has a safe default, so `build` cannot fail: the store
/// defaults to a fresh [`MemoryStore`] (no durable storage), the watcher
/// to a probe-on-read [`OsWatcher`], the surface to none, and the initial
/// preference to [`Preference::System`].
pub struct SchemeResolverBuilder {
    store: Option<Arc<dyn PreferenceStore>>,
    watcher: Option<Arc<dyn SystemSchemeWatcher>>,
    surface: Option<Arc<dyn PresentationSurface>>,
    initial_preference: Preference,
}

impl SchemeResolverBuilder {
    /// Sets the durable preference store.
    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Sets the platform signal watcher.
    pub fn watcher(mut self, watcher: impl SystemSchemeWatcher + 'static) -> Self {
        self.watcher = Some(Arc::new(watcher));
        self
    }

    /// Sets the presentation surface to keep synchronized.
    pub fn surface(mut self, surface: impl PresentationSurface + 'static) -> Self {
        self.surface = Some(Arc::new(surface));
        self
    }

    /// Sets the preference assumed when the store has no readable record.
    /// Defaults to [`Preference::System`].
    pub fn initial_preference(mut self, preference: Preference) -> Self {
        self.initial_preference = preference;
        self
    }

    /// Builds the resolver, reading the store once, sampling the platform
    /// signal once, and applying the derived scheme to the surface.
    pub fn build(self) -> SchemeResolver {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn PreferenceStore>);
        let watcher = self
            .watcher
            .unwrap_or_else(|| Arc::new(OsWatcher::new()) as Arc<dyn SystemSchemeWatcher>);

        let preference = store.read().unwrap_or(self.initial_preference);
        let system_dark = watcher.current_value();

        let resolver = SchemeResolver {
            store,
            watcher,
            surface: self.surface,
            state: Mutex::new(State {
                preference,
                system_dark,
                applied: None,
            }),
        };
        resolver.apply_current();
        resolver
    }
}

impl SchemeResolver {
    /// Starts building a resolver.
    pub fn builder() -> SchemeResolverBuilder {
        SchemeResolverBuilder {
            store: None,
            watcher: None,
            surface: None,
            initial_preference: Preference::System,
        }
    }

    /// The current stated preference.
    pub fn preference(&self) -> Preference {
        self.lock().preference
    }

    /// The current effective scheme, derived from the preference and the
    /// cached platform signal.
    pub fn scheme(&self) -> Scheme {
        let state = self.lock();
        state.preference.resolve(state.system_dark)
    }

    /// Adopts `preference` as the stated intent, persists it, and applies
    /// the re-derived scheme to the surface.
    pub fn set_preference(&self, preference: Preference) {
        self.lock().preference = preference;
        self.store.write(preference);
        self.apply_current();
    }

    /// Pins a concrete scheme. Equivalent to
    /// `set_preference(scheme.into())`: this changes stated intent, not
    /// just presentation.
    pub fn set_scheme(&self, scheme: Scheme) {
        self.set_preference(scheme.into());
    }

    /// Reverts to tracking the platform. Equivalent to
    /// `set_preference(Preference::System)`; the durable record is
    /// removed.
    pub fn reset_preference(&self) {
        self.set_preference(Preference::System);
    }

    /// Re-reads the platform signal and applies any resulting scheme
    /// change. The preference is untouched.
    ///
    /// Called by the subscription wired up in [`watch`](Self::watch);
    /// hosts with their own event source may call it directly.
    pub fn system_changed(&self) {
        let now = self.watcher.current_value();
        self.lock().system_dark = now;
        self.apply_current();
    }

    /// Adopts a change another instance wrote to the shared record.
    ///
    /// `raw` is the new raw record content: `None` means the record was
    /// removed (stated intent `system`); a valid literal is adopted;
    /// anything else is ignored. Adoption never writes back to the store —
    /// a writer never notifies itself, and echoing would loop.
    pub fn storage_changed(&self, raw: Option<&str>) {
        let adopted = match raw {
            None => Preference::System,
            Some(raw) => match raw.parse() {
                Ok(preference) => preference,
                Err(_) => {
                    debug!("ignoring foreign preference record {raw:?}");
                    return;
                }
            },
        };
        self.lock().preference = adopted;
        self.apply_current();
    }

    /// Wires this resolver to its watcher's change delivery.
    ///
    /// Keep the returned [`Subscription`] alive for as long as the owning
    /// context; dropping it tears the link down. The subscription holds
    /// only a weak reference, so it never keeps the resolver alive.
    pub fn watch(self: &Arc<Self>) -> Subscription {
        let resolver = Arc::downgrade(self);
        self.watcher.subscribe(Box::new(move || {
            if let Some(resolver) = resolver.upgrade() {
                resolver.system_changed();
            }
        }))
    }

    /// Applies the derived scheme to the surface, once per change.
    fn apply_current(&self) {
        let (scheme, changed) = {
            let mut state = self.lock();
            let scheme = state.preference.resolve(state.system_dark);
            if state.applied == Some(scheme) {
                (scheme, false)
            } else {
                state.applied = Some(scheme);
                (scheme, true)
            }
        };
        // Surface runs outside the state lock.
        if changed {
            if let Some(surface) = &self.surface {
                surface.apply(scheme);
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
