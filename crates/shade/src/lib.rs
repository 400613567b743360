//! # Shade - Color-Scheme Preference Resolution
//!
//! `shade` resolves an effective color [`Scheme`] (`light` / `dark`) from a
//! persisted user [`Preference`] (`light` / `dark` / `system`) and the live
//! platform dark-mode signal, and keeps a shared presentation surface
//! synchronized. It is the theme-intent core for applications that let the
//! user pin a mode or defer to the OS.
//!
//! ## Core Concepts
//!
//! - [`Scheme`]: a concrete, renderable color mode
//! - [`Preference`]: the user's stated intent, the only persisted entity
//! - [`PreferenceStore`]: durable storage of exactly one preference value
//! - [`SystemSchemeWatcher`]: the platform dark-mode signal, with change
//!   delivery
//! - [`SchemeResolver`]: the single authority combining the two
//! - [`PresentationSurface`]: the visual root the resolver keeps in sync
//!
//! ## Quick Start
//!
//! ```rust
//! use shade::{ManualWatcher, MemoryStore, Preference, Scheme, SchemeResolver};
//!
//! let resolver = SchemeResolver::builder()
//!     .store(MemoryStore::new())
//!     .watcher(ManualWatcher::new(true)) // platform prefers dark
//!     .build();
//!
//! // Nothing stored yet: the preference defers to the platform.
//! assert_eq!(resolver.preference(), Preference::System);
//! assert_eq!(resolver.scheme(), Scheme::Dark);
//!
//! // Pinning persists; resetting removes the record and tracks the
//! // platform again.
//! resolver.set_preference(Preference::Light);
//! assert_eq!(resolver.scheme(), Scheme::Light);
//! resolver.reset_preference();
//! assert_eq!(resolver.scheme(), Scheme::Dark);
//! ```
//!
//! ## Failure Posture
//!
//! No operation in this crate returns an error or panics. Missing storage,
//! malformed records, and absent platform capabilities all degrade to the
//! documented defaults (`system` preference, light scheme); diagnostics go
//! through the `log` facade. A preference feature must never break its
//! hosting application.
//!
//! ## Multiple Instances
//!
//! Any number of resolvers may share one durable record (think: several
//! windows of the same app). Writes are last-write-wins; an instance that
//! learns of a foreign write passes it to
//! [`SchemeResolver::storage_changed`] and converges without echoing the
//! write back.

mod resolver;
mod scheme;
pub mod store;
mod surface;
pub mod watch;

pub use resolver::{SchemeResolver, SchemeResolverBuilder};
pub use scheme::{Preference, Scheme, UnrecognizedValue};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};
pub use surface::{PresentationSurface, RootMarkers};
pub use watch::{
    set_system_probe, Listener, ManualWatcher, OsWatcher, Subscription, SystemProbe,
    SystemSchemeWatcher, FALLBACK_DARK,
};
