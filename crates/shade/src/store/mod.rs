//! Durable preference storage.
//!
//! A [`PreferenceStore`] keeps exactly one value — the user's stated
//! [`Preference`] — under a fixed key in some durable surface. The contract
//! is deliberately forgiving:
//!
//! - `read` returns `None` for a missing record, a malformed record, *and*
//!   a storage failure. Absence is never an error.
//! - `write` never fails from the caller's view. Writing
//!   [`Preference::System`] removes the record, so absence and `system` are
//!   identical on the next read and the stored artifact stays minimal.
//!
//! Failures are reported through the `log` facade only; a preference store
//! must never break its hosting application.
//!
//! The record may be shared by any number of concurrent instances
//! (last-write-wins, no locking); see
//! [`SchemeResolver::storage_changed`](crate::SchemeResolver::storage_changed)
//! for how instances converge.

mod file;
mod memory;

pub use file::{FileStore, StoreError};
pub use memory::MemoryStore;

use crate::Preference;

/// Durable, string-keyed storage of exactly one preference value.
pub trait PreferenceStore: Send + Sync {
    /// Returns the stored preference, or `None` when the record is missing,
    /// malformed, or unreadable. Never panics, never surfaces an error.
    fn read(&self) -> Option<Preference>;

    /// Persists the preference. `System` removes the record; `Light` and
    /// `Dark` store their literal string. Failures are swallowed.
    fn write(&self, preference: Preference);
}
