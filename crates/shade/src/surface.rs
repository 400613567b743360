//! Presentation-surface synchronization.
//!
//! The resolver keeps one shared visual root in sync with the effective
//! scheme. The root carries three markers: a string attribute naming the
//! active scheme, a boolean "dark" marker, and a platform color-scheme
//! hint. This crate writes them; hosting UI layers read them back through
//! [`RootMarkers`] or supply their own [`PresentationSurface`].

use std::sync::{Arc, Mutex, MutexGuard};

use crate::Scheme;

/// A sink for the effective scheme.
///
/// `apply` is called at most once per scheme change; implementations may
/// assume consecutive calls carry distinct values but must stay harmless
/// if they do not.
pub trait PresentationSurface: Send + Sync {
    /// Applies the scheme to the surface.
    fn apply(&self, scheme: Scheme);
}

/// The in-tree surface: an in-memory shared root node.
///
/// Clones share the same root. The application counter exists so hosts and
/// tests can observe that re-applying an unchanged scheme produced no
/// additional side effect.
#[derive(Debug, Clone, Default)]
pub struct RootMarkers {
    inner: Arc<Mutex<Markers>>,
}

#[derive(Debug, Default)]
struct Markers {
    scheme_attr: Option<&'static str>,
    dark: bool,
    color_scheme_hint: Option<&'static str>,
    applications: u64,
}

impl RootMarkers {
    /// A root with no scheme applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The attribute naming the active scheme (`"light"` / `"dark"`), or
    /// `None` before the first application.
    pub fn scheme_attr(&self) -> Option<&'static str> {
        self.lock().scheme_attr
    }

    /// The boolean "dark" marker. `false` before the first application.
    pub fn is_dark(&self) -> bool {
        self.lock().dark
    }

    /// The platform color-scheme hint, or `None` before the first
    /// application.
    pub fn color_scheme_hint(&self) -> Option<&'static str> {
        self.lock().color_scheme_hint
    }

    /// How many times a scheme has been applied to this root.
    pub fn applications(&self) -> u64 {
        self.lock().applications
    }

    fn lock(&self) -> MutexGuard<'_, Markers> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PresentationSurface for RootMarkers {
    fn apply(&self, scheme: Scheme) {
        let mut markers = self.lock();
        markers.scheme_attr = Some(scheme.as_str());
        markers.dark = scheme.is_dark();
        markers.color_scheme_hint = Some(scheme.as_str());
        markers.applications += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_root_has_no_markers() {
        let root = RootMarkers::new();
        assert_eq!(root.scheme_attr(), None);
        assert!(!root.is_dark());
        assert_eq!(root.color_scheme_hint(), None);
        assert_eq!(root.applications(), 0);
    }

    #[test]
    fn test_apply_sets_all_three_markers() {
        let root = RootMarkers::new();
        root.apply(Scheme::Dark);
        assert_eq!(root.scheme_attr(), Some("dark"));
        assert!(root.is_dark());
        assert_eq!(root.color_scheme_hint(), Some("dark"));
        assert_eq!(root.applications(), 1);

        root.apply(Scheme::Light);
        assert_eq!(root.scheme_attr(), Some("light"));
        assert!(!root.is_dark());
        assert_eq!(root.color_scheme_hint(), Some("light"));
        assert_eq!(root.applications(), 2);
    }

    #[test]
    fn test_clones_share_the_root() {
        let root = RootMarkers::new();
        let clone = root.clone();
        clone.apply(Scheme::Dark);
        assert_eq!(root.scheme_attr(), Some("dark"));
    }
}
