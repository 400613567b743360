//! Scheme and preference value types.
//!
//! Two small enums carry all of the state this crate reasons about:
//!
//! - [`Scheme`]: a concrete, renderable color mode (`light` or `dark`).
//! - [`Preference`]: the user's stated intent — pin a concrete scheme, or
//!   defer to the platform (`system`).
//!
//! The effective scheme is always a total function of a preference and the
//! platform dark-mode signal; see [`Preference::resolve`]. There is no
//! "unresolved" state anywhere in the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a raw string is not a recognized scheme or
/// preference literal.
///
/// At the storage boundary this is mapped to "absent" and never surfaced;
/// it exists so `FromStr` callers outside the crate get a real error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color-scheme value: {0:?}")]
pub struct UnrecognizedValue(pub String);

/// A concrete, renderable color mode.
///
/// `Scheme` is what presentation layers consume. It is derived, never
/// persisted directly — the persisted entity is [`Preference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Light background, dark content.
    Light,
    /// Dark background, light content.
    Dark,
}

impl Scheme {
    /// Maps the platform dark-mode signal to a scheme.
    pub fn from_dark_signal(dark: bool) -> Self {
        if dark {
            Scheme::Dark
        } else {
            Scheme::Light
        }
    }

    /// Returns true for [`Scheme::Dark`].
    pub fn is_dark(self) -> bool {
        matches!(self, Scheme::Dark)
    }

    /// The canonical lowercase literal (`"light"` / `"dark"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Light => "light",
            Scheme::Dark => "dark",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Scheme::Light),
            "dark" => Ok(Scheme::Dark),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

/// The user's stated intent: a pinned scheme, or deferral to the platform.
///
/// This is the only persisted entity in the crate. It always has a value —
/// [`Preference::System`] is the default when nothing is stored or the
/// stored value is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Always render light, regardless of the platform.
    Light,
    /// Always render dark, regardless of the platform.
    Dark,
    /// Track the platform dark-mode signal.
    #[default]
    System,
}

impl Preference {
    /// Resolves the effective scheme from this preference and the platform
    /// dark-mode signal.
    ///
    /// Total: every `(Preference, bool)` pair yields a scheme.
    ///
    /// ```rust
    /// use shade::{Preference, Scheme};
    ///
    /// assert_eq!(Preference::Light.resolve(true), Scheme::Light);
    /// assert_eq!(Preference::System.resolve(true), Scheme::Dark);
    /// assert_eq!(Preference::System.resolve(false), Scheme::Light);
    /// ```
    pub fn resolve(self, system_dark: bool) -> Scheme {
        match self {
            Preference::Light => Scheme::Light,
            Preference::Dark => Scheme::Dark,
            Preference::System => Scheme::from_dark_signal(system_dark),
        }
    }

    /// Returns true when this preference defers to the platform.
    pub fn is_system(self) -> bool {
        matches!(self, Preference::System)
    }

    /// The canonical lowercase literal (`"light"` / `"dark"` / `"system"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Light => "light",
            Preference::Dark => "dark",
            Preference::System => "system",
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preference {
    type Err = UnrecognizedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Preference::Light),
            "dark" => Ok(Preference::Dark),
            "system" => Ok(Preference::System),
            other => Err(UnrecognizedValue(other.to_string())),
        }
    }
}

impl From<Scheme> for Preference {
    /// Pins a concrete scheme as the stated intent.
    fn from(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Light => Preference::Light,
            Scheme::Dark => Preference::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_pinned_ignores_signal() {
        assert_eq!(Preference::Light.resolve(false), Scheme::Light);
        assert_eq!(Preference::Light.resolve(true), Scheme::Light);
        assert_eq!(Preference::Dark.resolve(false), Scheme::Dark);
        assert_eq!(Preference::Dark.resolve(true), Scheme::Dark);
    }

    #[test]
    fn test_resolve_system_tracks_signal() {
        assert_eq!(Preference::System.resolve(false), Scheme::Light);
        assert_eq!(Preference::System.resolve(true), Scheme::Dark);
    }

    #[test]
    fn test_preference_default_is_system() {
        assert_eq!(Preference::default(), Preference::System);
    }

    #[test]
    fn test_from_str_exact_literals_only() {
        assert_eq!("light".parse::<Preference>().unwrap(), Preference::Light);
        assert_eq!("dark".parse::<Preference>().unwrap(), Preference::Dark);
        assert_eq!("system".parse::<Preference>().unwrap(), Preference::System);

        assert!("Light".parse::<Preference>().is_err());
        assert!("blue".parse::<Preference>().is_err());
        assert!("".parse::<Preference>().is_err());
        assert!("system".parse::<Scheme>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for p in [Preference::Light, Preference::Dark, Preference::System] {
            assert_eq!(p.to_string().parse::<Preference>().unwrap(), p);
        }
        for s in [Scheme::Light, Scheme::Dark] {
            assert_eq!(s.to_string().parse::<Scheme>().unwrap(), s);
        }
    }

    #[test]
    fn test_scheme_into_preference_pins() {
        assert_eq!(Preference::from(Scheme::Light), Preference::Light);
        assert_eq!(Preference::from(Scheme::Dark), Preference::Dark);
    }

    #[test]
    fn test_serde_lowercase_literals() {
        assert_eq!(serde_json::to_string(&Scheme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::to_string(&Preference::System).unwrap(),
            "\"system\""
        );
        let p: Preference = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(p, Preference::Light);
    }
}
