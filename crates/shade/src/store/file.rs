//! File-backed preference storage.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use super::PreferenceStore;
use crate::Preference;

/// Filesystem failure underneath a [`FileStore`].
///
/// Absorbed by the [`PreferenceStore`] impl and logged; exposed so the
/// fallible helpers stay diagnosable.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record file exists but could not be read.
    #[error("failed to read preference file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record file or its parent directory could not be written.
    #[error("failed to write preference file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The record file could not be removed.
    #[error("failed to remove preference file {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A [`PreferenceStore`] holding one literal string in one file.
///
/// The default location is `preference` inside the `shade` config
/// directory (`$XDG_CONFIG_HOME/shade`, falling back to
/// `$HOME/.config/shade`). Any path can be supplied instead.
///
/// ```rust,no_run
/// use shade::{FileStore, Preference, PreferenceStore};
///
/// let store = FileStore::in_config_dir();
/// store.write(Preference::Dark);
/// assert_eq!(store.read(), Some(Preference::Dark));
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default config-directory location.
    pub fn in_config_dir() -> Self {
        Self::new(default_path())
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    fn save(&self, value: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }
        fs::write(&self.path, value).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Remove {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl PreferenceStore for FileStore {
    fn read(&self) -> Option<Preference> {
        let raw = match self.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("{e}");
                return None;
            }
        };
        // Editors and shells append newlines; the literal itself must match
        // exactly after trimming.
        match raw.trim().parse() {
            Ok(preference) => Some(preference),
            Err(_) => {
                debug!(
                    "ignoring malformed preference {:?} in {}",
                    raw.trim(),
                    self.path.display()
                );
                None
            }
        }
    }

    fn write(&self, preference: Preference) {
        let outcome = match preference {
            Preference::System => self.clear(),
            pinned => self.save(pinned.as_str()),
        };
        if let Err(e) = outcome {
            warn!("{e}");
        }
    }
}

/// Resolves the default record path: `<config dir>/shade/preference`.
///
/// Prefers `$XDG_CONFIG_HOME` when set and non-empty, then
/// `$HOME/.config`, then the current directory. Nothing is created here;
/// the directory appears on first write.
pub fn default_path() -> PathBuf {
    config_base_dir().join("shade").join("preference")
}

fn config_base_dir() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        if !xdg.trim().is_empty() {
            return PathBuf::from(xdg);
        }
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("preference"));
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("preference"));

        store.write(Preference::Light);
        assert_eq!(store.read(), Some(Preference::Light));
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "light",
            "record holds the bare literal"
        );

        store.write(Preference::Dark);
        assert_eq!(store.read(), Some(Preference::Dark));
    }

    #[test]
    fn test_write_system_removes_record() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("preference"));

        store.write(Preference::Dark);
        assert!(store.path().exists());

        store.write(Preference::System);
        assert!(!store.path().exists());
        assert_eq!(store.read(), None);

        // Removing an already-absent record is a no-op.
        store.write(Preference::System);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("preference"));

        for raw in ["blue", "", "Dark", "light dark"] {
            fs::write(store.path(), raw).unwrap();
            assert_eq!(store.read(), None, "raw {raw:?} should read as absent");
        }
    }

    #[test]
    fn test_trailing_newline_is_tolerated() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("preference"));

        fs::write(store.path(), "dark\n").unwrap();
        assert_eq!(store.read(), Some(Preference::Dark));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("preference"));

        store.write(Preference::Light);
        assert_eq!(store.read(), Some(Preference::Light));
    }

    #[test]
    fn test_unreadable_path_is_absent_not_panic() {
        let dir = TempDir::new().unwrap();
        // The path is a directory, so read_to_string fails with a
        // non-NotFound error and write fails as well.
        let store = FileStore::new(dir.path());
        assert_eq!(store.read(), None);
        store.write(Preference::Dark);
        assert_eq!(store.read(), None);
    }

    #[test]
    #[serial]
    fn test_default_path_prefers_xdg_config_home() {
        let orig_xdg = env::var_os("XDG_CONFIG_HOME");
        let orig_home = env::var_os("HOME");

        env::set_var("XDG_CONFIG_HOME", "/tmp/xdg-config");
        env::set_var("HOME", "/tmp/home");
        assert_eq!(
            default_path(),
            PathBuf::from("/tmp/xdg-config/shade/preference")
        );

        env::remove_var("XDG_CONFIG_HOME");
        assert_eq!(
            default_path(),
            PathBuf::from("/tmp/home/.config/shade/preference")
        );

        // Empty XDG value counts as unset.
        env::set_var("XDG_CONFIG_HOME", "  ");
        assert_eq!(
            default_path(),
            PathBuf::from("/tmp/home/.config/shade/preference")
        );

        match orig_xdg {
            Some(v) => env::set_var("XDG_CONFIG_HOME", v),
            None => env::remove_var("XDG_CONFIG_HOME"),
        }
        match orig_home {
            Some(v) => env::set_var("HOME", v),
            None => env::remove_var("HOME"),
        }
    }
}
