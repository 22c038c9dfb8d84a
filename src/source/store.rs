//! Persistence for an explicit color-mode choice.
//!
//! The persisted half of the preference source is a single slot holding
//! `"light"` or `"dark"`. Everything about it is best-effort: an unavailable
//! medium reads as absent and swallows writes. No operation here returns an
//! error to its caller — durability is the only thing that can be lost.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use parking_lot::Mutex;

use crate::mode::ColorMode;

/// Storage for the user's explicit color-mode choice.
///
/// Implementations must degrade rather than fail: a broken or missing medium
/// means [`read`](PreferenceStore::read) returns `None` and
/// [`write`](PreferenceStore::write) / [`clear`](PreferenceStore::clear)
/// silently drop the request.
pub trait PreferenceStore: Send + Sync {
    /// Reads the stored choice. `None` when nothing was stored, the medium is
    /// unavailable, or the stored value is not a valid mode.
    fn read(&self) -> Option<ColorMode>;

    /// Stores a choice, replacing any previous one. Best-effort.
    fn write(&self, mode: ColorMode);

    /// Removes the stored choice, if any. Best-effort.
    fn clear(&self);
}

/// File-backed store: one file whose entire content is `light` or `dark`.
///
/// # Example
///
/// ```rust
/// use appearance::{ColorMode, FileStore, PreferenceStore};
///
/// let dir = std::env::temp_dir().join("appearance-doc");
/// let store = FileStore::new(dir.join("color-mode"));
/// store.write(ColorMode::Dark);
/// assert_eq!(store.read(), Some(ColorMode::Dark));
/// store.clear();
/// assert_eq!(store.read(), None);
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    /// A store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Resolves a per-user slot under the platform config directory, e.g.
    /// `~/.config/<app>/color-mode` on Linux.
    ///
    /// When no config directory can be determined the store is still usable:
    /// it reads absent and drops writes.
    pub fn discover(app: &str) -> Self {
        let path = dirs::config_dir().map(|dir| dir.join(app).join("color-mode"));
        if path.is_none() {
            debug!("no user config directory; color-mode choice will not persist");
        }
        Self { path }
    }

    /// The backing path, if one could be resolved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl PreferenceStore for FileStore {
    fn read(&self) -> Option<ColorMode> {
        let path = self.path.as_ref()?;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                if err.kind() != io::ErrorKind::NotFound {
                    debug!("could not read {}: {}", path.display(), err);
                }
                return None;
            }
        };
        match content.trim().parse() {
            Ok(mode) => Some(mode),
            Err(err) => {
                debug!("ignoring stored value in {}: {}", path.display(), err);
                None
            }
        }
    }

    fn write(&self, mode: ColorMode) {
        let path = match &self.path {
            Some(path) => path,
            None => return,
        };
        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                warn!("dropping color-mode write, cannot create {}: {}", parent.display(), err);
                return;
            }
        }
        if let Err(err) = fs::write(path, mode.as_str()) {
            warn!("dropping color-mode write to {}: {}", path.display(), err);
        }
    }

    fn clear(&self) {
        let path = match &self.path {
            Some(path) => path,
            None => return,
        };
        if let Err(err) = fs::remove_file(path) {
            if err.kind() != io::ErrorKind::NotFound {
                warn!("could not clear color-mode slot {}: {}", path.display(), err);
            }
        }
    }
}

/// In-process store for hosts without a filesystem, and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<ColorMode>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a choice, as if from a previous run.
    pub fn with(mode: ColorMode) -> Self {
        Self {
            slot: Mutex::new(Some(mode)),
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self) -> Option<ColorMode> {
        *self.slot.lock()
    }

    fn write(&self, mode: ColorMode) {
        *self.slot.lock() = Some(mode);
    }

    fn clear(&self) {
        *self.slot.lock() = None;
    }
}
