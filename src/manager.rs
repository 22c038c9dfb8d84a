//! The theme manager: owns the resolved appearance state.
//!
//! One manager exists per application. It runs the initialization protocol
//! once at [`mount`](ThemeManagerBuilder::mount), keeps the state in sync
//! with the system signal while no explicit override is set, and funnels
//! every mutation through [`set_mode`](ThemeManager::set_mode) /
//! [`clear_override`](ThemeManager::clear_override). Nothing here returns an
//! error: unavailable storage and an unreadable system signal both degrade
//! to documented fallbacks.

use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;

use crate::mode::ColorMode;
use crate::source::store::{MemoryStore, PreferenceStore};
use crate::source::subscription::Subscription;
use crate::source::system::{OsScheme, SystemScheme};

/// Snapshot of the resolved appearance state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    /// The currently resolved and applied mode.
    pub mode: ColorMode,
    /// True once the user made a manual choice. While false, `mode` tracks
    /// the system signal; while true, `mode` is frozen to the choice.
    pub explicit: bool,
}

type ApplyHook = Box<dyn Fn(ColorMode) + Send + Sync>;

struct Inner {
    state: Mutex<ThemeState>,
    store: Box<dyn PreferenceStore>,
    apply: Option<ApplyHook>,
}

impl Inner {
    fn apply(&self, mode: ColorMode) {
        if let Some(hook) = &self.apply {
            hook(mode);
        }
    }

    /// Reaction to a system-preference change notification.
    fn reconcile(&self, system: ColorMode) {
        let mut state = self.state.lock();
        if state.explicit {
            debug!("system scheme changed to {}, keeping explicit override", system);
            return;
        }
        state.mode = system;
        drop(state);
        debug!("following system scheme change to {}", system);
        self.apply(system);
    }
}

/// Configures and mounts a [`ThemeManager`].
///
/// Defaults: an in-process [`MemoryStore`] (nothing persists) and the real
/// [`OsScheme`]. An application that wants choices to survive restarts passes
/// a [`FileStore`](crate::FileStore).
pub struct ThemeManagerBuilder {
    store: Box<dyn PreferenceStore>,
    scheme: Box<dyn SystemScheme>,
    apply: Option<ApplyHook>,
}

impl ThemeManagerBuilder {
    fn new() -> Self {
        Self {
            store: Box::new(MemoryStore::new()),
            scheme: Box::new(OsScheme::new()),
            apply: None,
        }
    }

    /// Where explicit choices persist.
    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Where the system signal comes from.
    pub fn scheme(mut self, scheme: impl SystemScheme + 'static) -> Self {
        self.scheme = Box::new(scheme);
        self
    }

    /// Side-effect hook run with the resolved mode after initialization and
    /// after every accepted change — the place to flip whatever marker the
    /// host's styling keys off. May be called from the watcher thread.
    pub fn on_apply(mut self, hook: impl Fn(ColorMode) + Send + Sync + 'static) -> Self {
        self.apply = Some(Box::new(hook));
        self
    }

    /// Runs the initialization protocol and starts watching the system
    /// signal:
    ///
    /// 1. read the persisted choice; a valid one wins (`explicit = true`),
    /// 2. otherwise take the current system mode (`explicit = false`),
    /// 3. apply the resolved mode through the hook,
    /// 4. subscribe to system changes for the manager's lifetime.
    pub fn mount(self) -> ThemeManager {
        let initial = match self.store.read() {
            Some(mode) => ThemeState {
                mode,
                explicit: true,
            },
            None => ThemeState {
                mode: self.scheme.current(),
                explicit: false,
            },
        };
        debug!(
            "mounted with mode {} ({})",
            initial.mode,
            if initial.explicit { "persisted choice" } else { "system" }
        );

        let inner = Arc::new(Inner {
            state: Mutex::new(initial),
            store: self.store,
            apply: self.apply,
        });
        inner.apply(initial.mode);

        let watcher = Arc::clone(&inner);
        let system_sub = self
            .scheme
            .subscribe(Box::new(move |mode| watcher.reconcile(mode)));

        ThemeManager {
            inner,
            scheme: self.scheme,
            system_sub,
        }
    }
}

/// Owns the light/dark appearance state for the whole application.
///
/// Reconciles a persisted explicit choice with the live system signal: the
/// choice wins until cleared, otherwise the state follows the system. All
/// reads are cheap snapshots; all mutations are synchronous with best-effort
/// persistence.
///
/// # Example
///
/// ```rust
/// use appearance::{ColorMode, ManualScheme, MemoryStore, ThemeManager};
///
/// let scheme = ManualScheme::new(ColorMode::Dark);
/// let manager = ThemeManager::builder()
///     .store(MemoryStore::new())
///     .scheme(scheme.clone())
///     .mount();
///
/// // No stored choice, so the manager follows the system.
/// assert_eq!(manager.mode(), ColorMode::Dark);
/// assert!(!manager.state().explicit);
///
/// // A manual choice freezes the mode.
/// manager.set_mode(ColorMode::Light);
/// scheme.emit(ColorMode::Dark);
/// assert_eq!(manager.mode(), ColorMode::Light);
/// ```
pub struct ThemeManager {
    inner: Arc<Inner>,
    scheme: Box<dyn SystemScheme>,
    system_sub: Subscription,
}

impl ThemeManager {
    /// Starts configuring a manager.
    pub fn builder() -> ThemeManagerBuilder {
        ThemeManagerBuilder::new()
    }

    /// Mounts with the defaults: no persistence, real OS signal.
    pub fn mount() -> Self {
        Self::builder().mount()
    }

    /// Snapshot of the current state. Never blocks.
    pub fn state(&self) -> ThemeState {
        *self.inner.state.lock()
    }

    /// The currently resolved mode.
    pub fn mode(&self) -> ColorMode {
        self.state().mode
    }

    /// True while a manual choice overrides the system signal.
    pub fn is_explicit(&self) -> bool {
        self.state().explicit
    }

    /// Makes a manual choice: sets the mode, marks it explicit, persists it
    /// best-effort, and re-applies the side effect.
    ///
    /// Choosing the mode that is already current still marks it explicit and
    /// persists it — that is how a user locks in the value that happens to
    /// match the system today.
    pub fn set_mode(&self, mode: ColorMode) {
        {
            let mut state = self.inner.state.lock();
            state.mode = mode;
            state.explicit = true;
        }
        self.inner.store.write(mode);
        self.inner.apply(mode);
    }

    /// Flips to the opposite mode as a manual choice.
    pub fn toggle(&self) {
        self.set_mode(self.mode().toggled());
    }

    /// Drops the manual choice: clears the persisted slot, falls back to the
    /// current system mode, and re-applies the side effect. The manager
    /// resumes following the system signal.
    pub fn clear_override(&self) {
        self.inner.store.clear();
        let system = self.scheme.current();
        {
            let mut state = self.inner.state.lock();
            state.mode = system;
            state.explicit = false;
        }
        self.inner.apply(system);
    }

    /// Explicit teardown: cancels the system subscription and drops the
    /// manager. Dropping without calling this cancels too; the method exists
    /// so hosts can order teardown deliberately.
    pub fn unmount(mut self) {
        self.system_sub.cancel();
    }
}

impl std::fmt::Debug for ThemeManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeManager")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::system::ManualScheme;

    fn mounted(store: MemoryStore, scheme: &ManualScheme) -> ThemeManager {
        ThemeManager::builder()
            .store(store)
            .scheme(scheme.clone())
            .mount()
    }

    #[test]
    fn test_init_prefers_persisted_choice() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::with(ColorMode::Dark), &scheme);

        assert_eq!(
            manager.state(),
            ThemeState {
                mode: ColorMode::Dark,
                explicit: true
            }
        );
    }

    #[test]
    fn test_init_falls_back_to_system() {
        let scheme = ManualScheme::new(ColorMode::Dark);
        let manager = mounted(MemoryStore::new(), &scheme);

        assert_eq!(
            manager.state(),
            ThemeState {
                mode: ColorMode::Dark,
                explicit: false
            }
        );
    }

    #[test]
    fn test_implicit_state_follows_system() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::new(), &scheme);

        scheme.emit(ColorMode::Dark);
        assert_eq!(manager.mode(), ColorMode::Dark);
        scheme.emit(ColorMode::Light);
        assert_eq!(manager.mode(), ColorMode::Light);
        assert!(!manager.is_explicit());
    }

    #[test]
    fn test_explicit_choice_ignores_system() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::new(), &scheme);

        manager.set_mode(ColorMode::Light);
        scheme.emit(ColorMode::Dark);
        assert_eq!(
            manager.state(),
            ThemeState {
                mode: ColorMode::Light,
                explicit: true
            }
        );
    }

    #[test]
    fn test_set_mode_is_explicit_even_when_matching() {
        let scheme = ManualScheme::new(ColorMode::Dark);
        let store = MemoryStore::new();
        let manager = ThemeManager::builder()
            .store(store)
            .scheme(scheme.clone())
            .mount();

        // Locking in the value that already matches the system.
        manager.set_mode(ColorMode::Dark);
        assert!(manager.is_explicit());

        scheme.emit(ColorMode::Light);
        assert_eq!(manager.mode(), ColorMode::Dark);
    }

    #[test]
    fn test_toggle_marks_explicit() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::new(), &scheme);

        manager.toggle();
        assert_eq!(
            manager.state(),
            ThemeState {
                mode: ColorMode::Dark,
                explicit: true
            }
        );
    }

    #[test]
    fn test_clear_override_resumes_following() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::new(), &scheme);

        manager.set_mode(ColorMode::Dark);
        scheme.emit(ColorMode::Light);
        assert_eq!(manager.mode(), ColorMode::Dark);

        manager.clear_override();
        assert_eq!(
            manager.state(),
            ThemeState {
                mode: ColorMode::Light,
                explicit: false
            }
        );

        scheme.emit(ColorMode::Dark);
        assert_eq!(manager.mode(), ColorMode::Dark);
    }

    #[test]
    fn test_unmount_cancels_subscription() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let manager = mounted(MemoryStore::new(), &scheme);

        manager.unmount();
        // No subscriber left; emitting must not panic.
        scheme.emit(ColorMode::Dark);
    }
}
