//! Light/dark appearance state with OS synchronization and persisted
//! overrides.
//!
//! The crate owns one piece of application-wide state: which of the two
//! visual modes is active. Two signals feed it — a persisted explicit user
//! choice and the operating system's live color-scheme preference — and one
//! rule reconciles them: an explicit choice wins until it is cleared,
//! otherwise the state follows the system.
//!
//! This module provides:
//!
//! - [`ColorMode`]: the binary light/dark value
//! - [`ThemeManager`]: owns the resolved state, runs the init protocol,
//!   exposes the single mutation entry point
//! - [`PreferenceStore`] / [`FileStore`] / [`MemoryStore`]: the persisted
//!   choice
//! - [`SystemScheme`] / [`OsScheme`] / [`ManualScheme`]: the live OS signal
//! - [`Subscription`]: cancellation handle for change listeners
//! - [`Variants`] and [`Palette`]: static per-mode values for consumers
//!
//! Every failure mode degrades silently to a usable default: unavailable
//! storage reads as "no choice", an unreportable system preference reads as
//! light. Nothing in the public API returns an error.
//!
//! # Example
//!
//! ```rust
//! use appearance::{ColorMode, ManualScheme, MemoryStore, ThemeManager, Variants};
//!
//! let scheme = ManualScheme::new(ColorMode::Dark);
//! let manager = ThemeManager::builder()
//!     .store(MemoryStore::new())
//!     .scheme(scheme.clone())
//!     .mount();
//!
//! // Nothing persisted, so the manager follows the system signal.
//! assert_eq!(manager.mode(), ColorMode::Dark);
//!
//! // Consumers pick between static variants.
//! let tagline = Variants::new("bright and early", "after hours");
//! assert_eq!(*tagline.pick_with(&manager), "after hours");
//!
//! // An explicit choice takes precedence over later system changes.
//! manager.set_mode(ColorMode::Light);
//! scheme.emit(ColorMode::Dark);
//! assert_eq!(manager.mode(), ColorMode::Light);
//! ```
//!
//! In production the builder defaults to the real OS signal, and a
//! [`FileStore`] makes choices survive restarts:
//!
//! ```rust,no_run
//! use appearance::{FileStore, ThemeManager};
//!
//! let manager = ThemeManager::builder()
//!     .store(FileStore::discover("my-app"))
//!     .on_apply(|mode| eprintln!("appearance is now {}", mode))
//!     .mount();
//! ```

pub mod manager;
pub mod mode;
pub mod palette;
pub mod source;
pub mod variants;

pub use manager::{ThemeManager, ThemeManagerBuilder, ThemeState};
pub use mode::{ColorMode, ParseColorModeError};
pub use palette::Palette;
pub use source::store::{FileStore, MemoryStore, PreferenceStore};
pub use source::subscription::Subscription;
pub use source::system::{
    current_system_mode, set_system_detector, ManualScheme, OsScheme, SchemeCallback, SystemScheme,
};
pub use variants::Variants;
