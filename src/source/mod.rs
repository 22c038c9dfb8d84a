//! The two raw preference signals behind the theme manager.
//!
//! This module has no opinion on precedence; it only produces the inputs:
//!
//! - [`store`]: the persisted explicit choice (survives restarts)
//! - [`system`]: the OS color-scheme signal (changes at runtime)
//! - [`subscription`]: the disposer handle for change listeners
//!
//! The [`manager`](crate::manager) module reconciles the two.

pub mod store;
pub mod subscription;
pub mod system;

pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use subscription::Subscription;
pub use system::{
    current_system_mode, set_system_detector, ManualScheme, OsScheme, SchemeCallback, SystemScheme,
};
