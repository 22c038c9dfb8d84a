//! The operating system's live color-scheme signal.
//!
//! Two halves: a snapshot read ([`current_system_mode`]) and a change
//! subscription ([`SystemScheme::subscribe`]). The snapshot goes through a
//! swappable detector so tests can pin the "OS" to a known mode with
//! [`set_system_detector`]. [`OsScheme`] watches the real signal by polling
//! the detector on a background thread; [`ManualScheme`] is a deterministic
//! scheme driven entirely by its owner, for hosts with their own event source
//! and for tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dark_light::{detect as detect_os_scheme, Mode as OsMode};
use log::warn;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::mode::ColorMode;
use crate::source::subscription::Subscription;

/// Callback invoked with the new mode on every system-preference change.
pub type SchemeCallback = Box<dyn Fn(ColorMode) + Send + Sync>;

/// A source of the platform color-scheme signal.
///
/// `subscribe` registers a listener for changes and returns the cancellation
/// handle; the listener may be invoked from another thread.
pub trait SystemScheme: Send + Sync {
    /// The signal's value at the instant of the call.
    fn current(&self) -> ColorMode;

    /// Registers a change listener. Cancelling the returned handle stops
    /// further notifications.
    fn subscribe(&self, callback: SchemeCallback) -> Subscription;
}

type Detector = fn() -> ColorMode;

static DETECTOR: Lazy<Mutex<Detector>> = Lazy::new(|| Mutex::new(os_detector));

/// Overrides the detector behind [`current_system_mode`].
///
/// This is useful for testing or when you want to force a specific mode:
///
/// ```rust,ignore
/// appearance::set_system_detector(|| appearance::ColorMode::Dark);
/// ```
///
/// The override is process-wide and also feeds [`OsScheme`] watchers.
pub fn set_system_detector(detector: Detector) {
    *DETECTOR.lock() = detector;
}

/// Reads the OS color-scheme preference at the instant of the call.
///
/// Always returns a valid mode; platforms that cannot report a preference
/// read as [`ColorMode::Light`].
pub fn current_system_mode() -> ColorMode {
    let detector = *DETECTOR.lock();
    detector()
}

fn os_detector() -> ColorMode {
    match detect_os_scheme() {
        OsMode::Dark => ColorMode::Dark,
        OsMode::Light => ColorMode::Light,
    }
}

/// Watches the real OS signal by polling [`current_system_mode`].
///
/// Desktop platforms expose no portable change event, so each subscription
/// runs a sampling thread; a change is delivered once it survives a poll
/// boundary. The default interval is two seconds, plenty for a signal a human
/// flips from a settings panel.
#[derive(Debug, Clone)]
pub struct OsScheme {
    interval: Duration,
}

impl OsScheme {
    /// A scheme polling at the default two-second interval.
    pub fn new() -> Self {
        Self {
            interval: Duration::from_secs(2),
        }
    }

    /// A scheme polling at a custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for OsScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemScheme for OsScheme {
    fn current(&self) -> ColorMode {
        current_system_mode()
    }

    fn subscribe(&self, callback: SchemeCallback) -> Subscription {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let interval = self.interval;
        // Baseline taken before the thread starts, so a change racing the
        // subscription still gets delivered.
        let mut last = current_system_mode();

        let spawned = thread::Builder::new()
            .name("appearance-watch".to_string())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    thread::sleep(interval);
                    if flag.load(Ordering::Relaxed) {
                        break;
                    }
                    let now = current_system_mode();
                    if now != last {
                        last = now;
                        callback(now);
                    }
                }
            });

        match spawned {
            Ok(_) => Subscription::new(move || {
                stop.store(true, Ordering::Relaxed);
            }),
            Err(err) => {
                warn!("could not start color-scheme watcher: {}", err);
                Subscription::inert()
            }
        }
    }
}

/// A scheme whose signal its owner drives by hand.
///
/// Clones share the same signal and listener set, so a host can hand the
/// scheme to a [`ThemeManager`](crate::ThemeManager) and keep a clone for
/// feeding it events from its own platform integration.
///
/// # Example
///
/// ```rust
/// use appearance::{ColorMode, ManualScheme, SystemScheme};
///
/// let scheme = ManualScheme::new(ColorMode::Light);
/// assert_eq!(scheme.current(), ColorMode::Light);
///
/// scheme.emit(ColorMode::Dark);
/// assert_eq!(scheme.current(), ColorMode::Dark);
/// ```
#[derive(Clone, Default)]
pub struct ManualScheme {
    shared: Arc<ManualShared>,
}

struct ManualShared {
    current: Mutex<ColorMode>,
    listeners: Mutex<Vec<(u64, Arc<SchemeCallback>)>>,
    next_id: AtomicU64,
}

impl Default for ManualShared {
    fn default() -> Self {
        Self {
            current: Mutex::new(ColorMode::Light),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl ManualScheme {
    /// A scheme reporting `initial` until the first [`emit`](ManualScheme::emit).
    pub fn new(initial: ColorMode) -> Self {
        let scheme = Self::default();
        *scheme.shared.current.lock() = initial;
        scheme
    }

    /// Changes the signal and synchronously notifies every live subscriber.
    pub fn emit(&self, mode: ColorMode) {
        *self.shared.current.lock() = mode;
        // Snapshot the listener list so a callback may cancel its own
        // subscription without deadlocking.
        let listeners: Vec<Arc<SchemeCallback>> = self
            .shared
            .listeners
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in listeners {
            callback(mode);
        }
    }
}

impl SystemScheme for ManualScheme {
    fn current(&self) -> ColorMode {
        *self.shared.current.lock()
    }

    fn subscribe(&self, callback: SchemeCallback) -> Subscription {
        let id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.listeners.lock().push((id, Arc::new(callback)));

        let shared = Arc::clone(&self.shared);
        Subscription::new(move || {
            shared
                .listeners
                .lock()
                .retain(|(listener, _)| *listener != id);
        })
    }
}

impl std::fmt::Debug for ManualScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheme")
            .field("current", &self.current())
            .field("listeners", &self.shared.listeners.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::mpsc;

    #[test]
    #[serial]
    fn test_detector_override() {
        set_system_detector(|| ColorMode::Dark);
        assert_eq!(current_system_mode(), ColorMode::Dark);

        set_system_detector(|| ColorMode::Light);
        assert_eq!(current_system_mode(), ColorMode::Light);
    }

    #[test]
    #[serial]
    fn test_os_scheme_reads_detector() {
        set_system_detector(|| ColorMode::Dark);
        assert_eq!(OsScheme::new().current(), ColorMode::Dark);
        set_system_detector(|| ColorMode::Light);
    }

    #[test]
    #[serial]
    fn test_os_scheme_delivers_change() {
        set_system_detector(|| ColorMode::Light);
        let scheme = OsScheme::with_interval(Duration::from_millis(20));

        let (tx, rx) = mpsc::channel();
        let mut sub = scheme.subscribe(Box::new(move |mode| {
            let _ = tx.send(mode);
        }));

        set_system_detector(|| ColorMode::Dark);
        let delivered = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(delivered, ColorMode::Dark);

        sub.cancel();
        set_system_detector(|| ColorMode::Light);
    }

    #[test]
    fn test_manual_scheme_notifies_subscribers() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let (tx, rx) = mpsc::channel();
        let _sub = scheme.subscribe(Box::new(move |mode| {
            tx.send(mode).unwrap();
        }));

        scheme.emit(ColorMode::Dark);
        assert_eq!(rx.try_recv().unwrap(), ColorMode::Dark);
        assert_eq!(scheme.current(), ColorMode::Dark);
    }

    #[test]
    fn test_manual_scheme_cancel_stops_delivery() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let (tx, rx) = mpsc::channel();
        let mut sub = scheme.subscribe(Box::new(move |mode| {
            tx.send(mode).unwrap();
        }));

        sub.cancel();
        sub.cancel();
        scheme.emit(ColorMode::Dark);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_manual_scheme_clones_share_signal() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let handle = scheme.clone();

        handle.emit(ColorMode::Dark);
        assert_eq!(scheme.current(), ColorMode::Dark);
    }

    #[test]
    fn test_cancel_outlives_scheme() {
        let scheme = ManualScheme::new(ColorMode::Light);
        let mut sub = scheme.subscribe(Box::new(|_| {}));
        drop(scheme);
        sub.cancel();
    }
}
