use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

/// Per-key suppression window for noisy log sites, e.g. the gate's
/// cooldown-skip message firing on every visibility change.
#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: Option<u64>,
}

static WINDOWS: OnceLock<Mutex<HashMap<String, Window>>> = OnceLock::new();

/// Returns `Some(suppressed_count)` when a log for `key` should be emitted;
/// otherwise counts the event against the active window and returns `None`.
///
/// Windows are tracked per key, so callers that want independent windows
/// (e.g. one per gate instance) must put a discriminator in the key.
pub fn should_emit(key: &str, interval: Duration) -> Option<u64> {
    let windows = WINDOWS.get_or_init(|| Mutex::new(HashMap::new()));
    let mut windows = windows.lock().expect("log throttle mutex poisoned");
    let now = Instant::now();

    let window = windows.entry(key.to_string()).or_insert(Window {
        opened_at: now,
        suppressed: None,
    });
    match window.suppressed {
        // First sighting of this key.
        None => {
            window.suppressed = Some(0);
            Some(0)
        }
        Some(count) if now.duration_since(window.opened_at) >= interval => {
            window.opened_at = now;
            window.suppressed = Some(0);
            Some(count)
        }
        Some(count) => {
            window.suppressed = Some(count + 1);
            None
        }
    }
}
