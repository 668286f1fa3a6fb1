// Shared state and constants for the automation loop

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::commands::types::AutomationConfig;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

// Lobby create / search-start attempts are rate limited to one per window
pub const QUEUE_ACTION_INTERVAL: Duration = Duration::from_secs(5);

// The client rejects rune page names longer than this
pub const MAX_RUNE_PAGE_NAME_LEN: usize = 16;

/// Level-triggered run flag; the loop exits at the top of the next tick once
/// this is cleared.
pub static AUTOMATION_RUNNING: AtomicBool = AtomicBool::new(false);

/// Guards against spawning a second loop thread while one is alive.
pub static LOOP_THREAD_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Applied-once gate for the FINALIZATION phase. Reset whenever the session
/// is in any other phase and on config replacement.
pub static RUNES_APPLIED: AtomicBool = AtomicBool::new(false);

/// Active configuration; replaced wholesale, never mutated in place.
pub static CURRENT_CONFIG: Lazy<Mutex<Option<Arc<AutomationConfig>>>> =
  Lazy::new(|| Mutex::new(None));

/// Last (action id, champion id) ban skip that was announced, so a held
/// teammate intent logs once instead of every tick.
pub static LAST_BAN_SKIP: Lazy<Mutex<Option<(i64, i64)>>> = Lazy::new(|| Mutex::new(None));

/// Serializes start/stop so flag flips and thread spawning stay consistent.
pub static AUTOMATION_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub fn current_config() -> Option<Arc<AutomationConfig>> {
  CURRENT_CONFIG.lock().ok().and_then(|guard| guard.clone())
}

pub fn replace_config(config: AutomationConfig) {
  if let Ok(mut guard) = CURRENT_CONFIG.lock() {
    *guard = Some(Arc::new(config));
  }
  // A new config may carry different pages; allow one fresh application.
  RUNES_APPLIED.store(false, Ordering::SeqCst);
}

pub fn last_ban_skip() -> Option<(i64, i64)> {
  LAST_BAN_SKIP.lock().ok().and_then(|guard| *guard)
}

pub fn set_last_ban_skip(value: Option<(i64, i64)>) {
  if let Ok(mut guard) = LAST_BAN_SKIP.lock() {
    *guard = value;
  }
}
