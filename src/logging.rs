//! Session event log for the terminal binary.
//!
//! The TUI owns stdout, so game events (starts, commits, game over, adapter
//! commands) go to the file named by `SUMTEN_LOG_PATH`. Without it, logging is
//! a no-op.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static ENABLED: AtomicBool = AtomicBool::new(false);
static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Open (truncate) the event log at `path`.
pub fn init_log_file(path: &str) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    if let Ok(mut slot) = LOG_FILE.lock() {
        *slot = Some(file);
        ENABLED.store(true, Ordering::Relaxed);
    }
    Ok(())
}

/// Open the log named by `SUMTEN_LOG_PATH`, if set.
///
/// Returns the path that was opened.
pub fn init_from_env() -> std::io::Result<Option<String>> {
    let Some(path) = std::env::var("SUMTEN_LOG_PATH")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return Ok(None);
    };
    init_log_file(&path)?;
    Ok(Some(path))
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Append one timestamped line.
pub fn write_log(message: &str) {
    let ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    if let Ok(mut slot) = LOG_FILE.lock() {
        if let Some(file) = slot.as_mut() {
            let _ = writeln!(file, "{ms} {message}");
            let _ = file.flush();
        }
    }
}

/// Log a formatted event line when the event log is open.
#[macro_export]
macro_rules! event_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_enabled() {
            $crate::logging::write_log(&format!($($arg)*));
        }
    };
}
