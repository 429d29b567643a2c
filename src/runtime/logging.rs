use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Set up file logging when `DIRPLAY_LOG` holds a filter (e.g. `debug` or
/// `dirplay=trace`). Logs go to a file under the temp dir; stdout belongs
/// to the TUI.
pub fn init() {
    let Ok(filter) = std::env::var("DIRPLAY_LOG") else {
        return;
    };
    if filter.trim().is_empty() {
        return;
    }

    let path = std::env::temp_dir().join("dirplay.log");
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
