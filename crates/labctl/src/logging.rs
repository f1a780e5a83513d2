//! Logging setup
//!
//! The TUI owns the terminal, so interactive sessions log to a file found
//! through a fallback chain. One-shot runs log to stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Discover log file path with fallback chain
///
/// Priority:
/// 1. $LABCTL_LOG_FILE environment variable (explicit override)
/// 2. $XDG_STATE_HOME/labctl/labctl.log (XDG standard)
/// 3. ~/.local/state/labctl/labctl.log (XDG fallback)
pub fn discover_log_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("LABCTL_LOG_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg_state).join("labctl").join("labctl.log"));
    }

    dirs::home_dir().map(|home| home.join(".local/state/labctl/labctl.log"))
}

/// RUST_LOG wins over the configured level
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to the discovered file. Returns the path in use, or None when no
/// file could be opened and logging stays off.
pub fn init_file_logging(default_level: &str) -> Option<PathBuf> {
    let path = discover_log_path()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(path)
}

pub fn init_stderr_logging(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(std::io::stderr)
        .try_init();
}
