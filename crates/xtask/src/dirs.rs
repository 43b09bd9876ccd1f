//! Platform-specific directory utilities
//!
//! Mirrors the lookups of the terminal client so both tools agree on where
//! data files and logs live.

use std::path::{Path, PathBuf};

/// Packed data directory.
///
/// `ADVENTURE_DATA_DIR` wins; otherwise `./data`.
pub fn data_dir() -> PathBuf {
    std::env::var_os("ADVENTURE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Get the platform-specific log directory of the client
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/adventure/logs`
/// - Linux: `~/.cache/adventure/logs` (or `$XDG_CACHE_HOME/adventure/logs`)
/// - Windows: `%LOCALAPPDATA%\adventure\logs`
/// - Fallback: `<temp>/adventure/logs`
///
/// `ADVENTURE_LOG_DIR` overrides all of these.
pub fn log_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("ADVENTURE_LOG_DIR") {
        return PathBuf::from(dir);
    }
    directories::ProjectDirs::from("", "", "adventure")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("adventure").join("logs"))
}

/// The client's log file inside `log_dir`.
pub fn log_file(log_dir: &Path) -> PathBuf {
    log_dir.join("adventure.log")
}
