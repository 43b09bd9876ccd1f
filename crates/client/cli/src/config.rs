//! Runtime configuration read from the environment.
//!
//! `.env` is loaded by `main` before [`CliConfig::from_env`] runs, so values
//! there behave exactly like exported variables.

use std::path::PathBuf;

use adventure_core::LocationId;
use directories::ProjectDirs;

pub const DATA_DIR_VAR: &str = "ADVENTURE_DATA_DIR";
pub const START_LOCATION_VAR: &str = "ADVENTURE_START_LOCATION";
pub const LOG_VAR: &str = "ADVENTURE_LOG";
pub const LOG_DIR_VAR: &str = "ADVENTURE_LOG_DIR";

const DEFAULT_LOG_FILTER: &str = "info";
const LOCAL_DATA_DIR: &str = "data";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding `adventure.toml` and the packed data files.
    pub data_dir: PathBuf,
    /// Overrides the manifest's start location.
    pub start_location: Option<LocationId>,
    pub log_filter: String,
    pub log_dir: PathBuf,
}

impl CliConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dirs = project_dirs();
        let data_dir = lookup(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_data_dir(dirs.as_ref()));

        let start_location = lookup(START_LOCATION_VAR).and_then(|raw| {
            match raw.trim().parse::<LocationId>() {
                Ok(0) | Err(_) => {
                    tracing::warn!(value = %raw, "ignoring invalid {START_LOCATION_VAR}");
                    None
                }
                Ok(id) => Some(id),
            }
        });

        let log_filter = lookup(LOG_VAR)
            .or_else(|| lookup("RUST_LOG"))
            .filter(|filter| !filter.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let log_dir = lookup(LOG_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs.as_ref().map(|d| d.cache_dir().join("logs")))
            .unwrap_or_else(|| std::env::temp_dir().join("adventure").join("logs"));

        Self {
            data_dir,
            start_location,
            log_filter,
            log_dir,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "adventure")
}

/// `./data` when present, then the per-user data directory.
fn default_data_dir(dirs: Option<&ProjectDirs>) -> PathBuf {
    let local = PathBuf::from(LOCAL_DATA_DIR);
    if local.is_dir() {
        return local;
    }
    dirs.map(|d| d.data_dir().to_path_buf()).unwrap_or(local)
}
