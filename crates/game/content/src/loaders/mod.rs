//! Authoring loaders for reading adventure descriptions from text files.
//!
//! Worlds are written in RON and packed into binary data files by the
//! `xtask pack` command; each data directory carries a TOML manifest naming
//! its files and the starting party.

pub mod manifest;
pub mod world;

pub use manifest::{FileNames, Manifest, ManifestLoader, MemberSpec};
pub use world::{StoryEntry, World, WorldLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
