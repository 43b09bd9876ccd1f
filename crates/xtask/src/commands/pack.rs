//! Pack a RON world into binary data files
//!
//! Reads `world.ron` together with the `adventure.toml` that sits beside it,
//! encodes every record and writes the index/data pairs plus the manifest
//! into the output directory.

use std::path::{Path, PathBuf};

use adventure_content::{
    ByteOrder, Manifest, ManifestLoader, PackedFile, WorldLoader, pack_world, write_pack,
};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use super::OrderArg;
use crate::dirs;

/// Pack a RON world into binary data files
#[derive(Parser, Debug)]
pub struct Pack {
    /// World description to pack
    #[arg(value_name = "WORLD")]
    pub world: PathBuf,

    /// Output directory (defaults to ADVENTURE_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Byte order to write, overriding the manifest
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

impl Pack {
    pub fn execute(self) -> Result<()> {
        let out = self.out.clone().unwrap_or_else(dirs::data_dir);
        let written = self.pack_into(&out)?;

        println!("{}", style("✓ World packed").green().bold());
        println!("  World:  {}", style(self.world.display()).dim());
        println!("  Output: {}", style(out.display()).cyan());
        for path in &written {
            let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            println!("    {:<24} {}", display_name(path), format_bytes(size));
        }
        Ok(())
    }

    /// Packs the world and writes the data files and manifest, returning the
    /// written paths.
    pub fn pack_into(&self, out: &Path) -> Result<Vec<PathBuf>> {
        let world = WorldLoader::load(&self.world)
            .with_context(|| format!("loading world {}", self.world.display()))?;
        let source_dir = self.world.parent().unwrap_or(Path::new("."));
        let mut manifest = ManifestLoader::load_from_dir(source_dir)?;
        if let Some(order) = self.order {
            manifest.byte_order = ByteOrder::from(order);
        }

        let mut files = pack_world(&world, &manifest.files, manifest.byte_order)
            .with_context(|| format!("packing {}", self.world.display()))?;
        files.push(manifest_file(&manifest)?);
        write_pack(out, &files)
    }
}

/// The manifest as written next to the data files.
fn manifest_file(manifest: &Manifest) -> Result<PackedFile> {
    let text = ManifestLoader::render(manifest)?;
    Ok(PackedFile {
        name: Manifest::FILE_NAME.to_string(),
        bytes: text.into_bytes(),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Format bytes into human-readable format
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
