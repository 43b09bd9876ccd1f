//! Inspect packed data files
//!
//! Dumps index entries or decodes single records from a data directory,
//! reading it the same way the client does.

use std::path::{Path, PathBuf};

use adventure_content::index::{ENTRY_SIZE, entries};
use adventure_content::{ByteOrder, DataFiles, IndexBase, IndexedPaths, ManifestLoader};
use adventure_core::CharacterSource;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use serde::Serialize;

use super::OrderArg;
use crate::dirs;

/// Dump an index or a decoded record from packed data files
#[derive(Parser, Debug)]
pub struct Inspect {
    /// Data directory (defaults to ADVENTURE_DATA_DIR or ./data)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Byte order to read with, overriding the manifest
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,

    #[command(subcommand)]
    pub target: Target,
}

#[derive(Subcommand, Debug)]
pub enum Target {
    /// List the entries of an index file
    Index {
        #[arg(value_enum)]
        file: IndexFile,

        /// Also print each record's bytes in hex
        #[arg(long)]
        hex: bool,
    },
    /// Decode a location record
    Location { id: u16 },
    /// Print a story text
    Story { id: u16 },
    /// Decode a monster record
    Monster { id: u8 },
    /// Decode an NPC record
    Npc { id: u8 },
    /// Decode a weapon record
    Weapon { id: u8 },
    /// Decode an item record
    Item { id: u8 },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum IndexFile {
    Map,
    Story,
    Weapons,
    Items,
}

impl IndexFile {
    fn base(self) -> IndexBase {
        match self {
            Self::Story => IndexBase::ZeroBased,
            Self::Map | Self::Weapons | Self::Items => IndexBase::OneBased,
        }
    }

    fn paths(self, files: &DataFiles) -> &IndexedPaths {
        let paths = files.paths();
        match self {
            Self::Map => &paths.map,
            Self::Story => &paths.story,
            Self::Weapons => &paths.weapons,
            Self::Items => &paths.items,
        }
    }
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let dir = self.dir.clone().unwrap_or_else(dirs::data_dir);
        let files = self.open(&dir)?;

        println!(
            "{} {} ({})",
            style("Data directory:").bold().cyan(),
            dir.display(),
            files.byte_order()
        );
        println!();

        match self.target {
            Target::Index { file, hex } => print_index(&files, file, hex),
            Target::Location { id } => print_record(&files.load_location(id)?),
            Target::Story { id } => {
                println!("{}", files.load_story(id)?);
                Ok(())
            }
            Target::Monster { id } => {
                print_record(&*files.load_character(CharacterSource::Monster, id)?)
            }
            Target::Npc { id } => print_record(&*files.load_character(CharacterSource::Npc, id)?),
            Target::Weapon { id } => print_record(&*files.load_weapon(id)?),
            Target::Item { id } => print_record(&*files.load_item(id)?),
        }
    }

    fn open(&self, dir: &Path) -> Result<DataFiles> {
        let mut manifest = ManifestLoader::load_from_dir(dir)?;
        if let Some(order) = self.order {
            manifest.byte_order = ByteOrder::from(order);
        }
        Ok(DataFiles::open(dir, &manifest))
    }
}

/// One row of an index listing.
#[derive(Debug, PartialEq, Eq)]
struct IndexRow {
    id: u16,
    offset: u32,
    size: u16,
    bytes: Option<Vec<u8>>,
}

fn index_rows(files: &DataFiles, file: IndexFile, with_bytes: bool) -> Result<Vec<IndexRow>> {
    let paths = file.paths(files);
    let index = std::fs::read(&paths.index)
        .with_context(|| format!("reading {}", paths.index.display()))?;
    let data = if with_bytes {
        std::fs::read(&paths.data).with_context(|| format!("reading {}", paths.data.display()))?
    } else {
        Vec::new()
    };

    if index.len() % ENTRY_SIZE != 0 {
        println!(
            "{}",
            style(format!(
                "warning: {} bytes of trailing index data ignored",
                index.len() % ENTRY_SIZE
            ))
            .yellow()
        );
    }

    let rows = entries(&index, files.byte_order())
        .into_iter()
        .zip(file.base().first_id()..)
        .map(|(entry, id)| {
            let bytes = with_bytes.then(|| {
                let start = entry.offset as usize;
                let end = (entry.end() as usize).min(data.len());
                data.get(start..end).map(<[u8]>::to_vec).unwrap_or_default()
            });
            IndexRow {
                id,
                offset: entry.offset,
                size: entry.size,
                bytes,
            }
        })
        .collect();
    Ok(rows)
}

fn print_index(files: &DataFiles, file: IndexFile, hex: bool) -> Result<()> {
    let rows = index_rows(files, file, hex)?;
    println!("{}", style(format!("=== {file:?} index ===")).bold().green());
    println!("{:>6} {:>10} {:>6}", "id", "offset", "size");
    for row in &rows {
        let line = format!("{:>6} {:>10} {:>6}", row.id, row.offset, row.size);
        if row.size == 0 {
            println!("{}", style(line).dim());
        } else {
            println!("{line}");
        }
        if let Some(bytes) = &row.bytes {
            for chunk in bytes.chunks(32) {
                println!("       {}", style(hex::encode(chunk)).dim());
            }
        }
    }
    println!();
    println!("{} entries", rows.len());
    Ok(())
}

fn print_record<T: Serialize>(record: &T) -> Result<()> {
    let text = ron::ser::to_string_pretty(record, ron::ser::PrettyConfig::default())
        .context("formatting record")?;
    println!("{text}");
    Ok(())
}
