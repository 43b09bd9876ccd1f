//! Adventure data files: the packed binary format and its authoring sources.
//!
//! This crate reads and writes the on-disk form of an adventure:
//! - Index + data file pairs for locations, story text, weapons and items
//! - Fixed-record files for monsters and NPCs
//! - RON world descriptions packed into those files
//! - The TOML manifest naming the files and the starting party
//!
//! [`DataFiles`] implements the `adventure-core` oracle traits on top of the
//! packed files so the engine never touches the filesystem itself.

pub mod error;
pub mod files;
pub mod index;
pub mod loaders;
pub mod pack;
pub mod reader;
pub mod records;
pub mod writer;

pub use error::{DataError, DataKind, DecodeError};
pub use files::{DataFiles, DataPaths, IndexedPaths};
pub use index::{IndexBase, IndexEntry, index_offset};
pub use loaders::{
    FileNames, LoadResult, Manifest, ManifestLoader, MemberSpec, StoryEntry, World, WorldLoader,
};
pub use pack::{PackedFile, pack_world, write_pack};
pub use reader::{ByteOrder, RecordReader, swap16, swap32};
pub use writer::{IndexedFileBuilder, RecordWriter};
