//! Index files: one `{size:u16, offset:u32}` entry per record id.
//!
//! Map and catalog indexes start at id 1; the story index starts at id 0 so
//! the adventure title can live at text 0. Both layouts are part of the
//! packed format.

use crate::reader::{ByteOrder, RecordReader};

/// Bytes per index entry.
pub const ENTRY_SIZE: usize = 6;

/// Id of the first entry in an index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexBase {
    /// Entry `id` sits at `(id - 1) * 6`; id 0 has no entry.
    OneBased,
    /// Entry `id` sits at `id * 6`.
    ZeroBased,
}

impl IndexBase {
    /// Smallest id the index can hold.
    pub const fn first_id(self) -> u16 {
        match self {
            Self::OneBased => 1,
            Self::ZeroBased => 0,
        }
    }
}

/// Byte offset of the entry for `id`, or `None` when the index cannot hold it.
pub fn index_offset(base: IndexBase, id: u16) -> Option<u64> {
    let slot = match base {
        IndexBase::OneBased => id.checked_sub(1)?,
        IndexBase::ZeroBased => id,
    };
    Some(u64::from(slot) * ENTRY_SIZE as u64)
}

/// Location of one record in the data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexEntry {
    pub size: u16,
    pub offset: u32,
}

impl IndexEntry {
    pub fn decode(bytes: [u8; ENTRY_SIZE], order: ByteOrder) -> Self {
        let size = order.read_u16([bytes[0], bytes[1]]);
        let offset = order.read_u32([bytes[2], bytes[3], bytes[4], bytes[5]]);
        Self { size, offset }
    }

    pub fn encode(self, order: ByteOrder) -> [u8; ENTRY_SIZE] {
        let mut out = [0; ENTRY_SIZE];
        out[..2].copy_from_slice(&order.write_u16(self.size));
        out[2..].copy_from_slice(&order.write_u32(self.offset));
        out
    }

    /// End of the record in the data file.
    pub fn end(self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }
}

/// Every entry of an in-memory index, in id order.
pub fn entries(index: &[u8], order: ByteOrder) -> Vec<IndexEntry> {
    let mut reader = RecordReader::new(index, order);
    let mut out = Vec::with_capacity(index.len() / ENTRY_SIZE);
    while let Ok(bytes) = reader.array::<ENTRY_SIZE>() {
        out.push(IndexEntry::decode(bytes, order));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_and_story_indexes_are_offset_by_one() {
        assert_eq!(index_offset(IndexBase::OneBased, 1), Some(0));
        assert_eq!(index_offset(IndexBase::ZeroBased, 1), Some(6));
        assert_eq!(index_offset(IndexBase::ZeroBased, 0), Some(0));
        assert_eq!(index_offset(IndexBase::OneBased, 0), None);
        assert_eq!(index_offset(IndexBase::OneBased, 256), Some(1530));
    }

    #[test]
    fn entry_layout() {
        let entry = IndexEntry {
            size: 0x0102,
            offset: 0x0003_0405,
        };
        assert_eq!(hex::encode(entry.encode(ByteOrder::Big)), "010200030405");
        assert_eq!(hex::encode(entry.encode(ByteOrder::Little)), "020105040300");
        assert_eq!(
            IndexEntry::decode(entry.encode(ByteOrder::Little), ByteOrder::Little),
            entry
        );
        assert_eq!(entry.end(), 0x0003_0507);
    }

    #[test]
    fn partial_trailing_entry_is_ignored() {
        let bytes = hex::decode("000a00000000000400000000000a0000").expect("hex");
        let parsed = entries(&bytes, ByteOrder::Big);
        assert_eq!(
            parsed,
            [
                IndexEntry { size: 10, offset: 0 },
                IndexEntry { size: 4, offset: 0 }
            ]
        );
    }
}
