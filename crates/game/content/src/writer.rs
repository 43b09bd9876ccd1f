//! Encoders producing the packed record format.

use adventure_core::ConditionBlock;

use crate::index::IndexEntry;
use crate::loaders::LoadResult;
use crate::reader::ByteOrder;

/// Append-only counterpart of [`crate::reader::RecordReader`].
#[derive(Clone, Debug)]
pub struct RecordWriter {
    bytes: Vec<u8>,
    order: ByteOrder,
}

impl RecordWriter {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            bytes: Vec::new(),
            order,
        }
    }

    pub fn u8(&mut self, value: u8) -> &mut Self {
        self.bytes.push(value);
        self
    }

    pub fn u16(&mut self, value: u16) -> &mut Self {
        self.bytes.extend_from_slice(&self.order.write_u16(value));
        self
    }

    pub fn u32(&mut self, value: u32) -> &mut Self {
        self.bytes.extend_from_slice(&self.order.write_u32(value));
        self
    }

    pub fn flag(&mut self, value: bool) -> &mut Self {
        self.u8(u8::from(value))
    }

    pub fn bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Writes `text` into a NUL-padded field of `width` bytes. Characters
    /// outside one byte become `?`; text that does not fit is cut.
    pub fn fixed_str(&mut self, text: &str, width: usize) -> &mut Self {
        let start = self.bytes.len();
        self.bytes
            .extend(text.chars().take(width).map(|c| u8::try_from(c).unwrap_or(b'?')));
        self.bytes.resize(start + width, 0);
        self
    }

    /// Policy byte, count and the encoded conditions.
    pub fn condition_block(&mut self, block: &ConditionBlock) -> &mut Self {
        self.u8(block.policy.as_byte());
        self.u8(block.len() as u8);
        for condition in &block.conditions {
            self.bytes(&condition.encode());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builds an index file and its data file side by side.
#[derive(Clone, Debug)]
pub struct IndexedFileBuilder {
    index: Vec<u8>,
    data: Vec<u8>,
    order: ByteOrder,
}

impl IndexedFileBuilder {
    pub fn new(order: ByteOrder) -> Self {
        Self {
            index: Vec::new(),
            data: Vec::new(),
            order,
        }
    }

    /// Appends the next record; its id is implied by its position.
    pub fn push(&mut self, record: &[u8]) -> LoadResult<()> {
        let Ok(size) = u16::try_from(record.len()) else {
            anyhow::bail!("record of {} bytes does not fit an index entry", record.len());
        };
        let Ok(offset) = u32::try_from(self.data.len()) else {
            anyhow::bail!("data file grew past 4 GiB");
        };
        let entry = IndexEntry { size, offset };
        self.index.extend_from_slice(&entry.encode(self.order));
        self.data.extend_from_slice(record);
        Ok(())
    }

    /// Index bytes and data bytes.
    pub fn finish(self) -> (Vec<u8>, Vec<u8>) {
        (self.index, self.data)
    }
}
