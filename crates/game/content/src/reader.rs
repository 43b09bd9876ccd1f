//! Sequential decoder for packed records.
//!
//! Data files are written for one target machine, so every multi-byte header
//! field is stored in that machine's byte order. Fields are read in host order
//! and swapped afterwards when the two differ. Condition payloads are not
//! touched here: their multi-byte values are always big-endian and are
//! assembled by the condition decoder.

use adventure_core::RawCondition;
use adventure_core::config::GameConfig;

use crate::error::DecodeError;

/// Byte order a set of data files was packed with.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ByteOrder {
    /// 68000-family targets.
    #[default]
    Big,
    Little,
}

impl ByteOrder {
    #[cfg(target_endian = "big")]
    pub const HOST: ByteOrder = ByteOrder::Big;
    #[cfg(target_endian = "little")]
    pub const HOST: ByteOrder = ByteOrder::Little;

    /// Whether values read in host order must be swapped.
    pub fn needs_swap(self) -> bool {
        self != Self::HOST
    }

    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        let value = u16::from_ne_bytes(bytes);
        if self.needs_swap() { swap16(value) } else { value }
    }

    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        let value = u32::from_ne_bytes(bytes);
        if self.needs_swap() { swap32(value) } else { value }
    }

    pub fn write_u16(self, value: u16) -> [u8; 2] {
        let value = if self.needs_swap() { swap16(value) } else { value };
        value.to_ne_bytes()
    }

    pub fn write_u32(self, value: u32) -> [u8; 4] {
        let value = if self.needs_swap() { swap32(value) } else { value };
        value.to_ne_bytes()
    }
}

pub const fn swap16(value: u16) -> u16 {
    (value >> 8) | (value << 8)
}

pub const fn swap32(value: u32) -> u32 {
    ((value & 0x0000_00ff) << 24)
        | ((value & 0x0000_ff00) << 8)
        | ((value & 0x00ff_0000) >> 8)
        | ((value & 0xff00_0000) >> 24)
}

/// Forward-only cursor over one record.
#[derive(Clone, Debug)]
pub struct RecordReader<'a> {
    bytes: &'a [u8],
    position: usize,
    order: ByteOrder,
}

impl<'a> RecordReader<'a> {
    pub fn new(bytes: &'a [u8], order: ByteOrder) -> Self {
        Self {
            bytes,
            position: 0,
            order,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    pub fn take(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < len {
            return Err(DecodeError::Truncated {
                needed: self.position + len,
                available: self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(slice)
    }

    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(self.order.read_u16(self.array()?))
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(self.order.read_u32(self.array()?))
    }

    pub fn flag(&mut self) -> Result<bool, DecodeError> {
        Ok(self.u8()? != 0)
    }

    /// NUL-padded text field of `width` bytes. Bytes map one to one onto
    /// characters; the first NUL ends the text.
    pub fn fixed_str(&mut self, width: usize) -> Result<String, DecodeError> {
        Ok(latin1(self.take(width)?))
    }

    /// Policy byte, count and that many raw conditions.
    ///
    /// The count is checked against the block capacity before any
    /// condition bytes are consumed.
    pub fn condition_block(
        &mut self,
        field: &'static str,
    ) -> Result<(u8, Vec<RawCondition>), DecodeError> {
        let policy = self.u8()?;
        let count = usize::from(self.u8()?);
        if count > GameConfig::MAX_REQUIREMENTS {
            return Err(DecodeError::Overflow {
                field,
                count,
                max: GameConfig::MAX_REQUIREMENTS,
            });
        }
        let mut conditions = Vec::with_capacity(count);
        for _ in 0..count {
            conditions.push(self.array::<{ GameConfig::COND_LENGTH }>()?);
        }
        Ok((policy, conditions))
    }
}

/// Decodes stored text up to the first NUL.
pub fn latin1(bytes: &[u8]) -> String {
    bytes
        .iter()
        .take_while(|&&byte| byte != 0)
        .map(|&byte| char::from(byte))
        .collect()
}
