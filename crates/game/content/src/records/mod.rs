//! Record codecs for every packed data file.
//!
//! Decoders work on a record already read into memory and never touch the
//! filesystem; [`crate::DataFiles`] pairs them with the index lookups.

mod character;
mod equipment;
mod location;

pub use character::{decode_character, encode_character, record_offset};
pub use equipment::{decode_item, decode_weapon, encode_item, encode_weapon};
pub use location::{decode_location, encode_location};

use adventure_core::config::GameConfig;

use crate::reader::latin1;

/// Story text from a record. Text ends at the record end or the first NUL,
/// whichever comes first, and never exceeds the story buffer.
pub fn decode_story(bytes: &[u8]) -> String {
    let bounded = &bytes[..bytes.len().min(GameConfig::MAX_STORY_TEXT_SIZE)];
    latin1(bounded)
}

/// Story text as stored: one byte per character, no terminator.
pub fn encode_story(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_is_record_bounded() {
        assert_eq!(decode_story(b"The glade is quiet.\0junk"), "The glade is quiet.");
        assert_eq!(decode_story(b""), "");
        let long = vec![b'a'; GameConfig::MAX_STORY_TEXT_SIZE + 10];
        assert_eq!(decode_story(&long).len(), GameConfig::MAX_STORY_TEXT_SIZE);
    }

    #[test]
    fn story_encoding_is_one_byte_per_char() {
        assert_eq!(encode_story("Caf\u{e9}"), b"Caf\xe9");
        assert_eq!(encode_story("\u{2603}"), b"?");
        assert_eq!(decode_story(&encode_story("Caf\u{e9}")), "Caf\u{e9}");
    }
}
