//! Utility functions for offsets, content hashing and static patterns.

use regex::Regex;
use sha2::{Digest, Sha256};

/// Compile a pattern literal that is part of the source.
///
/// Only for `static` patterns; runtime-supplied patterns go through
/// `Regex::new` and report their error.
#[must_use]
#[expect(
    clippy::expect_used,
    reason = "Pattern literals are fixed at compile time and covered by tests"
)]
pub fn static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// Convert a byte offset from a regex match into a character offset.
///
/// Offsets past the end of `text` count every character.
#[must_use]
pub fn char_offset(text: &str, byte_idx: usize) -> usize {
    text.char_indices()
        .take_while(|(idx, _)| *idx < byte_idx)
        .count()
}

/// Character offsets for a run of increasing byte offsets into one text.
///
/// Each lookup continues counting from the previous one, so converting every
/// match of a scan costs one pass over the text. A lookup behind the last
/// one starts again from the beginning.
#[derive(Debug, Clone)]
pub struct CharOffsets<'t> {
    text: &'t str,
    byte: usize,
    chars: usize,
}

impl<'t> CharOffsets<'t> {
    #[must_use]
    pub const fn new(text: &'t str) -> Self {
        Self {
            text,
            byte: 0,
            chars: 0,
        }
    }

    /// Same result as [`char_offset`] for `byte_idx`.
    pub fn at(&mut self, byte_idx: usize) -> usize {
        if byte_idx < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        let target = byte_idx - self.byte;
        let mut consumed = 0;
        for (idx, c) in self.text[self.byte..].char_indices() {
            if idx >= target {
                break;
            }
            self.chars += 1;
            consumed = idx + c.len_utf8();
        }
        self.byte += consumed;
        self.chars
    }
}

/// Compute a SHA-256 content hash used to detect edited note text.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
