//! The RFC 1035 §4.1.4 name compressor: a back-reference cache from a
//! label suffix to the byte offset at which it was first emitted in the
//! current message.
use std::collections::HashMap;

/// Scoped to a single message emission; a fresh compressor must be used
/// per message (it is not safe or meaningful to share one across messages
/// or threads).
#[derive(Debug, Default)]
pub struct NameCompressor {
    cache: HashMap<Vec<u8>, u16>,
}

impl NameCompressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &[u8]) -> Option<u16> {
        self.cache.get(key).copied()
    }

    pub fn insert(&mut self, key: Vec<u8>, offset: u16) {
        self.cache.insert(key, offset);
    }
}

/// The canonical cache key for a label suffix: the concatenation of each
/// label's wire encoding (length octet + bytes), case-sensitive.
pub(crate) fn suffix_key(suffix: &[Vec<u8>]) -> Vec<u8> {
    let mut key = Vec::with_capacity(suffix.iter().map(|l| l.len() + 1).sum());
    for label in suffix {
        key.push(label.len() as u8);
        key.extend_from_slice(label);
    }
    key
}
