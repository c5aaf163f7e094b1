//! Small utility functions shared across the codec, plus test-only helpers
//! for turning a `wireshark`-style hex dump into a byte slice.
use crate::error::{DnsResult, Error};

/// A label-length byte of `0xC0` or above is the first byte of a
/// compression pointer rather than a regular label length (RFC 1035 §4.1.4).
pub fn is_pointer(b: u8) -> bool {
    b & 0xC0 == 0xC0
}

/// `rdlen - consumed`, rejecting a truncated RDATA region instead of
/// underflowing when a record's fixed-size fields already exceed the
/// declared `rdlength`.
pub fn remaining_rdata(rdlen: u16, consumed: usize) -> DnsResult<usize> {
    (rdlen as usize)
        .checked_sub(consumed)
        .ok_or_else(|| Error::parse(format!("rdlength {rdlen} too short for {consumed} fixed octets")))
}

#[cfg(test)]
pub mod test_support {
    /// Parses a `wireshark`-style hex dump (offset column + hex bytes,
    /// any trailing ascii gutter ignored) into a flat byte vector. Lines
    /// may also be given as bare hex with no offset column.
    pub fn from_hex_dump(dump: &str) -> Vec<u8> {
        let mut bytes = Vec::new();
        for line in dump.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            // skip a leading offset column like "0000" or "0000:"
            let start = if tokens[0].len() <= 6 && tokens[0].trim_end_matches(':').chars().all(|c| c.is_ascii_hexdigit()) && tokens[0].len() != 2
            {
                1
            } else {
                0
            };
            for tok in &tokens[start..] {
                if let Ok(b) = u8::from_str_radix(tok, 16) {
                    bytes.push(b);
                } else {
                    break;
                }
            }
        }
        bytes
    }

    pub fn from_hex(s: &str) -> Vec<u8> {
        let clean: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        (0..clean.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&clean[i..i + 2], 16).unwrap())
            .collect()
    }
}
