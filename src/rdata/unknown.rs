//! The catch-all RDATA representation (RFC 3597): raw bytes for any record
//! type this crate does not model with a dedicated struct, plus the
//! generic `\# <len> <hex>` presentation syntax that substitutes for *any*
//! type's own textual form, known or not.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{from_hex, to_hex};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unknown(pub Vec<u8>);

impl Unknown {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        w.write_bytes(&self.0)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Unknown> {
        Ok(Unknown(r.read_bytes(rdlen as usize)?.to_vec()))
    }

    /// Parses RFC 3597 generic syntax: `\# <len> <hex>...`. Callers check
    /// for the leading `\#` token before reaching here — see
    /// [`is_generic_rdata`].
    pub fn parse_generic(tokens: &[CharacterString]) -> DnsResult<Unknown> {
        if tokens.len() < 2 {
            return Err(Error::parse("generic rdata needs a length and hex body"));
        }
        let strs = super::soa::as_strs(tokens)?;
        if strs[0] != "\\#" {
            return Err(Error::parse("generic rdata must start with '\\#'"));
        }
        let len: usize = strs[1]
            .parse()
            .map_err(|_| Error::parse("invalid generic rdata length"))?;
        let bytes = from_hex(&strs[2..].join(""))?;
        if bytes.len() != len {
            return Err(Error::parse(format!(
                "generic rdata declared length {len} does not match {} hex-decoded bytes",
                bytes.len()
            )));
        }
        Ok(Unknown(bytes))
    }
}

/// True when the first RDATA token is the RFC 3597 generic-syntax marker.
/// Checked by the record dispatcher before trying a type's own parser,
/// regardless of whether the type is known.
pub fn is_generic_rdata(tokens: &[CharacterString]) -> bool {
    tokens
        .first()
        .map(|t| t.as_bytes() == b"\\#")
        .unwrap_or(false)
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\# {} {}", self.0.len(), to_hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_round_trips_and_presents_generic_syntax() {
        let unknown = Unknown(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(unknown.to_string(), "\\# 4 deadbeef");

        let mut w = WireWriter::new();
        let n = unknown.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Unknown::unpack(&mut r, n as u16).unwrap(), unknown);
    }

    #[test]
    fn parses_generic_syntax_tokens() {
        let tokens = vec![
            CharacterString::from_bytes(b"\\#".to_vec()).unwrap(),
            CharacterString::from_bytes(b"4".to_vec()).unwrap(),
            CharacterString::from_bytes(b"deadbeef".to_vec()).unwrap(),
        ];
        assert!(is_generic_rdata(&tokens));
        let unknown = Unknown::parse_generic(&tokens).unwrap();
        assert_eq!(unknown.0, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let tokens = vec![
            CharacterString::from_bytes(b"\\#".to_vec()).unwrap(),
            CharacterString::from_bytes(b"5".to_vec()).unwrap(),
            CharacterString::from_bytes(b"deadbeef".to_vec()).unwrap(),
        ];
        assert!(Unknown::parse_generic(&tokens).is_err());
    }
}
