//! NSAP (RFC 1706): an opaque NSAP address, presented as `0x`-prefixed hex
//! with optional `.` separators accepted (but not emitted) on input.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{from_nsap_hex, to_hex};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsap(pub Vec<u8>);

impl Nsap {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        w.write_bytes(&self.0)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Nsap> {
        Ok(Nsap(r.read_bytes(rdlen as usize)?.to_vec()))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Nsap> {
        let text = super::address::single_token_str(tokens)?;
        let bytes = from_nsap_hex(text)?;
        if bytes.is_empty() {
            return Err(Error::parse("NSAP address must not be empty"));
        }
        Ok(Nsap(bytes))
    }
}

impl fmt::Display for Nsap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", to_hex(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_hex_with_prefix() {
        let tokens = vec![CharacterString::from_bytes(
            b"0x39.00.00.00.00.00.00.1f.00.00.00.00.00.00.20.f8".to_vec(),
        )
        .unwrap()];
        let nsap = Nsap::parse(&tokens).unwrap();
        assert_eq!(nsap.to_string(), "0x39000000000000001f0000000000000020f8");
    }
}
