//! DHCID (RFC 4701): an opaque identity-association digest, presented as
//! base64 with no internal field structure exposed to the wire codec.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{base64_decode, base64_encode};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dhcid(pub Vec<u8>);

impl Dhcid {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        w.write_bytes(&self.0)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Dhcid> {
        Ok(Dhcid(r.read_bytes(rdlen as usize)?.to_vec()))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Dhcid> {
        let strs = super::soa::as_strs(tokens)?;
        if strs.is_empty() {
            return Err(Error::parse("DHCID rdata must not be empty"));
        }
        Ok(Dhcid(base64_decode(&strs.join(""))?))
    }
}

impl fmt::Display for Dhcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", base64_encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dhcid_round_trips() {
        let dhcid = Dhcid(base64_decode("AAIBY2/AuCccgoJbsaxcQc9TUapptP69lOjxfNuVAA2kjEA=").unwrap());
        let mut w = WireWriter::new();
        let n = dhcid.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Dhcid::unpack(&mut r, n as u16).unwrap(), dhcid);
    }
}
