//! ZONEMD (RFC 8976): a whole-zone digest, presented with the digest as
//! upper-case hex.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{from_hex, to_hex_upper};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneMd {
    pub serial: u32,
    pub scheme: u8,
    pub hash_algorithm: u8,
    pub digest: Vec<u8>,
}

impl ZoneMd {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u32(self.serial)?;
        n += w.write_u8(self.scheme)?;
        n += w.write_u8(self.hash_algorithm)?;
        n += w.write_bytes(&self.digest)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<ZoneMd> {
        let serial = r.read_u32()?;
        let scheme = r.read_u8()?;
        let hash_algorithm = r.read_u8()?;
        let digest = r.read_bytes(crate::util::remaining_rdata(rdlen, 6)?)?.to_vec();
        check_digest_len(&digest)?;
        Ok(ZoneMd { serial, scheme, hash_algorithm, digest })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<ZoneMd> {
        if tokens.len() < 4 {
            return Err(Error::parse("ZONEMD rdata needs at least 4 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        let digest = from_hex(&strs[3..].join(""))?;
        check_digest_len(&digest)?;
        Ok(ZoneMd {
            serial: super::soa::parse_u32(strs[0])?,
            scheme: parse_u8(strs[1])?,
            hash_algorithm: parse_u8(strs[2])?,
            digest,
        })
    }
}

fn check_digest_len(digest: &[u8]) -> DnsResult<()> {
    if digest.len() < 12 {
        return Err(Error::semantic(format!(
            "ZONEMD digest must be at least 12 octets, got {}",
            digest.len()
        )));
    }
    Ok(())
}

fn parse_u8(s: &str) -> DnsResult<u8> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 8-bit integer, got '{s}'")))
}

impl fmt::Display for ZoneMd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.serial,
            self.scheme,
            self.hash_algorithm,
            to_hex_upper(&self.digest)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zonemd_round_trips() {
        let zmd = ZoneMd {
            serial: 2018031900,
            scheme: 1,
            hash_algorithm: 1,
            digest: from_hex("FEBE3D4CE2EC2FFA4BA99D46CD69D6D29711E55217057BEE7EB1A7B641A47BA7FED2DD5B97AE52C3D0E0C88ED16A38E43EC05ECB24FFC92").unwrap(),
        };
        let mut w = WireWriter::new();
        let n = zmd.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(ZoneMd::unpack(&mut r, n as u16).unwrap(), zmd);
    }

    #[test]
    fn rejects_digest_shorter_than_12_octets() {
        let zmd = ZoneMd { serial: 1, scheme: 1, hash_algorithm: 1, digest: vec![0; 8] };
        let mut w = WireWriter::new();
        let n = zmd.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert!(ZoneMd::unpack(&mut r, n as u16).is_err());
    }
}
