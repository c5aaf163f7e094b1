//! SRV (RFC 2782): `priority weight port target`, target is the one
//! domain name in this list that must never be compressed.
//!
//! Some SRV implementations print `priority port weight`. RFC 2782's
//! "the format of the SRV RR" is explicit about `priority weight port`;
//! this follows the RFC, not that ordering bug.
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Srv {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Fqdn,
}

impl Srv {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u16(self.priority)?;
        n += w.write_u16(self.weight)?;
        n += w.write_u16(self.port)?;
        // never compressed, regardless of the writer's own setting.
        n += w.write_name(&self.target, false)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Srv> {
        Ok(Srv {
            priority: r.read_u16()?,
            weight: r.read_u16()?,
            port: r.read_u16()?,
            target: r.read_name()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Srv> {
        if tokens.len() != 4 {
            return Err(Error::parse("SRV rdata needs 4 fields: priority weight port target"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(Srv {
            priority: super::soa::parse_u16(strs[0])?,
            weight: super::soa::parse_u16(strs[1])?,
            port: super::soa::parse_u16(strs[2])?,
            target: Fqdn::parse(strs[3])?,
        })
    }
}

impl fmt::Display for Srv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.priority, self.weight, self.port, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_field_order_is_priority_weight_port() {
        let srv = Srv {
            priority: 10,
            weight: 20,
            port: 5060,
            target: Fqdn::parse("sipserver.example.com.").unwrap(),
        };
        assert_eq!(srv.to_string(), "10 20 5060 sipserver.example.com.");
    }

    #[test]
    fn target_is_never_compressed() {
        let srv = Srv {
            priority: 0,
            weight: 0,
            port: 0,
            target: Fqdn::parse("example.com.").unwrap(),
        };
        let mut w = WireWriter::with_compression();
        // prime the compressor with the same name, uncompressed emission
        // of the SRV target must not shrink to a pointer.
        w.write_name(&Fqdn::parse("example.com.").unwrap(), true).unwrap();
        let before = w.len();
        srv.pack(&mut w).unwrap();
        let grew = w.len() - before;
        assert_eq!(grew, 6 + srv.target.wire_len());
    }
}
