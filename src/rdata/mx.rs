//! MX (RFC 1035 §3.3.9): a 16-bit preference plus a compressible exchange
//! name.
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mx {
    pub preference: u16,
    pub exchange: Fqdn,
}

impl Mx {
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        let mut n = w.write_u16(self.preference)?;
        n += w.write_name(&self.exchange, compress)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Mx> {
        Ok(Mx {
            preference: r.read_u16()?,
            exchange: r.read_name()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Mx> {
        if tokens.len() != 2 {
            return Err(Error::parse("MX rdata needs 2 fields: preference exchange"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(Mx {
            preference: super::soa::parse_u16(strs[0])?,
            exchange: Fqdn::parse(strs[1])?,
        })
    }
}

impl fmt::Display for Mx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}
