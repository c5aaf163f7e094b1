//! SOA (RFC 1035 §3.3.13) and MINFO (§3.3.7): records built from a pair of
//! compressible domain names plus, for SOA, five 32-bit timer fields.
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::serial::Serial;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Soa {
    pub mname: Fqdn,
    pub rname: Fqdn,
    pub serial: Serial,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Soa {
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        let mut n = w.write_name(&self.mname, compress)?;
        n += w.write_name(&self.rname, compress)?;
        n += w.write_u32(self.serial.0)?;
        n += w.write_u32(self.refresh)?;
        n += w.write_u32(self.retry)?;
        n += w.write_u32(self.expire)?;
        n += w.write_u32(self.minimum)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Soa> {
        Ok(Soa {
            mname: r.read_name()?,
            rname: r.read_name()?,
            serial: Serial::new(r.read_u32()?),
            refresh: r.read_u32()?,
            retry: r.read_u32()?,
            expire: r.read_u32()?,
            minimum: r.read_u32()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Soa> {
        if tokens.len() != 7 {
            return Err(Error::parse(format!(
                "SOA rdata needs 7 fields, got {}",
                tokens.len()
            )));
        }
        let strs = as_strs(tokens)?;
        Ok(Soa {
            mname: Fqdn::parse(strs[0])?,
            rname: Fqdn::parse(strs[1])?,
            serial: Serial::new(parse_u32(strs[2])?),
            refresh: parse_u32(strs[3])?,
            retry: parse_u32(strs[4])?,
            expire: parse_u32(strs[5])?,
            minimum: parse_u32(strs[6])?,
        })
    }
}

impl fmt::Display for Soa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.mname, self.rname, self.serial.0, self.refresh, self.retry, self.expire, self.minimum
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minfo {
    pub rmailbx: Fqdn,
    pub emailbx: Fqdn,
}

impl Minfo {
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        let mut n = w.write_name(&self.rmailbx, compress)?;
        n += w.write_name(&self.emailbx, compress)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Minfo> {
        Ok(Minfo {
            rmailbx: r.read_name()?,
            emailbx: r.read_name()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Minfo> {
        if tokens.len() != 2 {
            return Err(Error::parse("MINFO rdata needs 2 fields"));
        }
        let strs = as_strs(tokens)?;
        Ok(Minfo {
            rmailbx: Fqdn::parse(strs[0])?,
            emailbx: Fqdn::parse(strs[1])?,
        })
    }
}

impl fmt::Display for Minfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.rmailbx, self.emailbx)
    }
}

pub(crate) fn as_strs(tokens: &[CharacterString]) -> DnsResult<Vec<&str>> {
    tokens
        .iter()
        .map(|t| std::str::from_utf8(t.as_bytes()).map_err(|_| Error::parse("rdata token is not valid UTF-8")))
        .collect()
}

pub(crate) fn parse_u32(s: &str) -> DnsResult<u32> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 32-bit integer, got '{s}'")))
}

pub(crate) fn parse_u16(s: &str) -> DnsResult<u16> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 16-bit integer, got '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soa_round_trips() {
        let soa = Soa {
            mname: Fqdn::parse("ns1.example.com.").unwrap(),
            rname: Fqdn::parse("hostmaster.example.com.").unwrap(),
            serial: Serial::new(2024010101),
            refresh: 3600,
            retry: 900,
            expire: 1209600,
            minimum: 3600,
        };
        let mut w = WireWriter::new();
        let n = soa.pack(&mut w, false).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Soa::unpack(&mut r, n as u16).unwrap(), soa);
    }
}
