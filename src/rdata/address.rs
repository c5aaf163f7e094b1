//! A / AAAA (RFC 1035 §3.4.1, RFC 3596): a bare 4- or 16-byte network
//! address, presented as the canonical IP literal.
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct A(pub Ipv4Addr);

impl A {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        w.write_bytes(&self.0.octets())
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<A> {
        if rdlen != 4 {
            return Err(Error::parse(format!("A record rdlength {rdlen} must be 4")));
        }
        let bytes = r.read_bytes(4)?;
        Ok(A(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3])))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<A> {
        let text = single_token_str(tokens)?;
        text.parse::<Ipv4Addr>()
            .map(A)
            .map_err(|e| Error::parse(format!("invalid IPv4 address '{text}': {e}")))
    }
}

impl fmt::Display for A {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aaaa(pub Ipv6Addr);

impl Aaaa {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        w.write_bytes(&self.0.octets())
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Aaaa> {
        if rdlen != 16 {
            return Err(Error::parse(format!("AAAA record rdlength {rdlen} must be 16")));
        }
        let bytes = r.read_bytes(16)?;
        let mut octets = [0u8; 16];
        octets.copy_from_slice(bytes);
        Ok(Aaaa(Ipv6Addr::from(octets)))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Aaaa> {
        let text = single_token_str(tokens)?;
        text.parse::<Ipv6Addr>()
            .map(Aaaa)
            .map_err(|e| Error::parse(format!("invalid IPv6 address '{text}': {e}")))
    }
}

impl fmt::Display for Aaaa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) fn single_token_str(tokens: &[CharacterString]) -> DnsResult<&str> {
    if tokens.len() != 1 {
        return Err(Error::parse(format!(
            "expected exactly one rdata token, got {}",
            tokens.len()
        )));
    }
    std::str::from_utf8(tokens[0].as_bytes()).map_err(|_| Error::parse("rdata token is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_round_trips() {
        let addr = A(Ipv4Addr::new(93, 184, 216, 34));
        let mut w = WireWriter::new();
        addr.pack(&mut w).unwrap();
        let bytes = w.freeze(4).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(A::unpack(&mut r, 4).unwrap(), addr);
        assert_eq!(addr.to_string(), "93.184.216.34");
    }

    #[test]
    fn aaaa_round_trips() {
        let addr = Aaaa("2001:db8::1".parse().unwrap());
        let mut w = WireWriter::new();
        addr.pack(&mut w).unwrap();
        let bytes = w.freeze(16).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Aaaa::unpack(&mut r, 16).unwrap(), addr);
    }
}
