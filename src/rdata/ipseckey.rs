//! IPSECKEY (RFC 4025): a gateway of one of four shapes, keyed by
//! `gateway_type`, followed by a base64-presented public key.
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::charstring::CharacterString;
use crate::encoding::{base64_decode, base64_encode};
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gateway {
    None,
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Name(Fqdn),
}

impl Gateway {
    fn type_code(&self) -> u8 {
        match self {
            Gateway::None => 0,
            Gateway::Ipv4(_) => 1,
            Gateway::Ipv6(_) => 2,
            Gateway::Name(_) => 3,
        }
    }
}

impl fmt::Display for Gateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gateway::None => write!(f, "."),
            Gateway::Ipv4(a) => write!(f, "{a}"),
            Gateway::Ipv6(a) => write!(f, "{a}"),
            Gateway::Name(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpSecKey {
    pub precedence: u8,
    pub algorithm: u8,
    pub gateway: Gateway,
    pub public_key: Vec<u8>,
}

impl IpSecKey {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u8(self.precedence)?;
        n += w.write_u8(self.gateway.type_code())?;
        n += w.write_u8(self.algorithm)?;
        n += match &self.gateway {
            Gateway::None => 0,
            Gateway::Ipv4(a) => w.write_bytes(&a.octets())?,
            Gateway::Ipv6(a) => w.write_bytes(&a.octets())?,
            // gateway names are not subject to compression (RFC 4025 §3).
            Gateway::Name(name) => w.write_name(name, false)?,
        };
        n += w.write_bytes(&self.public_key)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<IpSecKey> {
        let start = r.position();
        let precedence = r.read_u8()?;
        let gateway_type = r.read_u8()?;
        let algorithm = r.read_u8()?;
        let gateway = match gateway_type {
            0 => Gateway::None,
            1 => {
                let bytes = r.read_bytes(4)?;
                Gateway::Ipv4(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
            }
            2 => {
                let bytes = r.read_bytes(16)?;
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                Gateway::Ipv6(Ipv6Addr::from(octets))
            }
            3 => {
                let mut nr = r.clone().without_compression();
                let name = nr.read_name()?;
                r.seek(nr.position())?;
                Gateway::Name(name)
            }
            other => return Err(Error::parse(format!("unknown IPSECKEY gateway type {other}"))),
        };
        let consumed = r.position() - start;
        let public_key = r.read_bytes(crate::util::remaining_rdata(rdlen, consumed)?)?.to_vec();
        Ok(IpSecKey { precedence, algorithm, gateway, public_key })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<IpSecKey> {
        if tokens.len() < 4 {
            return Err(Error::parse(
                "IPSECKEY rdata needs 4 fields: precedence gateway-type algorithm gateway [public-key]",
            ));
        }
        let strs = super::soa::as_strs(tokens)?;
        let precedence = parse_u8(strs[0])?;
        let gateway_type = parse_u8(strs[1])?;
        let algorithm = parse_u8(strs[2])?;
        let gateway = match gateway_type {
            0 => Gateway::None,
            1 => Gateway::Ipv4(
                strs[3]
                    .parse()
                    .map_err(|_| Error::parse("invalid IPSECKEY IPv4 gateway"))?,
            ),
            2 => Gateway::Ipv6(
                strs[3]
                    .parse()
                    .map_err(|_| Error::parse("invalid IPSECKEY IPv6 gateway"))?,
            ),
            3 => Gateway::Name(Fqdn::parse(strs[3])?),
            other => return Err(Error::parse(format!("unknown IPSECKEY gateway type {other}"))),
        };
        let public_key = strs.get(4..).map(|rest| rest.join("")).unwrap_or_default();
        Ok(IpSecKey {
            precedence,
            algorithm,
            gateway,
            public_key: if public_key.is_empty() { Vec::new() } else { base64_decode(&public_key)? },
        })
    }
}

fn parse_u8(s: &str) -> DnsResult<u8> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 8-bit integer, got '{s}'")))
}

impl fmt::Display for IpSecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.precedence,
            self.gateway.type_code(),
            self.algorithm,
            self.gateway,
            base64_encode(&self.public_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_gateway_round_trips() {
        let key = IpSecKey {
            precedence: 10,
            algorithm: 2,
            gateway: Gateway::Ipv4(Ipv4Addr::new(192, 0, 2, 38)),
            public_key: base64_decode("AQNRU3mG7TVTO2BkR47usntb102uFJtugbo6BSGvgqt4AQ==").unwrap(),
        };
        let mut w = WireWriter::new();
        let n = key.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(IpSecKey::unpack(&mut r, n as u16).unwrap(), key);
    }

    #[test]
    fn no_gateway_round_trips() {
        let key = IpSecKey {
            precedence: 10,
            algorithm: 0,
            gateway: Gateway::None,
            public_key: Vec::new(),
        };
        let mut w = WireWriter::new();
        let n = key.pack(&mut w).unwrap();
        assert_eq!(n, 3);
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(IpSecKey::unpack(&mut r, n as u16).unwrap(), key);
    }
}
