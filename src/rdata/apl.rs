//! APL (RFC 3123): a list of address-prefix items, each
//! `{family, prefix, N, afd[]}` with `N` (the AFD length) in `0..=127` and
//! the negation flag in the high bit of that same octet.
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AplItem {
    pub family: u16,
    pub prefix: u8,
    pub negated: bool,
    pub afd: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Apl(pub Vec<AplItem>);

impl Apl {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = 0;
        for item in &self.0 {
            if item.afd.len() > 127 {
                return Err(Error::semantic(format!(
                    "APL afd length {} exceeds 127",
                    item.afd.len()
                )));
            }
            n += w.write_u16(item.family)?;
            n += w.write_u8(item.prefix)?;
            let n_byte = (item.afd.len() as u8) | if item.negated { 0x80 } else { 0 };
            n += w.write_u8(n_byte)?;
            n += w.write_bytes(&item.afd)?;
        }
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Apl> {
        let end = r.position() + rdlen as usize;
        let mut items = Vec::new();
        while r.position() < end {
            let family = r.read_u16()?;
            let prefix = r.read_u8()?;
            let n_byte = r.read_u8()?;
            let negated = n_byte & 0x80 != 0;
            let len = (n_byte & 0x7f) as usize;
            let afd = r.read_bytes(len)?.to_vec();
            items.push(AplItem { family, prefix, negated, afd });
        }
        Ok(Apl(items))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Apl> {
        let strs = super::soa::as_strs(tokens)?;
        let mut items = Vec::with_capacity(strs.len());
        for tok in strs {
            items.push(parse_item(tok)?);
        }
        Ok(Apl(items))
    }
}

fn parse_item(tok: &str) -> DnsResult<AplItem> {
    let (negated, rest) = match tok.strip_prefix('!') {
        Some(r) => (true, r),
        None => (false, tok),
    };
    let (afi, address) = rest
        .split_once(':')
        .ok_or_else(|| Error::parse(format!("malformed APL item '{tok}'")))?;
    let (addr, prefix_str) = address
        .split_once('/')
        .ok_or_else(|| Error::parse(format!("APL item '{tok}' missing /prefix")))?;
    let prefix: u8 = prefix_str
        .parse()
        .map_err(|_| Error::parse(format!("invalid APL prefix length in '{tok}'")))?;

    let family: u16 = afi.parse().map_err(|_| Error::parse(format!("invalid APL address family '{afi}'")))?;
    let afd = match family {
        1 => {
            let ip: std::net::Ipv4Addr = addr
                .parse()
                .map_err(|_| Error::parse(format!("invalid IPv4 address in APL item '{tok}'")))?;
            trim_trailing_zero_bytes(&ip.octets())
        }
        2 => {
            let ip: std::net::Ipv6Addr = addr
                .parse()
                .map_err(|_| Error::parse(format!("invalid IPv6 address in APL item '{tok}'")))?;
            trim_trailing_zero_bytes(&ip.octets())
        }
        _ => return Err(Error::parse(format!("unsupported APL address family {family}"))),
    };

    Ok(AplItem { family, prefix, negated, afd })
}

fn trim_trailing_zero_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == 0 {
        end -= 1;
    }
    bytes[..end].to_vec()
}

impl fmt::Display for Apl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(format_item).collect();
        write!(f, "{}", parts.join(" "))
    }
}

fn format_item(item: &AplItem) -> String {
    let mut padded = item.afd.clone();
    let addr_text = match item.family {
        1 => {
            padded.resize(4, 0);
            std::net::Ipv4Addr::new(padded[0], padded[1], padded[2], padded[3]).to_string()
        }
        2 => {
            padded.resize(16, 0);
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&padded);
            std::net::Ipv6Addr::from(octets).to_string()
        }
        other => return format!("{}{}:{}/{}", if item.negated { "!" } else { "" }, other, crate::encoding::to_hex(&item.afd), item.prefix),
    };
    format!(
        "{}{}:{}/{}",
        if item.negated { "!" } else { "" },
        item.family,
        addr_text,
        item.prefix
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc3123_example_round_trips() {
        let tokens = vec![CharacterString::from_bytes(b"1:192.168.32.0/21".to_vec()).unwrap()];
        let apl = Apl::parse(&tokens).unwrap();
        assert_eq!(apl.to_string(), "1:192.168.32.0/21");

        let mut w = WireWriter::new();
        let n = apl.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Apl::unpack(&mut r, n as u16).unwrap(), apl);
    }

    #[test]
    fn negation_bit_round_trips() {
        let tokens = vec![CharacterString::from_bytes(b"!1:192.168.38.0/28".to_vec()).unwrap()];
        let apl = Apl::parse(&tokens).unwrap();
        assert!(apl.0[0].negated);
        assert_eq!(apl.to_string(), "!1:192.168.38.0/28");
    }
}
