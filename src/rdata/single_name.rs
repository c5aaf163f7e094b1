//! The shared shape for NS / CNAME / DNAME / PTR / MB / MG / MR: a single
//! compressible domain name (spec.md §4.5).
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::DnsResult;
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleName(pub Fqdn);

impl SingleName {
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        w.write_name(&self.0, compress)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<SingleName> {
        Ok(SingleName(r.read_name()?))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<SingleName> {
        let text = super::address::single_token_str(tokens)?;
        Ok(SingleName(Fqdn::parse(text)?))
    }
}

impl fmt::Display for SingleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let rd = SingleName(Fqdn::parse("ns1.example.com.").unwrap());
        let mut w = WireWriter::new();
        let n = rd.pack(&mut w, false).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(SingleName::unpack(&mut r, n as u16).unwrap(), rd);
    }
}
