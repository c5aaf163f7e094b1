//! SSHFP (RFC 4255): an SSH public key fingerprint, presented with the
//! fingerprint as hex.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{from_hex, to_hex};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshFp {
    pub algorithm: u8,
    pub fp_type: u8,
    pub fingerprint: Vec<u8>,
}

impl SshFp {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u8(self.algorithm)?;
        n += w.write_u8(self.fp_type)?;
        n += w.write_bytes(&self.fingerprint)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<SshFp> {
        let algorithm = r.read_u8()?;
        let fp_type = r.read_u8()?;
        let fingerprint = r.read_bytes(crate::util::remaining_rdata(rdlen, 2)?)?.to_vec();
        Ok(SshFp { algorithm, fp_type, fingerprint })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<SshFp> {
        if tokens.len() < 3 {
            return Err(Error::parse("SSHFP rdata needs at least 3 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(SshFp {
            algorithm: parse_u8(strs[0])?,
            fp_type: parse_u8(strs[1])?,
            fingerprint: from_hex(&strs[2..].join(""))?,
        })
    }
}

fn parse_u8(s: &str) -> DnsResult<u8> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 8-bit integer, got '{s}'")))
}

impl fmt::Display for SshFp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.algorithm, self.fp_type, to_hex(&self.fingerprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sshfp_round_trips() {
        let fp = SshFp {
            algorithm: 2,
            fp_type: 1,
            fingerprint: from_hex("123456789abcdef67890123456789abcdef67890").unwrap(),
        };
        let mut w = WireWriter::new();
        let n = fp.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(SshFp::unpack(&mut r, n as u16).unwrap(), fp);
    }

    #[test]
    fn truncated_rdlength_is_a_parse_error_not_a_panic() {
        let bytes = [2u8, 1];
        let mut r = PacketReader::new(&bytes);
        assert!(SshFp::unpack(&mut r, 1).is_err());
    }
}
