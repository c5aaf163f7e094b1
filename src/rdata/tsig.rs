//! TSIG (RFC 2845): a transaction signature carried as a pseudo-RR in the
//! additional section. The algorithm name is never compressed, nor does it
//! follow compression pointers, even though it is wire-encoded as a name.
use std::fmt;

use crate::charstring::CharacterString;
use crate::encoding::{base64_decode, base64_encode};
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tsig {
    pub algorithm: Fqdn,
    pub time_signed: u64,
    pub fudge: u16,
    pub mac: Vec<u8>,
    pub original_id: u16,
    pub error: u16,
    pub other_data: Vec<u8>,
}

impl Tsig {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_name(&self.algorithm, false)?;
        n += w.write_u48(self.time_signed)?;
        n += w.write_u16(self.fudge)?;
        n += w.write_u16(self.mac.len() as u16)?;
        n += w.write_bytes(&self.mac)?;
        n += w.write_u16(self.original_id)?;
        n += w.write_u16(self.error)?;
        n += w.write_u16(self.other_data.len() as u16)?;
        n += w.write_bytes(&self.other_data)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Tsig> {
        let algorithm = {
            let mut nr = r.clone().without_compression();
            let name = nr.read_name()?;
            r.seek(nr.position())?;
            name
        };
        let time_signed = r.read_u48()?;
        let fudge = r.read_u16()?;
        let mac_size = r.read_u16()? as usize;
        let mac = r.read_bytes(mac_size)?.to_vec();
        let original_id = r.read_u16()?;
        let error = r.read_u16()?;
        let other_len = r.read_u16()? as usize;
        let other_data = r.read_bytes(other_len)?.to_vec();
        Ok(Tsig {
            algorithm,
            time_signed,
            fudge,
            mac,
            original_id,
            error,
            other_data,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Tsig> {
        if tokens.len() < 6 {
            return Err(Error::parse(
                "TSIG rdata needs at least 6 fields: algorithm time-signed fudge mac original-id error [other-data]",
            ));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(Tsig {
            algorithm: Fqdn::parse(strs[0])?,
            time_signed: strs[1]
                .parse()
                .map_err(|_| Error::parse("invalid TSIG time-signed field"))?,
            fudge: super::soa::parse_u16(strs[2])?,
            mac: base64_decode(strs[3])?,
            original_id: super::soa::parse_u16(strs[4])?,
            error: super::soa::parse_u16(strs[5])?,
            other_data: strs.get(6).map(|s| base64_decode(s)).transpose()?.unwrap_or_default(),
        })
    }
}

impl fmt::Display for Tsig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {}",
            self.algorithm,
            self.time_signed,
            self.fudge,
            base64_encode(&self.mac),
            self.original_id,
            self.error,
            base64_encode(&self.other_data),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsig_round_trips() {
        let tsig = Tsig {
            algorithm: Fqdn::parse("hmac-sha256.").unwrap(),
            time_signed: 1_700_000_000,
            fudge: 300,
            mac: vec![0xaa; 32],
            original_id: 4321,
            error: 0,
            other_data: Vec::new(),
        };
        let mut w = WireWriter::new();
        let n = tsig.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Tsig::unpack(&mut r, n as u16).unwrap(), tsig);
    }
}
