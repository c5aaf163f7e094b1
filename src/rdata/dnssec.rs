//! DS, DNSKEY (and its RFC 2535 predecessor KEY), RRSIG (and its
//! predecessor SIG), NSEC (and its predecessor NXT), NSEC3, NSEC3PARAM
//! (RFC 4034, RFC 5155, RFC 2535).
use std::fmt;

use crate::bitmap::TypeBitmap;
use crate::charstring::CharacterString;
use crate::encoding::{base64_decode, base64_encode, from_hex, to_hex_upper, Base32, Base32Alphabet};
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ds {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

impl Ds {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u16(self.key_tag)?;
        n += w.write_u8(self.algorithm)?;
        n += w.write_u8(self.digest_type)?;
        n += w.write_bytes(&self.digest)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Ds> {
        let key_tag = r.read_u16()?;
        let algorithm = r.read_u8()?;
        let digest_type = r.read_u8()?;
        let digest = r.read_bytes(crate::util::remaining_rdata(rdlen, 4)?)?.to_vec();
        Ok(Ds { key_tag, algorithm, digest_type, digest })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Ds> {
        if tokens.len() < 4 {
            return Err(Error::parse("DS rdata needs at least 4 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(Ds {
            key_tag: super::soa::parse_u16(strs[0])?,
            algorithm: parse_u8(strs[1])?,
            digest_type: parse_u8(strs[2])?,
            digest: from_hex(&strs[3..].join(""))?,
        })
    }
}

impl fmt::Display for Ds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.key_tag,
            self.algorithm,
            self.digest_type,
            to_hex_upper(&self.digest)
        )
    }
}

/// Shared shape of DNSKEY (RFC 4034 §2) and its RFC 2535 predecessor KEY.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsKey {
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl DnsKey {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u16(self.flags)?;
        n += w.write_u8(self.protocol)?;
        n += w.write_u8(self.algorithm)?;
        n += w.write_bytes(&self.public_key)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<DnsKey> {
        let flags = r.read_u16()?;
        let protocol = r.read_u8()?;
        let algorithm = r.read_u8()?;
        let public_key = r.read_bytes(crate::util::remaining_rdata(rdlen, 4)?)?.to_vec();
        Ok(DnsKey { flags, protocol, algorithm, public_key })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<DnsKey> {
        if tokens.len() < 4 {
            return Err(Error::parse("DNSKEY rdata needs at least 4 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(DnsKey {
            flags: super::soa::parse_u16(strs[0])?,
            protocol: parse_u8(strs[1])?,
            algorithm: parse_u8(strs[2])?,
            public_key: base64_decode(&strs[3..].join(""))?,
        })
    }
}

impl fmt::Display for DnsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.flags,
            self.protocol,
            self.algorithm,
            base64_encode(&self.public_key)
        )
    }
}

/// Shared shape of RRSIG (RFC 4034 §3) and its RFC 2535 predecessor SIG.
/// The signer's name is never compressed, nor follows compression
/// pointers when decoding, per the "fields not subject to compression"
/// guidance spec.md calls out for DNSSEC/mail-related RDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrSig {
    pub type_covered: RRType,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub expiration: u32,
    pub inception: u32,
    pub key_tag: u16,
    pub signer_name: Fqdn,
    pub signature: Vec<u8>,
}

impl RrSig {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u16(self.type_covered.code())?;
        n += w.write_u8(self.algorithm)?;
        n += w.write_u8(self.labels)?;
        n += w.write_u32(self.original_ttl)?;
        n += w.write_u32(self.expiration)?;
        n += w.write_u32(self.inception)?;
        n += w.write_u16(self.key_tag)?;
        n += w.write_name(&self.signer_name, false)?;
        n += w.write_bytes(&self.signature)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<RrSig> {
        let start = r.position();
        let type_covered = RRType::from_code(r.read_u16()?);
        let algorithm = r.read_u8()?;
        let labels = r.read_u8()?;
        let original_ttl = r.read_u32()?;
        let expiration = r.read_u32()?;
        let inception = r.read_u32()?;
        let key_tag = r.read_u16()?;
        let signer_name = {
            let mut nr = r.clone().without_compression();
            let name = nr.read_name()?;
            r.seek(nr.position())?;
            name
        };
        let consumed = r.position() - start;
        let signature = r.read_bytes(crate::util::remaining_rdata(rdlen, consumed)?)?.to_vec();
        Ok(RrSig {
            type_covered,
            algorithm,
            labels,
            original_ttl,
            expiration,
            inception,
            key_tag,
            signer_name,
            signature,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<RrSig> {
        if tokens.len() < 9 {
            return Err(Error::parse("RRSIG rdata needs at least 9 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        Ok(RrSig {
            type_covered: strs[0].parse()?,
            algorithm: parse_u8(strs[1])?,
            labels: parse_u8(strs[2])?,
            original_ttl: super::soa::parse_u32(strs[3])?,
            expiration: super::soa::parse_u32(strs[4])?,
            inception: super::soa::parse_u32(strs[5])?,
            key_tag: super::soa::parse_u16(strs[6])?,
            signer_name: Fqdn::parse(strs[7])?,
            signature: base64_decode(&strs[8..].join(""))?,
        })
    }
}

impl fmt::Display for RrSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {} {} {} {}",
            self.type_covered,
            self.algorithm,
            self.labels,
            self.original_ttl,
            self.expiration,
            self.inception,
            self.key_tag,
            self.signer_name,
            base64_encode(&self.signature)
        )
    }
}

/// NSEC (RFC 4034 §4): a non-compressible next-domain-name plus a type
/// bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec {
    pub next_domain_name: Fqdn,
    pub types: TypeBitmap,
}

impl Nsec {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_name(&self.next_domain_name, false)?;
        n += self.types.pack(w)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Nsec> {
        let start = r.position();
        let next_domain_name = {
            let mut nr = r.clone().without_compression();
            let name = nr.read_name()?;
            r.seek(nr.position())?;
            name
        };
        let consumed = r.position() - start;
        let types = TypeBitmap::unpack(r, crate::util::remaining_rdata(rdlen, consumed)?)?;
        Ok(Nsec { next_domain_name, types })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Nsec> {
        if tokens.is_empty() {
            return Err(Error::parse("NSEC rdata needs a next domain name"));
        }
        let strs = super::soa::as_strs(tokens)?;
        let mut types = Vec::new();
        for t in &strs[1..] {
            types.push(t.parse::<RRType>()?);
        }
        Ok(Nsec {
            next_domain_name: Fqdn::parse(strs[0])?,
            types: TypeBitmap::new(types),
        })
    }
}

impl fmt::Display for Nsec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.next_domain_name, self.types)
    }
}

/// NXT (RFC 2535 §5.2): the predecessor of NSEC. Its type bitmap is a
/// single, non-windowed run (at most 16 octets, i.e. types 0..127), unlike
/// NSEC/NSEC3's windowed encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nxt {
    pub next_domain_name: Fqdn,
    pub types: Vec<RRType>,
}

impl Nxt {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_name(&self.next_domain_name, false)?;
        let mut bytes = vec![0u8; 16];
        let mut max_byte = 0usize;
        for t in &self.types {
            let code = t.code() as usize;
            if code >= 128 {
                return Err(Error::semantic("NXT cannot represent type codes >= 128"));
            }
            bytes[code / 8] |= 0x80 >> (code % 8);
            max_byte = max_byte.max(code / 8 + 1);
        }
        n += w.write_bytes(&bytes[..max_byte])?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Nxt> {
        let start = r.position();
        let next_domain_name = {
            let mut nr = r.clone().without_compression();
            let name = nr.read_name()?;
            r.seek(nr.position())?;
            name
        };
        let consumed = r.position() - start;
        let bitmap_len = crate::util::remaining_rdata(rdlen, consumed)?;
        if bitmap_len > 16 {
            return Err(Error::parse("NXT bitmap longer than 16 octets"));
        }
        let bytes = r.read_bytes(bitmap_len)?;
        let mut types = Vec::new();
        for (byte_idx, &b) in bytes.iter().enumerate() {
            for bit in 0..8 {
                if b & (0x80 >> bit) != 0 {
                    types.push(RRType::from_code((byte_idx * 8 + bit) as u16));
                }
            }
        }
        Ok(Nxt { next_domain_name, types })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Nxt> {
        if tokens.is_empty() {
            return Err(Error::parse("NXT rdata needs a next domain name"));
        }
        let strs = super::soa::as_strs(tokens)?;
        let mut types = Vec::new();
        for t in &strs[1..] {
            types.push(t.parse::<RRType>()?);
        }
        Ok(Nxt { next_domain_name: Fqdn::parse(strs[0])?, types })
    }
}

impl fmt::Display for Nxt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        write!(f, "{} {}", self.next_domain_name, names.join(" "))
    }
}

fn base32hex() -> Base32 {
    Base32::with_padding(Base32Alphabet::ExtendedHex, None)
}

/// NSEC3 (RFC 5155 §3): the owner-name-free variant of NSEC, keyed by a
/// salted hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3 {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
    pub next_hashed_owner: Vec<u8>,
    pub types: TypeBitmap,
}

impl Nsec3 {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u8(self.hash_algorithm)?;
        n += w.write_u8(self.flags)?;
        n += w.write_u16(self.iterations)?;
        n += w.write_u8(self.salt.len() as u8)?;
        n += w.write_bytes(&self.salt)?;
        n += w.write_u8(self.next_hashed_owner.len() as u8)?;
        n += w.write_bytes(&self.next_hashed_owner)?;
        n += self.types.pack(w)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Nsec3> {
        let start = r.position();
        let hash_algorithm = r.read_u8()?;
        let flags = r.read_u8()?;
        let iterations = r.read_u16()?;
        let salt_len = r.read_u8()? as usize;
        let salt = r.read_bytes(salt_len)?.to_vec();
        let hash_len = r.read_u8()? as usize;
        let next_hashed_owner = r.read_bytes(hash_len)?.to_vec();
        let consumed = r.position() - start;
        let types = TypeBitmap::unpack(r, crate::util::remaining_rdata(rdlen, consumed)?)?;
        Ok(Nsec3 { hash_algorithm, flags, iterations, salt, next_hashed_owner, types })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Nsec3> {
        if tokens.len() < 5 {
            return Err(Error::parse("NSEC3 rdata needs at least 5 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        let salt = if strs[3] == "-" { Vec::new() } else { from_hex(strs[3])? };
        let next_hashed_owner = base32hex().decode(strs[4])?;
        let mut types = Vec::new();
        for t in &strs[5..] {
            types.push(t.parse::<RRType>()?);
        }
        Ok(Nsec3 {
            hash_algorithm: parse_u8(strs[0])?,
            flags: parse_u8(strs[1])?,
            iterations: super::soa::parse_u16(strs[2])?,
            salt,
            next_hashed_owner,
            types: TypeBitmap::new(types),
        })
    }
}

impl fmt::Display for Nsec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt_text = if self.salt.is_empty() {
            "-".to_string()
        } else {
            crate::encoding::to_hex(&self.salt)
        };
        write!(
            f,
            "{} {} {} {} {} {}",
            self.hash_algorithm,
            self.flags,
            self.iterations,
            salt_text,
            base32hex().encode(&self.next_hashed_owner),
            self.types
        )
    }
}

/// NSEC3PARAM (RFC 5155 §4): the parameters a zone uses to compute the
/// NSEC3 hash chain, without a next-hashed-owner or bitmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3Param {
    pub hash_algorithm: u8,
    pub flags: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
}

impl Nsec3Param {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u8(self.hash_algorithm)?;
        n += w.write_u8(self.flags)?;
        n += w.write_u16(self.iterations)?;
        n += w.write_u8(self.salt.len() as u8)?;
        n += w.write_bytes(&self.salt)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Nsec3Param> {
        let hash_algorithm = r.read_u8()?;
        let flags = r.read_u8()?;
        let iterations = r.read_u16()?;
        let salt_len = r.read_u8()? as usize;
        let salt = r.read_bytes(salt_len)?.to_vec();
        Ok(Nsec3Param { hash_algorithm, flags, iterations, salt })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Nsec3Param> {
        if tokens.len() != 4 {
            return Err(Error::parse("NSEC3PARAM rdata needs 4 fields"));
        }
        let strs = super::soa::as_strs(tokens)?;
        let salt = if strs[3] == "-" { Vec::new() } else { from_hex(strs[3])? };
        Ok(Nsec3Param {
            hash_algorithm: parse_u8(strs[0])?,
            flags: parse_u8(strs[1])?,
            iterations: super::soa::parse_u16(strs[2])?,
            salt,
        })
    }
}

impl fmt::Display for Nsec3Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let salt_text = if self.salt.is_empty() {
            "-".to_string()
        } else {
            crate::encoding::to_hex(&self.salt)
        };
        write!(f, "{} {} {} {}", self.hash_algorithm, self.flags, self.iterations, salt_text)
    }
}

fn parse_u8(s: &str) -> DnsResult<u8> {
    s.parse().map_err(|_| Error::parse(format!("expected an unsigned 8-bit integer, got '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ds_round_trips() {
        let ds = Ds {
            key_tag: 60485,
            algorithm: 5,
            digest_type: 1,
            digest: from_hex("2BB183AF5F22588179A53B0A98631FAD1A292118").unwrap(),
        };
        let mut w = WireWriter::new();
        let n = ds.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Ds::unpack(&mut r, n as u16).unwrap(), ds);
    }

    #[test]
    fn nsec3_round_trips() {
        let n3 = Nsec3 {
            hash_algorithm: 1,
            flags: 1,
            iterations: 12,
            salt: from_hex("aabbccdd").unwrap(),
            next_hashed_owner: base32hex().decode("2vptu5timamqttgl4luu9kg21e0aor3s").unwrap(),
            types: TypeBitmap::new(vec![RRType::A, RRType::RRSIG]),
        };
        let mut w = WireWriter::new();
        let len = n3.pack(&mut w).unwrap();
        let bytes = w.freeze(len).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Nsec3::unpack(&mut r, len as u16).unwrap(), n3);
    }
}
