//! The RDATA record model: one struct per wire shape (not per RR type —
//! several mnemonics share a shape, e.g. NS/CNAME/PTR all carry a single
//! compressible name), tied together by [`RecordData`], a tagged sum that
//! dispatches on [`RRType`]. Pattern-matching here stands in for the
//! inheritance hierarchy a class-based codec would use.
pub mod address;
pub mod apl;
pub mod dhcid;
pub mod dnssec;
pub mod ipseckey;
pub mod loc;
pub mod mx;
pub mod naptr;
pub mod nsap;
pub mod single_name;
pub mod soa;
pub mod srv;
pub mod sshfp;
pub mod tsig;
pub mod txt;
pub mod unknown;
pub mod zonemd;

use std::fmt;

use crate::charstring::CharacterString;
use crate::edns::Opt;
use crate::error::{DnsResult, Error};
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

use address::{Aaaa, A};
use apl::Apl;
use dhcid::Dhcid;
use dnssec::{DnsKey, Ds, Nsec, Nsec3, Nsec3Param, Nxt, RrSig};
use ipseckey::IpSecKey;
use loc::Loc;
use mx::Mx;
use naptr::Naptr;
use nsap::Nsap;
use single_name::SingleName;
use soa::{Minfo, Soa};
use srv::Srv;
use sshfp::SshFp;
use tsig::Tsig;
use txt::{HInfo, Txt};
use unknown::Unknown;
use zonemd::ZoneMd;

/// The decoded, typed RDATA of a resource record. One variant per wire
/// shape; [`RecordData::Unknown`] carries the raw bytes of any RR type
/// this crate has no dedicated shape for (RFC 3597).
#[derive(Debug, Clone, PartialEq)]
pub enum RecordData {
    A(A),
    Aaaa(Aaaa),
    Ns(SingleName),
    Cname(SingleName),
    Dname(SingleName),
    Ptr(SingleName),
    Mb(SingleName),
    Mg(SingleName),
    Mr(SingleName),
    NsapPtr(SingleName),
    Soa(Soa),
    Minfo(Minfo),
    Mx(Mx),
    Txt(Txt),
    HInfo(HInfo),
    Loc(Loc),
    Srv(Srv),
    Naptr(Naptr),
    Nsap(Nsap),
    Apl(Apl),
    Ds(Ds),
    DnsKey(DnsKey),
    Key(DnsKey),
    RrSig(RrSig),
    Sig(RrSig),
    Nsec(Nsec),
    Nxt(Nxt),
    Nsec3(Nsec3),
    Nsec3Param(Nsec3Param),
    Tsig(Tsig),
    SshFp(SshFp),
    ZoneMd(ZoneMd),
    IpSecKey(IpSecKey),
    Dhcid(Dhcid),
    Opt(Opt),
    Unknown(RRType, Unknown),
}

impl RecordData {
    pub fn rrtype(&self) -> RRType {
        match self {
            RecordData::A(_) => RRType::A,
            RecordData::Aaaa(_) => RRType::AAAA,
            RecordData::Ns(_) => RRType::NS,
            RecordData::Cname(_) => RRType::CNAME,
            RecordData::Dname(_) => RRType::DNAME,
            RecordData::Ptr(_) => RRType::PTR,
            RecordData::Mb(_) => RRType::MB,
            RecordData::Mg(_) => RRType::MG,
            RecordData::Mr(_) => RRType::MR,
            RecordData::NsapPtr(_) => RRType::NSAPPTR,
            RecordData::Soa(_) => RRType::SOA,
            RecordData::Minfo(_) => RRType::MINFO,
            RecordData::Mx(_) => RRType::MX,
            RecordData::Txt(_) => RRType::TXT,
            RecordData::HInfo(_) => RRType::HINFO,
            RecordData::Loc(_) => RRType::LOC,
            RecordData::Srv(_) => RRType::SRV,
            RecordData::Naptr(_) => RRType::NAPTR,
            RecordData::Nsap(_) => RRType::NSAP,
            RecordData::Apl(_) => RRType::APL,
            RecordData::Ds(_) => RRType::DS,
            RecordData::DnsKey(_) => RRType::DNSKEY,
            RecordData::Key(_) => RRType::KEY,
            RecordData::RrSig(_) => RRType::RRSIG,
            RecordData::Sig(_) => RRType::SIG,
            RecordData::Nsec(_) => RRType::NSEC,
            RecordData::Nxt(_) => RRType::NXT,
            RecordData::Nsec3(_) => RRType::NSEC3,
            RecordData::Nsec3Param(_) => RRType::NSEC3PARAM,
            RecordData::Tsig(_) => RRType::TSIG,
            RecordData::SshFp(_) => RRType::SSHFP,
            RecordData::ZoneMd(_) => RRType::ZONEMD,
            RecordData::IpSecKey(_) => RRType::IPSECKEY,
            RecordData::Dhcid(_) => RRType::DHCID,
            RecordData::Opt(_) => RRType::OPT,
            RecordData::Unknown(t, _) => *t,
        }
    }

    /// Packs just the RDATA bytes (no owner/type/class/ttl/rdlength
    /// header — the caller back-patches rdlength once this returns).
    /// `compress` is the writer's per-message compression policy; some
    /// shapes (DNAME, SRV, NAPTR, TSIG, ...) ignore it and never compress
    /// their embedded names regardless.
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        match self {
            RecordData::A(r) => r.pack(w),
            RecordData::Aaaa(r) => r.pack(w),
            RecordData::Ns(r) | RecordData::Cname(r) | RecordData::Dname(r) | RecordData::Ptr(r)
            | RecordData::Mb(r) | RecordData::Mg(r) | RecordData::Mr(r) | RecordData::NsapPtr(r) => {
                r.pack(w, compress)
            }
            RecordData::Soa(r) => r.pack(w, compress),
            RecordData::Minfo(r) => r.pack(w, compress),
            RecordData::Mx(r) => r.pack(w, compress),
            RecordData::Txt(r) => r.pack(w),
            RecordData::HInfo(r) => r.pack(w),
            RecordData::Loc(r) => r.pack(w),
            RecordData::Srv(r) => r.pack(w),
            RecordData::Naptr(r) => r.pack(w),
            RecordData::Nsap(r) => r.pack(w),
            RecordData::Apl(r) => r.pack(w),
            RecordData::Ds(r) => r.pack(w),
            RecordData::DnsKey(r) | RecordData::Key(r) => r.pack(w),
            RecordData::RrSig(r) | RecordData::Sig(r) => r.pack(w),
            RecordData::Nsec(r) => r.pack(w),
            RecordData::Nxt(r) => r.pack(w),
            RecordData::Nsec3(r) => r.pack(w),
            RecordData::Nsec3Param(r) => r.pack(w),
            RecordData::Tsig(r) => r.pack(w),
            RecordData::SshFp(r) => r.pack(w),
            RecordData::ZoneMd(r) => r.pack(w),
            RecordData::IpSecKey(r) => r.pack(w),
            RecordData::Dhcid(r) => r.pack(w),
            RecordData::Opt(r) => r.pack(w),
            RecordData::Unknown(_, r) => r.pack(w),
        }
    }

    /// Decodes `rdlen` bytes of RDATA for the given type. `r` must be a
    /// region reader bounded to exactly `rdlen` bytes (see
    /// [`crate::wire::PacketReader::rdata_reader`]).
    pub fn unpack(rrtype: RRType, r: &mut PacketReader, rdlen: u16) -> DnsResult<RecordData> {
        Ok(match rrtype {
            RRType::A => RecordData::A(A::unpack(r, rdlen)?),
            RRType::AAAA => RecordData::Aaaa(Aaaa::unpack(r, rdlen)?),
            RRType::NS => RecordData::Ns(SingleName::unpack(r, rdlen)?),
            RRType::CNAME => RecordData::Cname(SingleName::unpack(r, rdlen)?),
            RRType::DNAME => RecordData::Dname(SingleName::unpack(r, rdlen)?),
            RRType::PTR => RecordData::Ptr(SingleName::unpack(r, rdlen)?),
            RRType::MB => RecordData::Mb(SingleName::unpack(r, rdlen)?),
            RRType::MG => RecordData::Mg(SingleName::unpack(r, rdlen)?),
            RRType::MR => RecordData::Mr(SingleName::unpack(r, rdlen)?),
            RRType::NSAPPTR => RecordData::NsapPtr(SingleName::unpack(r, rdlen)?),
            RRType::SOA => RecordData::Soa(Soa::unpack(r, rdlen)?),
            RRType::MINFO => RecordData::Minfo(Minfo::unpack(r, rdlen)?),
            RRType::MX => RecordData::Mx(Mx::unpack(r, rdlen)?),
            RRType::TXT => RecordData::Txt(Txt::unpack(r, rdlen)?),
            RRType::HINFO => RecordData::HInfo(HInfo::unpack(r, rdlen)?),
            RRType::LOC => RecordData::Loc(Loc::unpack(r, rdlen)?),
            RRType::SRV => RecordData::Srv(Srv::unpack(r, rdlen)?),
            RRType::NAPTR => RecordData::Naptr(Naptr::unpack(r, rdlen)?),
            RRType::NSAP => RecordData::Nsap(Nsap::unpack(r, rdlen)?),
            RRType::APL => RecordData::Apl(Apl::unpack(r, rdlen)?),
            RRType::DS => RecordData::Ds(Ds::unpack(r, rdlen)?),
            RRType::DNSKEY => RecordData::DnsKey(DnsKey::unpack(r, rdlen)?),
            RRType::KEY => RecordData::Key(DnsKey::unpack(r, rdlen)?),
            RRType::RRSIG => RecordData::RrSig(RrSig::unpack(r, rdlen)?),
            RRType::SIG => RecordData::Sig(RrSig::unpack(r, rdlen)?),
            RRType::NSEC => RecordData::Nsec(Nsec::unpack(r, rdlen)?),
            RRType::NXT => RecordData::Nxt(Nxt::unpack(r, rdlen)?),
            RRType::NSEC3 => RecordData::Nsec3(Nsec3::unpack(r, rdlen)?),
            RRType::NSEC3PARAM => RecordData::Nsec3Param(Nsec3Param::unpack(r, rdlen)?),
            RRType::TSIG => RecordData::Tsig(Tsig::unpack(r, rdlen)?),
            RRType::SSHFP => RecordData::SshFp(SshFp::unpack(r, rdlen)?),
            RRType::ZONEMD => RecordData::ZoneMd(ZoneMd::unpack(r, rdlen)?),
            RRType::IPSECKEY => RecordData::IpSecKey(IpSecKey::unpack(r, rdlen)?),
            RRType::DHCID => RecordData::Dhcid(Dhcid::unpack(r, rdlen)?),
            RRType::OPT => RecordData::Opt(Opt::unpack(r, rdlen)?),
            other => RecordData::Unknown(other, Unknown::unpack(r, rdlen)?),
        })
    }

    /// Builds RDATA from presentation tokens. The RFC 3597 generic syntax
    /// (`\# len hex`) is tried first for every type, known or not, per the
    /// scanner's dispatch contract.
    pub fn parse(rrtype: RRType, tokens: &[CharacterString]) -> DnsResult<RecordData> {
        if unknown::is_generic_rdata(tokens) {
            let raw = Unknown::parse_generic(tokens)?;
            return Ok(match rrtype {
                RRType::Unknown(_) => RecordData::Unknown(rrtype, raw),
                known => reinterpret_generic(known, raw)?,
            });
        }

        Ok(match rrtype {
            RRType::A => RecordData::A(A::parse(tokens)?),
            RRType::AAAA => RecordData::Aaaa(Aaaa::parse(tokens)?),
            RRType::NS => RecordData::Ns(SingleName::parse(tokens)?),
            RRType::CNAME => RecordData::Cname(SingleName::parse(tokens)?),
            RRType::DNAME => RecordData::Dname(SingleName::parse(tokens)?),
            RRType::PTR => RecordData::Ptr(SingleName::parse(tokens)?),
            RRType::MB => RecordData::Mb(SingleName::parse(tokens)?),
            RRType::MG => RecordData::Mg(SingleName::parse(tokens)?),
            RRType::MR => RecordData::Mr(SingleName::parse(tokens)?),
            RRType::NSAPPTR => RecordData::NsapPtr(SingleName::parse(tokens)?),
            RRType::SOA => RecordData::Soa(Soa::parse(tokens)?),
            RRType::MINFO => RecordData::Minfo(Minfo::parse(tokens)?),
            RRType::MX => RecordData::Mx(Mx::parse(tokens)?),
            RRType::TXT => RecordData::Txt(Txt::parse(tokens)?),
            RRType::HINFO => RecordData::HInfo(HInfo::parse(tokens)?),
            RRType::LOC => RecordData::Loc(Loc::parse(tokens)?),
            RRType::SRV => RecordData::Srv(Srv::parse(tokens)?),
            RRType::NAPTR => RecordData::Naptr(Naptr::parse(tokens)?),
            RRType::NSAP => RecordData::Nsap(Nsap::parse(tokens)?),
            RRType::APL => RecordData::Apl(Apl::parse(tokens)?),
            RRType::DS => RecordData::Ds(Ds::parse(tokens)?),
            RRType::DNSKEY => RecordData::DnsKey(DnsKey::parse(tokens)?),
            RRType::KEY => RecordData::Key(DnsKey::parse(tokens)?),
            RRType::RRSIG => RecordData::RrSig(RrSig::parse(tokens)?),
            RRType::SIG => RecordData::Sig(RrSig::parse(tokens)?),
            RRType::NSEC => RecordData::Nsec(Nsec::parse(tokens)?),
            RRType::NXT => RecordData::Nxt(Nxt::parse(tokens)?),
            RRType::NSEC3 => RecordData::Nsec3(Nsec3::parse(tokens)?),
            RRType::NSEC3PARAM => RecordData::Nsec3Param(Nsec3Param::parse(tokens)?),
            RRType::TSIG => RecordData::Tsig(Tsig::parse(tokens)?),
            RRType::SSHFP => RecordData::SshFp(SshFp::parse(tokens)?),
            RRType::ZONEMD => RecordData::ZoneMd(ZoneMd::parse(tokens)?),
            RRType::IPSECKEY => RecordData::IpSecKey(IpSecKey::parse(tokens)?),
            RRType::DHCID => RecordData::Dhcid(Dhcid::parse(tokens)?),
            RRType::OPT => return Err(Error::semantic("OPT has no zonefile presentation form")),
            other => {
                return Err(Error::parse(format!(
                    "record type {other} has no textual rdata parser; use '\\#' generic syntax"
                )))
            }
        })
    }
}

/// Re-decodes a generic-syntax (`\# len hex`) payload as the named type's
/// own wire shape, so `\# 4 5db8d822` for an A record and `93.184.216.34`
/// produce the same [`RecordData`].
fn reinterpret_generic(rrtype: RRType, raw: Unknown) -> DnsResult<RecordData> {
    let bytes = raw.0;
    let rdlen = bytes.len() as u16;
    let mut r = PacketReader::new(&bytes);
    RecordData::unpack(rrtype, &mut r, rdlen)
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(r) => write!(f, "{r}"),
            RecordData::Aaaa(r) => write!(f, "{r}"),
            RecordData::Ns(r) | RecordData::Cname(r) | RecordData::Dname(r) | RecordData::Ptr(r)
            | RecordData::Mb(r) | RecordData::Mg(r) | RecordData::Mr(r) | RecordData::NsapPtr(r) => {
                write!(f, "{r}")
            }
            RecordData::Soa(r) => write!(f, "{r}"),
            RecordData::Minfo(r) => write!(f, "{r}"),
            RecordData::Mx(r) => write!(f, "{r}"),
            RecordData::Txt(r) => write!(f, "{r}"),
            RecordData::HInfo(r) => write!(f, "{r}"),
            RecordData::Loc(r) => write!(f, "{r}"),
            RecordData::Srv(r) => write!(f, "{r}"),
            RecordData::Naptr(r) => write!(f, "{r}"),
            RecordData::Nsap(r) => write!(f, "{r}"),
            RecordData::Apl(r) => write!(f, "{r}"),
            RecordData::Ds(r) => write!(f, "{r}"),
            RecordData::DnsKey(r) | RecordData::Key(r) => write!(f, "{r}"),
            RecordData::RrSig(r) | RecordData::Sig(r) => write!(f, "{r}"),
            RecordData::Nsec(r) => write!(f, "{r}"),
            RecordData::Nxt(r) => write!(f, "{r}"),
            RecordData::Nsec3(r) => write!(f, "{r}"),
            RecordData::Nsec3Param(r) => write!(f, "{r}"),
            RecordData::Tsig(r) => write!(f, "{r}"),
            RecordData::SshFp(r) => write!(f, "{r}"),
            RecordData::ZoneMd(r) => write!(f, "{r}"),
            RecordData::IpSecKey(r) => write!(f, "{r}"),
            RecordData::Dhcid(r) => write!(f, "{r}"),
            RecordData::Opt(r) => write!(f, "{r}"),
            RecordData::Unknown(_, r) => write!(f, "{r}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn generic_syntax_reinterprets_as_known_type() {
        let tokens = vec![
            CharacterString::from_bytes(b"\\#".to_vec()).unwrap(),
            CharacterString::from_bytes(b"4".to_vec()).unwrap(),
            CharacterString::from_bytes(b"5db8d822".to_vec()).unwrap(),
        ];
        let rd = RecordData::parse(RRType::A, &tokens).unwrap();
        assert_eq!(rd, RecordData::A(A(Ipv4Addr::new(93, 184, 216, 34))));
    }

    #[test]
    fn unknown_type_round_trips_as_generic() {
        let mut w = WireWriter::new();
        let rd = RecordData::Unknown(RRType::Unknown(65280), Unknown(vec![1, 2, 3]));
        let n = rd.pack(&mut w, false).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        let back = RecordData::unpack(RRType::Unknown(65280), &mut r, n as u16).unwrap();
        assert_eq!(back, rd);
    }
}
