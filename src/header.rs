//! The 12-octet DNS message header (RFC 1035 §4.1.1) and its flag word.
use std::fmt;

use crate::error::DnsResult;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpCode {
    #[default]
    Query,
    IQuery,
    Status,
    Notify,
    Update,
    DSO,
    Unknown(u8),
}

impl OpCode {
    pub fn code(self) -> u8 {
        match self {
            OpCode::Query => 0,
            OpCode::IQuery => 1,
            OpCode::Status => 2,
            OpCode::Notify => 4,
            OpCode::Update => 5,
            OpCode::DSO => 6,
            OpCode::Unknown(c) => c,
        }
    }

    pub fn from_code(v: u8) -> OpCode {
        match v {
            0 => OpCode::Query,
            1 => OpCode::IQuery,
            2 => OpCode::Status,
            4 => OpCode::Notify,
            5 => OpCode::Update,
            6 => OpCode::DSO,
            other => OpCode::Unknown(other),
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpCode::Query => write!(f, "QUERY"),
            OpCode::IQuery => write!(f, "IQUERY"),
            OpCode::Status => write!(f, "STATUS"),
            OpCode::Notify => write!(f, "NOTIFY"),
            OpCode::Update => write!(f, "UPDATE"),
            OpCode::DSO => write!(f, "DSO"),
            OpCode::Unknown(c) => write!(f, "OPCODE{c}"),
        }
    }
}

/// The 4-bit RCODE carried in the header. EDNS extends this to 12 bits by
/// prefixing the OPT TTL's extended-rcode byte (spec.md §4.7); that
/// extension is modelled in [`crate::edns::OptTtl`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    YXDomain,
    YXRRSet,
    NXRRSet,
    NotAuth,
    NotZone,
    DSOTypeNI,
    Unknown(u16),
}

impl ResponseCode {
    pub fn code(self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::YXDomain => 6,
            ResponseCode::YXRRSet => 7,
            ResponseCode::NXRRSet => 8,
            ResponseCode::NotAuth => 9,
            ResponseCode::NotZone => 10,
            ResponseCode::DSOTypeNI => 11,
            ResponseCode::Unknown(c) => c,
        }
    }

    pub fn from_code(v: u16) -> ResponseCode {
        match v {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            6 => ResponseCode::YXDomain,
            7 => ResponseCode::YXRRSet,
            8 => ResponseCode::NXRRSet,
            9 => ResponseCode::NotAuth,
            10 => ResponseCode::NotZone,
            11 => ResponseCode::DSOTypeNI,
            other => ResponseCode::Unknown(other),
        }
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::YXDomain => "YXDOMAIN",
            ResponseCode::YXRRSet => "YXRRSET",
            ResponseCode::NXRRSet => "NXRRSET",
            ResponseCode::NotAuth => "NOTAUTH",
            ResponseCode::NotZone => "NOTZONE",
            ResponseCode::DSOTypeNI => "DSOTYPENI",
            ResponseCode::Unknown(c) => return write!(f, "RCODE{c}"),
        };
        write!(f, "{name}")
    }
}

/// `QR(1) | Opcode(4) | AA(1) | TC(1) | RD(1) | RA(1) | Z(1) | AD(1) |
/// CD(1) | RCODE(4)` (spec.md §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub qr: bool,
    pub opcode: OpCode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub z: bool,
    pub authentic_data: bool,
    pub checking_disabled: bool,
    pub rcode: ResponseCode,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

impl Header {
    fn flags_word(&self) -> u16 {
        let mut v = 0u16;
        if self.qr {
            v |= 1 << 15;
        }
        v |= (self.opcode.code() as u16 & 0xf) << 11;
        if self.authoritative {
            v |= 1 << 10;
        }
        if self.truncated {
            v |= 1 << 9;
        }
        if self.recursion_desired {
            v |= 1 << 8;
        }
        if self.recursion_available {
            v |= 1 << 7;
        }
        if self.z {
            v |= 1 << 6;
        }
        if self.authentic_data {
            v |= 1 << 5;
        }
        if self.checking_disabled {
            v |= 1 << 4;
        }
        v |= self.rcode.code() & 0xf;
        v
    }

    fn from_flags_word(v: u16) -> (bool, OpCode, bool, bool, bool, bool, bool, bool, bool, ResponseCode) {
        (
            v & (1 << 15) != 0,
            OpCode::from_code(((v >> 11) & 0xf) as u8),
            v & (1 << 10) != 0,
            v & (1 << 9) != 0,
            v & (1 << 8) != 0,
            v & (1 << 7) != 0,
            v & (1 << 6) != 0,
            v & (1 << 5) != 0,
            v & (1 << 4) != 0,
            ResponseCode::from_code(v & 0xf),
        )
    }

    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = 0;
        n += w.write_u16(self.id)?;
        n += w.write_u16(self.flags_word())?;
        n += w.write_u16(self.qd_count)?;
        n += w.write_u16(self.an_count)?;
        n += w.write_u16(self.ns_count)?;
        n += w.write_u16(self.ar_count)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader) -> DnsResult<Header> {
        let id = r.read_u16()?;
        let flags = r.read_u16()?;
        let (qr, opcode, authoritative, truncated, recursion_desired, recursion_available, z, authentic_data, checking_disabled, rcode) =
            Self::from_flags_word(flags);
        let qd_count = r.read_u16()?;
        let an_count = r.read_u16()?;
        let ns_count = r.read_u16()?;
        let ar_count = r.read_u16()?;
        Ok(Header {
            id,
            qr,
            opcode,
            authoritative,
            truncated,
            recursion_desired,
            recursion_available,
            z,
            authentic_data,
            checking_disabled,
            rcode,
            qd_count,
            an_count,
            ns_count,
            ar_count,
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "opcode: {}, status: {}, id: {}",
            self.opcode, self.rcode, self.id
        )?;
        write!(f, "\n;; flags:")?;
        if self.qr {
            write!(f, " qr")?;
        }
        if self.authoritative {
            write!(f, " aa")?;
        }
        if self.truncated {
            write!(f, " tc")?;
        }
        if self.recursion_desired {
            write!(f, " rd")?;
        }
        if self.recursion_available {
            write!(f, " ra")?;
        }
        if self.authentic_data {
            write!(f, " ad")?;
        }
        if self.checking_disabled {
            write!(f, " cd")?;
        }
        write!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.qd_count, self.an_count, self.ns_count, self.ar_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_round_trip() {
        let mut h = Header::default();
        h.qr = true;
        h.recursion_desired = true;
        h.recursion_available = true;
        h.authentic_data = true;
        h.rcode = ResponseCode::NoError;
        h.qd_count = 1;
        h.an_count = 1;

        let mut w = WireWriter::new();
        h.pack(&mut w).unwrap();
        let bytes = w.freeze(12).unwrap();

        let mut r = PacketReader::new(&bytes);
        let back = Header::unpack(&mut r).unwrap();
        assert_eq!(back, h);
    }

    #[test]
    fn known_example_query_header() {
        // id=2, RD set, 1 question, no other sections.
        let bytes = crate::util::test_support::from_hex("0002010000010000000000000000");
        let mut r = PacketReader::new(&bytes[..12]);
        let h = Header::unpack(&mut r).unwrap();
        assert_eq!(h.id, 2);
        assert!(h.recursion_desired);
        assert!(!h.qr);
        assert_eq!(h.qd_count, 1);
    }
}
