//! The question section entry: `(qname, qtype, qclass)` (RFC 1035 §4.1.2).
use std::fmt;

use crate::class::Class;
use crate::error::DnsResult;
use crate::name::Fqdn;
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Fqdn,
    pub qtype: RRType,
    pub qclass: Class,
}

impl Question {
    pub fn new(qname: Fqdn, qtype: RRType, qclass: Class) -> Self {
        Question { qname, qtype, qclass }
    }

    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        let mut n = w.write_name(&self.qname, compress)?;
        n += w.write_u16(self.qtype.code())?;
        n += w.write_u16(self.qclass.code())?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader) -> DnsResult<Question> {
        let qname = r.read_name()?;
        let qtype = RRType::from_code(r.read_u16()?);
        let qclass = Class::from_code(r.read_u16()?);
        Ok(Question { qname, qtype, qclass })
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t\t{}\t{}", self.qname, self.qclass, self.qtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_and_unpack_round_trip() {
        let q = Question::new(Fqdn::parse("example.com.").unwrap(), RRType::A, Class::IN);
        let mut w = WireWriter::new();
        q.pack(&mut w, false).unwrap();
        let bytes = w.freeze(18).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Question::unpack(&mut r).unwrap(), q);
    }
}
