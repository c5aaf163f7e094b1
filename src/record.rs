//! The resource record: the header tuple `(name, type, class, ttl,
//! rdlength)` from spec.md §3/§4.5, composed with a [`RecordData`]
//! payload. `rdlength` is never stored — it is a placeholder patched
//! after `rdata` is packed, and recomputed on every `pack` call.
use std::fmt;

use crate::class::Class;
use crate::edns::OptTtl;
use crate::error::DnsResult;
use crate::name::Fqdn;
use crate::rdata::RecordData;
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

/// One resource record. For an OPT pseudo-RR, `class`/`ttl` are not the
/// canonical source of the UDP payload size / extended-rcode word — those
/// live on the embedded [`crate::edns::Opt`] (`class`/`ttl` are still kept
/// in sync so a caller reading them directly sees consistent values).
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub name: Fqdn,
    pub class: Class,
    pub ttl: u32,
    pub rdata: RecordData,
}

impl ResourceRecord {
    pub fn new(name: Fqdn, class: Class, ttl: u32, rdata: RecordData) -> Self {
        ResourceRecord { name, class, ttl, rdata }
    }

    pub fn rrtype(&self) -> RRType {
        self.rdata.rrtype()
    }

    /// Writes the header with a placeholder rdlength, packs the RDATA,
    /// then back-patches rdlength at the recorded offset.
    pub fn pack(&self, w: &mut WireWriter, compress: bool) -> DnsResult<usize> {
        let mut n = w.write_name(&self.name, compress)?;
        n += w.write_u16(self.rrtype().code())?;

        let (class_code, ttl_value) = match &self.rdata {
            RecordData::Opt(opt) => (opt.udp_payload_size, opt.ttl.pack()),
            _ => (self.class.code(), self.ttl),
        };
        n += w.write_u16(class_code)?;
        n += w.write_u32(ttl_value)?;

        let rdlength_pos = w.len();
        n += w.write_u16(0)?;
        let rdata_len = self.rdata.pack(w, compress)?;
        w.patch_u16(rdlength_pos, rdata_len as u16)?;
        n += rdata_len;

        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader) -> DnsResult<ResourceRecord> {
        let name = r.read_name()?;
        let rrtype = RRType::from_code(r.read_u16()?);
        let class_raw = r.read_u16()?;
        let ttl_raw = r.read_u32()?;
        let rdlength = r.read_u16()?;

        let mut sub = r.rdata_reader(rdlength as usize)?;
        let mut rdata = RecordData::unpack(rrtype, &mut sub, rdlength)?;
        if let RecordData::Opt(ref mut opt) = rdata {
            opt.udp_payload_size = class_raw;
            opt.ttl = OptTtl::unpack(ttl_raw);
        }

        Ok(ResourceRecord {
            name,
            class: Class::from_code(class_raw),
            ttl: ttl_raw,
            rdata,
        })
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let RecordData::Opt(opt) = &self.rdata {
            return write!(f, "{opt}");
        }
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.name,
            self.ttl,
            self.class,
            self.rrtype(),
            self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdata::address::A;
    use std::net::Ipv4Addr;

    #[test]
    fn a_record_round_trips_with_rdlength_patched() {
        let rr = ResourceRecord::new(
            Fqdn::parse("example.com.").unwrap(),
            Class::IN,
            300,
            RecordData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
        );
        let mut w = WireWriter::new();
        let n = rr.pack(&mut w, false).unwrap();
        let bytes = w.freeze(n).unwrap();

        // rdlength octets (right before the 4-byte rdata) must read 4.
        assert_eq!(&bytes[bytes.len() - 6..bytes.len() - 4], &[0x00, 0x04]);

        let mut r = PacketReader::new(&bytes);
        let back = ResourceRecord::unpack(&mut r).unwrap();
        assert_eq!(back, rr);
    }

    #[test]
    fn opt_record_reads_class_and_ttl_as_edns_fields() {
        use crate::edns::Opt;

        let opt = Opt {
            udp_payload_size: 1232,
            ttl: OptTtl { extended_rcode: 0, version: 0, dnssec_ok: true, z: 0 },
            options: Vec::new(),
        };
        let rr = ResourceRecord::new(Fqdn::root(), Class::IN, 0, RecordData::Opt(opt.clone()));
        let mut w = WireWriter::new();
        let n = rr.pack(&mut w, false).unwrap();
        let bytes = w.freeze(n).unwrap();

        let mut r = PacketReader::new(&bytes);
        let back = ResourceRecord::unpack(&mut r).unwrap();
        match back.rdata {
            RecordData::Opt(decoded) => {
                assert_eq!(decoded.udp_payload_size, 1232);
                assert!(decoded.ttl.dnssec_ok);
            }
            _ => panic!("expected OPT"),
        }
    }
}
