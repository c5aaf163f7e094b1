//! The DNS message (RFC 1035 §4): header, question section, and the three
//! record sections. Section counts are stored on the header but kept in
//! sync by construction here rather than trusted from a caller (spec.md
//! §3, "Message ... with the header counts stored redundantly but kept in
//! sync by construction").
use std::fmt;

use crate::edns::Opt;
use crate::error::{DnsResult, Error};
use crate::header::Header;
use crate::question::Question;
use crate::rdata::RecordData;
use crate::record::ResourceRecord;
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    pub header: Header,
    pub question: Vec<Question>,
    pub answer: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Message {
    pub fn new() -> Self {
        Message::default()
    }

    fn synced_header(&self) -> Header {
        let mut h = self.header;
        h.qd_count = self.question.len() as u16;
        h.an_count = self.answer.len() as u16;
        h.ns_count = self.authority.len() as u16;
        h.ar_count = self.additional.len() as u16;
        h
    }

    /// Packs the whole message. `compress` selects RFC 1035 §4.1.4 name
    /// compression for every name in the message (a single compressor is
    /// shared for the whole emission, per spec.md §4.2/§5).
    pub fn pack(&self, compress: bool) -> DnsResult<Vec<u8>> {
        let mut w = if compress {
            WireWriter::with_compression()
        } else {
            WireWriter::new()
        };

        self.synced_header().pack(&mut w)?;
        for q in &self.question {
            q.pack(&mut w, compress)?;
        }
        for rr in self.answer.iter().chain(&self.authority).chain(&self.additional) {
            rr.pack(&mut w, compress)?;
        }

        let total = w.len();
        w.freeze(total)
    }

    pub fn unpack(bytes: &[u8]) -> DnsResult<Message> {
        let mut r = PacketReader::new(bytes);
        let header = Header::unpack(&mut r)?;

        let mut question = Vec::with_capacity(header.qd_count as usize);
        for _ in 0..header.qd_count {
            question.push(Question::unpack(&mut r)?);
        }

        let read_section = |r: &mut PacketReader, count: u16| -> DnsResult<Vec<ResourceRecord>> {
            let mut section = Vec::with_capacity(count as usize);
            for _ in 0..count {
                section.push(ResourceRecord::unpack(r)?);
            }
            Ok(section)
        };

        let answer = read_section(&mut r, header.an_count)?;
        let authority = read_section(&mut r, header.ns_count)?;
        let additional = read_section(&mut r, header.ar_count)?;

        Ok(Message { header, question, answer, authority, additional })
    }

    /// The EDNS(0) OPT pseudo-RR, if the additional section carries one
    /// (there is at most one per RFC 6891).
    pub fn edns(&self) -> Option<&Opt> {
        self.additional.iter().find_map(|rr| match &rr.rdata {
            RecordData::Opt(opt) => Some(opt),
            _ => None,
        })
    }

    fn format_section(f: &mut fmt::Formatter<'_>, title: &str, records: &[ResourceRecord]) -> fmt::Result {
        let visible: Vec<&ResourceRecord> =
            records.iter().filter(|rr| rr.rrtype() != RRType::OPT).collect();
        if visible.is_empty() {
            return Ok(());
        }
        writeln!(f, ";; {title} SECTION:")?;
        for rr in visible {
            writeln!(f, "{rr}")?;
        }
        writeln!(f)
    }

    /// Renders the `application/dns-json` shape (RFC 8427-adjacent, as
    /// popularised by the DoH JSON APIs spec.md §4.6 names).
    pub fn to_json_object(&self) -> serde_json::Value {
        let question: Vec<serde_json::Value> = self
            .question
            .iter()
            .map(|q| {
                serde_json::json!({
                    "name": q.qname.to_string(),
                    "type": q.qtype.code(),
                })
            })
            .collect();

        let answer: Vec<serde_json::Value> = self
            .answer
            .iter()
            .map(|rr| {
                serde_json::json!({
                    "name": rr.name.to_string(),
                    "type": rr.rrtype().code(),
                    "TTL": rr.ttl,
                    "data": rr.rdata.to_string(),
                })
            })
            .collect();

        let mut obj = serde_json::json!({
            "Status": self.header.rcode.code(),
            "TC": self.header.truncated,
            "RD": self.header.recursion_desired,
            "RA": self.header.recursion_available,
            "AD": self.header.authentic_data,
            "CD": self.header.checking_disabled,
            "Question": question,
            "Answer": answer,
        });

        if self.header.authoritative {
            obj["AA"] = serde_json::json!(true);
        }

        if let Some(opt) = self.edns() {
            for option in &opt.options {
                if let crate::edns::OptionData::ClientSubnet { scope_prefix, .. } = &option.data {
                    if *scope_prefix != 0 {
                        obj["edns_client_subnet"] = serde_json::json!(option.to_string());
                    }
                }
            }
        }

        obj
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ";; ->>HEADER<<- {}", self.header)?;
        writeln!(f)?;

        if let Some(opt) = self.edns() {
            write!(f, "{opt}")?;
            writeln!(f)?;
        }

        if !self.question.is_empty() {
            writeln!(f, ";; QUESTION SECTION:")?;
            for q in &self.question {
                writeln!(f, ";{q}")?;
            }
            writeln!(f)?;
        }

        Self::format_section(f, "ANSWER", &self.answer)?;
        Self::format_section(f, "AUTHORITY", &self.authority)?;
        Self::format_section(f, "ADDITIONAL", &self.additional)?;

        Ok(())
    }
}

/// Whether a section may legally contain an RR of `rrtype` at all —
/// used by the builder to reject e.g. an OPT record pushed through
/// `answer()` instead of the dedicated `opt()` sub-builder.
pub(crate) fn reject_opt_outside_additional(rrtype: RRType) -> DnsResult<()> {
    if rrtype == RRType::OPT {
        return Err(Error::semantic(
            "OPT pseudo-records belong only in the additional section, built via MessageBuilder::opt",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Class;
    use crate::name::Fqdn;
    use crate::rdata::address::A;
    use std::net::Ipv4Addr;

    fn query_message() -> Message {
        let mut m = Message::new();
        m.header.id = 2;
        m.header.recursion_desired = true;
        m.question.push(Question::new(
            Fqdn::parse("example.com.").unwrap(),
            RRType::A,
            Class::IN,
        ));
        m
    }

    #[test]
    fn known_query_bytes_round_trip() {
        let bytes = crate::util::test_support::from_hex(
            "000201000001000000000000076578616d706c6503636f6d0000010001",
        );
        let decoded = Message::unpack(&bytes).unwrap();
        assert_eq!(decoded.header.id, 2);
        assert!(decoded.header.recursion_desired);
        assert_eq!(decoded.question.len(), 1);
        assert_eq!(decoded.question[0].qname.to_string(), "example.com.");

        let repacked = decoded.pack(false).unwrap();
        assert_eq!(repacked, bytes);
    }

    #[test]
    fn header_counts_sync_to_section_lengths() {
        let mut m = query_message();
        m.answer.push(ResourceRecord::new(
            Fqdn::parse("example.com.").unwrap(),
            Class::IN,
            300,
            RecordData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
        ));
        let bytes = m.pack(false).unwrap();
        let decoded = Message::unpack(&bytes).unwrap();
        assert_eq!(decoded.header.an_count, 1);
        assert_eq!(decoded.answer.len(), 1);
    }

    #[test]
    fn compressed_and_uncompressed_forms_decode_identically() {
        let mut m = query_message();
        for _ in 0..2 {
            m.answer.push(ResourceRecord::new(
                Fqdn::parse("example.com.").unwrap(),
                Class::IN,
                300,
                RecordData::Txt(crate::rdata::txt::Txt(vec![
                    crate::charstring::CharacterString::from_bytes(b"hello".to_vec()).unwrap(),
                ])),
            ));
        }
        let uncompressed = m.pack(false).unwrap();
        let compressed = m.pack(true).unwrap();
        assert!(compressed.len() < uncompressed.len());
        assert_eq!(Message::unpack(&uncompressed).unwrap(), Message::unpack(&compressed).unwrap());
    }

    #[test]
    fn json_presentation_matches_known_example() {
        let bytes = crate::util::test_support::from_hex(
            "c58781a00001000100000001076578616d706c6503636f6d0000010001c00c00010001000145c200045db8d82200002904d0000000000000",
        );
        let m = Message::unpack(&bytes).unwrap();
        let json = m.to_json_object();
        assert_eq!(json["Status"], 0);
        assert_eq!(json["TC"], false);
        assert_eq!(json["RD"], true);
        assert_eq!(json["RA"], true);
        assert_eq!(json["AD"], true);
        assert_eq!(json["CD"], false);
        assert_eq!(json["Question"][0]["name"], "example.com.");
        assert_eq!(json["Question"][0]["type"], 1);
        assert_eq!(json["Answer"][0]["name"], "example.com.");
        assert_eq!(json["Answer"][0]["type"], 1);
        assert_eq!(json["Answer"][0]["TTL"], 83394);
        assert_eq!(json["Answer"][0]["data"], "93.184.216.34");
    }
}
