//! A fluent [`Message`] construction API (spec.md §4.6), so a caller
//! building a query or response by hand does not have to poke at
//! `Header`'s individual fields or remember to keep section counts in
//! sync — [`Message::pack`]/[`Message::unpack`] already do that.
use crate::class::Class;
use crate::edns::{EdnsOption, Opt, OptTtl};
use crate::header::{Header, OpCode, ResponseCode};
use crate::message::Message;
use crate::name::Fqdn;
use crate::question::Question;
use crate::rdata::RecordData;
use crate::record::ResourceRecord;
use crate::rrtype::RRType;

/// Builds a [`Message`] field by field. Each method takes `self` by value
/// and returns it, so calls chain: `MessageBuilder::query(...).question(...).build()`.
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    pub fn new() -> Self {
        MessageBuilder::default()
    }

    /// A query message: `QR=0`, the given id, `RD` as requested, opcode
    /// `Query`.
    pub fn query(id: u16, recursion_desired: bool) -> Self {
        let mut b = MessageBuilder::new();
        b.message.header.id = id;
        b.message.header.qr = false;
        b.message.header.opcode = OpCode::Query;
        b.message.header.recursion_desired = recursion_desired;
        b
    }

    /// A response to `request`: same id and question, `QR=1`, the given
    /// rcode, `RA` as requested, `RD` echoed from the request.
    pub fn response(request: &Message, rcode: ResponseCode, recursion_available: bool) -> Self {
        let mut b = MessageBuilder::new();
        b.message.header.id = request.header.id;
        b.message.header.qr = true;
        b.message.header.opcode = request.header.opcode;
        b.message.header.recursion_desired = request.header.recursion_desired;
        b.message.header.recursion_available = recursion_available;
        b.message.header.rcode = rcode;
        b.message.question = request.question.clone();
        b
    }

    pub fn id(mut self, id: u16) -> Self {
        self.message.header.id = id;
        self
    }

    pub fn opcode(mut self, opcode: OpCode) -> Self {
        self.message.header.opcode = opcode;
        self
    }

    pub fn authoritative(mut self, value: bool) -> Self {
        self.message.header.authoritative = value;
        self
    }

    pub fn recursion_desired(mut self, value: bool) -> Self {
        self.message.header.recursion_desired = value;
        self
    }

    pub fn recursion_available(mut self, value: bool) -> Self {
        self.message.header.recursion_available = value;
        self
    }

    pub fn authentic_data(mut self, value: bool) -> Self {
        self.message.header.authentic_data = value;
        self
    }

    pub fn checking_disabled(mut self, value: bool) -> Self {
        self.message.header.checking_disabled = value;
        self
    }

    pub fn rcode(mut self, rcode: ResponseCode) -> Self {
        self.message.header.rcode = rcode;
        self
    }

    pub fn question(mut self, qname: Fqdn, qtype: RRType, qclass: Class) -> Self {
        self.message.question.push(Question::new(qname, qtype, qclass));
        self
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.message.answer.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.message.authority.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.message.additional.push(record);
        self
    }

    /// Attaches an EDNS(0) OPT pseudo-RR to the additional section, built
    /// with [`OptBuilder`]. Replaces any OPT already present (RFC 6891
    /// permits at most one per message).
    pub fn opt(mut self, opt: Opt) -> Self {
        self.message.additional.retain(|rr| rr.rrtype() != RRType::OPT);
        self.message
            .additional
            .push(ResourceRecord::new(Fqdn::root(), Class::IN, 0, RecordData::Opt(opt)));
        self
    }

    pub fn build(self) -> Message {
        self.message
    }
}

/// A fluent builder for the EDNS(0) OPT pseudo-RR's payload, handed to
/// [`MessageBuilder::opt`].
#[derive(Debug, Clone)]
pub struct OptBuilder {
    opt: Opt,
}

impl OptBuilder {
    pub fn new(udp_payload_size: u16) -> Self {
        OptBuilder { opt: Opt { udp_payload_size, ttl: OptTtl::default(), options: Vec::new() } }
    }

    pub fn dnssec_ok(mut self, value: bool) -> Self {
        self.opt.ttl.dnssec_ok = value;
        self
    }

    pub fn version(mut self, version: u8) -> Self {
        self.opt.ttl.version = version;
        self
    }

    pub fn option(mut self, option: EdnsOption) -> Self {
        self.opt.options.push(option);
        self
    }

    pub fn build(self) -> Opt {
        self.opt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::rdata::address::A;
    use std::net::Ipv4Addr;

    #[test]
    fn query_builder_sets_expected_flags() {
        let msg = MessageBuilder::query(42, true)
            .question(Fqdn::parse("example.com.").unwrap(), RRType::A, Class::IN)
            .build();
        assert_eq!(msg.header.id, 42);
        assert!(!msg.header.qr);
        assert!(msg.header.recursion_desired);
        assert_eq!(msg.question.len(), 1);
    }

    #[test]
    fn response_builder_echoes_request_question_and_id() {
        let request = MessageBuilder::query(7, true)
            .question(Fqdn::parse("example.com.").unwrap(), RRType::A, Class::IN)
            .build();
        let response = MessageBuilder::response(&request, ResponseCode::NoError, true)
            .answer(ResourceRecord::new(
                Fqdn::parse("example.com.").unwrap(),
                Class::IN,
                300,
                RecordData::A(A(Ipv4Addr::new(93, 184, 216, 34))),
            ))
            .build();
        assert_eq!(response.header.id, 7);
        assert!(response.header.qr);
        assert_eq!(response.question, request.question);
        assert_eq!(response.answer.len(), 1);
    }

    #[test]
    fn opt_builder_produces_a_single_additional_record() {
        let msg = MessageBuilder::query(1, false)
            .opt(OptBuilder::new(1232).dnssec_ok(true).build())
            .opt(OptBuilder::new(4096).build())
            .build();
        assert_eq!(msg.additional.len(), 1);
        assert_eq!(msg.edns().unwrap().udp_payload_size, 4096);
    }

    #[test]
    fn header_is_kept_in_sync_on_pack() {
        let msg = MessageBuilder::new()
            .question(Fqdn::parse("a.").unwrap(), RRType::A, Class::IN)
            .build();
        let _ = Header::default();
        let bytes = msg.pack(false).unwrap();
        let decoded = Message::unpack(&bytes).unwrap();
        assert_eq!(decoded.header.qd_count, 1);
    }
}
