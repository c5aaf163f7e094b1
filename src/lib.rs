//! A wire- and presentation-format codec for DNS messages and resource
//! records (RFC 1035 and friends). This crate is concerned only with
//! encoding, decoding, and textual (zonefile) representation; it does not
//! open sockets, resolve names, verify DNSSEC signatures, or drive zone
//! transfers — see each module's doc comment for the RFCs it implements.
//!
//! The top-level entry points are [`message::Message`] for whole packets,
//! [`builder::MessageBuilder`] for constructing one, and
//! [`scanner::Scanner`] for parsing zonefile-style text.

pub mod bitmap;
pub mod builder;
pub mod charstring;
pub mod class;
pub mod compress;
pub mod edns;
pub mod encoding;
pub mod error;
pub mod header;
pub mod lexer;
pub mod limits;
pub mod message;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;
pub mod rrtype;
pub mod scanner;
pub mod serial;
pub mod util;
pub mod wire;

pub use builder::{MessageBuilder, OptBuilder};
pub use class::Class;
pub use error::{DnsResult, Error};
pub use header::{Header, OpCode, ResponseCode};
pub use message::Message;
pub use name::Fqdn;
pub use question::Question;
pub use record::ResourceRecord;
pub use rrtype::RRType;
pub use scanner::{ScanState, Scanner};
pub use serial::Serial;
