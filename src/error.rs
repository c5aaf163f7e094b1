//! A dedicated error type for everything that can go wrong decoding or
//! encoding a DNS message, either in wire format or in presentation format.
use thiserror::Error;

/// The crate-wide `Result` alias.
pub type DnsResult<T> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input: wire bounds violation, bad name length, compression
    /// loop, invalid enum value, malformed presentation syntax, bad base-N
    /// payload.
    #[error("parse error: {0}")]
    Parse(String),

    /// Well-formed input that violates a higher-level invariant: EDNS
    /// version out of range, bad SRV owner decomposition, serial out of
    /// range, prefix length exceeding address width.
    #[error("semantic error: {0}")]
    Semantic(String),

    /// A write past the 65535-byte writer cap, or a read past the end of
    /// the buffer being parsed. Kept distinct from `Parse` so callers can
    /// tell "malformed input" from "need a bigger buffer".
    #[error("range error: {0}")]
    Range(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    pub fn semantic(msg: impl Into<String>) -> Self {
        Error::Semantic(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Error::Range(msg.into())
    }
}
