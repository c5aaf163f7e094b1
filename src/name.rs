//! Domain names (RFC 1035 §3.1, §4.1.4).
//!
//! A [`Fqdn`] is a label sequence terminated by the null (root) label. The
//! root label is always present as the last element so the root name
//! itself is represented as a single-element sequence holding only it —
//! this mirrors the "null label is canonical and always present
//! internally" invariant from the data model.
use std::fmt;

use crate::charstring::{escape_label_byte, unescape_presentation};
use crate::error::{DnsResult, Error};
use crate::limits::{MAX_LABEL_OCTETS, MAX_NAME_OCTETS};

/// An owned, immutable domain name. Cloning is deep (each label is an owned
/// `Vec<u8>`) per the data model's ownership rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fqdn {
    /// Non-root labels, left to right. The trailing null label is implicit
    /// and not stored in this vector; `is_root()` is true iff it is empty.
    labels: Vec<Vec<u8>>,
}

impl Fqdn {
    /// The root name ".".
    pub fn root() -> Self {
        Fqdn { labels: Vec::new() }
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Builds a name from already-split label bytes, validating length
    /// bounds (RFC 1035 §3.1: 1..=63 octets/label, <=255 octets total).
    pub fn from_labels(labels: Vec<Vec<u8>>) -> DnsResult<Self> {
        let mut total = 1usize; // the trailing null length octet
        for label in &labels {
            if label.is_empty() || label.len() > MAX_LABEL_OCTETS {
                return Err(Error::parse(format!(
                    "label length {} out of range 1..={MAX_LABEL_OCTETS}",
                    label.len()
                )));
            }
            total += label.len() + 1;
        }
        if total > MAX_NAME_OCTETS {
            return Err(Error::parse(format!(
                "domain name encodes to {total} octets, exceeding {MAX_NAME_OCTETS}"
            )));
        }
        if let Some(top) = labels.last() {
            if top.iter().all(|b| b.is_ascii_digit()) {
                return Err(Error::parse(
                    "top-level label must not be all-digits (RFC 3696)",
                ));
            }
        }
        Ok(Fqdn { labels })
    }

    /// Labels in left-to-right order, root excluded.
    pub fn labels(&self) -> impl Iterator<Item = &[u8]> {
        self.labels.iter().map(|l| l.as_slice())
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    /// Total wire length including the trailing null label.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// The suffix starting at label index `i` (0 = whole name), used by the
    /// name compressor to build its cache key.
    pub fn suffix(&self, i: usize) -> &[Vec<u8>] {
        &self.labels[i..]
    }

    /// True if `self` is `other` or a descendant of it (ancestry predicate,
    /// case-sensitive label-wise comparison per the data model).
    pub fn is_subdomain_of(&self, other: &Fqdn) -> bool {
        if other.labels.len() > self.labels.len() {
            return false;
        }
        let offset = self.labels.len() - other.labels.len();
        self.labels[offset..] == other.labels[..]
    }

    /// Parses RFC 1035 presentation syntax: labels separated by unescaped
    /// `.`, with `\X` and `\DDD` escapes understood inside a label.
    pub fn parse(text: &str) -> DnsResult<Self> {
        if text.is_empty() {
            return Err(Error::parse("empty domain name"));
        }
        if text == "." {
            return Ok(Fqdn::root());
        }

        let mut labels = Vec::new();
        let mut current = Vec::new();
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'.' => {
                    labels.push(std::mem::take(&mut current));
                    i += 1;
                }
                b'\\' => {
                    let (byte, consumed) = unescape_presentation(&bytes[i..])?;
                    current.push(byte);
                    i += consumed;
                }
                b => {
                    current.push(b);
                    i += 1;
                }
            }
        }
        // a trailing '.' leaves `current` empty; an absent trailing '.'
        // means the last label is still in `current`.
        if !current.is_empty() || !text.ends_with('.') {
            labels.push(current);
        }
        Fqdn::from_labels(labels)
    }
}

impl fmt::Display for Fqdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in &self.labels {
            for &b in label {
                escape_label_byte(b, f)?;
            }
            write!(f, ".")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_round_trips() {
        let root = Fqdn::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), ".");
        assert_eq!(root.wire_len(), 1);
    }

    #[test]
    fn parse_and_present() {
        let name = Fqdn::parse("www.example.com").unwrap();
        assert_eq!(name.to_string(), "www.example.com.");
        assert_eq!(name.label_count(), 3);

        let name2 = Fqdn::parse("www.example.com.").unwrap();
        assert_eq!(name, name2);
    }

    #[test]
    fn rejects_all_digit_tld() {
        assert!(Fqdn::parse("foo.123").is_err());
    }

    #[test]
    fn rejects_oversized_label() {
        let long = "a".repeat(64);
        assert!(Fqdn::parse(&format!("{long}.com")).is_err());
    }

    #[test]
    fn subdomain_predicate() {
        let parent = Fqdn::parse("example.com.").unwrap();
        let child = Fqdn::parse("www.example.com.").unwrap();
        assert!(child.is_subdomain_of(&parent));
        assert!(!parent.is_subdomain_of(&child));
        assert!(parent.is_subdomain_of(&parent));
    }

    #[test]
    fn escaped_dot_stays_in_one_label() {
        let name = Fqdn::parse(r"a\.b.com.").unwrap();
        assert_eq!(name.label_count(), 2);
        assert_eq!(name.to_string(), r"a\.b.com.");
    }
}
