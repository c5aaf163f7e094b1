//! String<->bytes codecs used by record presentation: hex, hex with
//! whitespace grouping, base32 (standard + extended-hex alphabets, with a
//! configurable padding character), and base64.
use data_encoding::{Encoding, Specification};

use crate::error::{DnsResult, Error};

/// Lower-case hex, no separators (used for `\# len hex` generic rdata and
/// digest presentation).
pub fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

pub fn to_hex_upper(bytes: &[u8]) -> String {
    to_hex(bytes).to_ascii_uppercase()
}

/// Decodes a hex string, ignoring ASCII whitespace between byte pairs
/// (RFC 3597 generic rdata presentation groups hex in pairs separated by
/// whitespace across parenthesised lines).
pub fn from_hex(s: &str) -> DnsResult<Vec<u8>> {
    let clean: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if clean.len() % 2 != 0 {
        return Err(Error::parse("hex string has an odd number of digits"));
    }
    let mut out = Vec::with_capacity(clean.len() / 2);
    let bytes = clean.as_bytes();
    for chunk in bytes.chunks(2) {
        let pair = std::str::from_utf8(chunk).unwrap();
        let b = u8::from_str_radix(pair, 16).map_err(|_| Error::parse("invalid hex digit"))?;
        out.push(b);
    }
    Ok(out)
}

/// Accepts the NSAP presentation form: an optional `0x` prefix and `.`
/// separators interspersed with hex digits.
pub fn from_nsap_hex(s: &str) -> DnsResult<Vec<u8>> {
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    let cleaned: String = s.chars().filter(|&c| c != '.').collect();
    from_hex(&cleaned)
}

/// Which RFC 4648 base32 alphabet to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base32Alphabet {
    Standard,
    ExtendedHex,
}

/// A base32 codec with a caller-chosen padding character (default `=`),
/// matching the `with_padding("")` "no padding" escape hatch from the
/// collaborator interface.
pub struct Base32 {
    encoding: Encoding,
}

impl Base32 {
    pub fn new(alphabet: Base32Alphabet) -> Self {
        Self::with_padding(alphabet, Some('='))
    }

    /// `padding = None` disables padding entirely (the `with_padding("")`
    /// escape hatch); `padding = Some(c)` uses `c` as the pad character,
    /// which must not itself be a member of the alphabet.
    pub fn with_padding(alphabet: Base32Alphabet, padding: Option<char>) -> Self {
        let mut spec = Specification::new();
        spec.symbols = match alphabet {
            Base32Alphabet::Standard => "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567".to_string(),
            Base32Alphabet::ExtendedHex => "0123456789ABCDEFGHIJKLMNOPQRSTUV".to_string(),
        };
        spec.padding = padding;
        let encoding = spec.encoding().expect("valid base32 specification");
        Base32 { encoding }
    }

    pub fn encode(&self, data: &[u8]) -> String {
        self.encoding.encode(data)
    }

    pub fn decode(&self, text: &str) -> DnsResult<Vec<u8>> {
        self.encoding
            .decode(text.as_bytes())
            .map_err(|e| Error::parse(format!("invalid base32: {e}")))
    }
}

/// Standard (RFC 4648 §4) base64, used for DNSKEY/RRSIG public keys and
/// signatures and a handful of other binary payloads.
pub fn base64_encode(data: &[u8]) -> String {
    data_encoding::BASE64.encode(data)
}

pub fn base64_decode(text: &str) -> DnsResult<Vec<u8>> {
    // the base64 alphabet in the wild is frequently unpadded or whitespace
    // separated across multiple presentation lines; be lenient on input.
    let clean: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    data_encoding::BASE64
        .decode(clean.as_bytes())
        .or_else(|_| data_encoding::BASE64_NOPAD.decode(clean.trim_end_matches('=').as_bytes()))
        .map_err(|e| Error::parse(format!("invalid base64: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4648 §10 test vectors.
    const VECTORS: &[(&str, &str)] = &[
        ("", ""),
        ("f", "MY======"),
        ("fo", "MZXQ===="),
        ("foo", "MZXW6==="),
        ("foob", "MZXW6YQ="),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn base32_standard_vectors_round_trip() {
        let codec = Base32::new(Base32Alphabet::Standard);
        for (plain, encoded) in VECTORS {
            assert_eq!(codec.encode(plain.as_bytes()), *encoded);
            assert_eq!(codec.decode(encoded).unwrap(), plain.as_bytes());
        }
    }

    #[test]
    fn base32_custom_padding_char() {
        let codec = Base32::with_padding(Base32Alphabet::Standard, Some('@'));
        let encoded = codec.encode(b"foobar");
        assert_eq!(encoded, "MZXW6YTBOI@@@@@@");
    }

    #[test]
    fn base32_no_padding() {
        let codec = Base32::with_padding(Base32Alphabet::Standard, None);
        let encoded = codec.encode(b"foobar");
        assert_eq!(encoded, "MZXW6YTBOI");
        assert_eq!(codec.decode(&encoded).unwrap(), b"foobar");
    }

    #[test]
    fn base32_malformed_padding_is_rejected() {
        let codec = Base32::new(Base32Alphabet::Standard);
        // valid-length-looking strings with corrupted padding
        assert!(codec.decode("MY=====").is_err()); // 7 chars, not a valid block
        assert!(codec.decode("MZXW6Y==").is_err()); // trailing === truncated to ==
    }

    #[test]
    fn hex_round_trip() {
        let bytes = vec![0xde, 0xad, 0xbe, 0xef];
        assert_eq!(to_hex(&bytes), "deadbeef");
        assert_eq!(from_hex("de ad be ef").unwrap(), bytes);
    }

    #[test]
    fn nsap_hex_accepts_prefix_and_dots() {
        assert_eq!(from_nsap_hex("0x39.00.00.00.00.00.00.1f.00.00.00.00.00.00.20.f8").unwrap(),
            vec![0x39, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0xf8]);
    }
}
