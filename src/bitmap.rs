//! The NSEC/NSEC3 type bitmap (RFC 4034 §4.1.2, RFC 3845): the RR-type
//! space split into 256 windows of up to 32 bytes each, encoded as a
//! sequence of `(window, length, bits)` triples in strictly increasing
//! window order.
use crate::error::{DnsResult, Error};
use crate::rrtype::RRType;
use crate::wire::{PacketReader, WireWriter};

/// A set of RR types, as carried by NSEC/NSEC3's "type bit maps" field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeBitmap {
    types: Vec<RRType>,
}

impl TypeBitmap {
    pub fn new(mut types: Vec<RRType>) -> Self {
        types.sort_by_key(|t| t.code());
        types.dedup();
        TypeBitmap { types }
    }

    pub fn types(&self) -> &[RRType] {
        &self.types
    }

    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut written = 0;
        let mut i = 0;
        while i < self.types.len() {
            let window = (self.types[i].code() >> 8) as u8;
            let mut bytes = [0u8; 32];
            let mut max_byte = 0usize;
            while i < self.types.len() && (self.types[i].code() >> 8) as u8 == window {
                let lower = (self.types[i].code() & 0xff) as usize;
                let byte_idx = lower / 8;
                bytes[byte_idx] |= 0x80 >> (lower % 8);
                max_byte = max_byte.max(byte_idx + 1);
                i += 1;
            }
            written += w.write_u8(window)?;
            written += w.write_u8(max_byte as u8)?;
            written += w.write_bytes(&bytes[..max_byte])?;
        }
        Ok(written)
    }

    pub fn unpack(r: &mut PacketReader, rdlen_remaining: usize) -> DnsResult<TypeBitmap> {
        let mut types = Vec::new();
        let mut consumed = 0usize;
        let mut last_window: Option<i32> = None;

        while consumed < rdlen_remaining {
            let window = r.read_u8()? as i32;
            let len = r.read_u8()? as usize;
            consumed += 2;
            if let Some(last) = last_window {
                if window <= last {
                    return Err(Error::parse(
                        "NSEC/NSEC3 bitmap windows must appear in strictly increasing order",
                    ));
                }
            }
            last_window = Some(window);
            if !(1..=32).contains(&len) {
                return Err(Error::parse(format!(
                    "NSEC/NSEC3 bitmap window length {len} out of range 1..=32"
                )));
            }
            if consumed + len > rdlen_remaining {
                return Err(Error::parse(
                    "NSEC/NSEC3 bitmap window length exceeds remaining RDATA",
                ));
            }
            let bytes = r.read_bytes(len)?;
            consumed += len;
            for (byte_idx, &b) in bytes.iter().enumerate() {
                for bit in 0..8 {
                    if b & (0x80 >> bit) != 0 {
                        let code = ((window as u32) << 8) | (byte_idx * 8 + bit) as u32;
                        types.push(RRType::from_code(code as u16));
                    }
                }
            }
        }

        Ok(TypeBitmap { types })
    }
}

impl std::fmt::Display for TypeBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.types.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_and_sorts_windows() {
        let bitmap = TypeBitmap::new(vec![RRType::A, RRType::MX, RRType::RRSIG, RRType::NSEC]);
        let mut w = WireWriter::new();
        let n = bitmap.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        let back = TypeBitmap::unpack(&mut r, n).unwrap();
        assert_eq!(back, bitmap);
    }

    #[test]
    fn rejects_non_increasing_window_order() {
        let bytes = crate::util::test_support::from_hex("0001400000014000");
        let mut r = PacketReader::new(&bytes);
        assert!(TypeBitmap::unpack(&mut r, bytes.len()).is_err());
    }
}
