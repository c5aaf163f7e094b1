//! Bounded wire-format buffer reading and writing: big-endian integers,
//! domain names (with compression on the write side and pointer
//! resolution with loop detection on the read side), and bounded
//! sub-regions for RDATA and EDNS option payloads.
use byteorder::{BigEndian, ByteOrder};

use crate::compress::{suffix_key, NameCompressor};
use crate::error::{DnsResult, Error};
use crate::limits::{COMPRESSION_POINTER_LIMIT, MAX_MESSAGE_OCTETS, MAX_POINTER_CHASES};
use crate::name::Fqdn;
use crate::util::is_pointer;

/// A growable write buffer, hard-capped at [`MAX_MESSAGE_OCTETS`], with an
/// optional per-message name compressor.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: Vec<u8>,
    compressor: Option<NameCompressor>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer that compresses domain names as it emits them.
    pub fn with_compression() -> Self {
        WireWriter {
            buf: Vec::new(),
            compressor: Some(NameCompressor::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn ensure_capacity(&self, additional: usize) -> DnsResult<()> {
        if self.buf.len() + additional > MAX_MESSAGE_OCTETS {
            return Err(Error::range(format!(
                "write of {additional} bytes at offset {} would exceed the {MAX_MESSAGE_OCTETS}-byte message cap",
                self.buf.len()
            )));
        }
        Ok(())
    }

    pub fn write_u8(&mut self, v: u8) -> DnsResult<usize> {
        self.ensure_capacity(1)?;
        self.buf.push(v);
        Ok(1)
    }

    pub fn write_u16(&mut self, v: u16) -> DnsResult<usize> {
        self.ensure_capacity(2)?;
        let mut tmp = [0u8; 2];
        BigEndian::write_u16(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
        Ok(2)
    }

    pub fn write_u32(&mut self, v: u32) -> DnsResult<usize> {
        self.ensure_capacity(4)?;
        let mut tmp = [0u8; 4];
        BigEndian::write_u32(&mut tmp, v);
        self.buf.extend_from_slice(&tmp);
        Ok(4)
    }

    /// Writes the low 48 bits of `v` (used by TSIG's `time_signed`).
    pub fn write_u48(&mut self, v: u64) -> DnsResult<usize> {
        self.ensure_capacity(6)?;
        let mut tmp = [0u8; 8];
        BigEndian::write_u64(&mut tmp, v);
        self.buf.extend_from_slice(&tmp[2..8]);
        Ok(6)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> DnsResult<usize> {
        self.ensure_capacity(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Writes a character-string: a length octet followed by its bytes.
    pub fn write_character_string(&mut self, bytes: &[u8]) -> DnsResult<usize> {
        self.write_u8(bytes.len() as u8)?;
        self.write_bytes(bytes)?;
        Ok(bytes.len() + 1)
    }

    /// Overwrites two bytes already written at `pos` (used to back-patch
    /// `rdlength` and EDNS option-length placeholders).
    pub fn patch_u16(&mut self, pos: usize, v: u16) -> DnsResult<()> {
        if pos + 2 > self.buf.len() {
            return Err(Error::range("patch_u16 position out of range"));
        }
        BigEndian::write_u16(&mut self.buf[pos..pos + 2], v);
        Ok(())
    }

    /// Writes a domain name, following RFC 1035 §4.1.4 compression when
    /// `compress` is true and this writer was built `with_compression`.
    pub fn write_name(&mut self, name: &Fqdn, compress: bool) -> DnsResult<usize> {
        if name.is_root() {
            return self.write_u8(0);
        }

        if !compress || self.compressor.is_none() {
            let mut written = 0;
            for label in name.labels() {
                written += self.write_u8(label.len() as u8)?;
                written += self.write_bytes(label)?;
            }
            written += self.write_u8(0)?;
            return Ok(written);
        }

        let label_count = name.label_count();
        let owned_labels: Vec<Vec<u8>> = name.labels().map(|l| l.to_vec()).collect();
        let mut written = 0usize;

        for i in 0..label_count {
            let suffix = &owned_labels[i..];
            let key = suffix_key(suffix);
            let compressor = self.compressor.as_ref().unwrap();

            if let Some(offset) = compressor.lookup(&key) {
                if offset < COMPRESSION_POINTER_LIMIT {
                    written += self.write_u16(0xC000 | offset)?;
                    return Ok(written);
                }
            }

            let offset = self.buf.len();
            if offset < COMPRESSION_POINTER_LIMIT as usize {
                self.compressor.as_mut().unwrap().insert(key, offset as u16);
            }

            let label = &owned_labels[i];
            written += self.write_u8(label.len() as u8)?;
            written += self.write_bytes(label)?;
        }

        written += self.write_u8(0)?;
        Ok(written)
    }

    /// Consumes the writer, yielding the emitted bytes. `n` truncates the
    /// result to its first `n` bytes (used when a caller wants to freeze
    /// a message at a length shorter than what was buffered, e.g. after a
    /// discovered-too-late truncation decision); pass `self.len()` to keep
    /// everything written so far.
    pub fn freeze(mut self, n: usize) -> DnsResult<Vec<u8>> {
        if n > self.buf.len() {
            return Err(Error::range("freeze length exceeds buffered data"));
        }
        self.buf.truncate(n);
        Ok(self.buf)
    }
}

/// A positioned, bounds-checked cursor over DNS message bytes, with
/// compression-pointer resolution for names. A reader carved out for an
/// isolated region (EDNS option data) has `compress = false` and cannot
/// follow pointers outside — or even within — its own bytes.
#[derive(Debug, Clone)]
pub struct PacketReader<'a> {
    data: &'a [u8],
    pos: usize,
    limit: usize,
    compress: bool,
}

impl<'a> PacketReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        PacketReader {
            data,
            pos: 0,
            limit: data.len(),
            compress: true,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.limit.saturating_sub(self.pos)
    }

    pub fn seek(&mut self, pos: usize) -> DnsResult<()> {
        if pos > self.data.len() {
            return Err(Error::range("seek past end of buffer"));
        }
        self.pos = pos;
        Ok(())
    }

    fn ensure(&self, n: usize) -> DnsResult<()> {
        if self.pos + n > self.limit {
            return Err(Error::range(format!(
                "read of {n} bytes at offset {} exceeds the current {}-byte region",
                self.pos, self.limit
            )));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> DnsResult<u8> {
        self.ensure(1)?;
        let v = self.data[self.pos];
        self.pos += 1;
        Ok(v)
    }

    pub fn read_u16(&mut self) -> DnsResult<u16> {
        self.ensure(2)?;
        let v = BigEndian::read_u16(&self.data[self.pos..self.pos + 2]);
        self.pos += 2;
        Ok(v)
    }

    pub fn read_u32(&mut self) -> DnsResult<u32> {
        self.ensure(4)?;
        let v = BigEndian::read_u32(&self.data[self.pos..self.pos + 4]);
        self.pos += 4;
        Ok(v)
    }

    /// Reads a 48-bit big-endian integer (TSIG `time_signed`).
    pub fn read_u48(&mut self) -> DnsResult<u64> {
        self.ensure(6)?;
        let mut tmp = [0u8; 8];
        tmp[2..8].copy_from_slice(&self.data[self.pos..self.pos + 6]);
        self.pos += 6;
        Ok(BigEndian::read_u64(&tmp))
    }

    pub fn read_bytes(&mut self, n: usize) -> DnsResult<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Reads one length-prefixed character-string.
    pub fn read_character_string(&mut self) -> DnsResult<Vec<u8>> {
        let len = self.read_u8()? as usize;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// A bounded, non-compressible sub-reader over exactly the next `n`
    /// bytes (EDNS option data, or any field the spec says must not follow
    /// pointers). Advances `self` past the `n` bytes regardless of how
    /// much of them the sub-reader actually consumes.
    pub fn slice(&mut self, n: usize) -> DnsResult<PacketReader<'a>> {
        self.ensure(n)?;
        let sub = PacketReader {
            data: &self.data[self.pos..self.pos + n],
            pos: 0,
            limit: n,
            compress: false,
        };
        self.pos += n;
        Ok(sub)
    }

    /// A bounded sub-reader over exactly the next `n` bytes that still
    /// carries the whole message, so names inside it (e.g. SOA's mname)
    /// may still be compressed against the rest of the message. Advances
    /// `self` past the `n` bytes, ignoring any the sub-reader left unread.
    pub fn rdata_reader(&mut self, n: usize) -> DnsResult<PacketReader<'a>> {
        self.ensure(n)?;
        let sub = PacketReader {
            data: self.data,
            pos: self.pos,
            limit: self.pos + n,
            compress: true,
        };
        self.pos += n;
        Ok(sub)
    }

    /// Disables compression-pointer following on this reader, for fields
    /// that are "not subject to compression" (e.g. TSIG's algorithm name)
    /// even though they may physically contain a pointer byte.
    pub fn without_compression(mut self) -> Self {
        self.compress = false;
        self
    }

    /// Reads a domain name, resolving compression pointers against the
    /// whole message when this reader allows it. Pointer loops are
    /// rejected after [`MAX_POINTER_CHASES`] dereferences.
    pub fn read_name(&mut self) -> DnsResult<Fqdn> {
        let mut labels = Vec::new();
        let mut cursor = self.pos;
        let mut jumped = false;
        let mut chases = 0usize;

        loop {
            if !jumped && cursor >= self.limit {
                return Err(Error::range("name read past end of current region"));
            }
            if cursor >= self.data.len() {
                return Err(Error::range("name read past end of message"));
            }

            let b = self.data[cursor];
            if b == 0 {
                cursor += 1;
                if !jumped {
                    self.pos = cursor;
                }
                break;
            } else if is_pointer(b) {
                if !self.compress {
                    return Err(Error::parse(
                        "compression pointer in a field that must not be compressed",
                    ));
                }
                if cursor + 1 >= self.data.len() {
                    return Err(Error::range("truncated compression pointer"));
                }
                let ptr = (((b as u16) & 0x3f) << 8) | self.data[cursor + 1] as u16;
                if !jumped {
                    self.pos = cursor + 2;
                    jumped = true;
                }
                chases += 1;
                if chases > MAX_POINTER_CHASES {
                    return Err(Error::parse(
                        "compression pointer loop: too many pointers chased",
                    ));
                }
                if ptr as usize >= self.data.len() {
                    return Err(Error::parse("compression pointer target out of range"));
                }
                cursor = ptr as usize;
            } else {
                let len = b as usize;
                if cursor + 1 + len > self.data.len() {
                    return Err(Error::range("label runs past end of message"));
                }
                labels.push(self.data[cursor + 1..cursor + 1 + len].to_vec());
                cursor += 1 + len;
            }
        }

        Fqdn::from_labels(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_support::from_hex;

    #[test]
    fn primitives_round_trip() {
        let mut w = WireWriter::new();
        w.write_u8(0xff).unwrap();
        w.write_u16(0x1234).unwrap();
        w.write_u32(0x1234_5678).unwrap();
        w.write_u48(0x1234_5678_9abc).unwrap();
        let bytes = w.freeze(13).unwrap();

        let mut r = PacketReader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 0xff);
        assert_eq!(r.read_u16().unwrap(), 0x1234);
        assert_eq!(r.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(r.read_u48().unwrap(), 0x1234_5678_9abc);
    }

    #[test]
    fn writer_rejects_overflow() {
        let mut w = WireWriter::new();
        assert!(w.write_bytes(&vec![0u8; MAX_MESSAGE_OCTETS + 1]).is_err());
    }

    #[test]
    fn uncompressed_name_round_trips() {
        let name = Fqdn::parse("www.example.com.").unwrap();
        let mut w = WireWriter::new();
        w.write_name(&name, false).unwrap();
        let bytes = w.freeze(name.wire_len()).unwrap();

        let mut r = PacketReader::new(&bytes);
        let decoded = r.read_name().unwrap();
        assert_eq!(decoded, name);
    }

    #[test]
    fn compression_pointer_is_followed() {
        // hand-built: "example.com." at offset 0, then a pointer to it.
        let mut w = WireWriter::with_compression();
        let name = Fqdn::parse("example.com.").unwrap();
        w.write_name(&name, true).unwrap();
        let first_len = w.len();
        w.write_name(&name, true).unwrap();
        let total = w.len();
        let bytes = w.freeze(total).unwrap();
        assert!(bytes.len() < first_len * 2, "second name should be a 2-byte pointer");

        let mut r = PacketReader::new(&bytes);
        let first = r.read_name().unwrap();
        let second = r.read_name().unwrap();
        assert_eq!(first, name);
        assert_eq!(second, name);
    }

    #[test]
    fn pointer_loop_is_rejected() {
        // a name at offset 0 that points to itself.
        let bytes = vec![0xC0, 0x00];
        let mut r = PacketReader::new(&bytes);
        assert!(r.read_name().is_err());
    }

    #[test]
    fn non_compressible_field_rejects_pointer_bytes() {
        let bytes = from_hex("c00c");
        let mut r = PacketReader::new(&bytes).without_compression();
        assert!(r.read_name().is_err());
    }

    #[test]
    fn pointer_to_offset_beyond_16384_is_not_compressed() {
        // Force a writer to believe offsets are large by writing padding first.
        let mut w = WireWriter::with_compression();
        w.write_bytes(&vec![0u8; 20000]).unwrap();
        let name = Fqdn::parse("example.com.").unwrap();
        w.write_name(&name, true).unwrap();
        let before_second = w.len();
        w.write_name(&name, true).unwrap();
        let after_second = w.len();
        // offset of first occurrence (20000) exceeds the 14-bit pointer
        // range, so the second occurrence must be written out in full too.
        assert_eq!(after_second - before_second, name.wire_len());
    }
}
