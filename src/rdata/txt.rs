//! TXT (RFC 1035 §3.3.14) and HINFO (§3.3.2): records built purely from
//! character-strings.
use std::fmt;

use crate::charstring::{CharacterString, QuoteMode};
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

/// One or more character-strings, consuming the whole RDATA region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Txt(pub Vec<CharacterString>);

impl Txt {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = 0;
        for cs in &self.0 {
            n += w.write_character_string(cs.as_bytes())?;
        }
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Txt> {
        let end = r.position() + rdlen as usize;
        let mut strings = Vec::new();
        while r.position() < end {
            strings.push(CharacterString::from_bytes(r.read_character_string()?)?);
        }
        if strings.is_empty() {
            return Err(Error::parse("TXT rdata must contain at least one character-string"));
        }
        Ok(Txt(strings))
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Txt> {
        if tokens.is_empty() {
            return Err(Error::parse("TXT rdata must contain at least one character-string"));
        }
        Ok(Txt(tokens.to_vec()))
    }
}

impl fmt::Display for Txt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|cs| cs.present(QuoteMode::Always)).collect();
        write!(f, "{}", parts.join(" "))
    }
}

/// Two character-strings: CPU and OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HInfo {
    pub cpu: CharacterString,
    pub os: CharacterString,
}

impl HInfo {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_character_string(self.cpu.as_bytes())?;
        n += w.write_character_string(self.os.as_bytes())?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<HInfo> {
        Ok(HInfo {
            cpu: CharacterString::from_bytes(r.read_character_string()?)?,
            os: CharacterString::from_bytes(r.read_character_string()?)?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<HInfo> {
        if tokens.len() != 2 {
            return Err(Error::parse("HINFO rdata needs 2 fields: cpu os"));
        }
        Ok(HInfo {
            cpu: tokens[0].clone(),
            os: tokens[1].clone(),
        })
    }
}

impl fmt::Display for HInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.cpu.present(QuoteMode::Always),
            self.os.present(QuoteMode::Always)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn txt_round_trips() {
        let txt = Txt(vec![
            CharacterString::from_bytes(b"v=spf1".to_vec()).unwrap(),
            CharacterString::from_bytes(b"include:example.com".to_vec()).unwrap(),
        ]);
        let mut w = WireWriter::new();
        let n = txt.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Txt::unpack(&mut r, n as u16).unwrap(), txt);
        assert_eq!(txt.to_string(), "\"v=spf1\" \"include:example.com\"");
    }
}
