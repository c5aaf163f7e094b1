//! NAPTR (RFC 2915): two 16-bit fields, three character-strings, and a
//! non-compressible replacement domain name.
use std::fmt;

use crate::charstring::{CharacterString, QuoteMode};
use crate::error::{DnsResult, Error};
use crate::name::Fqdn;
use crate::wire::{PacketReader, WireWriter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naptr {
    pub order: u16,
    pub preference: u16,
    pub flags: CharacterString,
    pub service: CharacterString,
    pub regexp: CharacterString,
    pub replacement: Fqdn,
}

impl Naptr {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = w.write_u16(self.order)?;
        n += w.write_u16(self.preference)?;
        n += w.write_character_string(self.flags.as_bytes())?;
        n += w.write_character_string(self.service.as_bytes())?;
        n += w.write_character_string(self.regexp.as_bytes())?;
        n += w.write_name(&self.replacement, false)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Naptr> {
        Ok(Naptr {
            order: r.read_u16()?,
            preference: r.read_u16()?,
            flags: CharacterString::from_bytes(r.read_character_string()?)?,
            service: CharacterString::from_bytes(r.read_character_string()?)?,
            regexp: CharacterString::from_bytes(r.read_character_string()?)?,
            replacement: r.read_name()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Naptr> {
        if tokens.len() != 6 {
            return Err(Error::parse(
                "NAPTR rdata needs 6 fields: order preference flags service regexp replacement",
            ));
        }
        let order = super::soa::parse_u16(std::str::from_utf8(tokens[0].as_bytes()).unwrap_or(""))?;
        let preference = super::soa::parse_u16(std::str::from_utf8(tokens[1].as_bytes()).unwrap_or(""))?;
        let replacement_text = std::str::from_utf8(tokens[5].as_bytes())
            .map_err(|_| Error::parse("NAPTR replacement is not valid UTF-8"))?;
        Ok(Naptr {
            order,
            preference,
            flags: tokens[2].clone(),
            service: tokens[3].clone(),
            regexp: tokens[4].clone(),
            replacement: Fqdn::parse(replacement_text)?,
        })
    }
}

impl fmt::Display for Naptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.order,
            self.preference,
            self.flags.present(QuoteMode::Always),
            self.service.present(QuoteMode::Always),
            self.regexp.present(QuoteMode::Always),
            self.replacement
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc2915_example_round_trips() {
        // 100 10 "S" "SIP+D2U" "" _sip._udp.example.com.
        let naptr = Naptr {
            order: 100,
            preference: 10,
            flags: CharacterString::from_bytes(b"S".to_vec()).unwrap(),
            service: CharacterString::from_bytes(b"SIP+D2U".to_vec()).unwrap(),
            regexp: CharacterString::from_bytes(b"".to_vec()).unwrap(),
            replacement: Fqdn::parse("_sip._udp.example.com.").unwrap(),
        };
        let mut w = WireWriter::new();
        let n = naptr.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        assert_eq!(Naptr::unpack(&mut r, n as u16).unwrap(), naptr);
    }
}
