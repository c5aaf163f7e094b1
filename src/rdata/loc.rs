//! LOC (RFC 1876): geographic location. Latitude/longitude are stored as
//! unsigned 32-bit values offset from `2^31` (the equator/prime meridian)
//! in thousandths of an arc-second; altitude is centimetres above 100000m
//! below the WGS84 ellipsoid; size and the two precision fields are a
//! packed 4-bit-mantissa/4-bit-exponent pair, in centimetres.
use std::fmt;

use crate::charstring::CharacterString;
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

const LATLON_ORIGIN: i64 = 1 << 31;
const ALTITUDE_OFFSET_CM: i64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    pub version: u8,
    /// Packed mantissa/exponent, centimetres.
    pub size: u8,
    pub horiz_precision: u8,
    pub vert_precision: u8,
    pub latitude: u32,
    pub longitude: u32,
    pub altitude: u32,
}

fn encode_precision_cm(cm: u64) -> u8 {
    let mut val = cm.max(0);
    let mut exponent = 0u32;
    while val >= 10 && exponent < 9 {
        val /= 10;
        exponent += 1;
    }
    ((val as u8) << 4) | exponent as u8
}

fn decode_precision_cm(byte: u8) -> u64 {
    let mantissa = (byte >> 4) as u64;
    let exponent = (byte & 0x0f) as u32;
    mantissa * 10u64.pow(exponent)
}

fn format_meters(cm: u64) -> String {
    format!("{}.{:02}m", cm / 100, cm % 100)
}

fn encode_angle(deg: u32, min: u32, sec_thousandths: u32, negative: bool) -> DnsResult<u32> {
    if min >= 60 || sec_thousandths >= 60_000 {
        return Err(Error::parse("LOC minutes/seconds out of range"));
    }
    let total = (deg as i64) * 3_600_000 + (min as i64) * 60_000 + sec_thousandths as i64;
    let signed = if negative { -total } else { total };
    let value = LATLON_ORIGIN + signed;
    if !(0..=u32::MAX as i64).contains(&value) {
        return Err(Error::parse("LOC angle out of range"));
    }
    Ok(value as u32)
}

fn decode_angle(value: u32) -> (u32, u32, u32, bool) {
    let signed = value as i64 - LATLON_ORIGIN;
    let negative = signed < 0;
    let total = signed.unsigned_abs();
    let deg = (total / 3_600_000) as u32;
    let rem = total % 3_600_000;
    let min = (rem / 60_000) as u32;
    let sec_thousandths = (rem % 60_000) as u32;
    (deg, min, sec_thousandths, negative)
}

impl Loc {
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        if self.version != 0 {
            return Err(Error::semantic(format!(
                "LOC version {} is unsupported (only 0 is defined)",
                self.version
            )));
        }
        let mut n = w.write_u8(self.version)?;
        n += w.write_u8(self.size)?;
        n += w.write_u8(self.horiz_precision)?;
        n += w.write_u8(self.vert_precision)?;
        n += w.write_u32(self.latitude)?;
        n += w.write_u32(self.longitude)?;
        n += w.write_u32(self.altitude)?;
        Ok(n)
    }

    pub fn unpack(r: &mut PacketReader, _rdlen: u16) -> DnsResult<Loc> {
        let version = r.read_u8()?;
        if version != 0 {
            return Err(Error::semantic(format!(
                "LOC version {version} is unsupported (only 0 is defined)"
            )));
        }
        Ok(Loc {
            version,
            size: r.read_u8()?,
            horiz_precision: r.read_u8()?,
            vert_precision: r.read_u8()?,
            latitude: r.read_u32()?,
            longitude: r.read_u32()?,
            altitude: r.read_u32()?,
        })
    }

    pub fn parse(tokens: &[CharacterString]) -> DnsResult<Loc> {
        let strs = super::soa::as_strs(tokens)?;
        if strs.len() < 8 {
            return Err(Error::parse("LOC rdata needs at least 8 fields"));
        }
        let lat_deg: u32 = super::soa::parse_u32(strs[0])?;
        let lat_min: u32 = super::soa::parse_u32(strs[1])?;
        let lat_sec = parse_seconds(strs[2])?;
        let lat_hem = strs[3];
        let lon_deg: u32 = super::soa::parse_u32(strs[4])?;
        let lon_min: u32 = super::soa::parse_u32(strs[5])?;
        let lon_sec = parse_seconds(strs[6])?;
        let lon_hem = strs[7];

        let latitude = encode_angle(lat_deg, lat_min, lat_sec, lat_hem.eq_ignore_ascii_case("S"))?;
        let longitude = encode_angle(lon_deg, lon_min, lon_sec, lon_hem.eq_ignore_ascii_case("W"))?;

        let rest = &strs[8..];
        let altitude_m = rest.first().map(|s| parse_meters(s)).transpose()?.unwrap_or(0.0);
        let size_m = rest.get(1).map(|s| parse_meters(s)).transpose()?.unwrap_or(1.0);
        let hp_m = rest.get(2).map(|s| parse_meters(s)).transpose()?.unwrap_or(10_000.0);
        let vp_m = rest.get(3).map(|s| parse_meters(s)).transpose()?.unwrap_or(10.0);

        let altitude_cm = (altitude_m * 100.0).round() as i64 + ALTITUDE_OFFSET_CM;
        if !(0..=u32::MAX as i64).contains(&altitude_cm) {
            return Err(Error::parse("LOC altitude out of range"));
        }

        Ok(Loc {
            version: 0,
            size: encode_precision_cm((size_m * 100.0).round() as u64),
            horiz_precision: encode_precision_cm((hp_m * 100.0).round() as u64),
            vert_precision: encode_precision_cm((vp_m * 100.0).round() as u64),
            latitude,
            longitude,
            altitude: altitude_cm as u32,
        })
    }
}

fn parse_seconds(s: &str) -> DnsResult<u32> {
    let f: f64 = s
        .parse()
        .map_err(|_| Error::parse(format!("invalid LOC seconds field '{s}'")))?;
    Ok((f * 1000.0).round() as u32)
}

fn parse_meters(s: &str) -> DnsResult<f64> {
    let trimmed = s.strip_suffix('m').unwrap_or(s);
    trimmed
        .parse()
        .map_err(|_| Error::parse(format!("invalid LOC distance field '{s}'")))
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lat_d, lat_m, lat_s, lat_neg) = decode_angle(self.latitude);
        let (lon_d, lon_m, lon_s, lon_neg) = decode_angle(self.longitude);
        let altitude_cm = self.altitude as i64 - ALTITUDE_OFFSET_CM;
        write!(
            f,
            "{} {} {}.{:03} {} {} {} {}.{:03} {} {}m {} {} {}",
            lat_d,
            lat_m,
            lat_s / 1000,
            lat_s % 1000,
            if lat_neg { "S" } else { "N" },
            lon_d,
            lon_m,
            lon_s / 1000,
            lon_s % 1000,
            if lon_neg { "W" } else { "E" },
            altitude_cm as f64 / 100.0,
            format_meters(decode_precision_cm(self.size)),
            format_meters(decode_precision_cm(self.horiz_precision)),
            format_meters(decode_precision_cm(self.vert_precision)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc1876_example_round_trips() {
        // 42 21 54 N 71 06 18 W -24m 1m 3000m 9000m
        let tokens: Vec<CharacterString> = [
            "42", "21", "54", "N", "71", "06", "18", "W", "-24m", "1m", "3000m", "9000m",
        ]
        .iter()
        .map(|s| CharacterString::from_bytes(s.as_bytes().to_vec()).unwrap())
        .collect();

        let loc = Loc::parse(&tokens).unwrap();
        let mut w = WireWriter::new();
        let n = loc.pack(&mut w).unwrap();
        assert_eq!(n, 16);
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        let back = Loc::unpack(&mut r, n as u16).unwrap();
        assert_eq!(back, loc);
    }

    #[test]
    fn rejects_nonzero_version() {
        let bytes = [1u8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut r = PacketReader::new(&bytes);
        assert!(Loc::unpack(&mut r, 16).is_err());
    }
}
