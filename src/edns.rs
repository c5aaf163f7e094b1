//! EDNS(0) (RFC 6891): the OPT pseudo-RR, its TTL-field-as-flags encoding,
//! and the variant-based option payloads (RFC 5001 NSID, RFC 7871
//! CLIENT-SUBNET, RFC 7873 COOKIE, RFC 7828 TCP-KEEPALIVE, RFC 7830
//! PADDING, RFC 8914 EDE). Option-code-to-variant dispatch mirrors the
//! record-type dispatch in [`crate::rdata`]: unknown codes are preserved
//! as raw bytes rather than rejected.
use std::fmt;

use crate::encoding::to_hex;
use crate::error::{DnsResult, Error};
use crate::wire::{PacketReader, WireWriter};

/// The 32-bit TTL field of an OPT record, reinterpreted as
/// `extended-rcode(8) | version(8) | DO(1) | Z(15)` (RFC 6891 §6.1.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptTtl {
    pub extended_rcode: u8,
    pub version: u8,
    pub dnssec_ok: bool,
    pub z: u16,
}

impl OptTtl {
    pub fn pack(self) -> u32 {
        let mut flags: u32 = (self.extended_rcode as u32) << 24 | (self.version as u32) << 16;
        if self.dnssec_ok {
            flags |= 1 << 15;
        }
        flags |= (self.z & 0x7fff) as u32;
        flags
    }

    pub fn unpack(ttl: u32) -> OptTtl {
        OptTtl {
            extended_rcode: (ttl >> 24) as u8,
            version: (ttl >> 16) as u8,
            dnssec_ok: ttl & (1 << 15) != 0,
            z: (ttl & 0x7fff) as u16,
        }
    }
}

/// EDNS option codes (the "OPT-CODE" field of an option). Unrecognized
/// codes are preserved, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionCode {
    Nsid,
    ClientSubnet,
    Cookie,
    TcpKeepalive,
    Padding,
    ExtendedError,
    Unknown(u16),
}

impl OptionCode {
    pub fn code(self) -> u16 {
        match self {
            OptionCode::Nsid => 3,
            OptionCode::ClientSubnet => 8,
            OptionCode::Cookie => 10,
            OptionCode::TcpKeepalive => 11,
            OptionCode::Padding => 12,
            OptionCode::ExtendedError => 15,
            OptionCode::Unknown(c) => c,
        }
    }

    pub fn from_code(value: u16) -> OptionCode {
        match value {
            3 => OptionCode::Nsid,
            8 => OptionCode::ClientSubnet,
            10 => OptionCode::Cookie,
            11 => OptionCode::TcpKeepalive,
            12 => OptionCode::Padding,
            15 => OptionCode::ExtendedError,
            other => OptionCode::Unknown(other),
        }
    }
}

impl fmt::Display for OptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OptionCode::Nsid => "NSID",
            OptionCode::ClientSubnet => "CLIENT-SUBNET",
            OptionCode::Cookie => "COOKIE",
            OptionCode::TcpKeepalive => "TCP-KEEPALIVE",
            OptionCode::Padding => "PADDING",
            OptionCode::ExtendedError => "EDE",
            OptionCode::Unknown(c) => return write!(f, "OPT{c}"),
        };
        write!(f, "{name}")
    }
}

/// One EDNS option's typed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionData {
    Nsid(Vec<u8>),
    ClientSubnet {
        family: u16,
        source_prefix: u8,
        scope_prefix: u8,
        address: Vec<u8>,
    },
    Cookie {
        client: Vec<u8>,
        server: Vec<u8>,
    },
    TcpKeepalive(Option<u16>),
    Padding(usize),
    ExtendedError {
        info_code: u16,
        extra_text: Vec<u8>,
    },
    Unknown(Vec<u8>),
}

impl OptionData {
    fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        match self {
            OptionData::Nsid(bytes) => w.write_bytes(bytes),
            OptionData::ClientSubnet { family, source_prefix, scope_prefix, address } => {
                let mut n = w.write_u16(*family)?;
                n += w.write_u8(*source_prefix)?;
                n += w.write_u8(*scope_prefix)?;
                n += w.write_bytes(address)?;
                Ok(n)
            }
            OptionData::Cookie { client, server } => {
                let mut n = w.write_bytes(client)?;
                n += w.write_bytes(server)?;
                Ok(n)
            }
            OptionData::TcpKeepalive(timeout) => match timeout {
                Some(t) => w.write_u16(*t),
                None => Ok(0),
            },
            OptionData::Padding(len) => w.write_bytes(&vec![0u8; *len]),
            OptionData::ExtendedError { info_code, extra_text } => {
                let mut n = w.write_u16(*info_code)?;
                n += w.write_bytes(extra_text)?;
                Ok(n)
            }
            OptionData::Unknown(bytes) => w.write_bytes(bytes),
        }
    }

    fn unpack(code: OptionCode, r: &mut PacketReader, len: u16) -> DnsResult<OptionData> {
        Ok(match code {
            OptionCode::Nsid => OptionData::Nsid(r.read_bytes(len as usize)?.to_vec()),
            OptionCode::ClientSubnet => {
                if len < 4 {
                    return Err(Error::parse("CLIENT-SUBNET option shorter than 4 octets"));
                }
                let family = r.read_u16()?;
                let source_prefix = r.read_u8()?;
                let scope_prefix = r.read_u8()?;
                let address = r.read_bytes(len as usize - 4)?.to_vec();
                if let Some(bits) = address_family_bits(family) {
                    if source_prefix as u32 > bits {
                        return Err(Error::parse(format!(
                            "invalid source prefix length {source_prefix} for address family {family}"
                        )));
                    }
                }
                OptionData::ClientSubnet { family, source_prefix, scope_prefix, address }
            }
            OptionCode::Cookie => {
                if len < 8 {
                    return Err(Error::parse("COOKIE option shorter than the 8-octet client cookie"));
                }
                let client = r.read_bytes(8)?.to_vec();
                let server = r.read_bytes(len as usize - 8)?.to_vec();
                OptionData::Cookie { client, server }
            }
            OptionCode::TcpKeepalive => {
                if len == 0 {
                    OptionData::TcpKeepalive(None)
                } else if len == 2 {
                    OptionData::TcpKeepalive(Some(r.read_u16()?))
                } else {
                    return Err(Error::parse("TCP-KEEPALIVE option must be 0 or 2 octets"));
                }
            }
            OptionCode::Padding => {
                r.read_bytes(len as usize)?;
                OptionData::Padding(len as usize)
            }
            OptionCode::ExtendedError => {
                if len < 2 {
                    return Err(Error::parse("EDE option shorter than 2 octets"));
                }
                OptionData::ExtendedError {
                    info_code: r.read_u16()?,
                    extra_text: r.read_bytes(len as usize - 2)?.to_vec(),
                }
            }
            OptionCode::Unknown(_) => OptionData::Unknown(r.read_bytes(len as usize)?.to_vec()),
        })
    }
}

/// Bit width of the address family used in CLIENT-SUBNET (RFC 7871 §4),
/// reusing the IANA AFI assignments: 1 = IPv4, 2 = IPv6. Unknown families
/// skip the prefix-length check entirely rather than reject the option.
fn address_family_bits(family: u16) -> Option<u32> {
    match family {
        1 => Some(32),
        2 => Some(128),
        _ => None,
    }
}

fn format_client_subnet_address(family: u16, address: &[u8]) -> String {
    let mut padded = address.to_vec();
    match family {
        1 => {
            padded.resize(4, 0);
            std::net::Ipv4Addr::new(padded[0], padded[1], padded[2], padded[3]).to_string()
        }
        2 => {
            padded.resize(16, 0);
            let mut octets = [0u8; 16];
            octets.copy_from_slice(&padded);
            std::net::Ipv6Addr::from(octets).to_string()
        }
        _ => to_hex(address),
    }
}

/// One `(OPT-CODE, OPT-LEN, OPT-DATA)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdnsOption {
    pub code: OptionCode,
    pub data: OptionData,
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            OptionData::Nsid(bytes) => write!(f, "; NSID: {}", to_hex(bytes)),
            OptionData::ClientSubnet { family, source_prefix, scope_prefix, address } => {
                write!(
                    f,
                    "; CLIENT-SUBNET: {}/{}/{}",
                    format_client_subnet_address(*family, address),
                    source_prefix,
                    scope_prefix
                )
            }
            OptionData::Cookie { client, server } => {
                if server.is_empty() {
                    write!(f, "; COOKIE: {}", to_hex(client))
                } else {
                    write!(f, "; COOKIE: {}{}", to_hex(client), to_hex(server))
                }
            }
            OptionData::TcpKeepalive(Some(t)) => write!(f, "; TCP-KEEPALIVE: {t} (in units of 100ms)"),
            OptionData::TcpKeepalive(None) => write!(f, "; TCP-KEEPALIVE"),
            OptionData::Padding(len) => write!(f, "; PADDING: {len} bytes"),
            OptionData::ExtendedError { info_code, extra_text } => {
                if extra_text.is_empty() {
                    write!(f, "; EDE: {info_code}")
                } else {
                    write!(
                        f,
                        "; EDE: {info_code} ({})",
                        String::from_utf8_lossy(extra_text)
                    )
                }
            }
            OptionData::Unknown(bytes) => write!(f, "; OPT={}: {}", self.code.code(), to_hex(bytes)),
        }
    }
}

/// The EDNS(0) OPT pseudo-RR. Unlike an ordinary record, its CLASS and
/// TTL wire fields are repurposed (UDP payload size, and the packed
/// extended-rcode/version/DO/Z word respectively); `Opt` carries the
/// decoded form of both alongside the option list so dig-style
/// presentation needs no extra context from the owning record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opt {
    pub udp_payload_size: u16,
    pub ttl: OptTtl,
    pub options: Vec<EdnsOption>,
}

impl Opt {
    /// Packs just the RDATA: the sequence of options. The caller is
    /// responsible for writing the OPT record's repurposed class/ttl
    /// fields from `udp_payload_size`/`ttl`.
    pub fn pack(&self, w: &mut WireWriter) -> DnsResult<usize> {
        let mut n = 0;
        for opt in &self.options {
            n += w.write_u16(opt.code.code())?;
            let len_pos = w.len();
            n += w.write_u16(0)?;
            let written = opt.data.pack(w)?;
            w.patch_u16(len_pos, written as u16)?;
            n += written;
        }
        Ok(n)
    }

    /// Decodes just the RDATA; `udp_payload_size`/`ttl` are filled in by
    /// the caller from the record's class/ttl fields.
    pub fn unpack(r: &mut PacketReader, rdlen: u16) -> DnsResult<Opt> {
        let end = r.position() + rdlen as usize;
        let mut options = Vec::new();
        while r.position() < end {
            let code = OptionCode::from_code(r.read_u16()?);
            let len = r.read_u16()?;
            let data = OptionData::unpack(code, r, len)?;
            options.push(EdnsOption { code, data });
        }
        Ok(Opt {
            udp_payload_size: 0,
            ttl: OptTtl::default(),
            options,
        })
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "; EDNS: version: {}, flags:{} udp: {}",
            self.ttl.version,
            if self.ttl.dnssec_ok { " do" } else { "" },
            self.udp_payload_size
        )?;
        for (i, opt) in self.options.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{opt}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opt_ttl_round_trips() {
        let ttl = OptTtl { extended_rcode: 1, version: 0, dnssec_ok: true, z: 0 };
        let packed = ttl.pack();
        assert_eq!(OptTtl::unpack(packed), ttl);
    }

    #[test]
    fn cookie_option_round_trips() {
        let opt = Opt {
            udp_payload_size: 1232,
            ttl: OptTtl::default(),
            options: vec![EdnsOption {
                code: OptionCode::Cookie,
                data: OptionData::Cookie { client: vec![1; 8], server: Vec::new() },
            }],
        };
        let mut w = WireWriter::new();
        let n = opt.pack(&mut w).unwrap();
        let bytes = w.freeze(n).unwrap();
        let mut r = PacketReader::new(&bytes);
        let back = Opt::unpack(&mut r, n as u16).unwrap();
        assert_eq!(back.options, opt.options);
    }

    #[test]
    fn client_subnet_displays_as_dotted_address() {
        let option = EdnsOption {
            code: OptionCode::ClientSubnet,
            data: OptionData::ClientSubnet {
                family: 1,
                source_prefix: 24,
                scope_prefix: 12,
                address: vec![1, 2, 3],
            },
        };
        assert_eq!(option.to_string(), "; CLIENT-SUBNET: 1.2.3.0/24/12");
    }

    #[test]
    fn client_subnet_rejects_source_prefix_past_family_width() {
        let bytes = [0x00, 0x01, 33, 0, 1, 2, 3, 0]; // family 1, prefix 33
        let err = OptionData::unpack(OptionCode::ClientSubnet, &mut PacketReader::new(&bytes), 8)
            .unwrap_err();
        match err {
            Error::Parse(msg) => {
                assert_eq!(msg, "invalid source prefix length 33 for address family 1")
            }
            other => panic!("expected Error::Parse, got {other:?}"),
        }
    }

    #[test]
    fn client_subnet_allows_exact_host_prefix() {
        let bytes = [0x00, 0x01, 32, 0, 1, 2, 3, 4];
        let data = OptionData::unpack(OptionCode::ClientSubnet, &mut PacketReader::new(&bytes), 8)
            .unwrap();
        assert!(matches!(data, OptionData::ClientSubnet { source_prefix: 32, .. }));
    }

    #[test]
    fn unknown_option_code_is_preserved() {
        let bytes = [0x27, 0x10, 0x00, 0x02, 0xaa, 0xbb]; // code 10000, len 2
        let mut r = PacketReader::new(&bytes);
        let opt = Opt::unpack(&mut r, bytes.len() as u16).unwrap();
        assert_eq!(opt.options[0].code, OptionCode::Unknown(10000));
        assert_eq!(opt.options[0].data, OptionData::Unknown(vec![0xaa, 0xbb]));
    }
}
