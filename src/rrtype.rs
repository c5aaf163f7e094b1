//! RR TYPE values (RFC 1035 §3.2.2 and successors). A plain numeric-code
//! dispatch enum: every name in common use gets a mnemonic variant, and any
//! other code is preserved losslessly as `Unknown` rather than failing, per
//! the record-type registry's "unknown types don't fail" contract.
use std::fmt;
use std::str::FromStr;

use crate::error::{DnsResult, Error};

macro_rules! rrtype {
    ($($name:ident = $val:expr),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RRType {
            $($name,)*
            Unknown(u16),
        }

        impl RRType {
            pub fn code(self) -> u16 {
                match self {
                    $(RRType::$name => $val,)*
                    RRType::Unknown(c) => c,
                }
            }

            pub fn from_code(value: u16) -> RRType {
                match value {
                    $($val => RRType::$name,)*
                    other => RRType::Unknown(other),
                }
            }

            fn mnemonic(self) -> Option<&'static str> {
                match self {
                    $(RRType::$name => Some(stringify!($name)),)*
                    RRType::Unknown(_) => None,
                }
            }
        }

        impl FromStr for RRType {
            type Err = Error;

            fn from_str(s: &str) -> DnsResult<RRType> {
                $(if s.eq_ignore_ascii_case(stringify!($name)) {
                    return Ok(RRType::$name);
                })*
                if let Some(digits) = s.strip_prefix("TYPE").or_else(|| s.strip_prefix("type")) {
                    let code: u16 = digits
                        .parse()
                        .map_err(|_| Error::parse(format!("unknown record type mnemonic '{s}'")))?;
                    return Ok(RRType::from_code(code));
                }
                Err(Error::parse(format!("unknown record type mnemonic '{s}'")))
            }
        }
    };
}

rrtype! {
    A = 1,
    NS = 2,
    CNAME = 5,
    SOA = 6,
    MB = 7,
    MG = 8,
    MR = 9,
    NULL = 10,
    WKS = 11,
    PTR = 12,
    HINFO = 13,
    MINFO = 14,
    MX = 15,
    TXT = 16,
    RP = 17,
    AFSDB = 18,
    X25 = 19,
    ISDN = 20,
    RT = 21,
    NSAP = 22,
    NSAPPTR = 23,
    SIG = 24,
    KEY = 25,
    PX = 26,
    GPOS = 27,
    AAAA = 28,
    LOC = 29,
    NXT = 30,
    SRV = 33,
    NAPTR = 35,
    KX = 36,
    CERT = 37,
    DNAME = 39,
    OPT = 41,
    APL = 42,
    DS = 43,
    SSHFP = 44,
    IPSECKEY = 45,
    RRSIG = 46,
    NSEC = 47,
    DNSKEY = 48,
    DHCID = 49,
    NSEC3 = 50,
    NSEC3PARAM = 51,
    TLSA = 52,
    SMIMEA = 53,
    HIP = 55,
    CDS = 59,
    CDNSKEY = 60,
    OPENPGPKEY = 61,
    CSYNC = 62,
    ZONEMD = 63,
    SVCB = 64,
    HTTPS = 65,
    SPF = 99,
    TKEY = 249,
    TSIG = 250,
    IXFR = 251,
    AXFR = 252,
    MAILB = 253,
    MAILA = 254,
    ANY = 255,
    URI = 256,
    CAA = 257,
    AVC = 258,
    DOA = 259,
    AMTRELAY = 260,
    TA = 32768,
    DLV = 32769,
}

impl fmt::Display for RRType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mnemonic() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "TYPE{}", self.code()),
        }
    }
}

impl Default for RRType {
    fn default() -> Self {
        RRType::A
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        assert_eq!(RRType::from_code(1), RRType::A);
        assert_eq!(RRType::A.code(), 1);
        assert_eq!(RRType::A.to_string(), "A");
    }

    #[test]
    fn unknown_code_is_preserved_not_rejected() {
        let t = RRType::from_code(9999);
        assert_eq!(t, RRType::Unknown(9999));
        assert_eq!(t.to_string(), "TYPE9999");
    }

    #[test]
    fn from_str_accepts_mnemonic_and_generic_form() {
        assert_eq!(RRType::from_str("aaaa").unwrap(), RRType::AAAA);
        assert_eq!(RRType::from_str("TYPE65280").unwrap(), RRType::Unknown(65280));
        assert!(RRType::from_str("NOTATYPE").is_err());
    }
}
