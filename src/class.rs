//! RR CLASS values (RFC 1035 §3.2.4). Same unknown-preserving shape as
//! [`crate::rrtype::RRType`]; OPT repurposes this 16-bit field as a UDP
//! payload size, which is why `Class` exposes a plain `code()`/`from_code()`
//! pair rather than assuming every value names one of the well-known
//! classes.
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    IN,
    CS,
    CH,
    HS,
    NONE,
    ANY,
    Unknown(u16),
}

impl Class {
    pub fn code(self) -> u16 {
        match self {
            Class::IN => 1,
            Class::CS => 2,
            Class::CH => 3,
            Class::HS => 4,
            Class::NONE => 254,
            Class::ANY => 255,
            Class::Unknown(c) => c,
        }
    }

    pub fn from_code(value: u16) -> Class {
        match value {
            1 => Class::IN,
            2 => Class::CS,
            3 => Class::CH,
            4 => Class::HS,
            254 => Class::NONE,
            255 => Class::ANY,
            other => Class::Unknown(other),
        }
    }
}

impl Default for Class {
    fn default() -> Self {
        Class::IN
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Class::IN => write!(f, "IN"),
            Class::CS => write!(f, "CS"),
            Class::CH => write!(f, "CH"),
            Class::HS => write!(f, "HS"),
            Class::NONE => write!(f, "NONE"),
            Class::ANY => write!(f, "ANY"),
            Class::Unknown(c) => write!(f, "CLASS{c}"),
        }
    }
}

impl std::str::FromStr for Class {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::DnsResult<Class> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(Class::IN),
            "CS" => Ok(Class::CS),
            "CH" => Ok(Class::CH),
            "HS" => Ok(Class::HS),
            "NONE" => Ok(Class::NONE),
            "ANY" => Ok(Class::ANY),
            other => {
                if let Some(digits) = other.strip_prefix("CLASS") {
                    let code: u16 = digits.parse().map_err(|_| {
                        crate::error::Error::parse(format!("unknown class mnemonic '{s}'"))
                    })?;
                    Ok(Class::from_code(code))
                } else {
                    Err(crate::error::Error::parse(format!(
                        "unknown class mnemonic '{s}'"
                    )))
                }
            }
        }
    }
}
