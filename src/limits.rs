//! Compile-time limits pulled out of RFC 1035 and RFC 6891.

/// Hard cap on a wire-format DNS message, imposed by the 16-bit length
/// prefix used over TCP and by practical UDP payload sizes.
pub const MAX_MESSAGE_OCTETS: usize = 65535;

/// Maximum encoded length of a domain name, null label included.
pub const MAX_NAME_OCTETS: usize = 255;

/// Maximum length of a single non-root label.
pub const MAX_LABEL_OCTETS: usize = 63;

/// Compression pointers may only reference an offset below this value
/// (14 bits of offset, the top two bits of the byte being the `11` tag).
pub const COMPRESSION_POINTER_LIMIT: u16 = 0x4000;

/// Upper bound on the number of compression pointers chased while
/// decompressing a single name: `(MAX_NAME_OCTETS + 1) / 2 - 2`.
pub const MAX_POINTER_CHASES: usize = (MAX_NAME_OCTETS + 1) / 2 - 2;
