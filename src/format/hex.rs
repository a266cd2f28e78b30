//! Hexadecimal encoding utilities.

use std::fmt;

/// Encode bytes as lowercase hex string.
///
/// # Examples
///
/// ```
/// use snmp_query::format::hex::encode;
///
/// assert_eq!(encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
/// assert_eq!(encode(&[0x00, 0xff]), "00ff");
/// ```
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Encode bytes as uppercase hex, `group` bytes at a time, joined by `sep`.
///
/// A trailing partial group is emitted as-is.
///
/// ```
/// use snmp_query::format::hex::encode_upper_grouped;
///
/// assert_eq!(encode_upper_grouped(&[0x00, 0x17, 0x2b], 1, ':'), "00:17:2B");
/// assert_eq!(encode_upper_grouped(&[0x20, 0x01, 0x0d, 0xb8], 2, ':'), "2001:0DB8");
/// assert_eq!(encode_upper_grouped(&[], 1, ':'), "");
/// ```
pub fn encode_upper_grouped(bytes: &[u8], group: usize, sep: char) -> String {
    UpperGrouped {
        bytes,
        group: group.max(1),
        sep,
    }
    .to_string()
}

struct UpperGrouped<'a> {
    bytes: &'a [u8],
    group: usize,
    sep: char,
}

impl fmt::Display for UpperGrouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chunk) in self.bytes.chunks(self.group).enumerate() {
            if i > 0 {
                write!(f, "{}", self.sep)?;
            }
            for b in chunk {
                write!(f, "{:02X}", b)?;
            }
        }
        Ok(())
    }
}

/// Lazy hex formatter - only formats when actually displayed.
///
/// This avoids allocation when logging at disabled levels.
///
/// # Examples
///
/// ```
/// use snmp_query::format::hex::Bytes;
///
/// let data = [0xde, 0xad, 0xbe, 0xef];
/// let formatted = format!("{}", Bytes(&data));
/// assert_eq!(formatted, "deadbeef");
/// ```
pub struct Bytes<'a>(pub &'a [u8]);

impl fmt::Debug for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Display for Bytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
