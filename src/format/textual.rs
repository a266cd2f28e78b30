//! Octet-string layouts for the textual conventions the decoder recognises.
//!
//! Each renderer takes the raw octets of a value and returns its display
//! form. Lengths that do not match the convention degrade to an empty string
//! (or, for MAC addresses, to every octet in the same notation) instead of
//! failing.

use std::net::Ipv4Addr;

use crate::format::hex;

/// Textual convention selected from an object's declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextualConvention {
    /// `MacAddress`
    MacAddress,
    /// `InetAddress`, `InetAddressIPv4`, `InetAddressIPv6` and `IpAddress`.
    InetAddress,
    /// `TAddress` (IPv4 address followed by a UDP port).
    TAddress,
    /// `DateAndTime`
    DateAndTime,
    /// `DisplayString`
    DisplayString,
    /// `OctetString` or no declared type.
    OctetString,
}

impl TextualConvention {
    /// Map a declared type name to a convention.
    ///
    /// Unrecognised names return `None`, which renders as plain text.
    ///
    /// ```
    /// use snmp_query::format::textual::TextualConvention;
    ///
    /// assert_eq!(TextualConvention::from_name("MacAddress"), Some(TextualConvention::MacAddress));
    /// assert_eq!(TextualConvention::from_name("InetAddressIPv6"), Some(TextualConvention::InetAddress));
    /// assert_eq!(TextualConvention::from_name(""), Some(TextualConvention::OctetString));
    /// assert_eq!(TextualConvention::from_name("SnmpAdminString"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "MacAddress" => Self::MacAddress,
            "InetAddress" | "InetAddressIPv4" | "InetAddressIPv6" | "IpAddress" => {
                Self::InetAddress
            }
            "TAddress" => Self::TAddress,
            "DateAndTime" => Self::DateAndTime,
            "DisplayString" => Self::DisplayString,
            "OctetString" | "" => Self::OctetString,
            _ => return None,
        })
    }

    /// Render `octets` according to this convention.
    pub fn render(self, octets: &[u8]) -> String {
        match self {
            Self::MacAddress => mac_address(octets),
            Self::InetAddress => inet_address(octets),
            Self::TAddress => transport_address(octets),
            Self::DateAndTime => date_and_time(octets),
            Self::DisplayString | Self::OctetString => text(octets),
        }
    }
}

/// Bytes as text, replacing invalid UTF-8 with U+FFFD.
pub fn text(octets: &[u8]) -> String {
    String::from_utf8_lossy(octets).into_owned()
}

/// Uppercase hex pairs joined by `:`.
pub fn mac_address(octets: &[u8]) -> String {
    if octets.len() != 6 {
        tracing::debug!(target: "snmp_query::format", { snmp.len = octets.len() }, "MacAddress with unexpected length");
    }
    hex::encode_upper_grouped(octets, 1, ':')
}

/// Dotted IPv4 for 4 octets, 8 uppercase 16-bit groups for 16 octets.
///
/// IPv6 groups keep their leading zeros and are not compressed.
pub fn inet_address(octets: &[u8]) -> String {
    if let Ok(v4) = <[u8; 4]>::try_from(octets) {
        Ipv4Addr::from(v4).to_string()
    } else if octets.len() == 16 {
        hex::encode_upper_grouped(octets, 2, ':')
    } else {
        String::new()
    }
}

/// `ip/port` from an IPv4 address followed by a big-endian port.
pub fn transport_address(octets: &[u8]) -> String {
    match octets {
        [a, b, c, d, hi, lo, ..] => {
            let port = u16::from_be_bytes([*hi, *lo]);
            format!("{}/{}", Ipv4Addr::new(*a, *b, *c, *d), port)
        }
        _ => String::new(),
    }
}

/// `Y-M-D H:M:S` from the first seven octets of a DateAndTime.
///
/// Fields are not zero padded. Deci-seconds and the UTC offset are ignored.
pub fn date_and_time(octets: &[u8]) -> String {
    match octets {
        [y0, y1, month, day, hour, minute, second, ..] => {
            let year = u16::from_be_bytes([*y0, *y1]);
            format!("{year}-{month}-{day} {hour}:{minute}:{second}")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_uppercase_pairs() {
        assert_eq!(
            mac_address(&[0x00, 0x17, 0x10, 0x2B, 0x69, 0x58]),
            "00:17:10:2B:69:58"
        );
    }

    #[test]
    fn mac_address_odd_length_keeps_every_octet() {
        assert_eq!(mac_address(&[0xAA, 0xBB]), "AA:BB");
        assert_eq!(mac_address(&[]), "");
    }

    #[test]
    fn inet_address_ipv4() {
        assert_eq!(inet_address(&[192, 0, 2, 1]), "192.0.2.1");
    }

    #[test]
    fn inet_address_ipv6_full_groups() {
        let octets = [
            0x20, 0x01, 0x0d, 0xb8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x01,
        ];
        assert_eq!(
            inet_address(&octets),
            "2001:0DB8:0000:0000:0000:0000:0000:0001"
        );
    }

    #[test]
    fn inet_address_other_lengths_are_empty() {
        assert_eq!(inet_address(&[]), "");
        assert_eq!(inet_address(&[1, 2, 3, 4, 5, 6]), "");
    }

    #[test]
    fn transport_address_ip_and_port() {
        assert_eq!(transport_address(&[192, 0, 2, 1, 0, 161]), "192.0.2.1/161");
        assert_eq!(transport_address(&[10, 0, 0, 1, 0x1F, 0x90]), "10.0.0.1/8080");
        assert_eq!(transport_address(&[10, 0, 0, 1]), "");
    }

    #[test]
    fn date_and_time_unpadded() {
        assert_eq!(
            date_and_time(&[0x07, 0xE8, 5, 7, 10, 24, 11]),
            "2024-5-7 10:24:11"
        );
        // deci-seconds and UTC offset ignored
        assert_eq!(
            date_and_time(&[0x07, 0xE8, 12, 31, 23, 59, 59, 9, b'+', 2, 0]),
            "2024-12-31 23:59:59"
        );
        assert_eq!(date_and_time(&[0x07, 0xE8, 5]), "");
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        assert_eq!(text(b"eth0"), "eth0");
        assert_eq!(text(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
        assert_eq!(text(&[]), "");
    }
}
