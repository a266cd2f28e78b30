//! SNMP protocol version.

use crate::error::{Error, Result};

/// SNMP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Version {
    /// SNMPv1 (RFC 1157). One unresolvable OID per response, no GETBULK.
    V1,
    /// SNMPv2c (RFC 1901)
    #[default]
    V2c,
    /// SNMPv3 (RFC 3412)
    V3,
}

impl Version {
    /// Wire value of the version field.
    pub fn as_i32(self) -> i32 {
        match self {
            Self::V1 => 0,
            Self::V2c => 1,
            Self::V3 => 3,
        }
    }

    /// Create from the wire value.
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::V1),
            1 => Some(Self::V2c),
            3 => Some(Self::V3),
            _ => None,
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::V1 => write!(f, "SNMPv1"),
            Self::V2c => write!(f, "SNMPv2c"),
            Self::V3 => write!(f, "SNMPv3"),
        }
    }
}

impl std::str::FromStr for Version {
    type Err = Box<Error>;

    /// Accepts `snmpv1|snmpv2c|snmpv3`, `v1|v2c|v3` and `1|2c|3`, case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "snmpv1" | "v1" | "1" => Ok(Self::V1),
            "snmpv2c" | "v2c" | "2c" | "2" => Ok(Self::V2c),
            "snmpv3" | "v3" | "3" => Ok(Self::V3),
            _ => Err(Error::Config(
                format!(
                    "invalid snmp version '{}'; expected one of: snmpv1, snmpv2c, snmpv3",
                    s
                )
                .into(),
            )
            .boxed()),
        }
    }
}
