//! Managed object metadata records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::value::Value;

/// Base kind of a managed object's syntax, driving value rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BaseKind {
    /// Any numeric syntax (signed, unsigned, counters, gauges, timeticks, floats).
    Integer,
    /// OCTET STRING and its textual conventions.
    OctetString,
    /// OBJECT IDENTIFIER
    ObjectIdentifier,
    /// Enumerated INTEGER with labelled values.
    Enum,
    /// BITS with labelled positions.
    Bits,
    /// Anything else (tables, entries, notifications, opaque syntaxes).
    #[default]
    Unknown,
}

impl BaseKind {
    /// Map an SMI base type name to a kind.
    ///
    /// Every numeric base collapses into [`BaseKind::Integer`]. Unrecognised
    /// names map to [`BaseKind::Unknown`].
    ///
    /// ```
    /// use snmp_query::mib::BaseKind;
    ///
    /// assert_eq!(BaseKind::from_smi("Counter64"), BaseKind::Integer);
    /// assert_eq!(BaseKind::from_smi("OCTET STRING"), BaseKind::OctetString);
    /// assert_eq!(BaseKind::from_smi("Enumeration"), BaseKind::Enum);
    /// assert_eq!(BaseKind::from_smi("Pointer"), BaseKind::Unknown);
    /// ```
    pub fn from_smi(name: &str) -> Self {
        match name {
            "Integer32" | "INTEGER" | "Integer" | "Unsigned32" | "Integer64" | "Unsigned64"
            | "Counter32" | "Counter64" | "Gauge32" | "TimeTicks" | "Float32" | "Float64"
            | "Float128" => Self::Integer,
            "OctetString" | "OCTET STRING" | "IpAddress" | "Opaque" => Self::OctetString,
            "ObjectIdentifier" | "OBJECT IDENTIFIER" => Self::ObjectIdentifier,
            "Enum" | "Enumeration" => Self::Enum,
            "Bits" | "BITS" => Self::Bits,
            _ => Self::Unknown,
        }
    }
}

/// Access level of an object (informational only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Access {
    /// Can only be read.
    #[default]
    ReadOnly,
    /// Can be read and written.
    ReadWrite,
    /// Can be read, written, or used to create rows.
    ReadCreate,
    /// Not accessible via SNMP.
    NotAccessible,
    /// Accessible only for notifications.
    AccessibleForNotify,
    /// Write-only (deprecated but seen in wild).
    WriteOnly,
}

impl Access {
    /// Get a string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::ReadWrite => "read-write",
            Self::ReadCreate => "read-create",
            Self::NotAccessible => "not-accessible",
            Self::AccessibleForNotify => "accessible-for-notify",
            Self::WriteOnly => "write-only",
        }
    }

    /// Check if the object is accessible for GET operations.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        matches!(self, Self::ReadOnly | Self::ReadWrite | Self::ReadCreate)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Access {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "read-only" | "readonly" => Self::ReadOnly,
            "read-write" | "readwrite" => Self::ReadWrite,
            "read-create" | "readcreate" => Self::ReadCreate,
            "not-accessible" | "notaccessible" => Self::NotAccessible,
            "accessible-for-notify" | "notify" => Self::AccessibleForNotify,
            "write-only" | "writeonly" => Self::WriteOnly,
            _ => return Err(Error::Config(format!("unknown access '{}'", s).into()).boxed()),
        })
    }
}

/// Metadata for one named, addressable object.
///
/// Built once when the directory is populated and read-only afterwards.
///
/// ```
/// use snmp_query::mib::{BaseKind, ManagedObject};
/// use snmp_query::oid;
///
/// let if_oper_status = ManagedObject::new("ifOperStatus", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 8), BaseKind::Enum)
///     .labels([(1, "up"), (2, "down"), (3, "testing")]);
///
/// assert_eq!(if_oper_status.label(2), Some("down"));
/// assert_eq!(if_oper_status.parent.as_ref().map(|p| p.to_string()).as_deref(), Some("1.3.6.1.2.1.2.2.1"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManagedObject {
    /// Unique symbolic name.
    pub name: String,
    /// Numeric address.
    pub oid: Oid,
    /// Address of the immediate parent node, `None` for roots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<Oid>,
    /// Declared type or textual convention name (may be empty).
    #[cfg_attr(feature = "serde", serde(default))]
    pub declared_type: String,
    /// Base kind used to pick a renderer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: BaseKind,
    /// Enum values or bit positions mapped to labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub labels: BTreeMap<u32, String>,
    /// Access level.
    #[cfg_attr(feature = "serde", serde(default))]
    pub access: Access,
}

impl ManagedObject {
    /// Create an object; the parent is derived from the address.
    pub fn new(name: impl Into<String>, oid: Oid, kind: BaseKind) -> Self {
        let parent = oid.parent().filter(|p| !p.is_empty());
        Self {
            name: name.into(),
            oid,
            parent,
            declared_type: String::new(),
            kind,
            labels: BTreeMap::new(),
            access: Access::default(),
        }
    }

    /// Set the declared type name.
    pub fn declared_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = declared_type.into();
        self
    }

    /// Set enum or bit labels.
    pub fn labels<L: Into<String>>(mut self, labels: impl IntoIterator<Item = (u32, L)>) -> Self {
        self.labels = labels.into_iter().map(|(k, v)| (k, v.into())).collect();
        self
    }

    /// Set the access level.
    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Override the parent address.
    pub fn parent(mut self, parent: Option<Oid>) -> Self {
        self.parent = parent;
        self
    }

    /// Label for an enum value or bit position.
    pub fn label(&self, key: u32) -> Option<&str> {
        self.labels.get(&key).map(String::as_str)
    }

    /// Render a value retrieved for this object.
    ///
    /// Shorthand for [`format::render`](crate::format::render).
    pub fn render(&self, value: &Value) -> String {
        crate::format::render(self, value)
    }
}
