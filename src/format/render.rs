//! Rendering of retrieved values according to their object's metadata.

use std::fmt::Write;

use crate::format::textual::{self, TextualConvention};
use crate::mib::{BaseKind, ManagedObject};
use crate::oid::SEPARATOR;
use crate::value::Value;

/// Render `value` for display using `object`'s base kind and declared type.
///
/// Never fails. A value whose shape does not fit the object's kind falls
/// back to the value's own `Display` form.
///
/// ```
/// use snmp_query::format::render;
/// use snmp_query::mib::{BaseKind, ManagedObject};
/// use snmp_query::{Value, oid};
///
/// let status = ManagedObject::new("ifOperStatus", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 8), BaseKind::Enum)
///     .labels([(1, "up"), (2, "down")]);
///
/// assert_eq!(render(&status, &Value::Integer(1)), "up");
/// assert_eq!(render(&status, &Value::Integer(3)), "3");
/// ```
pub fn render(object: &ManagedObject, value: &Value) -> String {
    match object.kind {
        BaseKind::Integer => integer(value),
        BaseKind::ObjectIdentifier => object_identifier(value),
        BaseKind::Enum => enumeration(object, value),
        BaseKind::Bits => bits(object, value),
        BaseKind::OctetString => octet_string(object, value),
        BaseKind::Unknown => value.to_string(),
    }
}

fn integer(value: &Value) -> String {
    match value.as_integer() {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}

fn object_identifier(value: &Value) -> String {
    let text = value.to_string();
    match text.strip_prefix(SEPARATOR) {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

fn enumeration(object: &ManagedObject, value: &Value) -> String {
    let Some(n) = value.as_integer() else {
        return value.to_string();
    };
    u32::try_from(n)
        .ok()
        .and_then(|key| object.label(key))
        .map(str::to_string)
        .unwrap_or_else(|| n.to_string())
}

fn bits(object: &ManagedObject, value: &Value) -> String {
    let Some(octets) = value.as_bytes() else {
        return value.to_string();
    };
    let mut out = String::new();
    for (&position, label) in &object.labels {
        let byte = (position / 8) as usize;
        let mask = 0x80u8 >> (position % 8);
        if octets.get(byte).is_some_and(|b| b & mask != 0) {
            let _ = write!(out, " {}", label);
        }
    }
    out
}

fn octet_string(object: &ManagedObject, value: &Value) -> String {
    let Some(octets) = value.octets() else {
        return value.to_string();
    };
    match TextualConvention::from_name(&object.declared_type) {
        Some(tc) => tc.render(octets),
        None => textual::text(octets),
    }
}
