//! Formatting utilities for SNMP values.
//!
//! [`render`] turns a retrieved [`Value`](crate::Value) into the display
//! string for its [`ManagedObject`](crate::mib::ManagedObject):
//! enum labels, BITS label lists, and octet strings laid out by textual
//! convention (MAC, Inet and transport addresses, DateAndTime).
//!
//! ```
//! use snmp_query::format::render;
//! use snmp_query::mib::{BaseKind, ManagedObject};
//! use snmp_query::{Value, oid};
//!
//! let phys = ManagedObject::new("ifPhysAddress", oid!(1, 3, 6, 1, 2, 1, 2, 2, 1, 6), BaseKind::OctetString)
//!     .declared_type("MacAddress");
//! let mac = Value::from(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e][..]);
//! assert_eq!(render(&phys, &mac), "00:1A:2B:3C:4D:5E");
//! ```
//!
//! ## Hex Encoding
//!
//! The [`hex`] module provides hexadecimal encoding utilities.
//!
//! ```
//! use snmp_query::format::hex;
//!
//! assert_eq!(hex::encode(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
//!
//! // Lazy formatting for logging
//! let data = [0x00, 0xff];
//! println!("{}", hex::Bytes(&data)); // prints: 00ff
//! ```

pub mod hex;
mod render;
pub mod textual;

pub use render::render;
