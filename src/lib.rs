// Allow large error types - the Error enum includes OIDs inline for debugging convenience.
#![allow(clippy::result_large_err)]

//! # snmp-query
//!
//! Name-based SNMP queries for Rust.
//!
//! ## Features
//!
//! - Resolve MIB object names to OIDs through a pluggable [`Directory`](mib::Directory)
//! - Batched GETs that tolerate per-OID failures (SNMPv1 noSuchName, v2c exceptions)
//! - Subtree walks with table row reconstruction
//! - Display rendering by declared type: enums, BITS, MAC, Inet and transport
//!   addresses, DateAndTime
//! - Cancellation and per-exchange deadlines, with the session always released
//!
//! The SNMP wire protocol itself is delegated to an [`Engine`](engine::Engine)
//! implementation supplied through a [`Connector`](engine::Connector).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use snmp_query::engine::Connector;
//! use snmp_query::mib::MibDirectory;
//! use snmp_query::{Auth, Client, QueryConfig};
//!
//! async fn report(mibs: Arc<MibDirectory>, engine: impl Connector) -> snmp_query::Result<()> {
//!     let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public")).build()?;
//!     let client = Client::new(config, mibs, engine);
//!
//!     println!("sysName: {}", client.get("sysName").await?);
//!     for row in client.get_bulk_table("ifEntry").await? {
//!         println!("{}: {:?}", row["index"], row.get("ifDescr"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## SNMPv3
//!
//! ```rust
//! use snmp_query::{Auth, AuthProtocol, PrivProtocol, QueryConfig, Version};
//!
//! let config = QueryConfig::builder(
//!     "192.0.2.1",
//!     Auth::usm("admin")
//!         .auth(AuthProtocol::Sha256, "authpass123")
//!         .privacy(PrivProtocol::Aes128, "privpass123"),
//! )
//! .build()
//! .unwrap();
//! assert_eq!(config.version(), Version::V3);
//! ```

pub mod client;
pub mod engine;
pub mod error;
pub mod format;
pub mod mib;
pub mod oid;
pub mod v3;
pub mod value;
pub mod varbind;
pub mod version;

// Re-exports for convenience
pub use client::{
    Auth, Client, ClientSettings, CommunityVersion, INDEX_FIELD, QueryConfig, QueryConfigBuilder,
    Row, UsmAuth, UsmBuilder, ValueMap, WalkMode,
};
pub use engine::{Connector, Engine, Response, WalkMethod, WalkStream};
pub use error::{Error, ErrorStatus, Phase, Result, WalkAbortReason};
pub use format::render;
pub use mib::{Directory, ManagedObject, MibDirectory};
pub use oid::{Oid, compose, decompose};
pub use v3::{AuthProtocol, ParseProtocolError, PrivProtocol, SecurityLevel};
pub use value::Value;
pub use varbind::VarBind;
pub use version::Version;
