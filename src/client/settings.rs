//! Flat, string-typed client settings.
//!
//! [`ClientSettings`] mirrors the shape settings usually arrive in (a config
//! file section, environment, a form): every field is a plain string or
//! number. Converting it into a [`QueryConfig`] parses the protocol names
//! and checks that the credentials required by the version and security
//! level are present.
//!
//! ```rust
//! use snmp_query::{ClientSettings, QueryConfig, Version};
//!
//! let settings = ClientSettings {
//!     target: "192.0.2.7".into(),
//!     version: "snmpv3".into(),
//!     sec_level: "authPriv".into(),
//!     sec_name: "monitor".into(),
//!     auth_protocol: "SHA-256".into(),
//!     auth_passphrase: "authpass".into(),
//!     priv_protocol: "AES".into(),
//!     priv_passphrase: "privpass".into(),
//!     ..Default::default()
//! };
//!
//! let config = QueryConfig::try_from(settings).unwrap();
//! assert_eq!(config.version(), Version::V3);
//! ```

use std::time::Duration;

use super::auth::Auth;
use super::config::{
    DEFAULT_MAX_OIDS_PER_REQUEST, DEFAULT_MAX_REPETITIONS, DEFAULT_PORT, DEFAULT_RETRIES,
    DEFAULT_TIMEOUT, QueryConfig,
};
use crate::error::{Error, Result};
use crate::v3::{AuthProtocol, PrivProtocol, SecurityLevel};
use crate::version::Version;

/// Client settings in flat string form.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientSettings {
    /// Agent IP address.
    pub target: String,
    /// Agent port.
    pub port: u16,
    /// `snmpv1`, `snmpv2c` or `snmpv3` (also `1`, `2c`, `3`).
    pub version: String,
    /// Community string (v1/v2c).
    pub community: String,
    /// `noAuthNoPriv`, `authNoPriv` or `authPriv` (v3).
    pub sec_level: String,
    /// USM user name (v3).
    pub sec_name: String,
    /// `MD5`, `SHA`, `SHA-224`, `SHA-256`, `SHA-384` or `SHA-512`.
    pub auth_protocol: String,
    /// Authentication passphrase.
    pub auth_passphrase: String,
    /// `DES`, `AES`, `AES192`, `AES192C`, `AES256` or `AES256C`.
    pub priv_protocol: String,
    /// Privacy passphrase.
    pub priv_passphrase: String,
    /// SNMPv3 context name; empty for the default context.
    pub context_name: String,
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Retries per exchange.
    pub retries: u32,
    /// GETBULK max-repetitions.
    pub max_repetitions: u32,
    /// OIDs per GET request.
    pub max_oids: usize,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            target: String::new(),
            port: DEFAULT_PORT,
            version: Version::V2c.to_string(),
            community: String::new(),
            sec_level: String::new(),
            sec_name: String::new(),
            auth_protocol: String::new(),
            auth_passphrase: String::new(),
            priv_protocol: String::new(),
            priv_passphrase: String::new(),
            context_name: String::new(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            retries: DEFAULT_RETRIES,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            max_oids: DEFAULT_MAX_OIDS_PER_REQUEST,
        }
    }
}

fn config_err(msg: impl Into<Box<str>>) -> Box<Error> {
    Error::Config(msg.into()).boxed()
}

impl ClientSettings {
    fn usm(&self) -> Result<Auth> {
        if self.sec_name.is_empty() {
            return Err(config_err("security name is required for SNMPv3"));
        }
        let level: SecurityLevel = self
            .sec_level
            .parse()
            .map_err(|e: crate::v3::ParseProtocolError| config_err(e.to_string()))?;

        let mut usm = Auth::usm(&self.sec_name);
        if level.requires_auth() {
            if self.auth_protocol.is_empty() {
                return Err(config_err(format!(
                    "authentication protocol is required for {}",
                    level
                )));
            }
            let protocol: AuthProtocol = self
                .auth_protocol
                .parse()
                .map_err(|e: crate::v3::ParseProtocolError| config_err(e.to_string()))?;
            usm = usm.auth(protocol, &self.auth_passphrase);
        }
        if level.requires_privacy() {
            if self.priv_protocol.is_empty() {
                return Err(config_err(format!(
                    "privacy protocol is required for {}",
                    level
                )));
            }
            let protocol: PrivProtocol = self
                .priv_protocol
                .parse()
                .map_err(|e: crate::v3::ParseProtocolError| config_err(e.to_string()))?;
            usm = usm.privacy(protocol, &self.priv_passphrase);
        }
        if !self.context_name.is_empty() {
            usm = usm.context_name(&self.context_name);
        }
        Ok(usm.into())
    }
}

impl TryFrom<ClientSettings> for QueryConfig {
    type Error = Box<Error>;

    fn try_from(settings: ClientSettings) -> Result<Self> {
        let version: Version = settings.version.parse()?;
        let auth = match version {
            Version::V1 => Auth::v1(&settings.community),
            Version::V2c => Auth::v2c(&settings.community),
            Version::V3 => settings.usm()?,
        };

        QueryConfig::builder(settings.target.as_str(), auth)
            .port(settings.port)
            .timeout(Duration::from_millis(settings.timeout_ms))
            .retries(settings.retries)
            .max_repetitions(settings.max_repetitions)
            .max_oids(settings.max_oids)
            .build()
    }
}
