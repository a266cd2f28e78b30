//! Authentication configuration types for the query client.
//!
//! This module provides the [`Auth`] enum for specifying credentials,
//! supporting SNMPv1/v2c community strings and SNMPv3 USM. The protocol
//! engine consumes these; nothing here performs cryptography.

use crate::v3::{AuthProtocol, PrivProtocol, SecurityLevel};
use crate::version::Version;

/// SNMP version for community-based authentication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommunityVersion {
    /// SNMPv1
    V1,
    /// SNMPv2c
    #[default]
    V2c,
}

/// Authentication configuration for a query client.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Auth {
    /// Community string authentication (SNMPv1 or v2c).
    Community {
        /// SNMP version (V1 or V2c)
        #[cfg_attr(feature = "serde", serde(default))]
        version: CommunityVersion,
        /// Community string
        community: String,
    },
    /// User-based Security Model (SNMPv3).
    Usm(UsmAuth),
}

impl Default for Auth {
    fn default() -> Self {
        Auth::v2c("public")
    }
}

impl Auth {
    /// SNMPv1 community authentication.
    ///
    /// ```rust
    /// use snmp_query::Auth;
    ///
    /// let auth = Auth::v1("private");
    /// ```
    pub fn v1(community: impl Into<String>) -> Self {
        Auth::Community {
            version: CommunityVersion::V1,
            community: community.into(),
        }
    }

    /// SNMPv2c community authentication.
    ///
    /// ```rust
    /// use snmp_query::Auth;
    ///
    /// let auth = Auth::v2c("public");
    /// assert_eq!(auth, Auth::default());
    /// ```
    pub fn v2c(community: impl Into<String>) -> Self {
        Auth::Community {
            version: CommunityVersion::V2c,
            community: community.into(),
        }
    }

    /// Start building SNMPv3 USM authentication.
    ///
    /// The security level follows from what is configured:
    /// - noAuthNoPriv: username only
    /// - authNoPriv: username with authentication
    /// - authPriv: username with authentication and privacy
    ///
    /// ```rust
    /// use snmp_query::{Auth, AuthProtocol, PrivProtocol, SecurityLevel};
    ///
    /// let auth: Auth = Auth::usm("admin")
    ///     .auth(AuthProtocol::Sha256, "authpassword")
    ///     .privacy(PrivProtocol::Aes128, "privpassword")
    ///     .into();
    ///
    /// if let Auth::Usm(usm) = &auth {
    ///     assert_eq!(usm.security_level(), SecurityLevel::AuthPriv);
    /// }
    /// ```
    pub fn usm(username: impl Into<String>) -> UsmBuilder {
        UsmBuilder::new(username)
    }

    /// Protocol version implied by these credentials.
    pub fn version(&self) -> Version {
        match self {
            Auth::Community {
                version: CommunityVersion::V1,
                ..
            } => Version::V1,
            Auth::Community {
                version: CommunityVersion::V2c,
                ..
            } => Version::V2c,
            Auth::Usm(_) => Version::V3,
        }
    }
}

/// SNMPv3 USM authentication parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsmAuth {
    /// SNMPv3 username
    pub username: String,
    /// Authentication protocol (None for noAuthNoPriv)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub auth_protocol: Option<AuthProtocol>,
    /// Authentication passphrase
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub auth_password: Option<String>,
    /// Privacy protocol (None for noPriv)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub priv_protocol: Option<PrivProtocol>,
    /// Privacy passphrase
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub priv_password: Option<String>,
    /// SNMPv3 context name for VACM context selection.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub context_name: Option<String>,
}

impl UsmAuth {
    /// Security level implied by the configured protocols.
    pub fn security_level(&self) -> SecurityLevel {
        match (self.auth_protocol, self.priv_protocol) {
            (Some(_), Some(_)) => SecurityLevel::AuthPriv,
            (Some(_), None) => SecurityLevel::AuthNoPriv,
            _ => SecurityLevel::NoAuthNoPriv,
        }
    }
}

/// Builder for SNMPv3 USM authentication.
pub struct UsmBuilder {
    username: String,
    auth: Option<(AuthProtocol, String)>,
    privacy: Option<(PrivProtocol, String)>,
    context_name: Option<String>,
}

impl UsmBuilder {
    /// Create a new USM builder with the given username.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            auth: None,
            privacy: None,
            context_name: None,
        }
    }

    /// Add authentication (authNoPriv or authPriv).
    pub fn auth(mut self, protocol: AuthProtocol, password: impl Into<String>) -> Self {
        self.auth = Some((protocol, password.into()));
        self
    }

    /// Add privacy/encryption (authPriv).
    ///
    /// Privacy requires authentication; this is validated when the
    /// [`QueryConfig`](crate::QueryConfig) is built.
    pub fn privacy(mut self, protocol: PrivProtocol, password: impl Into<String>) -> Self {
        self.privacy = Some((protocol, password.into()));
        self
    }

    /// Set the SNMPv3 context name for VACM context selection.
    pub fn context_name(mut self, name: impl Into<String>) -> Self {
        self.context_name = Some(name.into());
        self
    }
}

impl From<UsmBuilder> for Auth {
    fn from(b: UsmBuilder) -> Auth {
        let (auth_protocol, auth_password) = b.auth.unzip();
        let (priv_protocol, priv_password) = b.privacy.unzip();
        Auth::Usm(UsmAuth {
            username: b.username,
            auth_protocol,
            auth_password,
            priv_protocol,
            priv_password,
            context_name: b.context_name,
        })
    }
}
