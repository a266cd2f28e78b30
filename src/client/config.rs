//! Query configuration and its builder.
//!
//! A [`QueryConfig`] can only be obtained through [`QueryConfigBuilder::build`]
//! (or [`ClientSettings`](super::ClientSettings)), both of which validate
//! eagerly, so every config a session sees is usable as-is.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crate::client::auth::{Auth, CommunityVersion};
use crate::client::walk::WalkMode;
use crate::error::{Error, Result};
use crate::version::Version;

/// Default SNMP agent port.
pub const DEFAULT_PORT: u16 = 161;

/// Default timeout for a single exchange attempt.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of retries the engine performs per exchange.
pub const DEFAULT_RETRIES: u32 = 3;

/// Default maximum number of OIDs per GET request.
pub const DEFAULT_MAX_OIDS_PER_REQUEST: usize = 10;

/// Upper bound on OIDs per GET request, whatever is configured.
pub const MAX_OIDS_PER_REQUEST: usize = 60;

/// Default max-repetitions for GETBULK walks.
pub const DEFAULT_MAX_REPETITIONS: u32 = 25;

/// Validated, immutable query configuration.
///
/// # Example
///
/// ```rust
/// use snmp_query::{Auth, QueryConfig, Version};
/// use std::time::Duration;
///
/// let config = QueryConfig::builder("192.0.2.10", Auth::v2c("public"))
///     .timeout(Duration::from_secs(2))
///     .retries(1)
///     .max_oids(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.target().port(), 161);
/// assert_eq!(config.version(), Version::V2c);
/// ```
#[derive(Debug, Clone)]
pub struct QueryConfig {
    target: SocketAddr,
    auth: Auth,
    timeout: Duration,
    retries: u32,
    max_oids: usize,
    max_repetitions: u32,
    walk_mode: WalkMode,
    max_walk_results: Option<usize>,
}

impl QueryConfig {
    /// Start building a configuration for `target` (an IP address, with or
    /// without a port).
    pub fn builder(target: impl Into<String>, auth: impl Into<Auth>) -> QueryConfigBuilder {
        QueryConfigBuilder::new(target, auth)
    }

    /// Agent address.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Credentials.
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Protocol version implied by the credentials.
    pub fn version(&self) -> Version {
        self.auth.version()
    }

    /// Timeout for one exchange attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries the engine performs per exchange.
    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Configured OIDs per GET request, before the version rules apply.
    pub fn max_oids(&self) -> usize {
        self.max_oids
    }

    /// Max-repetitions for GETBULK walks.
    pub fn max_repetitions(&self) -> u32 {
        self.max_repetitions
    }

    /// Walk mode.
    pub fn walk_mode(&self) -> WalkMode {
        self.walk_mode
    }

    /// Optional cap on leaves collected per walk.
    pub fn max_walk_results(&self) -> Option<usize> {
        self.max_walk_results
    }

    /// Upper bound on one exchange including the engine's retries.
    pub fn exchange_deadline(&self) -> Duration {
        self.timeout.saturating_mul(self.retries.saturating_add(1))
    }
}

/// Builder for [`QueryConfig`].
#[derive(Debug, Clone)]
pub struct QueryConfigBuilder {
    target: String,
    port: Option<u16>,
    auth: Auth,
    timeout: Duration,
    retries: u32,
    max_oids: usize,
    max_repetitions: u32,
    walk_mode: WalkMode,
    max_walk_results: Option<usize>,
}

impl QueryConfigBuilder {
    /// Create a new builder.
    pub fn new(target: impl Into<String>, auth: impl Into<Auth>) -> Self {
        Self {
            target: target.into(),
            port: None,
            auth: auth.into(),
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            max_oids: DEFAULT_MAX_OIDS_PER_REQUEST,
            max_repetitions: DEFAULT_MAX_REPETITIONS,
            walk_mode: WalkMode::Auto,
            max_walk_results: None,
        }
    }

    /// Set the agent port (default: the port in the target, else 161).
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the per-attempt timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries the engine performs (default: 3).
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Set the maximum OIDs per GET request (default: 10, capped at 60).
    ///
    /// Zero is treated as one. SNMPv1 always uses one.
    pub fn max_oids(mut self, max: usize) -> Self {
        self.max_oids = max;
        self
    }

    /// Set max-repetitions for GETBULK (default: 25; zero selects the default).
    pub fn max_repetitions(mut self, max: u32) -> Self {
        self.max_repetitions = if max == 0 { DEFAULT_MAX_REPETITIONS } else { max };
        self
    }

    /// Set the walk mode (default: [`WalkMode::Auto`]).
    pub fn walk_mode(mut self, mode: WalkMode) -> Self {
        self.walk_mode = mode;
        self
    }

    /// Cap the number of leaves a single walk collects.
    pub fn max_walk_results(mut self, limit: usize) -> Self {
        self.max_walk_results = Some(limit);
        self
    }

    fn validate(&self) -> Result<()> {
        match &self.auth {
            Auth::Community { community, .. } => {
                if community.is_empty() {
                    return Err(
                        Error::Config("community is required for SNMPv1/v2c".into()).boxed()
                    );
                }
            }
            Auth::Usm(usm) => {
                if usm.username.is_empty() {
                    return Err(Error::Config("user name is required for SNMPv3".into()).boxed());
                }
                // Privacy requires authentication
                if usm.priv_protocol.is_some() && usm.auth_protocol.is_none() {
                    return Err(Error::Config("privacy requires authentication".into()).boxed());
                }
                if usm.auth_protocol.is_some()
                    && usm.auth_password.as_deref().is_none_or(str::is_empty)
                {
                    return Err(
                        Error::Config("authentication passphrase is required".into()).boxed()
                    );
                }
                if usm.priv_protocol.is_some()
                    && usm.priv_password.as_deref().is_none_or(str::is_empty)
                {
                    return Err(Error::Config("privacy passphrase is required".into()).boxed());
                }
            }
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".into()).boxed());
        }

        // Validate walk mode for v1
        if let Auth::Community {
            version: CommunityVersion::V1,
            ..
        } = &self.auth
            && self.walk_mode == WalkMode::GetBulk
        {
            return Err(Error::Config("GETBULK not supported in SNMPv1".into()).boxed());
        }

        Ok(())
    }

    fn resolve_target(&self) -> Result<SocketAddr> {
        let addr = if let Ok(addr) = self.target.parse::<SocketAddr>() {
            addr
        } else if let Ok(ip) = self.target.parse::<IpAddr>() {
            SocketAddr::new(ip, DEFAULT_PORT)
        } else {
            return Err(Error::Config(
                format!("invalid target '{}': expected an IP address", self.target).into(),
            )
            .boxed());
        };
        Ok(match self.port {
            Some(port) => SocketAddr::new(addr.ip(), port),
            None => addr,
        })
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<QueryConfig> {
        self.validate()?;
        let target = self.resolve_target()?;

        if self.max_oids > MAX_OIDS_PER_REQUEST {
            tracing::debug!(
                target: "snmp_query::client",
                { snmp.max_oids = self.max_oids, snmp.cap = MAX_OIDS_PER_REQUEST },
                "max_oids above protocol cap, clamping"
            );
        }

        Ok(QueryConfig {
            target,
            auth: self.auth,
            timeout: self.timeout,
            retries: self.retries,
            max_oids: self.max_oids.clamp(1, MAX_OIDS_PER_REQUEST),
            max_repetitions: self.max_repetitions,
            walk_mode: self.walk_mode,
            max_walk_results: self.max_walk_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v3::{AuthProtocol, PrivProtocol};

    fn config_error(result: Result<QueryConfig>) -> String {
        match result {
            Err(e) => match *e {
                Error::Config(msg) => msg.into_string(),
                other => panic!("expected Config error, got {other:?}"),
            },
            Ok(_) => panic!("expected an error"),
        }
    }

    #[test]
    fn defaults() {
        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
            .build()
            .unwrap();
        assert_eq!(config.target(), "192.0.2.1:161".parse().unwrap());
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.retries(), DEFAULT_RETRIES);
        assert_eq!(config.max_oids(), DEFAULT_MAX_OIDS_PER_REQUEST);
        assert_eq!(config.max_repetitions(), DEFAULT_MAX_REPETITIONS);
        assert_eq!(config.walk_mode(), WalkMode::Auto);
        assert_eq!(config.exchange_deadline(), Duration::from_secs(20));
    }

    #[test]
    fn target_with_port_and_override() {
        let config = QueryConfig::builder("192.0.2.1:1161", Auth::v2c("public"))
            .build()
            .unwrap();
        assert_eq!(config.target().port(), 1161);

        let config = QueryConfig::builder("192.0.2.1:1161", Auth::v2c("public"))
            .port(16100)
            .build()
            .unwrap();
        assert_eq!(config.target().port(), 16100);

        let config = QueryConfig::builder("2001:db8::1", Auth::v2c("public"))
            .build()
            .unwrap();
        assert!(config.target().is_ipv6());
    }

    #[test]
    fn hostname_target_rejected() {
        let msg = config_error(QueryConfig::builder("router.example", Auth::v2c("public")).build());
        assert!(msg.contains("invalid target"));
    }

    #[test]
    fn empty_community_rejected() {
        let msg = config_error(QueryConfig::builder("192.0.2.1", Auth::v1("")).build());
        assert!(msg.contains("community is required"));
    }

    #[test]
    fn privacy_without_auth_rejected() {
        let auth = Auth::usm("admin").privacy(PrivProtocol::Aes128, "privpass");
        let msg = config_error(QueryConfig::builder("192.0.2.1", auth).build());
        assert!(msg.contains("privacy requires authentication"));
    }

    #[test]
    fn empty_passphrases_rejected() {
        let auth = Auth::usm("admin").auth(AuthProtocol::Sha1, "");
        let msg = config_error(QueryConfig::builder("192.0.2.1", auth).build());
        assert!(msg.contains("authentication passphrase"));

        let auth = Auth::usm("admin")
            .auth(AuthProtocol::Sha1, "authpass")
            .privacy(PrivProtocol::Des, "");
        let msg = config_error(QueryConfig::builder("192.0.2.1", auth).build());
        assert!(msg.contains("privacy passphrase"));
    }

    #[test]
    fn empty_user_rejected() {
        let msg = config_error(QueryConfig::builder("192.0.2.1", Auth::usm("")).build());
        assert!(msg.contains("user name"));
    }

    #[test]
    fn getbulk_on_v1_rejected() {
        let msg = config_error(
            QueryConfig::builder("192.0.2.1", Auth::v1("public"))
                .walk_mode(WalkMode::GetBulk)
                .build(),
        );
        assert!(msg.contains("GETBULK"));
    }

    #[test]
    fn max_oids_clamped() {
        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
            .max_oids(500)
            .build()
            .unwrap();
        assert_eq!(config.max_oids(), MAX_OIDS_PER_REQUEST);

        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
            .max_oids(0)
            .build()
            .unwrap();
        assert_eq!(config.max_oids(), 1);
    }

    #[test]
    fn zero_max_repetitions_uses_default() {
        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
            .max_repetitions(0)
            .build()
            .unwrap();
        assert_eq!(config.max_repetitions(), DEFAULT_MAX_REPETITIONS);
    }

    #[test]
    fn zero_timeout_rejected() {
        let msg = config_error(
            QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
                .timeout(Duration::ZERO)
                .build(),
        );
        assert!(msg.contains("timeout"));
    }
}
