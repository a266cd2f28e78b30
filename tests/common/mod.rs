//! Shared test infrastructure for snmp-query.
//!
//! Provides client constructors over the mock agent, fixtures, and tracing
//! setup.

// Allow dead code and unused imports since not all test files use all utilities
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;

pub use fixtures::{
    combined, directory, if_descr, if_entry, interface_table, sys_name, sys_uptime, system,
    system_mib,
};

use std::sync::{Arc, Once};

use snmp_query::engine::mock::MockAgent;
use snmp_query::{Auth, Client, Oid, QueryConfig, QueryConfigBuilder, Value};

/// Install a fmt subscriber honouring `RUST_LOG`, once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Mock agent populated with `data`.
pub fn agent_with(data: impl IntoIterator<Item = (Oid, Value)>) -> MockAgent {
    let agent = MockAgent::new();
    for (oid, value) in data {
        agent.insert(oid, value);
    }
    agent
}

/// Config builder for the documentation address.
pub fn config(auth: impl Into<Auth>) -> QueryConfigBuilder {
    QueryConfig::builder("192.0.2.1", auth)
}

/// Client over `agent` with the fixture directory and default settings.
pub fn client(agent: &MockAgent, auth: impl Into<Auth>) -> Client<MockAgent> {
    client_with(agent, config(auth))
}

/// Client over `agent` with the fixture directory and a custom config.
pub fn client_with(agent: &MockAgent, builder: QueryConfigBuilder) -> Client<MockAgent> {
    init_tracing();
    let config = builder.build().unwrap();
    Client::new(config, Arc::new(directory()), agent.clone())
}
