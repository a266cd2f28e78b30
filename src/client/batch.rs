//! Batched GET retrieval.

use crate::engine::{Engine, Session};
use crate::error::{Error, ErrorStatus};
use crate::oid::Oid;
use crate::varbind::VarBind;

/// Varbinds decoded so far, plus the failure that stopped retrieval.
#[derive(Debug, Default)]
pub(crate) struct Fetched {
    pub varbinds: Vec<VarBind>,
    pub error: Option<Box<Error>>,
}

/// GET `oids` in batches sized by the session's strategy.
///
/// Exception values are skipped. Under SNMPv1 a noSuchName response drops
/// the first OID of the batch and retries the rest; any other error status
/// or exchange failure stops retrieval and discards the failing batch.
pub(crate) async fn fetch<E: Engine>(session: &mut Session<E>, oids: &[Oid]) -> Fetched {
    let strategy = session.strategy();
    let batch_size = strategy.batch_size();
    let batch_total = oids.len().div_ceil(batch_size);
    let mut fetched = Fetched {
        varbinds: Vec::with_capacity(oids.len()),
        error: None,
    };

    let mut remaining = oids;
    let mut batch = 0usize;
    while !remaining.is_empty() {
        let take = batch_size.min(remaining.len());
        let chunk = &remaining[..take];
        batch += 1;

        tracing::debug!(
            target: "snmp_query::client",
            { snmp.batch = batch, snmp.batch_total = batch_total, snmp.oid_count = take },
            "sending GET batch"
        );

        let response = match session.get(chunk).await {
            Ok(response) => response,
            Err(e) => {
                fetched.error = Some(e);
                return fetched;
            }
        };

        match response.status {
            ErrorStatus::NoError => {}
            ErrorStatus::NoSuchName if strategy.skips_no_such_name() => {
                tracing::debug!(
                    target: "snmp_query::client",
                    { snmp.oid = %chunk[0], snmp.error_index = response.index },
                    "noSuchName, skipping"
                );
                remaining = &remaining[1..];
                continue;
            }
            status => {
                let oid = (response.index as usize)
                    .checked_sub(1)
                    .and_then(|i| chunk.get(i))
                    .cloned();
                fetched.error = Some(
                    Error::Snmp {
                        target: session.target(),
                        status,
                        index: response.index,
                        oid,
                    }
                    .boxed(),
                );
                return fetched;
            }
        }

        for vb in response.varbinds {
            if vb.value.is_exception() {
                tracing::debug!(
                    target: "snmp_query::client",
                    { snmp.oid = %vb.oid, snmp.value = %vb.value },
                    "skipping exception value"
                );
                continue;
            }
            fetched.varbinds.push(vb);
        }
        remaining = &remaining[take..];
    }

    fetched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Auth, QueryConfig};
    use crate::engine::mock::{MockAgent, MockReply};
    use crate::oid;
    use crate::value::Value;
    use tokio_util::sync::CancellationToken;

    fn sys(n: u32) -> Oid {
        oid!(1, 3, 6, 1, 2, 1, 1).child(n).child(0)
    }

    fn agent() -> MockAgent {
        MockAgent::new()
            .with(sys(1), "router")
            .with(sys(3), Value::TimeTicks(4200))
            .with(sys(5), "core-1")
    }

    async fn run(agent: &MockAgent, auth: Auth, max_oids: usize, oids: &[Oid]) -> Fetched {
        let config = QueryConfig::builder("192.0.2.1", auth)
            .max_oids(max_oids)
            .build()
            .unwrap();
        let mut session = Session::open(agent, &config, &CancellationToken::new())
            .await
            .unwrap();
        fetch(&mut session, oids).await
    }

    #[tokio::test]
    async fn batches_by_max_oids() {
        let agent = agent();
        let fetched = run(&agent, Auth::v2c("public"), 2, &[sys(1), sys(3), sys(5)]).await;
        assert!(fetched.error.is_none());
        assert_eq!(fetched.varbinds.len(), 3);
        assert_eq!(agent.get_count(), 2);
    }

    #[tokio::test]
    async fn v1_sends_one_oid_per_request() {
        let agent = agent();
        let fetched = run(&agent, Auth::v1("public"), 10, &[sys(1), sys(3), sys(5)]).await;
        assert_eq!(fetched.varbinds.len(), 3);
        assert_eq!(agent.get_count(), 3);
    }

    #[tokio::test]
    async fn v1_no_such_name_skips_the_oid() {
        let agent = agent();
        let fetched = run(&agent, Auth::v1("public"), 10, &[sys(1), sys(2), sys(5)]).await;
        assert!(fetched.error.is_none());
        let oids: Vec<_> = fetched.varbinds.iter().map(|vb| vb.oid.clone()).collect();
        assert_eq!(oids, vec![sys(1), sys(5)]);
    }

    #[tokio::test]
    async fn v2c_exceptions_are_skipped() {
        let agent = agent();
        let fetched = run(&agent, Auth::v2c("public"), 10, &[sys(1), sys(2), sys(99)]).await;
        assert!(fetched.error.is_none());
        assert_eq!(fetched.varbinds.len(), 1);
    }

    #[tokio::test]
    async fn error_status_stops_and_names_the_oid() {
        let agent = agent();
        agent.queue(MockReply::Auto);
        agent.queue(MockReply::Status(ErrorStatus::GenErr, 1));
        let fetched = run(&agent, Auth::v2c("public"), 1, &[sys(1), sys(3), sys(5)]).await;
        assert_eq!(fetched.varbinds.len(), 1);
        match fetched.error.as_deref() {
            Some(Error::Snmp { status, oid, .. }) => {
                assert_eq!(*status, ErrorStatus::GenErr);
                assert_eq!(oid.as_ref(), Some(&sys(3)));
            }
            other => panic!("expected Snmp error, got {other:?}"),
        }
        assert_eq!(agent.get_count(), 2);
    }

    #[tokio::test]
    async fn network_error_keeps_earlier_batches() {
        let agent = agent();
        agent.queue(MockReply::Auto);
        agent.queue(MockReply::Network("unreachable".into()));
        let fetched = run(&agent, Auth::v2c("public"), 2, &[sys(1), sys(3), sys(5)]).await;
        assert_eq!(fetched.varbinds.len(), 2);
        assert!(matches!(
            fetched.error.as_deref(),
            Some(Error::Network { .. })
        ));
    }
}
