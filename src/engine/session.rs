//! Per-call protocol session.
//!
//! A [`Session`] owns one engine for the duration of a query call. Every
//! exchange races the client's cancellation token and a deadline covering
//! the engine's own retries; dropping the session always closes the engine.

use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::{Connector, Engine, Response, WalkMethod};
use crate::client::walk::{Collector, Walked, WalkMode};
use crate::client::{MAX_OIDS_PER_REQUEST, QueryConfig};
use crate::error::{Error, Phase, Result};
use crate::oid::Oid;
use crate::version::Version;

/// Version-dependent request behaviour, fixed when the session opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// SNMPv1: one OID per GET, noSuchName tolerated, GETNEXT walks.
    Legacy,
    /// SNMPv2c/v3: batched GETs and (by default) GETBULK walks.
    Bulk { max_oids: usize, walk: WalkMethod },
}

impl Strategy {
    pub fn for_config(config: &QueryConfig) -> Self {
        match config.version() {
            Version::V1 => Strategy::Legacy,
            Version::V2c | Version::V3 => {
                let walk = match config.walk_mode() {
                    WalkMode::GetNext => WalkMethod::GetNext,
                    WalkMode::Auto | WalkMode::GetBulk => WalkMethod::GetBulk {
                        max_repetitions: config.max_repetitions(),
                    },
                };
                Strategy::Bulk {
                    max_oids: config.max_oids(),
                    walk,
                }
            }
        }
    }

    /// OIDs per GET exchange.
    pub fn batch_size(self) -> usize {
        match self {
            Strategy::Legacy => 1,
            Strategy::Bulk { max_oids, .. } => max_oids.clamp(1, MAX_OIDS_PER_REQUEST),
        }
    }

    pub fn walk_method(self) -> WalkMethod {
        match self {
            Strategy::Legacy => WalkMethod::GetNext,
            Strategy::Bulk { walk, .. } => walk,
        }
    }

    /// Whether a noSuchName status means "skip this OID" rather than failure.
    pub fn skips_no_such_name(self) -> bool {
        matches!(self, Strategy::Legacy)
    }
}

/// Cancellation and deadline applied to every exchange.
struct Guard {
    target: SocketAddr,
    cancel: CancellationToken,
    deadline: Duration,
    retries: u32,
}

impl Guard {
    async fn run<T>(&self, phase: Phase, fut: impl Future<Output = Result<T>>) -> Result<T> {
        let start = Instant::now();
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(
                    target: "snmp_query::session",
                    { snmp.target = %self.target, snmp.phase = %phase },
                    "exchange cancelled"
                );
                Err(Error::Cancelled {
                    target: self.target,
                    phase,
                    elapsed: start.elapsed(),
                }
                .boxed())
            }
            res = tokio::time::timeout(self.deadline, fut) => match res {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout {
                    target: self.target,
                    elapsed: start.elapsed(),
                    retries: self.retries,
                }
                .boxed()),
            },
        }
    }
}

/// One open engine plus the policy for using it.
pub(crate) struct Session<E: Engine> {
    engine: E,
    strategy: Strategy,
    guard: Guard,
    max_walk_results: Option<usize>,
}

impl<E: Engine> Session<E> {
    /// Create an engine through `connector` and connect it.
    ///
    /// Failures are reported as [`Error::Connect`], except cancellation,
    /// which is returned as-is. The engine is closed even when connecting
    /// fails.
    pub async fn open<C>(
        connector: &C,
        config: &QueryConfig,
        cancel: &CancellationToken,
    ) -> Result<Self>
    where
        C: Connector<Engine = E>,
    {
        let target = config.target();
        let engine = connector.open(config).map_err(|source| {
            Error::Connect {
                target,
                source,
            }
            .boxed()
        })?;

        let mut session = Session {
            engine,
            strategy: Strategy::for_config(config),
            guard: Guard {
                target,
                cancel: cancel.clone(),
                deadline: config.exchange_deadline(),
                retries: config.retries(),
            },
            max_walk_results: config.max_walk_results(),
        };

        let connect = session.engine.connect();
        match session.guard.run(Phase::Connect, connect).await {
            Ok(()) => {
                tracing::debug!(
                    target: "snmp_query::session",
                    { snmp.target = %target, snmp.version = %config.version() },
                    "session open"
                );
                Ok(session)
            }
            Err(e) if e.is_cancelled() => Err(e),
            Err(source) => Err(Error::Connect { target, source }.boxed()),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn target(&self) -> SocketAddr {
        self.guard.target
    }

    /// One GET exchange.
    pub async fn get(&mut self, oids: &[Oid]) -> Result<Response> {
        let fut = self.engine.get(oids);
        self.guard.run(Phase::Get, fut).await
    }

    /// Walk `root`, collecting leaves until the subtree ends or something
    /// goes wrong.
    pub async fn walk(&mut self, root: &Oid) -> Walked {
        let method = self.strategy.walk_method();
        let guard = &self.guard;
        let mut collector = Collector::new(root, guard.target, self.max_walk_results);
        let mut stream = self.engine.walk(root, method);

        loop {
            let next = guard
                .run(Phase::Walk, async {
                    std::future::poll_fn(|cx| stream.as_mut().poll_next(cx))
                        .await
                        .transpose()
                })
                .await;

            match next {
                Ok(Some(vb)) => match collector.push(vb) {
                    Ok(true) => {}
                    Ok(false) => return collector.finish(None),
                    Err(e) => return collector.finish(Some(e)),
                },
                Ok(None) => return collector.finish(None),
                Err(e) => return collector.finish(Some(e)),
            }
        }
    }
}

impl<E: Engine> Drop for Session<E> {
    fn drop(&mut self) {
        if let Err(e) = self.engine.close() {
            tracing::debug!(
                target: "snmp_query::session",
                { snmp.target = %self.guard.target, error = %e },
                "error closing session"
            );
        }
    }
}
