//! Mock protocol engine for testing.
//!
//! [`MockAgent`] is an in-memory agent: a sorted table of OID values plus a
//! script of canned replies. It implements [`Connector`], so a client can
//! be pointed at it directly; every engine it hands out shares the same
//! state, which lets tests inspect what was exchanged after the fact.

use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use futures_core::Stream;

use super::{Connector, Engine, Response, WalkMethod, WalkStream};
use crate::client::QueryConfig;
use crate::error::{Error, ErrorStatus, Result};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::VarBind;
use crate::version::Version;

/// A canned reply for the next exchange.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Answer from the data table (the default when the script is empty).
    Auto,
    /// Respond with this error status and index, echoing NULL varbinds.
    Status(ErrorStatus, u32),
    /// Fail with a network error.
    Network(String),
    /// Never answer.
    Hang,
    /// Return exactly these varbinds (GET response or walk leaves, in order).
    Leaves(Vec<VarBind>),
    /// Walk normally for this many leaves, then fail with a network error.
    WalkErrorAfter(usize),
}

/// An exchange the agent has seen.
#[derive(Clone, Debug, PartialEq)]
pub enum Exchange {
    /// A GET for these OIDs.
    Get(Vec<Oid>),
    /// A walk of this root.
    Walk(Oid, WalkMethod),
}

#[derive(Default)]
struct MockInner {
    data: BTreeMap<Oid, Value>,
    connect_script: VecDeque<MockReply>,
    script: VecDeque<MockReply>,
    exchanges: Vec<Exchange>,
    connects: usize,
    closes: usize,
}

/// Scripted in-memory SNMP agent.
///
/// # Example
///
/// ```rust
/// use snmp_query::engine::mock::{MockAgent, MockReply};
/// use snmp_query::{ErrorStatus, Value, oid};
///
/// let agent = MockAgent::new()
///     .with(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("core-1"));
///
/// // The first exchange fails, the rest answer from the table
/// agent.queue(MockReply::Status(ErrorStatus::GenErr, 1));
/// assert!(agent.exchanges().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct MockAgent {
    inner: Arc<Mutex<MockInner>>,
}

impl MockAgent {
    /// Create an agent with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value (builder style).
    pub fn with(self, oid: Oid, value: impl Into<Value>) -> Self {
        self.insert(oid, value);
        self
    }

    /// Add or replace a value.
    pub fn insert(&self, oid: Oid, value: impl Into<Value>) {
        let mut inner = self.inner.lock().unwrap();
        inner.data.insert(oid, value.into());
    }

    /// Queue a reply for the next GET or walk.
    pub fn queue(&self, reply: MockReply) {
        let mut inner = self.inner.lock().unwrap();
        inner.script.push_back(reply);
    }

    /// Queue a reply for the next connect.
    ///
    /// Only [`MockReply::Network`] and [`MockReply::Hang`] have an effect;
    /// anything else connects normally.
    pub fn queue_connect(&self, reply: MockReply) {
        let mut inner = self.inner.lock().unwrap();
        inner.connect_script.push_back(reply);
    }

    /// Every GET and walk seen so far, in order.
    pub fn exchanges(&self) -> Vec<Exchange> {
        let inner = self.inner.lock().unwrap();
        inner.exchanges.clone()
    }

    /// Number of GET exchanges seen so far.
    pub fn get_count(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .exchanges
            .iter()
            .filter(|e| matches!(e, Exchange::Get(_)))
            .count()
    }

    /// Number of connect attempts.
    pub fn connects(&self) -> usize {
        self.inner.lock().unwrap().connects
    }

    /// Number of engines closed.
    pub fn closes(&self) -> usize {
        self.inner.lock().unwrap().closes
    }
}

impl Connector for MockAgent {
    type Engine = MockEngine;

    fn open(&self, config: &QueryConfig) -> Result<MockEngine> {
        Ok(MockEngine {
            inner: self.inner.clone(),
            target: config.target(),
            version: config.version(),
        })
    }
}

/// Engine handed out by [`MockAgent`].
pub struct MockEngine {
    inner: Arc<Mutex<MockInner>>,
    target: SocketAddr,
    version: Version,
}

impl MockEngine {
    fn network(&self, msg: String) -> Box<Error> {
        Error::Network {
            target: self.target,
            source: std::io::Error::other(msg),
        }
        .boxed()
    }

    fn answer(&self, data: &BTreeMap<Oid, Value>, oids: &[Oid]) -> Response {
        let mut varbinds = Vec::with_capacity(oids.len());
        for (i, oid) in oids.iter().enumerate() {
            match data.get(oid) {
                Some(value) => varbinds.push(VarBind::new(oid.clone(), value.clone())),
                None if self.version == Version::V1 => {
                    return Response {
                        status: ErrorStatus::NoSuchName,
                        index: i as u32 + 1,
                        varbinds: oids.iter().cloned().map(VarBind::null).collect(),
                    };
                }
                None => {
                    // An instance of the same object exists: the object is known
                    let known = oid
                        .parent()
                        .is_some_and(|p| data.keys().any(|k| k.starts_with(&p)));
                    let value = if known {
                        Value::NoSuchInstance
                    } else {
                        Value::NoSuchObject
                    };
                    varbinds.push(VarBind::new(oid.clone(), value));
                }
            }
        }
        Response {
            status: ErrorStatus::NoError,
            index: 0,
            varbinds,
        }
    }

    fn subtree(data: &BTreeMap<Oid, Value>, root: &Oid) -> VecDeque<Result<VarBind>> {
        data.range(root.clone()..)
            .take_while(|(oid, _)| oid.starts_with(root))
            .filter(|(oid, _)| *oid != root)
            .map(|(oid, value)| Ok(VarBind::new(oid.clone(), value.clone())))
            .collect()
    }
}

impl Engine for MockEngine {
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send {
        let reply = {
            let mut inner = self.inner.lock().unwrap();
            inner.connects += 1;
            inner.connect_script.pop_front()
        };
        let outcome = match reply {
            Some(MockReply::Network(msg)) => Some(Err(self.network(msg))),
            Some(MockReply::Hang) => None,
            _ => Some(Ok(())),
        };
        async move {
            match outcome {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }

    fn get(&mut self, oids: &[Oid]) -> impl Future<Output = Result<Response>> + Send {
        let outcome = {
            let mut inner = self.inner.lock().unwrap();
            inner.exchanges.push(Exchange::Get(oids.to_vec()));
            match inner.script.pop_front().unwrap_or(MockReply::Auto) {
                MockReply::Status(status, index) => Some(Ok(Response {
                    status,
                    index,
                    varbinds: oids.iter().cloned().map(VarBind::null).collect(),
                })),
                MockReply::Network(msg) => Some(Err(self.network(msg))),
                MockReply::Hang => None,
                MockReply::Leaves(varbinds) => Some(Ok(Response {
                    varbinds,
                    ..Response::default()
                })),
                MockReply::Auto | MockReply::WalkErrorAfter(_) => {
                    Some(Ok(self.answer(&inner.data, oids)))
                }
            }
        };
        async move {
            match outcome {
                Some(result) => result,
                None => std::future::pending().await,
            }
        }
    }

    fn walk<'a>(&'a mut self, root: &'a Oid, method: WalkMethod) -> WalkStream<'a> {
        let mut inner = self.inner.lock().unwrap();
        inner.exchanges.push(Exchange::Walk(root.clone(), method));
        let leaves = match inner.script.pop_front().unwrap_or(MockReply::Auto) {
            MockReply::Auto => MockLeaves::ready(Self::subtree(&inner.data, root)),
            MockReply::Leaves(varbinds) => MockLeaves::ready(varbinds.into_iter().map(Ok).collect()),
            MockReply::WalkErrorAfter(n) => {
                let mut items = Self::subtree(&inner.data, root);
                items.truncate(n);
                items.push_back(Err(self.network(format!("connection lost after {} leaves", n))));
                MockLeaves::ready(items)
            }
            MockReply::Status(status, index) => MockLeaves::ready(VecDeque::from([Err(Error::Snmp {
                target: self.target,
                status,
                index,
                oid: Some(root.clone()),
            }
            .boxed())])),
            MockReply::Network(msg) => MockLeaves::ready(VecDeque::from([Err(self.network(msg))])),
            MockReply::Hang => MockLeaves::hanging(),
        };
        Box::pin(leaves)
    }

    fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.closes += 1;
        Ok(())
    }
}

/// Walk stream over pre-computed leaves.
struct MockLeaves {
    items: VecDeque<Result<VarBind>>,
    hang: bool,
}

impl MockLeaves {
    fn ready(items: VecDeque<Result<VarBind>>) -> Self {
        Self { items, hang: false }
    }

    fn hanging() -> Self {
        Self {
            items: VecDeque::new(),
            hang: true,
        }
    }
}

impl Stream for MockLeaves {
    type Item = Result<VarBind>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.hang {
            return Poll::Pending;
        }
        Poll::Ready(this.items.pop_front())
    }
}
