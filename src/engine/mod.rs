//! Protocol engine abstraction.
//!
//! The query client never touches the wire. Encoding, transport,
//! retransmission and USM cryptography live behind [`Engine`]; a
//! [`Connector`] produces one engine per query call from a
//! [`QueryConfig`]. [`Session`] wraps an engine with cancellation,
//! deadlines and guaranteed release.

mod session;

#[cfg(any(test, feature = "testing"))]
pub mod mock;

pub(crate) use session::Session;

use std::future::Future;
use std::pin::Pin;

use futures_core::Stream;

use crate::client::QueryConfig;
use crate::error::{ErrorStatus, Result};
use crate::oid::Oid;
use crate::varbind::VarBind;

/// Leaves of a walk, in the order the agent returned them.
pub type WalkStream<'a> = Pin<Box<dyn Stream<Item = Result<VarBind>> + Send + 'a>>;

/// How an engine should traverse a subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkMethod {
    /// One GETNEXT per leaf.
    GetNext,
    /// GETBULK with the given max-repetitions.
    GetBulk {
        /// Leaves requested per exchange.
        max_repetitions: u32,
    },
}

/// Decoded response to a GET exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Error status reported by the agent.
    pub status: ErrorStatus,
    /// 1-based index of the varbind the status refers to (0 when none).
    pub index: u32,
    /// Variable bindings in request order.
    pub varbinds: Vec<VarBind>,
}

/// One protocol session with one agent.
///
/// Implementations own whatever socket and security state they need.
/// Retries and per-attempt timeouts are the engine's business; the
/// session layer only bounds the total time of each exchange.
pub trait Engine: Send {
    /// Establish the session (discovery, socket setup).
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Issue a single GET for `oids`.
    ///
    /// Agent-reported errors come back as a [`Response`] with a non-zero
    /// status; `Err` is reserved for transport failures.
    fn get(&mut self, oids: &[Oid]) -> impl Future<Output = Result<Response>> + Send;

    /// Stream every leaf below `root`.
    fn walk<'a>(&'a mut self, root: &'a Oid, method: WalkMethod) -> WalkStream<'a>;

    /// Release the session.
    ///
    /// Synchronous so it can run from `Drop`.
    fn close(&mut self) -> Result<()>;
}

/// Factory for engines, one per query call.
pub trait Connector: Send + Sync {
    /// Engine type produced.
    type Engine: Engine;

    /// Create an unconnected engine for `config`.
    fn open(&self, config: &QueryConfig) -> Result<Self::Engine>;
}

impl<F, E> Connector for F
where
    F: Fn(&QueryConfig) -> Result<E> + Send + Sync,
    E: Engine,
{
    type Engine = E;

    fn open(&self, config: &QueryConfig) -> Result<E> {
        self(config)
    }
}
