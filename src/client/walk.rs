//! Subtree walk collection.
//!
//! The protocol engine streams leaves; [`Collector`] decides which of them
//! belong to the walked subtree, detects agents that loop, and applies the
//! optional result cap. Leaves collected before a failure are kept so
//! callers can still report them.

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::error::{Error, WalkAbortReason};
use crate::oid::Oid;
use crate::varbind::VarBind;

/// Walk operation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WalkMode {
    /// Auto-select based on version (default).
    /// V1 uses GETNEXT, V2c/V3 uses GETBULK.
    #[default]
    Auto,
    /// Always use GETNEXT (slower but more compatible).
    GetNext,
    /// Always use GETBULK (faster, rejected on v1).
    GetBulk,
}

/// Outcome of a walk: the leaves kept, plus the failure that ended it early.
#[derive(Debug, Default)]
pub(crate) struct Walked {
    pub varbinds: Vec<VarBind>,
    pub error: Option<Box<Error>>,
}

/// Accumulates leaves from one walk.
///
/// Ordering is not enforced: agents that return columns out of order still
/// produce complete tables. Every seen OID is tracked instead, so a repeated
/// OID aborts the walk rather than looping forever.
pub(crate) struct Collector<'a> {
    root: &'a Oid,
    target: SocketAddr,
    seen: HashSet<Oid>,
    varbinds: Vec<VarBind>,
    limit: Option<usize>,
}

impl<'a> Collector<'a> {
    pub fn new(root: &'a Oid, target: SocketAddr, limit: Option<usize>) -> Self {
        Self {
            root,
            target,
            seen: HashSet::new(),
            varbinds: Vec::new(),
            limit,
        }
    }

    /// Feed one leaf.
    ///
    /// Returns `Ok(false)` once the walk should stop without error.
    pub fn push(&mut self, vb: VarBind) -> Result<bool, Box<Error>> {
        if vb.oid.index_after(self.root).is_none() {
            tracing::debug!(
                target: "snmp_query::client",
                { snmp.oid = %vb.oid, snmp.root = %self.root },
                "dropping leaf outside walked subtree"
            );
            return Ok(true);
        }

        if !self.seen.insert(vb.oid.clone()) {
            tracing::debug!(
                target: "snmp_query::client",
                { snmp.oid = %vb.oid, snmp.target = %self.target },
                "duplicate OID during walk"
            );
            return Err(Error::WalkAborted {
                target: self.target,
                reason: WalkAbortReason::Cycle,
            }
            .boxed());
        }

        if vb.value.is_exception() {
            tracing::debug!(
                target: "snmp_query::client",
                { snmp.oid = %vb.oid, snmp.value = %vb.value },
                "skipping exception value"
            );
            return Ok(true);
        }

        if let Some(limit) = self.limit
            && self.varbinds.len() >= limit
        {
            tracing::warn!(
                target: "snmp_query::client",
                { snmp.root = %self.root, snmp.limit = limit },
                "walk truncated at max_walk_results"
            );
            return Ok(false);
        }

        self.varbinds.push(vb);
        Ok(true)
    }

    pub fn finish(self, error: Option<Box<Error>>) -> Walked {
        Walked {
            varbinds: self.varbinds,
            error,
        }
    }
}
