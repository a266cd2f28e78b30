//! Name-based SNMP query client.
//!
//! [`Client`] resolves MIB names through a [`Directory`], retrieves values
//! through a protocol engine, and renders them for display. Each operation
//! opens its own session, so one client can serve concurrent callers.

mod auth;
mod batch;
mod config;
mod settings;
mod table;
pub(crate) mod walk;

pub use auth::{Auth, CommunityVersion, UsmAuth, UsmBuilder};
pub use config::{
    DEFAULT_MAX_OIDS_PER_REQUEST, DEFAULT_MAX_REPETITIONS, DEFAULT_PORT, DEFAULT_RETRIES,
    DEFAULT_TIMEOUT, MAX_OIDS_PER_REQUEST, QueryConfig, QueryConfigBuilder,
};
pub use settings::ClientSettings;
pub use walk::WalkMode;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::engine::{Connector, Engine, Session};
use crate::error::{Error, Result};
use crate::mib::{Directory, ManagedObject, MibDirectory};
use crate::oid::{Oid, SCALAR_INDEX, compose, decompose};

/// Rendered values keyed by object name or row index.
pub type ValueMap = BTreeMap<String, String>;

/// One table row: [`INDEX_FIELD`] plus one field per object name.
pub type Row = BTreeMap<String, String>;

/// Row field holding the row index.
pub const INDEX_FIELD: &str = "index";

/// SNMP query client.
///
/// Generic over the engine connector and the object directory. Cloning is
/// cheap; clones share configuration, directory and cancellation token.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use snmp_query::engine::mock::MockAgent;
/// use snmp_query::mib::{BaseKind, ManagedObject, MibDirectory};
/// use snmp_query::{Auth, Client, QueryConfig, Value, oid};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> snmp_query::Result<()> {
/// let mut mibs = MibDirectory::new();
/// mibs.insert(ManagedObject::new("sysName", oid!(1, 3, 6, 1, 2, 1, 1, 5), BaseKind::OctetString));
///
/// let agent = MockAgent::new().with(oid!(1, 3, 6, 1, 2, 1, 1, 5, 0), Value::from("core-1"));
/// let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public")).build()?;
/// let client = Client::new(config, Arc::new(mibs), agent);
///
/// assert_eq!(client.get("sysName").await?, "core-1");
/// # Ok(())
/// # }
/// ```
pub struct Client<C: Connector, D: Directory + ?Sized = MibDirectory> {
    inner: Arc<ClientInner<C, D>>,
    cancel: CancellationToken,
}

struct ClientInner<C, D: ?Sized> {
    config: QueryConfig,
    directory: Arc<D>,
    connector: C,
}

impl<C: Connector, D: Directory + ?Sized> Clone for Client<C, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

/// One instance to GET, the object it belongs to, and its result key.
struct Request<'d> {
    oid: Oid,
    object: &'d ManagedObject,
    key: String,
}

impl<C: Connector, D: Directory + ?Sized> Client<C, D> {
    /// Create a client.
    pub fn new(config: QueryConfig, directory: Arc<D>, connector: C) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config,
                directory,
                connector,
            }),
            cancel: CancellationToken::new(),
        }
    }

    /// Abort in-flight and future operations when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &QueryConfig {
        &self.inner.config
    }

    /// Object directory in use.
    pub fn directory(&self) -> &D {
        &self.inner.directory
    }

    /// Fetch the scalar value of `name`.
    ///
    /// Returns an empty string when the agent has no such instance.
    #[instrument(skip(self), err, fields(snmp.target = %self.config().target()))]
    pub async fn get(&self, name: &str) -> Result<String> {
        let object = self.resolve(name)?;
        let requests = [Request {
            oid: object.oid.child(0),
            object,
            key: object.name.clone(),
        }];

        let mut session = self.session().await?;
        let values = fetch_values(&mut session, &requests).await?;
        Ok(values.into_values().next().unwrap_or_default())
    }

    /// Fetch the scalar values of several names, keyed by object name.
    ///
    /// Names missing from the directory are skipped; if none resolve the
    /// call fails with [`Error::UnresolvedName`].
    #[instrument(skip(self, names), err, fields(
        snmp.target = %self.config().target(),
        snmp.name_count = names.len(),
    ))]
    pub async fn get_many(&self, names: &[impl AsRef<str>]) -> Result<ValueMap> {
        if names.is_empty() {
            return Ok(ValueMap::new());
        }
        let requests: Vec<_> = self
            .resolve_all(names)?
            .into_iter()
            .map(|object| Request {
                oid: object.oid.child(0),
                object,
                key: object.name.clone(),
            })
            .collect();

        let mut session = self.session().await?;
        fetch_values(&mut session, &requests).await
    }

    /// Fetch one object at several row indexes, keyed by index.
    ///
    /// An empty `indexes` means the scalar instance (`.0`, keyed `"0"`).
    #[instrument(skip(self, indexes), err, fields(
        snmp.target = %self.config().target(),
        snmp.index_count = indexes.len(),
    ))]
    pub async fn get_indexed(&self, name: &str, indexes: &[impl AsRef<str>]) -> Result<ValueMap> {
        let object = self.resolve(name)?;
        let base = object.oid.to_string();
        let requests = with_default_index(indexes)
            .into_iter()
            .map(|index| {
                let full = compose(&base, index);
                Ok(Request {
                    oid: Oid::parse(&full)?,
                    object,
                    key: decompose(&base, &full).to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut session = self.session().await?;
        fetch_values(&mut session, &requests).await
    }

    /// Fetch several objects at each of several row indexes.
    ///
    /// Rows come back in the order of `indexes`. A row whose retrieval
    /// fails holds only its index; cancellation aborts the whole call.
    #[instrument(skip(self, names, indexes), err, fields(
        snmp.target = %self.config().target(),
        snmp.name_count = names.len(),
        snmp.index_count = indexes.len(),
    ))]
    pub async fn get_table(
        &self,
        names: &[impl AsRef<str>],
        indexes: &[impl AsRef<str>],
    ) -> Result<Vec<Row>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let objects = self.resolve_all(names)?;

        let plan = with_default_index(indexes)
            .into_iter()
            .map(|index| {
                let requests = objects
                    .iter()
                    .map(|&object| {
                        Ok(Request {
                            oid: Oid::parse(&compose(&object.oid.to_string(), index))?,
                            object,
                            key: object.name.clone(),
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok((index, requests))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut session = match self.session().await {
            Ok(session) => session,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::debug!(
                    target: "snmp_query::client",
                    { error = %e },
                    "session failed, returning index-only rows"
                );
                return Ok(plan.iter().map(|(index, _)| index_row(index)).collect());
            }
        };
        let mut rows = Vec::with_capacity(plan.len());
        for (index, requests) in &plan {
            let mut row = index_row(index);
            match fetch_values(&mut session, requests).await {
                Ok(values) => row.extend(values),
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    tracing::debug!(
                        target: "snmp_query::client",
                        { snmp.index = %index, error = %e },
                        "row retrieval failed"
                    );
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }

    /// Walk the subtree of `name`, keyed by each leaf's suffix below it.
    ///
    /// Each leaf is rendered with the deepest directory object covering it,
    /// so walking a table entry decodes every column by its own syntax.
    #[instrument(skip(self), err, fields(snmp.target = %self.config().target()))]
    pub async fn get_bulk(&self, name: &str) -> Result<ValueMap> {
        let object = self.resolve(name)?;
        let mut session = self.session().await?;
        walk_values(&mut session, &*self.inner.directory, object).await
    }

    /// [`get_bulk`](Self::get_bulk) for several names over one session,
    /// keyed by the requested name.
    ///
    /// Names that cannot be resolved or walked are left out; cancellation
    /// aborts the whole call.
    #[instrument(skip(self, names), err, fields(
        snmp.target = %self.config().target(),
        snmp.name_count = names.len(),
    ))]
    pub async fn get_bulk_many(
        &self,
        names: &[impl AsRef<str>],
    ) -> Result<BTreeMap<String, ValueMap>> {
        let mut results = BTreeMap::new();
        let objects: Vec<_> = names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let object = self.inner.directory.lookup(name);
                if object.is_none() {
                    tracing::debug!(
                        target: "snmp_query::client",
                        { snmp.name = name },
                        "name not in directory, skipping"
                    );
                }
                object.map(|object| (name, object))
            })
            .collect();
        if objects.is_empty() {
            return Ok(results);
        }

        let mut session = match self.session().await {
            Ok(session) => session,
            Err(e) if e.is_cancelled() => return Err(e),
            Err(e) => {
                tracing::debug!(
                    target: "snmp_query::client",
                    { error = %e },
                    "session failed, omitting every name"
                );
                return Ok(results);
            }
        };
        let directory = &*self.inner.directory;
        for (name, object) in objects {
            match walk_values(&mut session, directory, object).await {
                Ok(values) => {
                    results.insert(name.to_string(), values);
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => {
                    tracing::debug!(
                        target: "snmp_query::client",
                        { snmp.name = name, error = %e },
                        "walk failed, omitting"
                    );
                }
            }
        }
        Ok(results)
    }

    /// Walk a table entry and rebuild its rows, in row index order.
    #[instrument(skip(self), err, fields(snmp.target = %self.config().target()))]
    pub async fn get_bulk_table(&self, name: &str) -> Result<Vec<Row>> {
        let object = self.resolve(name)?;
        let mut session = self.session().await?;
        let walked = session.walk(&object.oid).await;
        if let Some(e) = walked.error {
            return Err(e);
        }
        Ok(table::assemble(
            &*self.inner.directory,
            &object.oid,
            &walked.varbinds,
        ))
    }

    async fn session(&self) -> Result<Session<C::Engine>> {
        Session::open(&self.inner.connector, &self.inner.config, &self.cancel).await
    }

    fn resolve(&self, name: &str) -> Result<&ManagedObject> {
        self.inner.directory.lookup(name).ok_or_else(|| {
            Error::UnresolvedName {
                names: name.into(),
            }
            .boxed()
        })
    }

    fn resolve_all(&self, names: &[impl AsRef<str>]) -> Result<Vec<&ManagedObject>> {
        let mut objects = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.inner.directory.lookup(name) {
                Some(object) => objects.push(object),
                None => {
                    tracing::debug!(
                        target: "snmp_query::client",
                        { snmp.name = name },
                        "name not in directory, skipping"
                    );
                    missing.push(name);
                }
            }
        }
        if objects.is_empty() {
            return Err(Error::UnresolvedName {
                names: missing.join(", ").into(),
            }
            .boxed());
        }
        Ok(objects)
    }
}

fn index_row(index: &str) -> Row {
    Row::from([(INDEX_FIELD.to_string(), index.to_string())])
}

fn with_default_index(indexes: &[impl AsRef<str>]) -> Vec<&str> {
    if indexes.is_empty() {
        vec![SCALAR_INDEX]
    } else {
        indexes.iter().map(AsRef::as_ref).collect()
    }
}

/// GET every request and render the values that came back.
async fn fetch_values<E: Engine>(
    session: &mut Session<E>,
    requests: &[Request<'_>],
) -> Result<ValueMap> {
    let oids: Vec<Oid> = requests.iter().map(|r| r.oid.clone()).collect();
    let by_oid: HashMap<&Oid, &Request<'_>> = requests.iter().map(|r| (&r.oid, r)).collect();

    let fetched = batch::fetch(session, &oids).await;
    let mut values = ValueMap::new();
    for vb in &fetched.varbinds {
        match by_oid.get(&vb.oid) {
            Some(request) => {
                values.insert(request.key.clone(), request.object.render(&vb.value));
            }
            None => {
                tracing::debug!(
                    target: "snmp_query::client",
                    { snmp.oid = %vb.oid },
                    "response OID was not requested, discarding"
                );
            }
        }
    }

    match fetched.error {
        Some(e) => Err(Error::with_partial(e, values)),
        None => Ok(values),
    }
}

/// Walk `object` and render its leaves, keyed by suffix.
async fn walk_values<E, D>(
    session: &mut Session<E>,
    directory: &D,
    object: &ManagedObject,
) -> Result<ValueMap>
where
    E: Engine,
    D: Directory + ?Sized,
{
    let walked = session.walk(&object.oid).await;
    let values: ValueMap = walked
        .varbinds
        .iter()
        .filter_map(|vb| {
            let suffix = vb.oid.index_after(&object.oid)?;
            let covering = directory.covering(&vb.oid).unwrap_or(object);
            Some((suffix.to_string(), covering.render(&vb.value)))
        })
        .collect();

    match walked.error {
        Some(e) => Err(Error::with_partial(e, values)),
        None => Ok(values),
    }
}
