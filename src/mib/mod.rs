//! Object directory: read-only lookup of MIB object metadata.
//!
//! The [`Directory`] trait is what the query client consumes. Any compiled
//! MIB store can implement it; [`MibDirectory`] is an in-memory
//! implementation populated by the caller before queries start.
//!
//! A directory is shared behind an `Arc` and never mutated while queries
//! run, so concurrent clients need no synchronisation.
//!
//! ```
//! use snmp_query::mib::{BaseKind, Directory, ManagedObject, MibDirectory};
//! use snmp_query::oid;
//!
//! let mut dir = MibDirectory::new();
//! dir.insert(ManagedObject::new("sysName", oid!(1, 3, 6, 1, 2, 1, 1, 5), BaseKind::OctetString)
//!     .declared_type("DisplayString"));
//!
//! assert!(dir.lookup("sysName").is_some());
//! assert!(dir.lookup("1.3.6.1.2.1.1.5").is_some());
//! assert!(dir.lookup(".1.3.6.1.2.1.1.5").is_some());
//! assert!(dir.lookup("sysLocation").is_none());
//! ```

mod object;

pub use object::{Access, BaseKind, ManagedObject};

use std::collections::{BTreeMap, HashMap};

use crate::oid::Oid;

/// Read-only lookup of managed objects by name or address.
pub trait Directory: Send + Sync {
    /// Find an object by its symbolic name.
    fn by_name(&self, name: &str) -> Option<&ManagedObject>;

    /// Find an object by its exact address.
    fn by_oid(&self, oid: &Oid) -> Option<&ManagedObject>;

    /// Find an object by name or by dotted numeric address.
    fn lookup(&self, key: &str) -> Option<&ManagedObject> {
        if Oid::is_numeric(key) {
            Oid::parse(key).ok().and_then(|oid| self.by_oid(&oid))
        } else {
            self.by_name(key)
        }
    }

    /// The deepest object whose address is a prefix of `oid`.
    fn covering(&self, oid: &Oid) -> Option<&ManagedObject> {
        let mut current = Some(oid.clone());
        while let Some(candidate) = current {
            if candidate.is_empty() {
                break;
            }
            if let Some(obj) = self.by_oid(&candidate) {
                return Some(obj);
            }
            current = candidate.parent();
        }
        None
    }
}

/// In-memory directory indexed by name and address.
#[derive(Debug, Clone, Default)]
pub struct MibDirectory {
    objects: Vec<ManagedObject>,
    by_name: HashMap<String, usize>,
    by_oid: BTreeMap<Oid, usize>,
}

impl MibDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any earlier object with the same name or
    /// address.
    ///
    /// Returns the displaced object, if any.
    pub fn insert(&mut self, object: ManagedObject) -> Option<ManagedObject> {
        let slot = self
            .by_name
            .get(&object.name)
            .or_else(|| self.by_oid.get(&object.oid))
            .copied();

        match slot {
            Some(idx) => {
                tracing::warn!(
                    target: "snmp_query::mib",
                    { snmp.object = %object.name, snmp.oid = %object.oid },
                    "replacing directory entry"
                );
                let old = std::mem::replace(&mut self.objects[idx], object);
                self.by_name.remove(&old.name);
                self.by_oid.remove(&old.oid);
                let new = &self.objects[idx];
                // A replacement can collide with a second, unrelated entry.
                if let Some(other) = self.by_name.insert(new.name.clone(), idx)
                    && other != idx
                {
                    self.by_oid.retain(|_, i| *i != other);
                }
                if let Some(other) = self.by_oid.insert(new.oid.clone(), idx)
                    && other != idx
                {
                    self.by_name.retain(|_, i| *i != other);
                }
                Some(old)
            }
            None => {
                let idx = self.objects.len();
                self.by_name.insert(object.name.clone(), idx);
                self.by_oid.insert(object.oid.clone(), idx);
                self.objects.push(object);
                None
            }
        }
    }

    /// Number of objects reachable through the directory.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Objects in address order.
    pub fn iter(&self) -> impl Iterator<Item = &ManagedObject> {
        self.by_oid.values().map(|&idx| &self.objects[idx])
    }

    /// Immediate children of `parent`, in address order.
    pub fn children<'a>(&'a self, parent: &'a Oid) -> impl Iterator<Item = &'a ManagedObject> {
        self.by_oid
            .range(parent.clone()..)
            .take_while(move |(oid, _)| oid.starts_with(parent))
            .map(|(_, &idx)| &self.objects[idx])
            .filter(move |obj| obj.oid.len() == parent.len() + 1)
    }
}

impl Directory for MibDirectory {
    fn by_name(&self, name: &str) -> Option<&ManagedObject> {
        self.by_name.get(name).map(|&idx| &self.objects[idx])
    }

    fn by_oid(&self, oid: &Oid) -> Option<&ManagedObject> {
        self.by_oid.get(oid).map(|&idx| &self.objects[idx])
    }
}

impl FromIterator<ManagedObject> for MibDirectory {
    fn from_iter<I: IntoIterator<Item = ManagedObject>>(iter: I) -> Self {
        let mut dir = Self::new();
        for object in iter {
            dir.insert(object);
        }
        dir
    }
}

impl Extend<ManagedObject> for MibDirectory {
    fn extend<I: IntoIterator<Item = ManagedObject>>(&mut self, iter: I) {
        for object in iter {
            self.insert(object);
        }
    }
}
