//! Row reconstruction from a walked table entry.

use std::collections::{BTreeMap, HashMap};

use super::{INDEX_FIELD, Row};
use crate::mib::{Directory, ManagedObject};
use crate::oid::Oid;
use crate::varbind::VarBind;

/// Rebuild rows from the leaves of a walk rooted at a table entry.
///
/// Each leaf below `entry` is `entry.<column>.<index...>`. Rows are keyed by
/// index and come back in index order whatever order the leaves arrived in.
/// Columns the directory does not know still create their row (with just
/// the index) but contribute no field.
pub(crate) fn assemble<D>(directory: &D, entry: &Oid, leaves: &[VarBind]) -> Vec<Row>
where
    D: Directory + ?Sized,
{
    let mut columns: HashMap<u32, Option<&ManagedObject>> = HashMap::new();
    let mut rows: BTreeMap<Oid, Row> = BTreeMap::new();

    for vb in leaves {
        let Some(suffix) = vb.oid.index_after(entry) else {
            continue;
        };
        let [column, index @ ..] = suffix.arcs() else {
            continue;
        };
        if index.is_empty() {
            tracing::debug!(
                target: "snmp_query::client",
                { snmp.oid = %vb.oid },
                "leaf has no row index, skipping"
            );
            continue;
        }

        let object = *columns
            .entry(*column)
            .or_insert_with(|| directory.by_oid(&entry.child(*column)));

        let index = Oid::from_slice(index);
        let row = rows.entry(index).or_insert_with_key(|index| {
            Row::from([(INDEX_FIELD.to_string(), index.to_string())])
        });

        match object {
            Some(object) => {
                row.insert(object.name.clone(), object.render(&vb.value));
            }
            None => {
                tracing::debug!(
                    target: "snmp_query::client",
                    { snmp.oid = %vb.oid, snmp.column = *column },
                    "column not in directory"
                );
            }
        }
    }

    rows.into_values().collect()
}
