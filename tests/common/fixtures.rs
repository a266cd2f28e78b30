//! Standard test fixtures: directory objects and matching agent data.

use snmp_query::mib::{Access, BaseKind, ManagedObject, MibDirectory};
use snmp_query::{Oid, Value, oid};
use std::collections::BTreeMap;

// =============================================================================
// OID helpers
// =============================================================================

/// system (1.3.6.1.2.1.1)
pub fn system() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 1)
}

/// ifEntry (1.3.6.1.2.1.2.2.1)
pub fn if_entry() -> Oid {
    oid!(1, 3, 6, 1, 2, 1, 2, 2, 1)
}

/// sysName.0
pub fn sys_name() -> Oid {
    system().child(5).child(0)
}

/// sysUpTime.0
pub fn sys_uptime() -> Oid {
    system().child(3).child(0)
}

/// ifDescr.{index}
pub fn if_descr(index: u32) -> Oid {
    if_entry().child(2).child(index)
}

// =============================================================================
// Directory fixture
// =============================================================================

/// Directory holding the system group and the interfaces table.
pub fn directory() -> MibDirectory {
    let sys = system();
    let entry = if_entry();
    let status = [(1, "up"), (2, "down"), (3, "testing")];

    [
        ManagedObject::new("sysDescr", sys.child(1), BaseKind::OctetString)
            .declared_type("DisplayString")
            .access(Access::ReadOnly),
        ManagedObject::new("sysObjectID", sys.child(2), BaseKind::ObjectIdentifier),
        ManagedObject::new("sysUpTime", sys.child(3), BaseKind::Integer)
            .declared_type("TimeTicks"),
        ManagedObject::new("sysContact", sys.child(4), BaseKind::OctetString)
            .declared_type("DisplayString")
            .access(Access::ReadWrite),
        ManagedObject::new("sysName", sys.child(5), BaseKind::OctetString)
            .declared_type("DisplayString")
            .access(Access::ReadWrite),
        ManagedObject::new("sysLocation", sys.child(6), BaseKind::OctetString)
            .declared_type("DisplayString")
            .access(Access::ReadWrite),
        ManagedObject::new("sysServices", sys.child(7), BaseKind::Integer),
        ManagedObject::new("ifNumber", oid!(1, 3, 6, 1, 2, 1, 2, 1), BaseKind::Integer),
        ManagedObject::new("ifTable", oid!(1, 3, 6, 1, 2, 1, 2, 2), BaseKind::Unknown)
            .access(Access::NotAccessible),
        ManagedObject::new("ifEntry", entry.clone(), BaseKind::Unknown)
            .access(Access::NotAccessible),
        ManagedObject::new("ifIndex", entry.child(1), BaseKind::Integer),
        ManagedObject::new("ifDescr", entry.child(2), BaseKind::OctetString)
            .declared_type("DisplayString"),
        ManagedObject::new("ifType", entry.child(3), BaseKind::Enum)
            .declared_type("IANAifType")
            .labels([(1, "other"), (6, "ethernetCsmacd"), (24, "softwareLoopback")]),
        ManagedObject::new("ifMtu", entry.child(4), BaseKind::Integer),
        ManagedObject::new("ifPhysAddress", entry.child(6), BaseKind::OctetString)
            .declared_type("MacAddress"),
        ManagedObject::new("ifAdminStatus", entry.child(7), BaseKind::Enum).labels(status),
        ManagedObject::new("ifOperStatus", entry.child(8), BaseKind::Enum).labels(status),
    ]
    .into_iter()
    .collect()
}

// =============================================================================
// Agent data fixtures
// =============================================================================

/// Standard system group values.
pub fn system_mib() -> BTreeMap<Oid, Value> {
    let sys = system();
    let mut data = BTreeMap::new();

    data.insert(sys.child(1).child(0), Value::from("Test SNMP Agent"));
    data.insert(
        sys.child(2).child(0),
        Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 99999)),
    );
    data.insert(sys.child(3).child(0), Value::TimeTicks(123456));
    data.insert(sys.child(4).child(0), Value::from("admin@test.local"));
    data.insert(sys.child(5).child(0), Value::from("test-agent"));
    data.insert(sys.child(6).child(0), Value::from("Test Lab"));
    data.insert(sys.child(7).child(0), Value::Integer(72));

    data
}

/// Interface table with `count` rows (indexes 1..=count).
///
/// Odd interfaces are up, even ones down.
pub fn interface_table(count: u32) -> BTreeMap<Oid, Value> {
    let entry = if_entry();
    let mut data = BTreeMap::new();

    data.insert(oid!(1, 3, 6, 1, 2, 1, 2, 1, 0), Value::Integer(count as i32));

    for i in 1..=count {
        data.insert(entry.child(1).child(i), Value::Integer(i as i32));
        data.insert(entry.child(2).child(i), Value::from(format!("eth{}", i - 1)));
        data.insert(entry.child(3).child(i), Value::Integer(6));
        data.insert(entry.child(4).child(i), Value::Integer(1500));
        data.insert(
            entry.child(6).child(i),
            Value::from(&[0x00, 0x1a, 0x2b, 0x00, 0x00, i as u8][..]),
        );
        data.insert(entry.child(7).child(i), Value::Integer(1));
        data.insert(
            entry.child(8).child(i),
            Value::Integer(if i % 2 == 1 { 1 } else { 2 }),
        );
    }

    data
}

/// System group plus an interface table.
pub fn combined(interfaces: u32) -> BTreeMap<Oid, Value> {
    let mut data = system_mib();
    data.extend(interface_table(interfaces));
    data
}
