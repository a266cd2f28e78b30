//! Property-based tests for snmp-query.
//!
//! Address arithmetic and rendering are checked in isolation; table
//! reconstruction runs through the client against the mock agent.

mod common;

use common::{directory, if_entry};
use proptest::prelude::*;
use snmp_query::engine::mock::{MockAgent, MockReply};
use snmp_query::mib::{BaseKind, ManagedObject};
use snmp_query::oid::{Oid, compose, decompose};
use snmp_query::{Auth, Client, QueryConfig, Value, VarBind, oid, render};
use std::sync::{Arc, OnceLock};
use tokio::runtime::Runtime;

// =============================================================================
// Strategies
// =============================================================================

fn arb_arcs(max: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(any::<u32>(), 1..=max)
}

fn dotted(arcs: &[u32]) -> String {
    arcs.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

fn arb_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=32)
}

fn arb_declared_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "",
        "DisplayString",
        "OctetString",
        "MacAddress",
        "InetAddress",
        "InetAddressIPv6",
        "TAddress",
        "DateAndTime",
        "SnmpAdminString",
    ])
}

fn runtime() -> &'static Runtime {
    static RT: OnceLock<Runtime> = OnceLock::new();
    RT.get_or_init(|| Runtime::new().expect("failed to create runtime"))
}

// =============================================================================
// Address arithmetic
// =============================================================================

proptest! {
    #[test]
    fn compose_with_empty_index_is_identity(base in arb_arcs(12)) {
        let base = dotted(&base);
        prop_assert_eq!(compose(&base, ""), base);
    }

    #[test]
    fn compose_then_decompose(base in arb_arcs(12), index in arb_arcs(4)) {
        let base = dotted(&base);
        let index = dotted(&index);

        let full = compose(&base, &index);
        prop_assert_eq!(decompose(&base, &full), index.as_str());

        // A leading separator on the index changes nothing
        let dotted_index = format!(".{}", index);
        prop_assert_eq!(compose(&base, &dotted_index), full);
    }

    #[test]
    fn decompose_of_unrelated_is_empty(base in arb_arcs(8), other in arb_arcs(8)) {
        let base = dotted(&base);
        let other = dotted(&other);
        prop_assume!(!other.starts_with(&format!("{}.", base)));
        prop_assert_eq!(decompose(&base, &other), "");
    }

    #[test]
    fn typed_index_matches_text(base in arb_arcs(12), index in arb_arcs(4)) {
        let base_oid = Oid::from_slice(&base);
        let index_oid = Oid::from_slice(&index);
        let full = base_oid.with_index(&index_oid);

        prop_assert_eq!(full.index_after(&base_oid), Some(index_oid.clone()));
        let full_text = full.to_string();
        prop_assert_eq!(
            decompose(&base_oid.to_string(), &full_text),
            index_oid.to_string()
        );
        prop_assert_eq!(Oid::parse(&full.to_string()).unwrap(), full);
    }
}

// =============================================================================
// Rendering
// =============================================================================

proptest! {
    #[test]
    fn octet_rendering_is_total(declared in arb_declared_type(), bytes in arb_bytes()) {
        let object = ManagedObject::new("x", oid!(1, 3, 6, 1, 4, 1, 1), BaseKind::OctetString)
            .declared_type(declared);
        let _ = render(&object, &Value::from(&bytes[..]));
    }

    #[test]
    fn mac_renders_every_byte(bytes in prop::collection::vec(any::<u8>(), 1..=16)) {
        let object = ManagedObject::new("mac", oid!(1, 3, 6, 1, 4, 1, 1), BaseKind::OctetString)
            .declared_type("MacAddress");
        let text = render(&object, &Value::from(&bytes[..]));
        prop_assert_eq!(text.split(':').count(), bytes.len());
        prop_assert!(text.chars().all(|c| c == ':' || c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn bits_emit_one_label_per_set_bit(bytes in prop::collection::vec(any::<u8>(), 0..=4)) {
        let labels: Vec<(u32, String)> = (0..32).map(|k| (k, format!("b{}", k))).collect();
        let object = ManagedObject::new("flags", oid!(1, 3, 6, 1, 4, 1, 2), BaseKind::Bits)
            .labels(labels);
        let text = render(&object, &Value::from(&bytes[..]));

        let set_bits: u32 = bytes.iter().map(|b| b.count_ones()).sum();
        prop_assert_eq!(text.matches(' ').count() as u32, set_bits);
    }

    #[test]
    fn enum_falls_back_to_number(value in any::<i32>()) {
        let object = ManagedObject::new("status", oid!(1, 3, 6, 1, 4, 1, 3), BaseKind::Enum)
            .labels([(1, "up"), (2, "down")]);
        let text = render(&object, &Value::Integer(value));
        match value {
            1 => prop_assert_eq!(text, "up"),
            2 => prop_assert_eq!(text, "down"),
            other => prop_assert_eq!(text, other.to_string()),
        }
    }
}

// =============================================================================
// Table reconstruction
// =============================================================================

fn table_leaves() -> Vec<VarBind> {
    let entry = if_entry();
    let mut leaves = Vec::new();
    for index in [1u32, 2, 7, 12] {
        leaves.push(VarBind::new(entry.child(2).child(index), Value::from(format!("eth{}", index))));
        leaves.push(VarBind::new(entry.child(8).child(index), Value::Integer((index % 2 + 1) as i32)));
        leaves.push(VarBind::new(entry.child(4).child(index), Value::Integer(1500)));
    }
    leaves
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bulk_table_ignores_arrival_order(shuffled in Just(table_leaves()).prop_shuffle()) {
        let agent = MockAgent::new();
        agent.queue(MockReply::Leaves(table_leaves()));
        agent.queue(MockReply::Leaves(shuffled));
        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public")).build().unwrap();
        let client = Client::new(config, Arc::new(directory()), agent);

        let (ordered, shuffled) = runtime().block_on(async {
            (
                client.get_bulk_table("ifEntry").await.unwrap(),
                client.get_bulk_table("ifEntry").await.unwrap(),
            )
        });

        prop_assert_eq!(&ordered, &shuffled);
        let indexes: Vec<&str> = ordered.iter().map(|row| row["index"].as_str()).collect();
        prop_assert_eq!(indexes, vec!["1", "2", "7", "12"]);
    }
}
