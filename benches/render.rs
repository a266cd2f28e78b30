//! Rendering and table assembly benchmarks.
//!
//! Rendering runs once per retrieved value, so its cost scales with table
//! size; the table benchmark drives the whole client path over the mock
//! agent to show where assembly time goes as row counts grow.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use snmp_query::engine::mock::MockAgent;
use snmp_query::mib::{BaseKind, ManagedObject, MibDirectory};
use snmp_query::oid::{compose, decompose};
use snmp_query::{Auth, Client, QueryConfig, Value, oid, render};

fn object(declared: &str, kind: BaseKind) -> ManagedObject {
    ManagedObject::new("bench", oid!(1, 3, 6, 1, 4, 1, 1), kind).declared_type(declared)
}

/// Benchmark each rendering path
fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    let cases = [
        ("text", object("DisplayString", BaseKind::OctetString), Value::from("GigabitEthernet0/1")),
        (
            "mac",
            object("MacAddress", BaseKind::OctetString),
            Value::from(&[0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e][..]),
        ),
        (
            "ipv6",
            object("InetAddress", BaseKind::OctetString),
            Value::from(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1][..]),
        ),
        (
            "date_and_time",
            object("DateAndTime", BaseKind::OctetString),
            Value::from(&[0x07, 0xe8, 0x05, 0x07, 0x0a, 0x18, 0x0b, 0x00][..]),
        ),
        (
            "enum",
            object("", BaseKind::Enum).labels([(1, "up"), (2, "down"), (3, "testing")]),
            Value::Integer(2),
        ),
        (
            "bits",
            object("", BaseKind::Bits).labels((0..16).map(|k| (k, format!("flag{}", k)))),
            Value::from(&[0xa5, 0x5a][..]),
        ),
        ("integer", object("", BaseKind::Integer), Value::Counter64(u64::MAX)),
    ];

    for (name, object, value) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), value, |b, value| {
            b.iter(|| black_box(render(object, value)))
        });
    }

    group.finish();
}

/// Benchmark dotted index arithmetic
fn bench_compose(c: &mut Criterion) {
    let base = "1.3.6.1.2.1.31.1.1.1.18";
    c.bench_function("compose_decompose", |b| {
        b.iter(|| {
            let full = compose(black_box(base), black_box("1048576"));
            black_box(decompose(base, &full).len())
        })
    });
}

/// Benchmark get_bulk_table for growing row counts
fn bench_bulk_table(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let entry = oid!(1, 3, 6, 1, 2, 1, 2, 2, 1);

    let mut mibs = MibDirectory::new();
    mibs.insert(ManagedObject::new("ifEntry", entry.clone(), BaseKind::Unknown));
    mibs.insert(ManagedObject::new("ifDescr", entry.child(2), BaseKind::OctetString));
    mibs.insert(
        ManagedObject::new("ifOperStatus", entry.child(8), BaseKind::Enum)
            .labels([(1, "up"), (2, "down")]),
    );
    let mibs = Arc::new(mibs);

    let mut group = c.benchmark_group("bulk_table");
    for rows in [10u32, 100, 1000] {
        let agent = MockAgent::new();
        for i in 1..=rows {
            agent.insert(entry.child(2).child(i), Value::from(format!("port{}", i)));
            agent.insert(entry.child(8).child(i), Value::Integer((i % 2 + 1) as i32));
        }
        let config = QueryConfig::builder("192.0.2.1", Auth::v2c("public"))
            .build()
            .unwrap();
        let client = Client::new(config, mibs.clone(), agent);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &client, |b, client| {
            b.to_async(&runtime)
                .iter(|| async { black_box(client.get_bulk_table("ifEntry").await.unwrap()) })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render, bench_compose, bench_bulk_table);
criterion_main!(benches);
