//! Criterion benchmarks for the trace codec.
//!
//! Run with `cargo bench -p itf-trace`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use itf_trace::trace::Trace;
use serde_json::{json, Value as JsonValue};

/// Deterministic synthetic trace with `states` steps over three variables.
fn synthetic_trace(states: usize) -> JsonValue {
    let steps: Vec<JsonValue> = (0..states)
        .map(|i| {
            json!({
                "#meta": { "no": i },
                "pc": format!("l{}", i % 7),
                "x": { "#bigint": (i as i128 * 1_000_000_007).to_string() },
                "waiting": {
                    "#set": [
                        { "#bigint": i.to_string() },
                        { "#bigint": (i + 1).to_string() }
                    ]
                }
            })
        })
        .collect();
    json!({
        "#meta": { "format": "ITF", "source": "bench" },
        "vars": ["pc", "x", "waiting"],
        "states": steps
    })
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("trace_codec");
    for &n in &[64_usize, 1024] {
        let json = synthetic_trace(n);
        let text = json.to_string();
        let trace = Trace::from_json(&json).unwrap();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_function(BenchmarkId::new("decode_json", n), |b| {
            b.iter(|| Trace::from_json(black_box(&json)).unwrap());
        });
        group.bench_function(BenchmarkId::new("encode_json", n), |b| {
            b.iter(|| black_box(&trace).to_json());
        });
        group.bench_function(BenchmarkId::new("parse_text", n), |b| {
            b.iter(|| black_box(text.as_str()).parse::<Trace>().unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
