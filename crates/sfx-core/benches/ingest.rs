use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion};
use sfx_core::{Aggregator, SortOrder};

fn synthetic_domains(count: usize) -> String {
    let tlds = ["com", "net", "org", "co.uk", "io"];
    let mut out = String::with_capacity(count * 24);
    for i in 0..count {
        let tld = tlds[i % tlds.len()];
        out.push_str(&format!("host{}.site{}.{}\n", i % 97, i % 1013, tld));
    }
    out
}

fn benchmark_ingest(c: &mut Criterion) {
    let input = synthetic_domains(50_000);

    c.bench_function("ingest_50k_lines", |b| {
        b.iter(|| {
            let mut agg = Aggregator::new();
            agg.ingest_reader(Cursor::new(black_box(input.as_bytes()))).unwrap();
            black_box(agg);
        })
    });

    let mut agg = Aggregator::new();
    agg.ingest_reader(Cursor::new(input.as_bytes())).unwrap();

    c.bench_function("report_threshold_2", |b| {
        b.iter(|| black_box(agg.report(black_box(2), SortOrder::Unordered)))
    });
}

criterion_group!(benches, benchmark_ingest);
criterion_main!(benches);
