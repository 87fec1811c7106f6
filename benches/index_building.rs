use std::hint::black_box;

use browser_omnisearch::indexer::build_index;
use browser_omnisearch::index_storage::{decode_snapshot, encode_snapshot};
use browser_omnisearch::models::{Record, RecordKind};
use browser_omnisearch::phonetic::{PinyinTransliterator, augment_records};
use chrono::DateTime;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate records with a mix of Latin and Chinese titles
fn generate_records(num_records: usize) -> Vec<Record> {
    (0..num_records)
        .map(|i| {
            let title = if i % 3 == 0 {
                format!("浏览器历史记录 {}", i)
            } else {
                format!("Browser history entry {} with some content", i)
            };
            Record::new(
                RecordKind::HistoryEntry,
                i.to_string(),
                title,
                format!("https://example.com/{}", i),
                DateTime::from_timestamp_millis(i as i64),
            )
        })
        .collect()
}

fn bench_build_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_index");

    for size in [1_000, 3_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            // Pre-generate records outside the benchmark
            let records = generate_records(size);

            b.iter(|| {
                let augmented = augment_records(&PinyinTransliterator, black_box(records.clone()));
                build_index(augmented)
            });
        });
    }

    group.finish();
}

fn bench_snapshot_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_codec");
    let snapshot = build_index(augment_records(&PinyinTransliterator, generate_records(3_000)))
        .expect("synthetic records have unique identities");
    let blob = encode_snapshot(&snapshot).expect("snapshot encodes");

    group.throughput(Throughput::Bytes(blob.len() as u64));
    group.bench_function("encode", |b| b.iter(|| encode_snapshot(black_box(&snapshot))));
    group.bench_function("decode", |b| b.iter(|| decode_snapshot(black_box(&blob))));

    group.finish();
}

criterion_group!(benches, bench_build_index, bench_snapshot_codec);
criterion_main!(benches);
