use std::hint::black_box;

use browser_omnisearch::EngineConfig;
use browser_omnisearch::engine::{QueryRequest, answer};
use browser_omnisearch::indexer::{FuzzyConfig, IndexSnapshot, build_index, search};
use browser_omnisearch::models::{Record, RecordKind};
use browser_omnisearch::phonetic::{PinyinTransliterator, augment_records};
use chrono::DateTime;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate a snapshot of mixed-kind records with Latin and Chinese titles
fn generate_snapshot(num_records: usize) -> IndexSnapshot {
    let words = [
        "GitHub pull request",
        "Rust documentation",
        "谷歌翻译",
        "Weather forecast",
        "中国新闻网",
        "Project dashboard",
        "在线文档",
        "Mail inbox",
    ];
    let kinds = [RecordKind::Tab, RecordKind::HistoryEntry, RecordKind::Bookmark];

    let records = (0..num_records)
        .map(|i| {
            Record::new(
                kinds[i % kinds.len()],
                i.to_string(),
                format!("{} {}", words[i % words.len()], i),
                format!("https://site{}.example/path/{}", i % 97, i),
                DateTime::from_timestamp_millis(i as i64),
            )
        })
        .collect();

    let records = augment_records(&PinyinTransliterator, records);
    build_index(records).expect("synthetic records have unique identities")
}

fn bench_fuzzy_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_search");
    let config = FuzzyConfig::default();

    for size in [1_000, 3_000, 10_000].iter() {
        let snapshot = generate_snapshot(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| search(&snapshot, black_box("rust docs"), &config).len());
        });
    }

    group.finish();
}

fn bench_query_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_types");
    let snapshot = generate_snapshot(3_000);
    let config = EngineConfig::default();

    for (name, query) in [
        ("empty", ""),
        ("latin", "weather"),
        ("typo", "wether"),
        ("pinyin_full", "zhongguo"),
        ("pinyin_initials", "zgxww"),
        ("no_match", "qqqqqq"),
    ] {
        let request = QueryRequest::new(query);
        group.bench_function(name, |b| {
            b.iter(|| answer(&snapshot, black_box(&request), &config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fuzzy_search, bench_query_types);
criterion_main!(benches);
