//! Criterion benchmarks for helpdex.
//!
//! Covers the hot paths of a help viewer session:
//! - Parsing and merging pair shards
//! - Expanding words against a merged index
//! - Running queries over several books
//! - Flattening a large TOC

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use helpdex::index::{PairShardLoader, parse_pair_script};
use helpdex::prelude::*;
use std::fmt::Write;
use std::hint::black_box;

const WORDS: [&str; 24] = [
    "routing", "protocol", "interface", "network", "layer", "mac", "icmp", "error", "queue",
    "packet", "node", "link", "wireless", "802.11", "802.3", "ospfv3", "address", "area",
    "statistics", "default", "configuration", "scenario", "channel", "antenna",
];

/// Generate a shard script with `count` registration calls.
fn generate_shard(count: usize, seed: usize) -> String {
    let mut script = String::from("function FileData_Pairs(x)\n{\n");
    for i in 0..count {
        let source = WORDS[(i * 7 + seed) % WORDS.len()];
        let related = WORDS[(i * 13 + seed * 3 + 1) % WORDS.len()];
        let _ = writeln!(script, "x.t(\"{source}\",\"{related}\");");
    }
    script.push_str("}\n");
    script
}

fn build_index(shards: &[String]) -> AssociationIndex {
    let loader = PairShardLoader::new();
    let mut index = AssociationIndex::new();
    for shard in shards {
        index.merge_into(loader.load(parse_pair_script(shard).pairs).entries);
    }
    index
}

fn build_toc(size: usize) -> TocTree {
    let mut toc = TocTree::create_root("Library");
    let mut ids = vec![toc.root()];
    for n in 0..size {
        let parent = ids[n / 4];
        let locator = Locator::with_anchor(format!("page{}.html", n / 10), format!("s{n}"))
            .unwrap();
        let id = toc
            .append(parent, format!("{} {n}", WORDS[n % WORDS.len()]), locator)
            .unwrap();
        ids.push(id);
    }
    toc
}

fn bench_shard_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("shard_loading");
    let shards: Vec<String> = (0..26).map(|seed| generate_shard(1000, seed)).collect();

    group.throughput(Throughput::Elements(1000));
    group.bench_function("parse_single_shard", |b| {
        b.iter(|| black_box(parse_pair_script(black_box(&shards[0]))))
    });

    group.throughput(Throughput::Elements(26 * 1000));
    group.bench_function("merge_book_index", |b| {
        b.iter(|| black_box(build_index(black_box(&shards))))
    });

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");
    let shards: Vec<String> = (0..26).map(|seed| generate_shard(1000, seed)).collect();
    let index = build_index(&shards);
    let word = Word::new("routing").unwrap();
    let prefix = Word::new("80").unwrap();
    let pattern = Word::new("*o*").unwrap();

    group.bench_function("expand_word", |b| {
        b.iter(|| black_box(index.expand(black_box(&word), 25)))
    });
    group.bench_function("expand_prefix", |b| {
        b.iter(|| black_box(index.expand_prefix(black_box(&prefix))))
    });
    group.bench_function("expand_pattern", |b| {
        b.iter(|| black_box(index.expand_pattern(black_box(&pattern))))
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let mut registry = BookRegistry::new();
    for book in 0..8 {
        let shards: Vec<String> = (0..8).map(|seed| generate_shard(500, seed + book)).collect();
        let id = format!("book{book}");
        registry
            .register(Book::new(id.clone(), id, build_toc(200), build_index(&shards)))
            .unwrap();
    }
    let config = SearchConfig::default();

    for query in ["icmp error", "\"802.11 mac\"", "802.*", "*o* queue"] {
        group.bench_function(query, |b| {
            b.iter(|| black_box(search(&registry, black_box(query), &config)))
        });
    }

    group.finish();
}

fn bench_toc(c: &mut Criterion) {
    let mut group = c.benchmark_group("toc");
    let toc = build_toc(5000);
    let target = Locator::parse("page499.html#missing").unwrap();

    group.throughput(Throughput::Elements(5001));
    group.bench_function("flatten", |b| b.iter(|| black_box(toc.flatten().count())));
    group.bench_function("sync_to_page", |b| {
        b.iter(|| black_box(toc.sync_to(black_box(&target)).is_some()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_shard_loading,
    bench_expansion,
    bench_queries,
    bench_toc
);
criterion_main!(benches);
