//! Benchmarks for rule-tree lookup.

use std::hint::black_box;

use auction_rules::tree::RuleTree;
use criterion::{Criterion, criterion_group, criterion_main};

fn build_tree() -> RuleTree<u32> {
    let countries = ["USA", "GBR", "DEU", "FRA", "JPN", "BRA", "IND", "AUS"];
    let media = ["banner", "video", "audio", "native"];
    let channels = ["web", "amp", "app"];

    let mut tree = RuleTree::new(3);
    let mut leaf = 0u32;
    for country in countries {
        for medium in media {
            tree.insert(
                &[country.to_string(), medium.to_string(), "*".to_string()],
                leaf,
            )
            .unwrap();
            leaf += 1;
        }
    }
    for channel in channels {
        tree.insert(
            &["*".to_string(), "*".to_string(), channel.to_string()],
            leaf,
        )
        .unwrap();
        leaf += 1;
    }
    tree
}

fn bench_lookup_exact(c: &mut Criterion) {
    let tree = build_tree();
    let matchers = vec!["DEU".to_string(), "video".to_string(), "web".to_string()];
    c.bench_function("lookup_exact", |b| {
        b.iter(|| tree.lookup(black_box(&matchers)))
    });
}

fn bench_lookup_wildcard(c: &mut Criterion) {
    let tree = build_tree();
    let matchers = vec!["ZAF".to_string(), "banner".to_string(), "amp".to_string()];
    c.bench_function("lookup_wildcard", |b| {
        b.iter(|| tree.lookup(black_box(&matchers)))
    });
}

fn bench_lookup_miss(c: &mut Criterion) {
    let tree = build_tree();
    let matchers = vec![
        "USA".to_string(),
        "undefined".to_string(),
        "undefined".to_string(),
    ];
    c.bench_function("lookup_miss", |b| {
        b.iter(|| tree.lookup(black_box(&matchers)))
    });
}

criterion_group!(
    benches,
    bench_lookup_exact,
    bench_lookup_wildcard,
    bench_lookup_miss
);
criterion_main!(benches);
