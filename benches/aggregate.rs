use std::hint::black_box;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use docver::{RootLabels, SiteDocument, aggregate, parse_versioned_url};

fn sample_site(versions: usize, pages: usize) -> Vec<SiteDocument> {
    let mut documents = Vec::with_capacity(versions * pages + pages);
    for v in 0..versions {
        for p in 0..pages {
            let url = format!("/docs/{}.{}/section-{}/page-{p}", v / 4 + 1, v % 4, p % 8);
            documents.push(SiteDocument::new(url, format!("_docs/{v}/{p}.md")));
        }
    }
    for p in 0..pages {
        documents.push(SiteDocument::new(format!("/blog/post-{p}"), format!("_posts/{p}.md")));
    }
    documents
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.bench_function("versioned", |b| {
        b.iter(|| parse_versioned_url(black_box("/docs/2.1/guide/install/linux")))
    });
    group.bench_function("unversioned", |b| {
        b.iter(|| parse_versioned_url(black_box("/blog/2024-launch-announcement")))
    });
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let labels: RootLabels = [("/docs/", "Documentation")].into_iter().collect();
    let mut group = c.benchmark_group("aggregate");

    for (versions, pages) in [(4, 50), (16, 200), (32, 1000)] {
        let documents = sample_site(versions, pages);
        group.throughput(Throughput::Elements(documents.len() as u64));
        group.bench_function(format!("{versions}x{pages}"), |b| {
            b.iter(|| aggregate(black_box(&documents), labels.clone()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_aggregate);
criterion_main!(benches);
