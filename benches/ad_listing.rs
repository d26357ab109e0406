//! Benchmarks for in-memory ad listing.

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use classified_ads::domain::value_objects::{AdFilter, AuthorFilter, Caller, UserId};
use classified_ads::infrastructure::persistence::{AdRepository, InMemoryRepository};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tokio::runtime::Runtime;

const AUTHORS: i64 = 10;

fn seeded(rt: &Runtime, ads: usize) -> InMemoryRepository {
    let repo = InMemoryRepository::new();
    rt.block_on(async {
        for i in 0..ads {
            let author = UserId::new(i as i64 % AUTHORS);
            let title = if i % 3 == 0 { "Bike" } else { "Lamp" };
            let ad = repo.create_ad(title, "Text", author).await.unwrap();
            if i % 2 == 0 {
                repo.update_ad_published_status(ad.id(), Caller::new(author), true)
                    .await
                    .unwrap();
            }
        }
    });
    repo
}

fn bench_listing(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("list_ads");

    for size in [100_usize, 1_000, 10_000] {
        let repo = seeded(&rt, size);

        let everything = AdFilter::new();
        group.bench_with_input(BenchmarkId::new("all", size), &everything, |b, filter| {
            b.to_async(&rt)
                .iter(|| async { black_box(repo.list_ads(filter).await.unwrap()) });
        });

        let narrow = AdFilter::new()
            .published_only(true)
            .with_author(AuthorFilter::Only(UserId::new(3)))
            .with_title("Bike");
        group.bench_with_input(BenchmarkId::new("filtered", size), &narrow, |b, filter| {
            b.to_async(&rt)
                .iter(|| async { black_box(repo.list_ads(filter).await.unwrap()) });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_listing);
criterion_main!(benches);
