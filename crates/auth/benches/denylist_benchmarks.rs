use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use gatehouse_auth::{derive_denylist, reachable_uris, MenuEntry};

/// Two-level catalog: `roots` groups with `children` navigable entries each.
fn synthetic_catalog(roots: i64, children: i64) -> Vec<MenuEntry> {
    let mut entries = Vec::new();
    let mut next = roots + 1;
    for root in 1..=roots {
        entries.push(MenuEntry::new(root, 0, ""));
        for child in 0..children {
            entries.push(MenuEntry::new(next, root, format!("/section{root}/page{child}")));
            next += 1;
        }
    }
    entries
}

/// Grant every other root group with all its children.
fn half_granted(catalog: &[MenuEntry]) -> Vec<MenuEntry> {
    catalog
        .iter()
        .filter(|m| {
            let group = if m.is_root() { m.id.get() } else { m.parent_id.get() };
            group % 2 == 0
        })
        .cloned()
        .collect()
}

fn bench_denylist(c: &mut Criterion) {
    let mut group = c.benchmark_group("denylist");

    for size in [10i64, 50, 200] {
        let catalog = synthetic_catalog(size, 10);
        let granted = half_granted(&catalog);

        group.throughput(Throughput::Elements(catalog.len() as u64));
        group.bench_with_input(BenchmarkId::new("derive", catalog.len()), &size, |b, _| {
            b.iter(|| derive_denylist(black_box(&catalog), black_box(&granted)))
        });
        group.bench_with_input(BenchmarkId::new("reachable", catalog.len()), &size, |b, _| {
            b.iter(|| reachable_uris(black_box(&granted)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_denylist);
criterion_main!(benches);
