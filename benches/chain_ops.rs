//! Benchmarks for the chain operations over a growable arena.
//!
//! Run with: cargo bench

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use relink::{ChainArena, Key, chain};

const LEN: usize = 10_000;

fn build(store: &mut ChainArena<u64>, len: usize) -> u32 {
    let mut head = u32::NONE;
    let mut tail = u32::NONE;
    for i in 0..len as u64 {
        tail = chain::insert(store, tail, i, true);
        if head.is_none() {
            head = tail;
        }
    }
    head
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice");
    group.throughput(Throughput::Elements(LEN as u64));

    group.bench_function("append_then_clear", |b| {
        let mut store: ChainArena<u64> = ChainArena::with_capacity(LEN);
        b.iter(|| {
            let mut head = build(&mut store, LEN);
            chain::clear(&mut store, &mut head);
        });
    });

    group.bench_function("churn_at_head", |b| {
        let mut store: ChainArena<u64> = ChainArena::with_capacity(LEN + 1);
        let head = build(&mut store, LEN);
        b.iter(|| {
            let fresh = chain::insert(&mut store, head, 0, false);
            black_box(chain::remove(&mut store, fresh));
        });
    });

    group.finish();
}

fn bench_copy_assign(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_semantics");
    group.throughput(Throughput::Elements(LEN as u64));

    group.bench_function("copy", |b| {
        let mut store: ChainArena<u64> = ChainArena::with_capacity(LEN * 2);
        let head = build(&mut store, LEN);
        b.iter(|| {
            let mut dup = chain::copy(&mut store, head);
            black_box(dup);
            chain::clear(&mut store, &mut dup);
        });
    });

    group.bench_function("assign_reuse", |b| {
        let mut store: ChainArena<u64> = ChainArena::with_capacity(LEN * 2);
        let source = build(&mut store, LEN);
        let mut dest = chain::copy(&mut store, source);
        b.iter(|| {
            // Equal lengths: pure value overwrite, zero allocation
            chain::assign(&mut store, &mut dest, source);
            black_box(dest);
        });
    });

    group.finish();
}

fn bench_walks(c: &mut Criterion) {
    let mut group = c.benchmark_group("walks");
    group.throughput(Throughput::Elements(LEN as u64));

    let mut store: ChainArena<u64> = ChainArena::with_capacity(LEN);
    let head = build(&mut store, LEN);

    group.bench_function("size", |b| {
        b.iter(|| black_box(chain::size(&store, head)));
    });

    group.bench_function("render", |b| {
        b.iter(|| black_box(chain::render(&store, head)));
    });

    group.finish();
}

criterion_group!(benches, bench_insert_remove, bench_copy_assign, bench_walks);
criterion_main!(benches);
