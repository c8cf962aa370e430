use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pcol::HashDict;

const ITEM_COUNT: u32 = 10_000;

fn insert(c: &mut Criterion) {
    c.bench_function("HashDict sequential assoc", |b| {
        b.iter(|| {
            let mut map = HashDict::new();
            for i in 0..black_box(ITEM_COUNT) {
                map = map.assoc(i, i);
            }
            map
        })
    });
}

fn from_pairs_bulk(c: &mut Criterion) {
    let pairs: Vec<(u32, u32)> = (0..ITEM_COUNT).map(|i| (i, i)).collect();

    c.bench_function("HashDict from_pairs bulk construction", |b| {
        b.iter(|| HashDict::<u32, u32>::from_pairs(black_box(pairs.clone())))
    });
}

fn get(c: &mut Criterion) {
    let map: HashDict<u32, u32> = (0..ITEM_COUNT).map(|i| (i, i)).collect();

    c.bench_function("HashDict get", |b| {
        b.iter(|| {
            for i in 0..black_box(ITEM_COUNT) {
                black_box(map.get(&i));
            }
        })
    });
}

fn dissoc(c: &mut Criterion) {
    let map: HashDict<u32, u32> = (0..ITEM_COUNT).map(|i| (i, i)).collect();

    c.bench_function("HashDict dissoc every key", |b| {
        b.iter(|| {
            let mut m = map.clone();
            for i in 0..black_box(ITEM_COUNT) {
                m = m.dissoc(&i);
            }
            m
        })
    });
}

fn merge(c: &mut Criterion) {
    let left: HashDict<u32, u32> = (0..ITEM_COUNT).map(|i| (i, i)).collect();
    let right: HashDict<u32, u32> = (ITEM_COUNT / 2..ITEM_COUNT + ITEM_COUNT / 2).map(|i| (i, i)).collect();

    c.bench_function("HashDict merge with partial overlap", |b| {
        b.iter(|| black_box(&left).merge(black_box(&right)))
    });
}

criterion_group!(benches, insert, from_pairs_bulk, get, dissoc, merge);
criterion_main!(benches);
