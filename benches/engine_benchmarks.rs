use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::{BTreeSet, HashMap, VecDeque};
use treapless::{DynArray, HashTable, LinkedList, RandTree};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Tree Benchmarks ────────────────────────────────────────────────────────

fn bench_tree_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_insert_ordered");

    group.bench_function(BenchmarkId::new("RandTree", N), |b| {
        b.iter(|| {
            let mut tree = RandTree::with_seed(42);
            for i in 0..N as i64 {
                tree.insert(i);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for i in 0..N as i64 {
                set.insert(i);
            }
            set
        });
    });

    group.finish();
}

fn bench_tree_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("tree_insert_random");

    group.bench_function(BenchmarkId::new("RandTree", N), |b| {
        b.iter(|| {
            let mut tree = RandTree::with_seed(42);
            for &k in &keys {
                tree.insert(k);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &k in &keys {
                set.insert(k);
            }
            set
        });
    });

    group.finish();
}

fn bench_tree_contains_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut tree = RandTree::with_seed(42);
    let mut set = BTreeSet::new();
    for &k in &keys {
        tree.insert(k);
        set.insert(k);
    }

    let mut group = c.benchmark_group("tree_contains_random");

    group.bench_function(BenchmarkId::new("RandTree", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &k in &keys {
                if tree.contains(&k) {
                    count += 1;
                }
            }
            count
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut count = 0usize;
            for &k in &keys {
                if set.contains(&k) {
                    count += 1;
                }
            }
            count
        });
    });

    group.finish();
}

fn bench_tree_rank_queries(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut tree = RandTree::with_seed(42);
    for &k in &keys {
        tree.insert(k);
    }
    let len = tree.len();

    let mut group = c.benchmark_group("tree_rank_queries");

    // Rank-indexed access has no std counterpart; BTreeSet pays O(n) per
    // query through nth.
    group.bench_function(BenchmarkId::new("RandTree::get_by_rank", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for i in (0..len).step_by(7) {
                if let Some(&v) = tree.get_by_rank(i) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("RandTree::rank_of", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for k in keys.iter().step_by(7) {
                if let Some(rank) = tree.rank_of(k) {
                    sum = sum.wrapping_add(rank);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_tree_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("tree_remove_random");

    group.bench_function(BenchmarkId::new("RandTree", N), |b| {
        b.iter_batched(
            || {
                let mut tree = RandTree::with_seed(42);
                for &k in &keys {
                    tree.insert(k);
                }
                tree
            },
            |mut tree| {
                for &k in &keys {
                    tree.remove(&k);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || keys.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for &k in &keys {
                    set.remove(&k);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Array Benchmarks ───────────────────────────────────────────────────────

fn bench_array_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("array_push");

    group.bench_function(BenchmarkId::new("DynArray", N), |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for i in 0..N as i64 {
                array.push(i);
            }
            array
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..N as i64 {
                vec.push(i);
            }
            vec
        });
    });

    group.finish();
}

fn bench_array_churn(c: &mut Criterion) {
    // Grow to N, shrink to N/8, grow back; exercises both capacity moves.
    let mut group = c.benchmark_group("array_churn");

    group.bench_function(BenchmarkId::new("DynArray", N), |b| {
        b.iter(|| {
            let mut array = DynArray::new();
            for i in 0..N as i64 {
                array.push(i);
            }
            while array.len() > N / 8 {
                array.pop();
            }
            for i in 0..N as i64 {
                array.push(i);
            }
            array
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..N as i64 {
                vec.push(i);
            }
            while vec.len() > N / 8 {
                vec.pop();
            }
            for i in 0..N as i64 {
                vec.push(i);
            }
            vec
        });
    });

    group.finish();
}

// ─── List Benchmarks ────────────────────────────────────────────────────────

fn bench_list_push_pop_ends(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_push_pop_ends");

    group.bench_function(BenchmarkId::new("LinkedList", N), |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..N as i64 {
                list.push_back(i);
            }
            while list.pop_front().is_some() {}
            list
        });
    });

    group.bench_function(BenchmarkId::new("VecDeque", N), |b| {
        b.iter(|| {
            let mut deque = VecDeque::new();
            for i in 0..N as i64 {
                deque.push_back(i);
            }
            while deque.pop_front().is_some() {}
            deque
        });
    });

    group.finish();
}

// ─── Table Benchmarks ───────────────────────────────────────────────────────

fn bench_table_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("table_insert_random");

    group.bench_function(BenchmarkId::new("HashTable", N), |b| {
        b.iter(|| {
            let mut table = HashTable::new();
            for &k in &keys {
                table.insert(k, k);
            }
            table
        });
    });

    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for &k in &keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_table_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let table: HashTable<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let map: HashMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("table_get_random");

    group.bench_function(BenchmarkId::new("HashTable", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = table.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for &k in &keys {
                if let Some(&v) = map.get(&k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_table_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);

    let mut group = c.benchmark_group("table_remove_random");

    group.bench_function(BenchmarkId::new("HashTable", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<HashTable<i64, i64>>(),
            |mut table| {
                for &k in &keys {
                    table.remove(&k);
                }
                table
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<HashMap<i64, i64>>(),
            |mut map| {
                for &k in &keys {
                    map.remove(&k);
                }
                map
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(
    tree_benches,
    bench_tree_insert_ordered,
    bench_tree_insert_random,
    bench_tree_contains_random,
    bench_tree_rank_queries,
    bench_tree_remove_random,
);

criterion_group!(array_benches, bench_array_push, bench_array_churn,);

criterion_group!(list_benches, bench_list_push_pop_ends,);

criterion_group!(
    table_benches,
    bench_table_insert_random,
    bench_table_get_random,
    bench_table_remove_random,
);

criterion_main!(tree_benches, array_benches, list_benches, table_benches);
