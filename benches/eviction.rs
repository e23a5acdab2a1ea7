use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use policy_caches::lock::LockExclusive;
use policy_caches::policy::{
    AdaptivePolicy, LFUAgingPolicy, LFUPolicy, LRUPolicy, MRUPolicy, NonePolicy,
};
use policy_caches::{BuildPolicy, Cache};
use rand::{thread_rng, Rng};

const CASES: usize = 200_000;
const CAPACITY: usize = 8192;

fn workload() -> Vec<u64> {
    let mut rng = thread_rng();
    black_box(
        (0..(CASES * 2))
            .map(|i| {
                if i % 2 == 0 {
                    rng.gen::<u64>() % 16384
                } else {
                    rng.gen::<u64>() % 32768
                }
            })
            .collect(),
    )
}

fn bench_policy<P: BuildPolicy<u64>>(c: &mut Criterion, name: &str) {
    c.bench_function(name, move |b| {
        b.iter_batched(
            || {
                let cache: Cache<u64, u64, P> = Cache::new(CAPACITY).unwrap();
                (cache, workload())
            },
            |(cache, nums)| {
                (0..CASES).for_each(|v| {
                    let k = nums[v];
                    let _ = cache.insert(k, k);
                });

                (0..CASES).for_each(|v| {
                    let k = nums[CASES + v];
                    let _ = cache.check(&k);
                });
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_eviction(c: &mut Criterion) {
    bench_policy::<NonePolicy<u64>>(c, "Test Cache insert/check NonePolicy");
    bench_policy::<LRUPolicy<u64>>(c, "Test Cache insert/check LRUPolicy");
    bench_policy::<MRUPolicy<u64>>(c, "Test Cache insert/check MRUPolicy");
    bench_policy::<LFUPolicy<u64>>(c, "Test Cache insert/check LFUPolicy");
    bench_policy::<LFUAgingPolicy<u64>>(c, "Test Cache insert/check LFUAgingPolicy");
    bench_policy::<AdaptivePolicy<u64>>(c, "Test Cache insert/check AdaptivePolicy");
}

fn bench_exclusive_lock(c: &mut Criterion) {
    c.bench_function("Test Cache insert/fetch LRUPolicy LockExclusive", move |b| {
        b.iter_batched(
            || {
                let cache: Cache<u64, u64, LRUPolicy<u64>, LockExclusive> =
                    Cache::new(CAPACITY).unwrap();
                (cache, workload())
            },
            |(cache, nums)| {
                (0..CASES).for_each(|v| {
                    let k = nums[v];
                    let _ = cache.insert(k, k);
                    if let Ok(v) = cache.fetch(&nums[CASES + v]) {
                        black_box(*v);
                    }
                });
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_eviction, bench_exclusive_lock);
criterion_main!(benches);
