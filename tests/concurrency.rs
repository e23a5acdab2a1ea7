#![cfg(feature = "std")]

use policy_caches::lock::{LockExclusive, LockShared, Locking};
use policy_caches::policy::{
    AdaptivePolicy, LFUAgingPolicy, LFUPolicy, LFUStarPolicy, LRUPolicy, MRUPolicy, Policy,
};
use policy_caches::{BuildPolicy, Cache, CacheError};
use rand::{thread_rng, Rng};
use scoped_threadpool::Pool;

const THREADS: u32 = 8;
const OPS: usize = 2_000;
const KEYS: u64 = 64;

fn assert_consistent<P, L>(cache: &Cache<u64, u64, P, L>)
where
    P: Policy<u64>,
    L: Locking,
{
    let keys = cache.keys();
    assert!(keys.len() <= cache.max_size());
    assert_eq!(keys.len(), cache.len());
    cache.inspect_policy(|p| {
        assert_eq!(p.len(), keys.len());
        for k in &keys {
            assert!(p.contains(k));
        }
    });
    assert_in_sync(cache);
}

/// Checks storage and policy against each other under a single lock, so it
/// holds while other threads are still working on the cache.
fn assert_in_sync<P, L>(cache: &Cache<u64, u64, P, L>)
where
    P: Policy<u64>,
    L: Locking,
{
    let max = cache.max_size();
    cache.inspect(|keys, policy| {
        let mut stored = 0;
        for k in keys {
            assert!(policy.contains(k), "stored key {} is not tracked", k);
            stored += 1;
        }
        assert_eq!(policy.len(), stored);
        assert!(stored <= max);
    });
}

fn hammer<P, L>(cache: &Cache<u64, u64, P, L>)
where
    P: Policy<u64> + Send,
    L: Locking,
    Cache<u64, u64, P, L>: Sync,
{
    let mut pool = Pool::new(THREADS);
    pool.scoped(|scope| {
        for _ in 0..THREADS {
            scope.execute(move || {
                let mut rng = thread_rng();
                for _ in 0..OPS {
                    let key = rng.gen::<u64>() % KEYS;
                    match rng.gen_range(0..6) {
                        0 | 1 => match cache.insert(key, key * 10) {
                            Ok(_) | Err(CacheError::CacheFull) => {}
                            Err(e) => panic!("unexpected insert error: {:?}", e),
                        },
                        2 => {
                            if let Some(v) = cache.get(&key) {
                                assert_eq!(*v, key * 10);
                            }
                        }
                        3 => {
                            assert!(cache.erase(&key) <= 1);
                        }
                        4 => {
                            cache.touch(&key);
                            assert!(cache.len() <= cache.max_size());
                        }
                        _ => assert_in_sync(cache),
                    }
                }
            });
        }
    });
}

fn run<P, L>(size: usize)
where
    P: BuildPolicy<u64> + Send,
    L: Locking,
    Cache<u64, u64, P, L>: Sync,
{
    let cache: Cache<u64, u64, P, L> = Cache::new(size).unwrap();
    hammer(&cache);
    assert_consistent(&cache);
    cache.clear();
    assert!(cache.is_empty());
    assert_consistent(&cache);
}

#[test]
fn test_exclusive_lock() {
    run::<LRUPolicy<u64>, LockExclusive>(16);
    run::<MRUPolicy<u64>, LockExclusive>(16);
    run::<LFUPolicy<u64>, LockExclusive>(16);
    run::<LFUStarPolicy<u64>, LockExclusive>(16);
    run::<AdaptivePolicy<u64>, LockExclusive>(16);
    run::<LFUAgingPolicy<u64>, LockExclusive>(16);
}

#[test]
fn test_shared_lock() {
    run::<LRUPolicy<u64>, LockShared>(16);
    run::<MRUPolicy<u64>, LockShared>(16);
    run::<LFUPolicy<u64>, LockShared>(16);
    run::<LFUStarPolicy<u64>, LockShared>(16);
    run::<AdaptivePolicy<u64>, LockShared>(16);
    run::<LFUAgingPolicy<u64>, LockShared>(16);
}

#[test]
fn test_concurrent_readers() {
    let cache: Cache<u64, u64, LRUPolicy<u64>, LockShared> = Cache::new(32).unwrap();
    for k in 0..32 {
        cache.insert(k, k).unwrap();
    }

    let cache_ref = &cache;
    let mut pool = Pool::new(4);
    pool.scoped(|scope| {
        for _ in 0..4 {
            scope.execute(move || {
                for k in 0..32 {
                    assert_eq!(cache_ref.count(&k), 1);
                    assert_eq!(cache_ref.len(), 32);
                    assert!(!cache_ref.is_empty());
                }
            });
        }
    });
    assert_consistent(&cache);
}

#[test]
fn test_merge_across_threads() {
    let a: Cache<u64, u64, LFUPolicy<u64>, LockExclusive> = Cache::new(8).unwrap();
    let b: Cache<u64, u64, LFUPolicy<u64>, LockExclusive> = Cache::new(8).unwrap();
    for k in 0..8 {
        b.insert(k, k).unwrap();
    }

    let (a_ref, b_ref) = (&a, &b);
    let mut pool = Pool::new(2);
    pool.scoped(|scope| {
        scope.execute(move || a_ref.merge(b_ref).unwrap());
        scope.execute(move || {
            for k in 100..104 {
                let _ = b_ref.insert(k, k);
            }
        });
    });

    assert!(a.len() <= 8);
    assert_consistent(&a);
    assert_consistent(&b);
}
