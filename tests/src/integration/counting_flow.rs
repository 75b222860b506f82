//! # Counting Filter Flows
//!
//! End-to-end lifecycle of `CountingBloomFilter`: sizing, add/test/remove,
//! the removal hazard, shared metrics and external locking.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use parking_lot::Mutex;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use counting_bloom::domain::compute_hash_positions;
    use counting_bloom::{
        estimate_sizing, CountingBloomConfigBuilder, CountingBloomFilter, FilterError, HashKind,
        Metrics,
    };

    use crate::init_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn random_elements(rng: &mut StdRng, count: usize) -> Vec<[u8; 16]> {
        (0..count).map(|_| rng.gen()).collect()
    }

    /// Find an element other than `target` that maps to exactly the same slots.
    fn find_full_collision(filter: &CountingBloomFilter, target: &[u8]) -> Vec<u8> {
        let k = filter.hash_count();
        let m = filter.array_length();
        let wanted = compute_hash_positions(filter.hash_kind(), target, k, m);

        (0..1_000_000u32)
            .map(|i| format!("collider_{}", i).into_bytes())
            .find(|candidate| {
                candidate.as_slice() != target
                    && compute_hash_positions(filter.hash_kind(), candidate, k, m) == wanted
            })
            .expect("a full collision exists within the search range")
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_reference_scenario() {
        init_tracing();

        let sizing = estimate_sizing(100, 0.01).unwrap();
        let mut filter = CountingBloomFilter::new(100, 0.01).unwrap();
        assert_eq!(filter.array_length(), sizing.array_length);
        assert_eq!(filter.hash_count(), sizing.hash_count);

        for name in ["foo", "bar", "tom", "john"] {
            filter.add(name.as_bytes());
        }

        assert!(filter.test(b"tom"), "tom was added");

        filter.remove(b"john");
        assert!(!filter.test(b"john"), "john was removed");
        assert_eq!(filter.elements_count(), 3);
    }

    #[test]
    fn test_config_driven_lifecycle() {
        init_tracing();

        let config = CountingBloomConfigBuilder::new()
            .capacity(500)
            .false_positive_rate(0.02)
            .hash_kind(HashKind::Fnv1)
            .build()
            .unwrap();
        let mut filter = CountingBloomFilter::from_config(&config).unwrap();

        let items: Vec<String> = (0..500).map(|i| format!("user:{}", i)).collect();
        for item in &items {
            filter.add(item.as_bytes());
        }
        for item in &items {
            assert!(filter.test(item.as_bytes()), "False negative for {}", item);
        }

        filter.clear();
        assert_eq!(filter.counters_set(), 0);
        for item in &items {
            assert!(!filter.test(item.as_bytes()), "{} survived clear", item);
        }
    }

    #[test]
    fn test_remove_half_keeps_other_half() {
        let mut filter = CountingBloomFilter::new(2_000, 0.01).unwrap();
        let items: Vec<String> = (0..2_000).map(|i| format!("item_{}", i)).collect();

        for item in &items {
            filter.add(item.as_bytes());
        }
        for item in items.iter().step_by(2) {
            filter.remove(item.as_bytes());
        }

        // Only genuinely added elements were removed, so no false negatives
        for item in items.iter().skip(1).step_by(2) {
            assert!(filter.test(item.as_bytes()), "False negative for {}", item);
        }
        assert_eq!(filter.elements_count(), 1_000);
    }

    #[test]
    fn test_removing_collider_causes_false_negative() {
        let mut filter = CountingBloomFilter::new(100, 0.01).unwrap();
        filter.add(b"genuine");

        let collider = find_full_collision(&filter, b"genuine");
        assert!(filter.test(&collider), "Collider looks present");

        // Known counting-filter hazard: removing a never-added collider
        // decrements the genuine element's counters.
        assert!(filter.remove(&collider));
        assert!(!filter.test(b"genuine"));
    }

    #[test]
    fn test_observed_fpr_at_capacity() {
        let mut rng = StdRng::seed_from_u64(7);
        let inserted = random_elements(&mut rng, 1_000);
        let probes = random_elements(&mut rng, 20_000);

        for hash in [HashKind::Murmur3, HashKind::Fnv1] {
            let mut filter = CountingBloomFilter::with_hash(1_000, 0.01, hash).unwrap();
            for elem in &inserted {
                filter.add(elem);
            }

            let false_positives = probes.iter().filter(|p| filter.test(p.as_slice())).count();
            let observed = false_positives as f64 / probes.len() as f64;

            // Offset hashing puts the k slots in one window, so the observed
            // rate sits well above the independent-hash estimate.
            assert!(
                observed < 0.35,
                "{:?}: observed FPR {} out of expected range",
                hash,
                observed
            );
            assert!(filter.estimated_fpr() <= 0.011);
        }
    }

    #[test]
    fn test_shared_metrics_across_filters() {
        let metrics = Arc::new(Metrics::new());
        let mut a = CountingBloomFilter::new(100, 0.01)
            .unwrap()
            .with_metrics(metrics.clone());
        let mut b = CountingBloomFilter::new(10, 0.1)
            .unwrap()
            .with_metrics(metrics.clone());

        a.add(b"x");
        b.add(b"y");
        a.test(b"x");
        b.remove(b"never");

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_created, 2);
        assert_eq!(snapshot.slots_allocated, (a.array_length() + b.array_length()) as u64);
        assert_eq!(snapshot.elements_inserted, 2);
        assert_eq!(snapshot.lookups_positive, 1);
        assert_eq!(snapshot.removals_skipped, 1);
    }

    #[test]
    fn test_external_lock_for_concurrent_writers() {
        let filter = Arc::new(Mutex::new(CountingBloomFilter::new(4_000, 0.01).unwrap()));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let filter = Arc::clone(&filter);
                thread::spawn(move || {
                    for i in 0..1_000 {
                        filter.lock().add(format!("t{}-{}", t, i).as_bytes());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let filter = filter.lock();
        assert_eq!(filter.elements_count(), 4_000);
        for t in 0..4 {
            for i in 0..1_000 {
                assert!(filter.test(format!("t{}-{}", t, i).as_bytes()));
            }
        }
    }

    #[test]
    fn test_invalid_inputs_fail_fast() {
        assert_eq!(
            CountingBloomFilter::new(0, 0.01).unwrap_err(),
            FilterError::InvalidCapacity { capacity: 0 }
        );
        assert!(matches!(
            CountingBloomFilter::new(10, -1.0),
            Err(FilterError::InvalidFalsePositiveRate { .. })
        ));
    }
}
