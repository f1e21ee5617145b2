#![no_main]

use libfuzzer_sys::fuzz_target;
use scorecache::entry::Location;
use scorecache::policy::scored::ScoredCache;
use scorecache::weights::ScoreWeights;

// Fuzz arbitrary operation sequences on ScoredCache
//
// The first byte picks the capacity, the next five the weights; the rest is
// consumed four bytes at a time as (op, key, t, zone).
fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let capacity = usize::from(data[0] % 16) + 1;
    let w = |b: u8| f64::from(b) / 32.0;
    let weights = match ScoreWeights::try_new(w(data[1]), w(data[2]), w(data[3]), w(data[4]), w(data[5])) {
        Ok(weights) => weights,
        Err(_) => return,
    };
    let mut cache: ScoredCache<u8, u32> = match ScoredCache::new(capacity, weights) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    for chunk in data[6..].chunks_exact(4) {
        let op = chunk[0] % 6;
        let key = chunk[1] % 32;
        let t = f64::from(chunk[2]);
        let loc = Location::new(f64::from(chunk[3] % 4), 0.0);

        match op {
            0 | 1 => {
                // put
                let was_resident = cache.contains(&key);
                let old_len = cache.len();
                let evicted = cache.put(key, u32::from(chunk[2]), t, loc);

                if was_resident {
                    assert!(evicted.is_none());
                    assert_eq!(cache.len(), old_len);
                } else if old_len == capacity {
                    let (victim, _) = evicted.expect("full cache must evict");
                    assert_ne!(victim, key);
                    assert!(!cache.contains(&victim));
                    assert_eq!(cache.len(), capacity);
                } else {
                    assert!(evicted.is_none());
                    assert_eq!(cache.len(), old_len + 1);
                }
                assert_eq!(cache.peek(&key), Some(&u32::from(chunk[2])));
            }
            2 => {
                // get
                let before = cache.access_count(&key);
                let hit = cache.get(&key, t, loc).is_some();
                assert_eq!(hit, before.is_some());
                if let Some(count) = before {
                    assert_eq!(cache.access_count(&key), Some(count.saturating_add(1)));
                }
            }
            3 => {
                // peek_victim agrees with the next eviction
                if cache.len() == capacity && !cache.contains(&key) {
                    let predicted = cache.peek_victim(t, loc).copied();
                    let evicted = cache.put(key, 0, t, loc).map(|(k, _)| k);
                    assert_eq!(predicted, evicted);
                }
            }
            4 => {
                // read-only queries
                let _ = cache.score_of(&key, t, loc);
                let _ = cache.score_breakdown(&key, t, loc);
            }
            _ => {
                if chunk[1] == 0xFF {
                    cache.clear();
                    assert!(cache.is_empty());
                }
            }
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
