#![no_main]

use libfuzzer_sys::fuzz_target;
use scorecache::entry::Location;
use scorecache::policy::scored::ScoredCache;
use scorecache::weights::ScoreWeights;

// Fuzz the eviction order against a brute-force model
//
// Every eviction must remove the entry with the smallest
// (score, access_count, insertion_sequence) among the residents.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let capacity = usize::from(data[0] % 8) + 1;
    let weights = match ScoreWeights::frequency_recency(1.0, 1.0) {
        Ok(weights) => weights,
        Err(_) => return,
    };
    let mut cache: ScoredCache<u8, ()> = match ScoredCache::new(capacity, weights) {
        Ok(cache) => cache,
        Err(_) => return,
    };

    for pair in data[1..].chunks_exact(2) {
        let key = pair[0] % 24;
        let t = f64::from(pair[1] % 16);

        if !cache.contains(&key) && cache.len() == capacity {
            let expected = cache
                .iter()
                .map(|(k, e)| {
                    let score = cache.score_of(k, t, Location::ORIGIN).unwrap_or(f64::NAN);
                    (score, e.access_count(), e.insertion_sequence(), *k)
                })
                .min_by(|a, b| {
                    a.0.total_cmp(&b.0)
                        .then(a.1.cmp(&b.1))
                        .then(a.2.cmp(&b.2))
                })
                .map(|(_, _, _, k)| k);

            let evicted = cache.put(key, (), t, Location::ORIGIN).map(|(k, _)| k);
            assert_eq!(evicted, expected);
        } else if pair[1] & 0x80 != 0 {
            let _ = cache.get(&key, t, Location::ORIGIN);
        } else {
            let _ = cache.put(key, (), t, Location::ORIGIN);
        }
    }
});
