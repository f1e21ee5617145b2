//! Context-carrying request streams for scored-cache benchmarks.
//!
//! Each request is a key plus the `(t, loc)` it arrives under: `t` cycles
//! through the hours of a day and `loc` is drawn from a small set of zones.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use scorecache::entry::{Location, Timestamp};
use scorecache::traits::ContextualCache;

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform keys in `[0, universe)`.
    Uniform,
    /// `hot_prob` of requests go to the first `hot_fraction` of the universe.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
}

#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub key: u64,
    pub t: Timestamp,
    pub loc: Location,
}

#[derive(Debug, Clone)]
pub struct RequestStream {
    universe: u64,
    workload: Workload,
    rng: SmallRng,
    scan_pos: u64,
    tick: u64,
    ticks_per_hour: u64,
    zones: Vec<Location>,
}

impl RequestStream {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        Self {
            universe: universe.max(1),
            workload,
            rng: SmallRng::seed_from_u64(seed),
            scan_pos: 0,
            tick: 0,
            ticks_per_hour: 64,
            zones: vec![
                Location::ORIGIN,
                Location::new(37.77, -122.42),
                Location::new(40.71, -74.00),
                Location::new(51.51, -0.13),
            ],
        }
    }

    fn next_key(&mut self) -> u64 {
        match self.workload {
            Workload::Uniform => self.rng.random::<u64>() % self.universe,
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot = ((self.universe as f64 * hot_fraction.clamp(0.0, 1.0)).round() as u64)
                    .clamp(1, self.universe);
                if self.rng.random::<f64>() < hot_prob || hot == self.universe {
                    self.rng.random::<u64>() % hot
                } else {
                    hot + self.rng.random::<u64>() % (self.universe - hot)
                }
            },
            Workload::Scan => {
                let key = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                key
            },
        }
    }

    pub fn next_request(&mut self) -> Request {
        let key = self.next_key();
        self.tick += 1;
        let t = ((self.tick / self.ticks_per_hour) % 24) as f64;
        let loc = self.zones[(self.rng.random::<u64>() % self.zones.len() as u64) as usize];
        Request { key, t, loc }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HitRate {
    pub hits: u64,
    pub misses: u64,
}

impl HitRate {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Read-through loop: `get`, and `put` on a miss.
pub fn run_hit_rate<C>(cache: &mut C, stream: &mut RequestStream, operations: usize) -> HitRate
where
    C: ContextualCache<u64, u64>,
{
    let mut rate = HitRate::default();
    for _ in 0..operations {
        let Request { key, t, loc } = stream.next_request();
        if cache.get(&key, t, loc).is_some() {
            rate.hits += 1;
        } else {
            rate.misses += 1;
            let _ = cache.put(key, key, t, loc);
        }
    }
    rate
}
