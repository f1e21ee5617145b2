//! Per-entry metadata tracked by the scored cache.

/// Caller-supplied time value (hour of day, epoch seconds, simulation tick).
///
/// The cache never reads a clock itself; every `put`/`get` carries `t`.
pub type Timestamp = f64;

/// Caller-supplied coordinate pair.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub const ORIGIN: Location = Location { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Location {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Metadata for one resident entry.
///
/// `insertion_sequence` is assigned on first insertion and never changes;
/// updates only touch the value, access count, time and location.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    value: V,
    access_count: u64,
    last_access_time: Timestamp,
    last_location: Location,
    insertion_sequence: u64,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, t: Timestamp, loc: Location, insertion_sequence: u64) -> Self {
        Self {
            value,
            access_count: 1,
            last_access_time: t,
            last_location: loc,
            insertion_sequence,
        }
    }

    /// Records an access at `(t, loc)`.
    #[inline]
    pub(crate) fn touch(&mut self, t: Timestamp, loc: Location) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_access_time = t;
        self.last_location = loc;
    }

    /// Replaces the value and records an access. Returns the old value.
    pub(crate) fn update(&mut self, value: V, t: Timestamp, loc: Location) -> V {
        self.touch(t, loc);
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }

    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    #[inline]
    pub fn last_access_time(&self) -> Timestamp {
        self.last_access_time
    }

    #[inline]
    pub fn last_location(&self) -> Location {
        self.last_location
    }

    #[inline]
    pub fn insertion_sequence(&self) -> u64 {
        self.insertion_sequence
    }
}
