//! # Eviction Selector
//!
//! Picks the entry to remove when a new key arrives at a full cache.
//!
//! ## Algorithm
//!
//! ```text
//!   for each resident entry:
//!       rank = (score(entry, t, loc), access_count, insertion_sequence)
//!   victim = entry with the smallest rank
//!
//!   ┌───────────────┬───────────────┬─────────────────────┐
//!   │ 1. score      │ 2. accesses   │ 3. insertion order  │
//!   │ lower evicts  │ lower evicts  │ older evicts (FIFO) │
//!   └───────────────┴───────────────┴─────────────────────┘
//! ```
//!
//! `insertion_sequence` is unique per entry, so the rank is a strict total
//! order and the victim does not depend on map iteration order: the same
//! entry states under the same `(t, loc)` always select the same victim.
//! Scores are compared with [`f64::total_cmp`]; exact equality is a tie.
//!
//! ## Why a full scan
//!
//! Scores depend on the query-time context, so they cannot be kept in a
//! priority structure without invalidating it whenever `t` or `loc` change.
//! Every eviction rescans all `n` entries (O(n)). A secondary index on
//! `(access_count, insertion_sequence)` could speed up the tie-break layer
//! but the context-dependent part must still be rescored per eviction.

use std::cmp::Ordering;

use crate::entry::{CacheEntry, Location, Timestamp};
use crate::error::InvariantError;
use crate::score::ScoreCalculator;

/// Sort key for eviction: smaller ranks are evicted first.
#[derive(Debug, Clone, Copy)]
pub struct EvictionRank {
    pub score: f64,
    pub access_count: u64,
    pub insertion_sequence: u64,
}

impl EvictionRank {
    pub fn of<V>(calc: &ScoreCalculator<'_>, entry: &CacheEntry<V>, t: Timestamp, loc: Location) -> Self {
        Self {
            score: calc.score(entry, t, loc),
            access_count: entry.access_count(),
            insertion_sequence: entry.insertion_sequence(),
        }
    }
}

impl Ord for EvictionRank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then(self.access_count.cmp(&other.access_count))
            .then(self.insertion_sequence.cmp(&other.insertion_sequence))
    }
}

impl PartialOrd for EvictionRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvictionRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EvictionRank {}

/// Which rule decided the victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    /// The victim's score was strictly lowest.
    None,
    /// Other entries shared the score; fewest accesses decided.
    AccessCount,
    /// Other entries shared score and access count; oldest insertion decided.
    InsertionSequence,
}

/// Outcome of one eviction scan.
#[derive(Debug, Clone, Copy)]
pub struct Victim<'a, K> {
    pub key: &'a K,
    pub rank: EvictionRank,
    pub tie_break: TieBreak,
    /// Number of entries scored.
    pub scanned: usize,
}

/// Scores every entry under `(t, loc)` and returns the minimum.
///
/// Returns an [`InvariantError`] if `entries` is empty; callers only evict
/// from a full, non-empty store, so this indicates a bug.
pub fn select_victim<'a, K, V, I>(
    entries: I,
    calc: &ScoreCalculator<'_>,
    t: Timestamp,
    loc: Location,
) -> Result<Victim<'a, K>, InvariantError>
where
    K: 'a,
    V: 'a,
    I: IntoIterator<Item = (&'a K, &'a CacheEntry<V>)>,
{
    let mut iter = entries.into_iter();
    let (first_key, first_entry) = iter.next().ok_or_else(InvariantError::empty_store_eviction)?;

    let mut best_key = first_key;
    let mut best = EvictionRank::of(calc, first_entry, t, loc);
    let mut score_tied = false;
    let mut count_tied = false;
    let mut scanned = 1usize;

    for (key, entry) in iter {
        scanned += 1;
        let rank = EvictionRank::of(calc, entry, t, loc);
        let same_score = rank.score.total_cmp(&best.score).is_eq();
        let same_count = same_score && rank.access_count == best.access_count;

        if rank < best {
            // Earlier ties were against the old best; only its own relation
            // to the new best still counts.
            score_tied = same_score;
            count_tied = same_count;
            best_key = key;
            best = rank;
        } else {
            score_tied |= same_score;
            count_tied |= same_count;
        }
    }

    let tie_break = if count_tied {
        TieBreak::InsertionSequence
    } else if score_tied {
        TieBreak::AccessCount
    } else {
        TieBreak::None
    };

    Ok(Victim {
        key: best_key,
        rank: best,
        tie_break,
        scanned,
    })
}
