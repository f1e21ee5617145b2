//! Eviction policies.

pub mod scored;
