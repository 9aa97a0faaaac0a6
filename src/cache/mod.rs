//! In-memory cache with a fixed freshness window
//!
//! Entries are stamped when written and considered fresh while their age is
//! within the cache's duration. Stale entries are dropped lazily, on the next
//! read of the same key.

mod timed;

pub use timed::TimedCache;
