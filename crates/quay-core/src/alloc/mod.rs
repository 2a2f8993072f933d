//! Allocation and collection types.
//!
//! - Re-exports of hash collections using AHash
//! - [`Pool`], a fixed-capacity generational arena

pub mod pool;

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
pub use pool::{Handle, Pool, capacity_exceeded};
