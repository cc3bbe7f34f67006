//! # lod-storage
//!
//! The entry store: a map from content-addressed id to [`CacheEntry`]
//! (lod_core::CacheEntry) with a hard capacity bound. Not synchronized;
//! the engine wraps it in a single `RwLock`.

pub mod eviction;
pub mod expiry;
pub mod store;

pub use store::{EntryStore, InsertOutcome};
