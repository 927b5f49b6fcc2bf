//! Local caching module for the paint-before-fetch flow.
//!
//! This module provides the `CacheStore` abstraction and its file-backed
//! implementation for persisting the authenticated member's profile
//! snapshot between sessions. Cached data is a paint hint only; every
//! successful fetch or save overwrites it.

pub mod store;

pub use store::{load, save, CacheStore, CachedData, FileStore, MemoryStore, PROFILE_KEY};
