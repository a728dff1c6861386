//! Quotedrift feed cache.
//!
//! Three independently aged, process-wide, in-memory sections:
//!
//! - **Catalog**: category metadata with per-category quote counts
//!   (singleton slot, long TTL).
//! - **Pools**: merged + shuffled content listings keyed by [`FilterKey`]
//!   (LRU, medium TTL).
//! - **Overlays**: per-user liked/saved id sets (LRU, short TTL).
//!
//! Entries are replaced wholesale on rebuild and removed wholesale on
//! invalidation; a stale entry is treated as a miss at read time. The store
//! is built once at startup and injected by `Arc`, so tests can swap in
//! their own instance without touching call sites.
//!
//! ## Configuration
//!
//! TTLs and LRU limits come from the `[cache]` section of the settings
//! file:
//!
//! ```toml
//! [cache]
//! enabled = true
//! catalog_ttl_seconds = 600
//! pool_ttl_seconds = 300
//! overlay_ttl_seconds = 30
//! ```

mod config;
mod entry;
mod invalidate;
mod keys;
mod store;

pub use config::CacheConfig;
pub use entry::TimedEntry;
pub use invalidate::CacheInvalidator;
pub use keys::FilterKey;
pub use store::FeedCacheStore;
