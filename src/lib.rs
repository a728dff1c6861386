//! Quotedrift: a quote-discovery service.
//!
//! Users browse a randomized feed of short quotes, like/save/dislike them,
//! and publish their own. The heart of the crate is the feed caching and
//! assembly subsystem in [`cache`] and [`application::feed`]: a merged,
//! shuffled, paginatable content pool per category filter, a per-user
//! engagement overlay, and the invalidation hooks that keep both consistent
//! with same-process writes.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
