//! Application services: feed assembly, catalog and overlay caching logic,
//! and the write services that drive cache invalidation.

pub mod catalog;
pub mod engagement;
pub mod error;
pub mod feed;
pub mod overlay;
pub mod quotes;
pub mod repos;
