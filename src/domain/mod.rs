//! Domain model: quote records, categories, and the projected feed types.

pub mod entities;
pub mod feed;
pub mod types;
