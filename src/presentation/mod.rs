//! Wire-facing view models.

pub mod views;
