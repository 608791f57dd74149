//! Document search entry points.
//!
//! # Responsibility
//! - Expose read-only name search over a space's whole collection.
//! - Keep result shaping inside core.

pub mod names;
