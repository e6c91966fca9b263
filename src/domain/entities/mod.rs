//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; the only behaviour they carry is
//! self-validation and expiry checks.
//!
//! # Entity Types
//!
//! - [`Link`] - A short code to long URL mapping with optional expiry

pub mod link;

pub use link::Link;
