//! In-memory repository implementations.
//!
//! # Repositories
//!
//! - [`MemoryLinkRepository`] - Link storage with TTL stamping and sweep eviction

pub mod memory_link_repository;

pub use memory_link_repository::MemoryLinkRepository;
