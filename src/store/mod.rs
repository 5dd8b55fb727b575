//! Storage adapters.
//!
//! This module provides:
//! - An in-memory store (`memory`)
//! - A SQLite store with soft deletes (`sqlite`, feature `sqlite-store`)
//! - `StoreBackend`, the variant picked from `Settings` (`backend`)

pub mod backend;
pub mod memory;
#[cfg(feature = "sqlite-store")]
pub mod sqlite;

pub use backend::StoreBackend;
pub use memory::MemoryStore;
#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteStore;
