//! Promo Storage Backends
//!
//! `CodeStore` implementations for code persistence:
//! - JSON file (default): durable snapshot file with atomic replace
//! - Memory: fast, volatile storage for tests and embedding

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
