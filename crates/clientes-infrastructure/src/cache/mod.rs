//! Cache adapters for the customer read cache

pub mod memory_cache;
pub mod noop;

pub use memory_cache::MemoryCache;
pub use noop::NoopCache;
