//! # Clientes Infrastructure
//! 
//! Database and cache implementations (adapters).

pub mod database;
pub mod cache;

pub use database::{create_pool, run_migrations, InMemoryCustomerRepository, PgCustomerRepository};
pub use cache::{MemoryCache, NoopCache};
