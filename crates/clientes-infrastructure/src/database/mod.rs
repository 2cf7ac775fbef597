//! Database module (PostgreSQL and in-process adapters)

pub mod connection;
pub mod postgres;
pub mod memory;

pub use connection::{create_pool, run_migrations};
pub use postgres::PgCustomerRepository;
pub use memory::InMemoryCustomerRepository;
