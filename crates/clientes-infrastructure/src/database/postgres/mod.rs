//! PostgreSQL repository implementations

pub mod customer_repo_impl;

pub use customer_repo_impl::PgCustomerRepository;
