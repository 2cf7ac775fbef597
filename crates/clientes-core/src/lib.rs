//! # Clientes Core
//! 
//! Domain entities, services, and ports (repository and cache traits) for
//! the customer records service.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod cache;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
