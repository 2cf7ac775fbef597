//! Domain services (business logic)

pub mod customer_mapper;
pub mod customer_validator;
pub mod customer_service;

pub use customer_mapper::CustomerMapper;
pub use customer_validator::CustomerValidator;
pub use customer_service::CustomerService;
