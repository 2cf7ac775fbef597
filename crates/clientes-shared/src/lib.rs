//! # Clientes Shared
//! 
//! Shared configuration, telemetry, paging types, and utilities for the
//! customer records service.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
