//! # Clientes API
//! 
//! HTTP handlers, extractors, error mapping, and the router.

pub mod handlers;
pub mod extract;
pub mod error;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
