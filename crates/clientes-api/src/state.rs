use std::sync::Arc;

use clientes_core::services::CustomerService;
use clientes_shared::config::AppSettings;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<CustomerService>,
    pub app: AppSettings,
}

impl AppState {
    pub fn new(customers: Arc<CustomerService>, app: AppSettings) -> Self {
        Self { customers, app }
    }
}
