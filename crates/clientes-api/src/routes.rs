use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

use crate::handlers::{customers, health};
use crate::state::AppState;

/// Build the application router.
///
/// `GET /clientes/{key}` reads by CPF while the write verbs on the same
/// segment take the customer id, so they share one route.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let customer_routes = Router::new()
        .route("/clientes", post(customers::register).get(customers::list_active))
        .route("/clientes/inativos", get(customers::list_inactive))
        .route("/clientes/inativo/{cpf}", get(customers::find_inactive_by_cpf))
        .route(
            "/clientes/{key}",
            get(customers::find_active_by_cpf)
                .put(customers::update)
                .patch(customers::toggle_status)
                .delete(customers::delete),
        );

    Router::new()
        .merge(health_routes)
        .merge(customer_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}
