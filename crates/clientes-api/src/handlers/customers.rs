// ============================================================================
// Clientes API - Customer Handlers
// File: crates/clientes-api/src/handlers/customers.rs
// ============================================================================
//! HTTP bindings for the `/clientes` resource

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use clientes_core::domain::{Customer, CustomerForm, StatusForm};
use clientes_shared::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use clientes_shared::{Page, PageRequest};

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

/// Query string of the listing endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(
            params.page.unwrap_or(DEFAULT_PAGE),
            params.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

fn page_request(params: Result<Query<PageParams>, QueryRejection>) -> Result<PageRequest, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    Ok(params.into())
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid customer id: {raw}")))
}

/// Register handler - POST /clientes
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(form): ValidatedJson<CustomerForm>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    let created = state.customers.register(&form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Active listing - GET /clientes
pub async fn list_active(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Customer>>, ApiError> {
    let page = state.customers.list_active(page_request(params)?).await?;
    Ok(Json(page))
}

/// Inactive listing - GET /clientes/inativos
pub async fn list_inactive(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page<Customer>>, ApiError> {
    let page = state.customers.list_inactive(page_request(params)?).await?;
    Ok(Json(page))
}

/// Active lookup - GET /clientes/{cpf}
pub async fn find_active_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customers.find_active_by_cpf(&cpf).await?))
}

/// Inactive lookup - GET /clientes/inativo/{cpf}
pub async fn find_inactive_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    Ok(Json(state.customers.find_inactive_by_cpf(&cpf).await?))
}

/// Full update - PUT /clientes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(form): ValidatedJson<CustomerForm>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.customers.update(&id, &form).await?))
}

/// Status toggle - PATCH /clientes/{id}
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(status): ValidatedJson<StatusForm>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.customers.toggle_status(&id, &status).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete - DELETE /clientes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    state.customers.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
