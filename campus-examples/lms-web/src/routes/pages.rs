//! Page descriptors. Markup is rendered by the front-end; these handlers
//! report which page was resolved for which tenant and its site name.

use axum::extract::{OriginalUri, Path, State};
use axum::Json;
use campus_axum::{CampusAxumError, Tenant};
use campus_core::errors::CampusError;
use campus_core::TenantContext;
use serde_json::{json, Value};

use crate::state::WebState;

async fn page(state: &WebState, tenant: &TenantContext, name: &str) -> Json<Value> {
    let resolver = state.themes.resolver_for(tenant).await;
    let site_name = resolver.snapshot().theme.map(|t| t.site_name);

    Json(json!({
        "page": name,
        "tenant": tenant.domain(),
        "siteName": site_name,
        "stylesheet": "/theme.css",
    }))
}

pub async fn home(State(state): State<WebState>, Tenant(tenant): Tenant) -> Json<Value> {
    page(&state, &tenant, "home").await
}

pub async fn admin_login(State(state): State<WebState>, Tenant(tenant): Tenant) -> Json<Value> {
    page(&state, &tenant, "admin/login").await
}

pub async fn admin_forgot_password(
    State(state): State<WebState>,
    Tenant(tenant): Tenant,
) -> Json<Value> {
    page(&state, &tenant, "admin/forgot-password").await
}

pub async fn admin_page(
    State(state): State<WebState>,
    Tenant(tenant): Tenant,
    Path(name): Path<String>,
) -> Json<Value> {
    page(&state, &tenant, &format!("admin/{name}")).await
}

/// `/api/*` belongs to the backend and is never served here.
pub async fn api_not_served(OriginalUri(uri): OriginalUri) -> Result<Json<Value>, CampusAxumError> {
    Err(CampusError::not_found(format!("{} is served by the backend API", uri.path())).into())
}

pub async fn not_found(OriginalUri(uri): OriginalUri) -> CampusAxumError {
    CampusError::not_found(format!("No page at {}", uri.path())).into()
}
