use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use campus_axum::Tenant;
use campus_theme::ThemeSnapshot;
use tracing::info;

use crate::state::WebState;

/// `{ theme, isLoading, error, status }` for the requesting tenant.
pub async fn snapshot(State(state): State<WebState>, Tenant(tenant): Tenant) -> Json<ThemeSnapshot> {
    let resolver = state.themes.resolver_for(&tenant).await;
    Json(resolver.snapshot())
}

/// The tenant's style variables as a `:root` rule.
pub async fn stylesheet(State(state): State<WebState>, Tenant(tenant): Tenant) -> impl IntoResponse {
    let resolver = state.themes.resolver_for(&tenant).await;
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        resolver.style().to_css(),
    )
}

/// Re-fetch branding after an admin changed it.
pub async fn refresh(State(state): State<WebState>, Tenant(tenant): Tenant) -> Json<ThemeSnapshot> {
    let resolver = state.themes.resolver_for(&tenant).await;
    info!(%tenant, "theme refresh requested");
    Json(resolver.refresh_theme().await)
}
