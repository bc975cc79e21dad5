mod pages;
mod theme;

pub use pages::not_found;

use axum::routing::{get, post};
use axum::Router;

use crate::state::WebState;

pub fn router(state: WebState) -> Router<()> {
    Router::new()
        .route("/", get(pages::home))
        .route("/admin/login", get(pages::admin_login))
        .route("/admin/forgot-password", get(pages::admin_forgot_password))
        .route("/admin/theme/refresh", post(theme::refresh))
        .route("/admin/{*page}", get(pages::admin_page))
        .route("/theme", get(theme::snapshot))
        .route("/theme.css", get(theme::stylesheet))
        .route("/api", get(pages::api_not_served))
        .route("/api/{*rest}", get(pages::api_not_served))
        .with_state(state)
}
