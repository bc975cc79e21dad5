mod app;
pub mod config;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Result;
use campus_axum::{axum, AxumApp};
use campus_core::config::THEME_API_BASE_URL;
use campus_core::CampusApp;
use campus_theme::{HttpThemeSource, ThemeRegistry, ThemeSource};

pub use state::WebState;

/// Build the edge from environment configuration.
pub fn build() -> Result<AxumApp> {
    let app = app::lms_app()?;
    let base_url = app
        .get(THEME_API_BASE_URL)
        .ok_or_else(|| anyhow::anyhow!("Missing {THEME_API_BASE_URL}"))?;
    let source = HttpThemeSource::with_timeout(base_url, config::theme_timeout(&app))?;
    Ok(build_with(app, Arc::new(source)))
}

/// Build the edge around an already configured app and theme source.
pub fn build_with(app: CampusApp, source: Arc<dyn ThemeSource>) -> AxumApp {
    let tagging = app::tagging_config(&app);
    let limits = config::registry_limits(&app);
    let state = WebState::new(ThemeRegistry::with_limits(source, limits));

    axum(app)
        .merge(routes::router(state))
        .use_get("/health", || async { "ok" })
        .fallback(routes::not_found)
        .with_tagging(tagging)
        .with_observability()
}
