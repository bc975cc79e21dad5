use std::time::Duration;

use anyhow::{anyhow, Result};
use campus_core::config::{
    ADMIN_COOKIE_NAME, HTTP_HOST, HTTP_PORT, THEME_API_BASE_URL, THEME_IDLE_TTL_SECS,
    THEME_MAX_SESSIONS, THEME_TIMEOUT_MS,
};
use campus_core::CampusApp;
use campus_theme::registry::{RegistryLimits, DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};
use tracing::debug;

/// Prefix for environment overrides, e.g. `CAMPUS__THEME__API_BASE_URL`.
pub const ENV_PREFIX: &str = "CAMPUS__";

/// Fill in defaults for every key the edge reads, then apply environment
/// overrides.
pub fn config(app: &CampusApp) -> Result<()> {
    set_default(app, HTTP_HOST, "127.0.0.1");
    set_default(app, HTTP_PORT, "3000");
    set_default(app, THEME_API_BASE_URL, "http://127.0.0.1:8000/api");
    set_default(app, THEME_TIMEOUT_MS, "5000");
    set_default(app, THEME_MAX_SESSIONS, &DEFAULT_MAX_SESSIONS.to_string());
    set_default(app, THEME_IDLE_TTL_SECS, &DEFAULT_IDLE_TTL.as_secs().to_string());
    set_default(app, ADMIN_COOKIE_NAME, campus_axum::middlewares::ADMIN_COOKIE);

    let applied = app.load_env(ENV_PREFIX);
    debug!(applied, "environment overrides loaded");

    validate(app)
}

fn set_default(app: &CampusApp, key: &str, value: &str) {
    if app.get(key).is_none() {
        app.set(key, value);
    }
}

fn validate(app: &CampusApp) -> Result<()> {
    let snap = app.config_snapshot();

    let base = snap.get(THEME_API_BASE_URL).unwrap_or_default().trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow!("{THEME_API_BASE_URL} must be an http(s) URL, got {base:?}"));
    }
    if snap.get_u64(THEME_TIMEOUT_MS).is_none() {
        return Err(anyhow!("{THEME_TIMEOUT_MS} must be a whole number of milliseconds"));
    }
    if !matches!(snap.get_usize(THEME_MAX_SESSIONS), Some(n) if n > 0) {
        return Err(anyhow!("{THEME_MAX_SESSIONS} must be a positive number"));
    }
    if snap.get_u64(THEME_IDLE_TTL_SECS).is_none() {
        return Err(anyhow!("{THEME_IDLE_TTL_SECS} must be a whole number of seconds"));
    }
    if snap.get_usize(HTTP_PORT).is_none() {
        return Err(anyhow!("{HTTP_PORT} must be a port number"));
    }
    Ok(())
}

pub fn theme_timeout(app: &CampusApp) -> Duration {
    Duration::from_millis(app.config_snapshot().get_u64(THEME_TIMEOUT_MS).unwrap_or(5000))
}

/// Session bounds for the theme registry. Missing keys use the defaults.
pub fn registry_limits(app: &CampusApp) -> RegistryLimits {
    let snap = app.config_snapshot();
    RegistryLimits {
        max_sessions: snap.get_usize(THEME_MAX_SESSIONS).unwrap_or(DEFAULT_MAX_SESSIONS),
        idle_ttl: snap
            .get_u64(THEME_IDLE_TTL_SECS)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_IDLE_TTL),
    }
}

pub fn listen_addr(app: &CampusApp) -> String {
    let host = app.get(HTTP_HOST).unwrap_or_else(|| "127.0.0.1".to_string());
    let port = app.get(HTTP_PORT).unwrap_or_else(|| "3000".to_string());
    format!("{host}:{port}")
}
