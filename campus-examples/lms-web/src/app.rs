use anyhow::Result;
use campus_axum::middlewares::{AdminGate, TaggingConfig};
use campus_core::config::ADMIN_COOKIE_NAME;
use campus_core::CampusApp;

pub fn lms_app() -> Result<CampusApp> {
    let app = CampusApp::new();
    crate::config::config(&app)?;
    Ok(app)
}

pub fn tagging_config(app: &CampusApp) -> TaggingConfig {
    let mut admin = AdminGate::new();
    if let Some(name) = app.get(ADMIN_COOKIE_NAME) {
        admin = admin.cookie_name(name);
    }
    TaggingConfig::new().admin(admin)
}
