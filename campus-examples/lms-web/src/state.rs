use std::sync::Arc;

use campus_theme::ThemeRegistry;

/// Shared by every route handler.
#[derive(Clone)]
pub struct WebState {
    pub themes: Arc<ThemeRegistry>,
}

impl WebState {
    pub fn new(themes: ThemeRegistry) -> Self {
        Self {
            themes: Arc::new(themes),
        }
    }
}
