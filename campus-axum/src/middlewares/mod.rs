mod admin_gate;
mod matcher;
mod request_tagging;

pub use admin_gate::{
    cookie_value, AdminGate, AdminTokenCheck, PresenceOnly, ADMIN_COOKIE,
    ADMIN_FORGOT_PASSWORD_PATH, ADMIN_LOGIN_PATH,
};
pub use matcher::RouteMatcher;
pub use request_tagging::{tag_request, RequestTagging, RequestTaggingService, TaggingConfig};
