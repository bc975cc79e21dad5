use std::sync::Arc;

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie holding the admin session token.
pub const ADMIN_COOKIE: &str = "admin-token";
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
pub const ADMIN_FORGOT_PASSWORD_PATH: &str = "/admin/forgot-password";

/// Decides whether an admin token lets a request into the admin area.
pub trait AdminTokenCheck: Send + Sync {
    fn is_authenticated(&self, token: Option<&str>) -> bool;
}

/// Any non-empty token is accepted. No signature or expiry check.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresenceOnly;

impl AdminTokenCheck for PresenceOnly {
    fn is_authenticated(&self, token: Option<&str>) -> bool {
        token.is_some()
    }
}

/// Guards every path that starts with `prefix`, except the public ones.
#[derive(Clone)]
pub struct AdminGate {
    pub prefix: String,
    pub login_path: String,
    pub public_paths: Vec<String>,
    pub cookie_name: String,
    check: Arc<dyn AdminTokenCheck>,
}

impl Default for AdminGate {
    fn default() -> Self {
        Self {
            prefix: "/admin".to_string(),
            login_path: ADMIN_LOGIN_PATH.to_string(),
            public_paths: vec![
                ADMIN_LOGIN_PATH.to_string(),
                ADMIN_FORGOT_PASSWORD_PATH.to_string(),
            ],
            cookie_name: ADMIN_COOKIE.to_string(),
            check: Arc::new(PresenceOnly),
        }
    }
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("prefix", &self.prefix)
            .field("login_path", &self.login_path)
            .field("public_paths", &self.public_paths)
            .field("cookie_name", &self.cookie_name)
            .finish_non_exhaustive()
    }
}

impl AdminGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Replace the presence check, e.g. with one that verifies the token.
    pub fn token_check(mut self, check: Arc<dyn AdminTokenCheck>) -> Self {
        self.check = check;
        self
    }

    /// Whether `path` needs an admin token at all.
    pub fn guards(&self, path: &str) -> bool {
        path.starts_with(self.prefix.as_str()) && !self.public_paths.iter().any(|p| p == path)
    }

    /// Whether a request to `path` with these headers may proceed.
    pub fn allows(&self, path: &str, headers: &HeaderMap) -> bool {
        if !self.guards(path) {
            return true;
        }
        self.check
            .is_authenticated(cookie_value(headers, &self.cookie_name))
    }
}

/// First non-empty value of cookie `name` across all `Cookie` headers.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().trim_matches('"'))
        })
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_cookie(raw: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static(raw));
        headers
    }

    #[test]
    fn reads_cookie_among_others() {
        let headers = with_cookie("theme=dark; admin-token=abc123; lang=en");
        assert_eq!(cookie_value(&headers, "admin-token"), Some("abc123"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_counts_as_absent() {
        let headers = with_cookie("admin-token=");
        assert_eq!(cookie_value(&headers, "admin-token"), None);
    }

    #[test]
    fn cookie_across_multiple_headers() {
        let mut headers = with_cookie("lang=en");
        headers.append(COOKIE, HeaderValue::from_static("admin-token=\"q\""));
        assert_eq!(cookie_value(&headers, "admin-token"), Some("q"));
    }

    #[test]
    fn public_admin_paths_are_not_guarded() {
        let gate = AdminGate::default();
        assert!(gate.guards("/admin"));
        assert!(gate.guards("/admin/settings"));
        assert!(!gate.guards("/admin/login"));
        assert!(!gate.guards("/admin/forgot-password"));
        assert!(!gate.guards("/courses"));
    }

    #[test]
    fn presence_is_enough_by_default() {
        let gate = AdminGate::default();
        assert!(gate.allows("/admin/settings", &with_cookie("admin-token=anything")));
        assert!(!gate.allows("/admin/settings", &HeaderMap::new()));
    }

    struct OnlyToken(&'static str);

    impl AdminTokenCheck for OnlyToken {
        fn is_authenticated(&self, token: Option<&str>) -> bool {
            token == Some(self.0)
        }
    }

    #[test]
    fn custom_check_replaces_presence() {
        let gate = AdminGate::default().token_check(Arc::new(OnlyToken("s3cret")));
        assert!(!gate.allows("/admin/settings", &with_cookie("admin-token=guess")));
        assert!(gate.allows("/admin/settings", &with_cookie("admin-token=s3cret")));
    }
}
