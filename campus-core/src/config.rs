//! # Campus Configuration
//!
//! A string key/value store in the style of `app.set()` / `app.get()`.
//! Keys are dotted (`theme.api_base_url`, `http.port`). Typed access goes
//! through [`CampusConfigSnapshot`].
//!
//! ## Environment overrides
//! [`CampusConfig::load_env`] maps prefixed variables onto dotted keys:
//!
//! ```rust
//! use campus_core::CampusConfig;
//!
//! std::env::set_var("CAMPUSDOC__THEME__TIMEOUT_MS", "2500");
//!
//! let mut cfg = CampusConfig::new();
//! cfg.load_env("CAMPUSDOC__");
//! assert_eq!(cfg.get("theme.timeout_ms"), Some("2500"));
//! ```

use std::collections::HashMap;

/// Backend base URL the theme lookup is issued against.
pub const THEME_API_BASE_URL: &str = "theme.api_base_url";
/// Outbound theme request timeout in milliseconds.
pub const THEME_TIMEOUT_MS: &str = "theme.timeout_ms";
/// Most tenant theme sessions kept at once.
pub const THEME_MAX_SESSIONS: &str = "theme.max_sessions";
/// Seconds a tenant theme session may sit unused before it can be dropped.
pub const THEME_IDLE_TTL_SECS: &str = "theme.idle_ttl_secs";
/// Name of the cookie gating the admin area.
pub const ADMIN_COOKIE_NAME: &str = "admin.cookie_name";
pub const HTTP_HOST: &str = "http.host";
pub const HTTP_PORT: &str = "http.port";

#[derive(Debug, Default)]
pub struct CampusConfig {
    values: HashMap<String, String>,
}

impl CampusConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Override keys from environment variables starting with `prefix`.
    ///
    /// `CAMPUS__THEME__API_BASE_URL` with prefix `CAMPUS__` becomes
    /// `theme.api_base_url`. Returns how many keys were applied.
    pub fn load_env(&mut self, prefix: &str) -> usize {
        self.load_vars(prefix, std::env::vars())
    }

    pub(crate) fn load_vars<I>(&mut self, prefix: &str, vars: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut applied = 0;
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
                applied += 1;
            }
        }
        applied
    }

    pub fn snapshot(&self) -> CampusConfigSnapshot {
        CampusConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CampusConfigSnapshot {
    map: HashMap<String, String>,
}

impl CampusConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }
}
