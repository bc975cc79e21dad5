use std::sync::Arc;

use parking_lot::RwLock;

use crate::{CampusConfig, CampusConfigSnapshot};

struct CampusAppInner {
    config: RwLock<CampusConfig>,
}

/// CampusApp is the application container shared by every transport.
///
/// Framework-agnostic. Cloning is cheap; clones share the same config.
#[derive(Clone)]
pub struct CampusApp {
    inner: Arc<CampusAppInner>,
}

impl Default for CampusApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CampusApp {
    pub fn new() -> Self {
        Self::with_config(CampusConfig::new())
    }

    pub fn with_config(config: CampusConfig) -> Self {
        Self {
            inner: Arc::new(CampusAppInner {
                config: RwLock::new(config),
            }),
        }
    }

    /// `app.set(key, value)`
    pub fn set<K, V>(&self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.inner.config.write().set(key, value);
    }

    /// `app.get(key)`
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.config.read().get(key).map(|v| v.to_string())
    }

    /// Apply prefixed environment overrides, see [`CampusConfig::load_env`].
    pub fn load_env(&self, prefix: &str) -> usize {
        self.inner.config.write().load_env(prefix)
    }

    pub fn config_snapshot(&self) -> CampusConfigSnapshot {
        self.inner.config.read().snapshot()
    }
}
