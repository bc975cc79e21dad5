use std::time::Duration;

use async_trait::async_trait;
use campus_core::{TenantContext, TenantTheme, TENANT_DOMAIN_HEADER};
use tracing::debug;

use crate::ThemeFetchError;

/// Theme lookup endpoint, relative to the backend base URL.
pub const THEME_ENDPOINT: &str = "/settings/theme";

/// Where tenant themes come from.
///
/// The tenant is passed explicitly; implementations scope the lookup with it.
#[async_trait]
pub trait ThemeSource: Send + Sync {
    async fn fetch_theme(&self, tenant: &TenantContext) -> Result<TenantTheme, ThemeFetchError>;
}

/// Fetches themes from the LMS backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpThemeSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpThemeSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ThemeFetchError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ThemeFetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url, THEME_ENDPOINT)
    }
}

#[async_trait]
impl ThemeSource for HttpThemeSource {
    async fn fetch_theme(&self, tenant: &TenantContext) -> Result<TenantTheme, ThemeFetchError> {
        let url = self.endpoint_url();
        let mut req = self.client.get(&url);
        if let Some(domain) = tenant.domain() {
            req = req.header(TENANT_DOMAIN_HEADER, domain);
        }

        debug!(%tenant, %url, "fetching tenant theme");
        let res = req.send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(ThemeFetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = res.bytes().await?;
        let theme: TenantTheme = serde_json::from_slice(&body)
            .map_err(|e| ThemeFetchError::malformed(e.to_string()))?;
        theme
            .validate()
            .map_err(|e| ThemeFetchError::malformed(e.to_string()))?;

        Ok(theme)
    }
}
