//! Per-session tenant theme provider.
//!
//! A [`ThemeResolver`] owns the theme of one tenant session. It starts in
//! `Loading`, fetches once when mounted, and can be refreshed at any time.
//! Every settle, successful or not, rewrites all six style variables of its
//! [`DocumentStyle`]:
//!
//! ```text
//! Loading --ok--> Ready
//!    |             |
//!    +---err--> Error
//!    ^             |
//!    +--refresh----+
//! ```
//!
//! Overlapping refreshes are not ordered or cancelled. Each one writes a
//! complete state when it settles and the last settle wins.

use std::sync::Arc;

use campus_core::{
    apply_theme_colors_with_foreground, DocumentStyle, TenantContext, TenantTheme, ThemeColors,
};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{ThemeFetchError, ThemeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeStatus {
    Loading,
    Ready,
    Error,
}

/// What consumers see: `{ theme, isLoading, error }` plus the status.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSnapshot {
    pub status: ThemeStatus,
    pub theme: Option<TenantTheme>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ThemeSnapshot {
    fn loading(theme: Option<TenantTheme>) -> Self {
        Self {
            status: ThemeStatus::Loading,
            theme,
            is_loading: true,
            error: None,
        }
    }
}

pub struct ThemeResolver {
    tenant: TenantContext,
    source: Arc<dyn ThemeSource>,
    style: DocumentStyle,
    state: watch::Sender<ThemeSnapshot>,
}

impl ThemeResolver {
    /// Create a resolver in `Loading` without fetching anything yet.
    pub fn new(
        tenant: TenantContext,
        source: Arc<dyn ThemeSource>,
        style: DocumentStyle,
    ) -> Arc<Self> {
        let (state, _) = watch::channel(ThemeSnapshot::loading(None));
        Arc::new(Self {
            tenant,
            source,
            style,
            state,
        })
    }

    /// Create a resolver and start its initial fetch on the current runtime.
    pub fn mount(
        tenant: TenantContext,
        source: Arc<dyn ThemeSource>,
        style: DocumentStyle,
    ) -> Arc<Self> {
        let resolver = Self::new(tenant, source, style);
        let initial = Arc::clone(&resolver);
        tokio::spawn(async move {
            initial.refresh_theme().await;
        });
        resolver
    }

    pub fn tenant(&self) -> &TenantContext {
        &self.tenant
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        self.state.borrow().clone()
    }

    /// Change notifications for every transition.
    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.state.subscribe()
    }

    /// Wait until the resolver is out of `Loading`.
    pub async fn settled(&self) -> ThemeSnapshot {
        let mut rx = self.state.subscribe();
        let settled = rx.wait_for(|s| !s.is_loading).await.map(|s| s.clone());
        match settled {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }

    /// Fetch the theme again and apply it. Returns the state this call
    /// settled into, which may already be superseded by a later settle.
    pub async fn refresh_theme(&self) -> ThemeSnapshot {
        self.state.send_modify(|s| {
            s.status = ThemeStatus::Loading;
            s.is_loading = true;
            s.error = None;
        });
        debug!(tenant = %self.tenant, "theme refresh started");

        let result = self.source.fetch_theme(&self.tenant).await;
        self.settle(result)
    }

    fn settle(&self, result: Result<TenantTheme, ThemeFetchError>) -> ThemeSnapshot {
        let mut settled = None;
        // The style write happens inside the channel's write lock so style
        // variables and state always come from the same settle.
        self.state.send_modify(|s| {
            let outcome = result.and_then(|theme| {
                apply_theme_colors_with_foreground(&theme.colors(), &self.style)
                    .map(|_| theme)
                    .map_err(|e| ThemeFetchError::malformed(e.to_string()))
            });

            match outcome {
                Ok(theme) => {
                    info!(tenant = %self.tenant, site = %theme.site_name, "theme ready");
                    s.status = ThemeStatus::Ready;
                    s.theme = Some(theme);
                    s.error = None;
                }
                Err(err) => {
                    warn!(tenant = %self.tenant, error = %err, "theme unavailable, applying fallback palette");
                    if let Err(e) =
                        apply_theme_colors_with_foreground(&ThemeColors::fallback(), &self.style)
                    {
                        warn!(error = %e, "fallback palette rejected");
                    }
                    s.status = ThemeStatus::Error;
                    s.error = Some(err.to_string());
                }
            }
            s.is_loading = false;
            settled = Some(s.clone());
        });

        settled.unwrap_or_else(|| self.snapshot())
    }
}
