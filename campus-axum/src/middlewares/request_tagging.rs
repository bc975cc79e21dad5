use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{header::HOST, HeaderName, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use campus_core::{TenantContext, TENANT_DOMAIN_HEADER};
use tower::{Layer, Service};
use tracing::{debug, info};

use super::{AdminGate, RouteMatcher};

/// Configuration for [`RequestTagging`].
#[derive(Debug, Clone, Default)]
pub struct TaggingConfig {
    pub matcher: RouteMatcher,
    pub admin: AdminGate,
}

impl TaggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matcher(mut self, matcher: RouteMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn admin(mut self, admin: AdminGate) -> Self {
        self.admin = admin;
        self
    }
}

/// Middleware that tags requests with their tenant and gates the admin area.
///
/// For every request not excluded by the [`RouteMatcher`]:
/// - the `Host` value is forwarded as `x-tenant-domain` and a
///   [`TenantContext`] is inserted into the request extensions
/// - a guarded admin path without an accepted admin token is redirected to
///   the admin login page
///
/// Excluded requests are forwarded untouched.
#[derive(Clone, Default)]
pub struct RequestTagging {
    config: Arc<TaggingConfig>,
}

impl RequestTagging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TaggingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl<S> Layer<S> for RequestTagging {
    type Service = RequestTaggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTaggingService {
            inner,
            config: Arc::clone(&self.config),
        }
    }
}

#[derive(Clone)]
pub struct RequestTaggingService<S> {
    inner: S,
    config: Arc<TaggingConfig>,
}

impl<S> Service<Request<Body>> for RequestTaggingService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let mut inner = self.inner.clone();
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            if config.matcher.is_excluded(req.uri().path()) {
                return inner.call(req).await;
            }

            let tenant = tag_request(&mut req);

            let path = req.uri().path();
            if !config.admin.allows(path, req.headers()) {
                info!(%path, %tenant, "admin token missing, redirecting to login");
                return Ok(Redirect::temporary(&config.admin.login_path).into_response());
            }

            debug!(%path, %tenant, "request tagged");
            inner.call(req).await
        })
    }
}

/// Copy the request host into `x-tenant-domain` and the extensions.
///
/// Falls back to the URI authority for requests that carry no `Host`
/// header (HTTP/2). Without either, the tenant is unknown and any
/// `x-tenant-domain` sent by the client is removed.
pub fn tag_request(req: &mut Request<Body>) -> TenantContext {
    let host = req
        .headers()
        .get(HOST)
        .cloned()
        .or_else(|| {
            req.uri()
                .authority()
                .and_then(|a| HeaderValue::from_str(a.as_str()).ok())
        });

    let tenant = TenantContext::from_host(host.as_ref().and_then(|h| h.to_str().ok()));
    let header = HeaderName::from_static(TENANT_DOMAIN_HEADER);
    match host {
        Some(host) if tenant.is_known() => {
            req.headers_mut().insert(header, host);
        }
        _ => {
            // a client-sent value must never stand in for a missing host
            req.headers_mut().remove(header);
        }
    }
    req.extensions_mut().insert(tenant.clone());
    tenant
}
