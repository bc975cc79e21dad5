use std::sync::Arc;

use axum::body::Body;
use axum::handler::Handler;
use axum::http::{HeaderName, Request};
use axum::routing::get;
use axum::Router;
use campus_core::CampusApp;
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middlewares::{RequestTagging, TaggingConfig};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// An axum `Router` bound to a [`CampusApp`].
///
/// Layers only wrap routes that exist when they are added, so register
/// routes and the fallback first, then call [`AxumApp::with_tagging`] and
/// [`AxumApp::with_observability`].
pub struct AxumApp {
    pub app: Arc<CampusApp>,
    pub router: Router<()>,
}

impl Clone for AxumApp {
    fn clone(&self) -> Self {
        Self {
            app: Arc::clone(&self.app),
            router: self.router.clone(),
        }
    }
}

impl AxumApp {
    pub fn new(app: CampusApp) -> Self {
        Self {
            app: Arc::new(app),
            router: Router::new(),
        }
    }

    pub fn use_router(mut self, path: &str, router: Router<()>) -> Self {
        self.router = self.router.nest(path, router);
        self
    }

    pub fn merge(mut self, router: Router<()>) -> Self {
        self.router = self.router.merge(router);
        self
    }

    pub fn use_get<H, T>(mut self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self
    }

    pub fn fallback<H, T>(mut self, handler: H) -> Self
    where
        H: Handler<T, ()> + Clone + Send + Sync + 'static,
        T: 'static,
    {
        self.router = self.router.fallback(handler);
        self
    }

    /// Tag every routed request with its tenant and gate the admin area.
    pub fn with_tagging(mut self, config: TaggingConfig) -> Self {
        self.router = self.router.layer(RequestTagging::with_config(config));
        self
    }

    /// Request tracing plus an `x-request-id` on every response, generated
    /// when the caller did not send one.
    pub fn with_observability(mut self) -> Self {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
                tracing::info_span!(
                    "http",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("-"),
                )
            }))
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid));
        self
    }

    pub async fn listen<A>(self, addr: A) -> anyhow::Result<()>
    where
        A: ToSocketAddrs,
    {
        let listener = TcpListener::bind(addr).await?;
        info!(addr = %listener.local_addr()?, "listening");
        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

pub fn axum(app: CampusApp) -> AxumApp {
    AxumApp::new(app)
}
