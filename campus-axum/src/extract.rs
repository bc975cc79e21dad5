use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::{TenantContext, TENANT_DOMAIN_HEADER};

/// The tenant a request belongs to.
///
/// Read from the extensions set by [`crate::middlewares::RequestTagging`],
/// then from an `x-tenant-domain` header set upstream. Never rejects; an
/// untagged request is an unknown tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant(pub TenantContext);

impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(ctx) = parts.extensions.get::<TenantContext>() {
            return Ok(Tenant(ctx.clone()));
        }

        let header = parts
            .headers
            .get(TENANT_DOMAIN_HEADER)
            .and_then(|v| v.to_str().ok());
        Ok(Tenant(TenantContext::from_host(header)))
    }
}
