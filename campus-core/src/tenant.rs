//! Multi-tenant request identity.
//!
//! A tenant (one school) is identified by the host it is served from. The
//! identity is derived per request and never stored.

use std::fmt;

/// Header carrying the tenant host to downstream code and the backend.
pub const TENANT_DOMAIN_HEADER: &str = "x-tenant-domain";

/// The host string a tenant is served from, e.g. `oakridge.campus.example`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TenantDomain(pub String);

impl TenantDomain {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context carried with every tenant-scoped operation.
///
/// Built by the request tagging middleware and passed explicitly into
/// handlers, the theme resolver and the outbound HTTP client. A request that
/// arrived without a `Host` header yields an unknown tenant; the backend
/// decides what an unscoped request means.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TenantContext {
    pub domain: Option<TenantDomain>,
}

impl TenantContext {
    /// Convenience constructor from a host string.
    pub fn new<S: Into<String>>(domain: S) -> Self {
        Self {
            domain: Some(TenantDomain(domain.into())),
        }
    }

    pub fn unknown() -> Self {
        Self { domain: None }
    }

    /// Build from an optional host value, as read off a request.
    pub fn from_host(host: Option<&str>) -> Self {
        match host {
            Some(h) if !h.is_empty() => Self::new(h),
            _ => Self::unknown(),
        }
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_ref().map(TenantDomain::as_str)
    }

    pub fn is_known(&self) -> bool {
        self.domain.is_some()
    }
}

impl fmt::Display for TenantContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(d) => write!(f, "{d}"),
            None => f.write_str("<unknown>"),
        }
    }
}
