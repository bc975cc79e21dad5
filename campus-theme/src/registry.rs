use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use campus_core::{DocumentStyle, TenantContext};
use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::{ThemeResolver, ThemeSource};

pub const DEFAULT_MAX_SESSIONS: usize = 256;
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(15 * 60);

/// Bounds on the sessions a [`ThemeRegistry`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryLimits {
    pub max_sessions: usize,
    pub idle_ttl: Duration,
}

impl Default for RegistryLimits {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
            idle_ttl: DEFAULT_IDLE_TTL,
        }
    }
}

struct Session {
    resolver: Arc<ThemeResolver>,
    last_used: Instant,
}

struct Sessions {
    by_tenant: LruCache<TenantContext, Session>,
    shared: Option<Arc<ThemeResolver>>,
}

/// One theme session per tenant, mounted on first use.
///
/// Hosts come from clients, so the number of sessions is capped. Sessions
/// idle for longer than the TTL are dropped when room is needed. Unknown
/// tenants, and new tenants arriving while every slot is busy, share a single
/// resolver mounted without tenant scoping.
pub struct ThemeRegistry {
    source: Arc<dyn ThemeSource>,
    limits: RegistryLimits,
    sessions: Mutex<Sessions>,
}

impl ThemeRegistry {
    pub fn new(source: Arc<dyn ThemeSource>) -> Self {
        Self::with_limits(source, RegistryLimits::default())
    }

    pub fn with_limits(source: Arc<dyn ThemeSource>, limits: RegistryLimits) -> Self {
        let capacity = NonZeroUsize::new(limits.max_sessions.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            limits,
            sessions: Mutex::new(Sessions {
                by_tenant: LruCache::new(capacity),
                shared: None,
            }),
        }
    }

    pub fn limits(&self) -> RegistryLimits {
        self.limits
    }

    /// The tenant's resolver, mounted if needed and settled at least once,
    /// so its style variables are fully defined.
    pub async fn resolver_for(&self, tenant: &TenantContext) -> Arc<ThemeResolver> {
        let resolver = self.get_or_mount(tenant);
        resolver.settled().await;
        resolver
    }

    /// The tenant's resolver without waiting for it to settle.
    pub fn get_or_mount(&self, tenant: &TenantContext) -> Arc<ThemeResolver> {
        let now = Instant::now();
        let mut guard = self.sessions.lock();
        let sessions = &mut *guard;

        if !tenant.is_known() {
            return self.shared(&mut sessions.shared);
        }

        if let Some(session) = sessions.by_tenant.get_mut(tenant) {
            session.last_used = now;
            return Arc::clone(&session.resolver);
        }

        self.expire_idle(&mut sessions.by_tenant, now);
        if sessions.by_tenant.len() >= sessions.by_tenant.cap().get() {
            debug!(%tenant, max = self.limits.max_sessions, "theme sessions full, using shared resolver");
            return self.shared(&mut sessions.shared);
        }

        debug!(%tenant, "mounting theme resolver");
        let resolver = self.mount(tenant.clone());
        sessions.by_tenant.put(
            tenant.clone(),
            Session {
                resolver: Arc::clone(&resolver),
                last_used: now,
            },
        );
        resolver
    }

    /// The tenant's own session, if one is mounted.
    pub fn get(&self, tenant: &TenantContext) -> Option<Arc<ThemeResolver>> {
        self.sessions
            .lock()
            .by_tenant
            .peek(tenant)
            .map(|s| Arc::clone(&s.resolver))
    }

    /// End a tenant session. The next request mounts a fresh resolver.
    pub fn unmount(&self, tenant: &TenantContext) -> bool {
        self.sessions.lock().by_tenant.pop(tenant).is_some()
    }

    /// Number of tenant sessions, not counting the shared resolver.
    pub fn len(&self) -> usize {
        self.sessions.lock().by_tenant.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().by_tenant.is_empty()
    }

    fn mount(&self, tenant: TenantContext) -> Arc<ThemeResolver> {
        ThemeResolver::mount(tenant, Arc::clone(&self.source), DocumentStyle::new())
    }

    fn shared(&self, slot: &mut Option<Arc<ThemeResolver>>) -> Arc<ThemeResolver> {
        let resolver = slot.get_or_insert_with(|| {
            debug!("mounting shared theme resolver");
            self.mount(TenantContext::unknown())
        });
        Arc::clone(resolver)
    }

    // Least recently used first, so the scan stops at the first live session.
    fn expire_idle(&self, by_tenant: &mut LruCache<TenantContext, Session>, now: Instant) {
        loop {
            let idle = match by_tenant.peek_lru() {
                Some((_, session)) => now.duration_since(session.last_used) >= self.limits.idle_ttl,
                None => false,
            };
            if !idle {
                break;
            }
            if let Some((tenant, _)) = by_tenant.pop_lru() {
                debug!(%tenant, "theme session expired");
            }
        }
    }
}
