//! Session boundary: principal lookup keyed by an opaque session id.
//!
//! Cookie/token transport is the host's concern; this layer only reads and
//! writes the session-scoped principal.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::request::Principal;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn principal(&self, session_id: &str) -> Option<Principal>;
    async fn set_principal(&self, session_id: &str, principal: Principal);
    async fn clear(&self, session_id: &str);
}

/// In-memory session store. Suitable for tests and single-process
/// deployments; swap in an external store behind the same trait otherwise.
#[derive(Default)]
pub struct MemorySessions {
    inner: DashMap<String, Principal>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn principal(&self, session_id: &str) -> Option<Principal> {
        self.inner.get(session_id).map(|e| e.value().clone())
    }

    async fn set_principal(&self, session_id: &str, principal: Principal) {
        self.inner.insert(session_id.to_string(), principal);
    }

    async fn clear(&self, session_id: &str) {
        self.inner.remove(session_id);
    }
}
