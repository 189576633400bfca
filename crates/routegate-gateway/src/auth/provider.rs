//! Authorization provider seam and the session-principal implementation.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use routegate_core::{Decision, Policy, Reply, Result, RoleSet};

use crate::request::RequestCtx;

/// Deny reason used when no principal is present in the session (or the
/// stored principal is of another type than the provider expects).
pub const REASON_UNAUTHENTICATED: &str = "unauthenticated user";

/// Per-application authorization hook, installed once. Object-safe so the
/// gateway can hold it without knowing the principal type.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Evaluate one guard policy for one request. On deny the provider is
    /// responsible for terminating the request (exactly one responder call);
    /// the returned `Decision` reports the outcome either way.
    async fn authorize(&self, ctx: &mut RequestCtx, policy: &Policy) -> Decision;
}

/// Application-supplied role lookup and deny responder for a concrete
/// principal type.
#[async_trait]
pub trait RoleSource<P>: Send + Sync {
    /// Resolve the principal's roles. May suspend (e.g. a database call);
    /// must not mutate request state.
    async fn roles(&self, ctx: &RequestCtx, principal: &P) -> Result<RoleSet>;

    /// Terminate a denied request. The default writes a `Reply` envelope
    /// with 401 for unauthenticated, 403 otherwise.
    async fn denied(&self, ctx: &mut RequestCtx, reason: &str) {
        let reply = if reason == REASON_UNAUTHENTICATED {
            Reply::<()>::fail401(reason)
        } else {
            Reply::<()>::fail403(reason)
        };
        ctx.reply(reply.code, &reply);
    }
}

/// `AuthorizationProvider` backed by the session principal and a typed
/// `RoleSource`.
pub struct SessionAuthorizer<P> {
    source: Arc<dyn RoleSource<P>>,
    _principal: PhantomData<fn() -> P>,
}

impl<P: Send + Sync + 'static> SessionAuthorizer<P> {
    pub fn new(source: Arc<dyn RoleSource<P>>) -> Self {
        Self {
            source,
            _principal: PhantomData,
        }
    }

    /// Convenience: wrap into the `Arc<dyn _>` shape `AppState` installs.
    pub fn into_provider(self) -> Arc<dyn AuthorizationProvider> {
        Arc::new(self)
    }
}

#[async_trait]
impl<P: Send + Sync + 'static> AuthorizationProvider for SessionAuthorizer<P> {
    async fn authorize(&self, ctx: &mut RequestCtx, policy: &Policy) -> Decision {
        // Short-circuited earlier in the pipeline: evaluate nothing, touch
        // nothing. The role lookup must not run for a finished request.
        if ctx.is_handled() {
            return Decision::allow();
        }

        let resolved = match ctx.principal_as::<P>() {
            Some(principal) => Some(self.source.roles(ctx, principal).await),
            None => None,
        };

        let decision = match resolved {
            None => Decision::deny(REASON_UNAUTHENTICATED),
            Some(Ok(roles)) => policy.evaluate(&roles),
            Some(Err(e)) => {
                // Lookup failure must never allow by accident.
                tracing::warn!(error = %e, policy = %policy, "role lookup failed");
                Decision::deny("role lookup failed")
            }
        };

        if !decision.allow {
            self.source.denied(ctx, &decision.reason).await;
        }
        decision
    }
}
