//! Per-request context carried through guard evaluation and handlers.

use std::any::Any;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use routegate_core::Reply;

/// Type-erased authenticated identity, as stored in the session.
/// Typed providers downcast to their concrete principal shape.
pub type Principal = Arc<dyn Any + Send + Sync>;

/// Response produced by a guard denial or a handler.
#[derive(Debug, Clone)]
pub struct ResponseParts {
    pub status: u16,
    pub body: Value,
}

/// One in-flight request as the routing layer sees it.
///
/// The first response written wins; everything after is a no-op. That makes
/// "the request is already handled" a stable signal for the guard pipeline.
pub struct RequestCtx {
    method: String,
    path: String,
    session_id: Option<String>,
    principal: Option<Principal>,
    response: Option<ResponseParts>,
}

impl RequestCtx {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            session_id: None,
            principal: None,
            response: None,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn set_session_id(&mut self, session_id: impl Into<String>) {
        self.session_id = Some(session_id.into());
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The principal downcast to its concrete type; `None` when absent or of
    /// another type (both are "unauthenticated" to the guard layer).
    pub fn principal_as<P: 'static>(&self) -> Option<&P> {
        self.principal.as_ref().and_then(|p| p.downcast_ref::<P>())
    }

    pub fn set_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    /// True once a terminal response has been written.
    pub fn is_handled(&self) -> bool {
        self.response.is_some()
    }

    /// Write the terminal response. No-op if one was already written.
    pub fn respond(&mut self, status: u16, body: Value) {
        if self.response.is_none() {
            self.response = Some(ResponseParts { status, body });
        }
    }

    /// Write a `Reply` envelope as the terminal response.
    pub fn reply<T: Serialize>(&mut self, status: u16, reply: &Reply<T>) {
        let body = serde_json::to_value(reply).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "reply serialization failed");
            serde_json::json!({ "code": 500, "message": "reply serialization failed" })
        });
        self.respond(status, body);
    }

    pub fn response(&self) -> Option<&ResponseParts> {
        self.response.as_ref()
    }

    pub fn into_response(self) -> Option<ResponseParts> {
        self.response
    }
}
