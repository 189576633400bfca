//! Role-based authorization layer.
//!
//! One provider is installed per application; guard nodes trigger it for
//! every request descending into their subtree, after the principal has been
//! read from the session and before the matched handler runs.

pub mod provider;

pub use provider::{
    AuthorizationProvider, RoleSource, SessionAuthorizer, REASON_UNAUTHENTICATED,
};
