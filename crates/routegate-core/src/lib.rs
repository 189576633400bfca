//! routegate core: policy model, plugin manifest format, reply envelopes, and
//! error types.
//!
//! This crate defines the contracts shared by the gateway runtime, plugin
//! bundles, and tooling. It intentionally carries no transport or runtime
//! dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `RouteGateError`/`Result` so production
//! processes do not crash on malformed manifests or bad traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod manifest;
pub mod policy;
pub mod reply;

/// Shared result type.
pub use error::{Result, RouteGateError};
pub use manifest::PluginManifest;
pub use policy::{Decision, Policy, PolicyKind, RoleSet};
pub use reply::{Paged, Reply};
