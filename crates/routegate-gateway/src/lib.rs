//! routegate gateway library entry.
//!
//! This crate wires the routing tree, authorization provider, plugin
//! registry, session boundary, and axum glue into a cohesive stack. It is
//! intended to be consumed by the binary (`main.rs`), by host applications
//! embedding the table, and by integration tests.

pub mod app_state;
pub mod auth;
pub mod config;
pub mod dispatch;
pub mod plugin;
pub mod request;
pub mod router;
pub mod routing;
pub mod services;
pub mod session;
