//! Routing tree: immutable snapshot nodes, a mutable builder, and the
//! copy-on-write table that request dispatch reads from.
//!
//! Matching (read) runs concurrently against `Arc` snapshots; mutation
//! (attach/splice/detach) serializes on a single lock and publishes whole
//! snapshots, so a request never observes a half-attached or half-removed
//! subtree.

pub mod builder;
pub mod node;
pub mod table;

pub use builder::RouteBuilder;
pub use node::{handler_fn, ResolvedRoute, RouteHandler, RouteNode, Selector};
pub use table::RouteTable;
