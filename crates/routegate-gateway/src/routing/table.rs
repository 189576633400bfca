//! Live routing table: read-mostly snapshots, serialized mutation.

use std::sync::{Arc, Mutex, RwLock};

use routegate_core::Result;

use super::builder::RouteBuilder;
use super::node::{self, ResolvedRoute, RouteNode};

/// The shared routing tree.
///
/// Dispatch clones out the current `Arc` snapshot and never blocks on
/// mutation. Mutators rebuild the tree from the snapshot under a single
/// writer lock and publish it in one swap, so in-flight requests observe
/// either the old tree or the new one, never a torn state.
pub struct RouteTable {
    snapshot: RwLock<Arc<RouteNode>>,
    mutation: Mutex<()>,
}

impl RouteTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::publish(RouteBuilder::root())
    }

    /// Freeze `builder` and make it the initial snapshot.
    pub fn publish(builder: RouteBuilder) -> Self {
        Self {
            snapshot: RwLock::new(builder.freeze()),
            mutation: Mutex::new(()),
        }
    }

    /// Current tree snapshot. In-flight requests keep the `Arc` alive even
    /// across a concurrent unload.
    pub fn snapshot(&self) -> Arc<RouteNode> {
        // A snapshot swap cannot leave the tree torn, so a poisoned lock is
        // safe to adopt.
        match self.snapshot.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Resolve a request path against the current snapshot.
    pub fn resolve(&self, path: &str) -> Option<ResolvedRoute> {
        node::resolve(&self.snapshot(), path)
    }

    /// Identifiers of the root's direct children.
    pub fn children(&self) -> Vec<String> {
        self.snapshot()
            .children()
            .iter()
            .map(|c| c.id())
            .collect()
    }

    /// Apply `f` to a thawed copy of the tree and publish the result.
    /// All mutation funnels through here; `f` failing publishes nothing.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut RouteBuilder) -> Result<R>) -> Result<R> {
        let _writer = match self.mutation.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let mut builder = RouteBuilder::thaw(&self.snapshot());
        let out = f(&mut builder)?;
        let frozen = builder.freeze();
        match self.snapshot.write() {
            Ok(mut guard) => *guard = frozen,
            Err(poisoned) => *poisoned.into_inner() = frozen,
        }
        Ok(out)
    }

    /// Splice staged subtrees under the root in one publish.
    pub fn attach_children(&self, staged: Vec<RouteBuilder>) -> Result<()> {
        self.mutate(|root| {
            root.extend_children(staged);
            Ok(())
        })
    }

    /// Detach root children by identifier in one publish; returns how many
    /// were removed.
    pub fn detach_children(&self, ids: &[String]) -> Result<usize> {
        self.mutate(|root| Ok(root.detach_children(ids)))
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use futures_util::FutureExt;
    use routegate_core::Policy;

    use super::*;
    use crate::routing::node::{handler_fn, resolve, RouteHandler};

    fn noop() -> Arc<dyn RouteHandler> {
        handler_fn(|_ctx| async { Ok(()) }.boxed())
    }

    #[test]
    fn resolve_walks_segments_and_collects_guards_outermost_first() {
        let mut root = RouteBuilder::root();
        let admin = root.with_roles(["admin"]).unwrap();
        let inner = admin.route("/api/reports");
        let nested = inner.with_any_role(["auditor", "owner"]).unwrap();
        nested.route("/daily").handle(noop());
        let table = RouteTable::publish(root);

        let resolved = table.resolve("/api/reports/daily").unwrap();
        assert_eq!(resolved.guards.len(), 2);
        assert_eq!(resolved.guards[0], Policy::all(["admin"]).unwrap());
        assert_eq!(
            resolved.guards[1],
            Policy::any(["auditor", "owner"]).unwrap()
        );

        assert!(table.resolve("/api/reports").is_none());
        assert!(table.resolve("/api/missing").is_none());
    }

    #[test]
    fn guards_on_dead_branches_do_not_leak() {
        let mut root = RouteBuilder::root();
        let guarded = root.with_roles(["admin"]).unwrap();
        guarded.route("/secret").handle(noop());
        root.route("/open").handle(noop());
        let table = RouteTable::publish(root);

        let resolved = table.resolve("/open").unwrap();
        assert!(resolved.guards.is_empty());
    }

    #[test]
    fn detach_is_by_identifier_and_snapshots_are_isolated() {
        let mut root = RouteBuilder::root();
        root.route("/alpha").handle(noop());
        root.route("/beta").handle(noop());
        let table = RouteTable::publish(root);

        let before = table.snapshot();
        let removed = table.detach_children(&["/alpha".to_string()]).unwrap();
        assert_eq!(removed, 1);

        // The old snapshot still resolves the detached route.
        assert!(resolve(&before, "/alpha").is_some());
        assert!(table.resolve("/alpha").is_none());
        assert!(table.resolve("/beta").is_some());
        assert_eq!(table.children(), vec!["/beta".to_string()]);
    }

    #[test]
    fn failed_mutation_publishes_nothing() {
        let table = RouteTable::new();
        let err = table.mutate(|root| {
            root.route("/ghost").handle(noop());
            Err::<(), _>(routegate_core::RouteGateError::Internal("boom".into()))
        });
        assert!(err.is_err());
        assert!(table.resolve("/ghost").is_none());
    }
}
