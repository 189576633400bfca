//! Mutable route construction.
//!
//! Hosts build their tree here at startup; the plugin registry hands a
//! detached builder to registration functions so a failing plugin never
//! touches the live tree.

use std::sync::Arc;

use routegate_core::{Policy, Result};

use super::node::{RouteHandler, RouteNode, Selector};

/// A routing subtree under construction.
pub struct RouteBuilder {
    selector: Selector,
    policy: Option<Policy>,
    handler: Option<Arc<dyn RouteHandler>>,
    children: Vec<RouteBuilder>,
}

impl RouteBuilder {
    /// Fresh root, detached from any table.
    pub fn root() -> Self {
        Self {
            selector: Selector::Root,
            policy: None,
            handler: None,
            children: Vec::new(),
        }
    }

    /// Descend to (creating as needed) the node for `path`, e.g.
    /// `/reports/daily`. Returns the deepest node for further building.
    pub fn route(&mut self, path: &str) -> &mut RouteBuilder {
        let mut cur = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let pos = cur.children.iter().position(
                |c| matches!(&c.selector, Selector::Segment(name) if name == segment),
            );
            let idx = match pos {
                Some(idx) => idx,
                None => {
                    cur.children.push(RouteBuilder {
                        selector: Selector::Segment(segment.to_string()),
                        policy: None,
                        handler: None,
                        children: Vec::new(),
                    });
                    cur.children.len() - 1
                }
            };
            cur = &mut cur.children[idx];
        }
        cur
    }

    /// Attach the terminal handler for this node.
    pub fn handle(&mut self, handler: Arc<dyn RouteHandler>) -> &mut Self {
        self.handler = Some(handler);
        self
    }

    /// Insert a transparent guard node carrying `policy` and return it so
    /// callers add child routes beneath it. Guards nest; dispatch evaluates
    /// them outermost first.
    pub fn authorize(&mut self, policy: Policy) -> &mut RouteBuilder {
        self.children.push(RouteBuilder {
            selector: Selector::Transparent,
            policy: Some(policy),
            handler: None,
            children: Vec::new(),
        });
        let idx = self.children.len() - 1;
        &mut self.children[idx]
    }

    /// Guard requiring every listed role (ALL).
    pub fn with_roles<I, S>(&mut self, roles: I) -> Result<&mut RouteBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.authorize(Policy::all(roles)?))
    }

    /// Guard requiring at least one listed role (ANY).
    pub fn with_any_role<I, S>(&mut self, roles: I) -> Result<&mut RouteBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.authorize(Policy::any(roles)?))
    }

    /// Guard rejecting every listed role (NONE).
    pub fn without_roles<I, S>(&mut self, roles: I) -> Result<&mut RouteBuilder>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(self.authorize(Policy::none(roles)?))
    }

    /// Identifier matching `RouteNode::id`.
    pub fn id(&self) -> String {
        match &self.selector {
            Selector::Root => "/".to_string(),
            Selector::Segment(segment) => format!("/{segment}"),
            Selector::Transparent => match &self.policy {
                Some(policy) => policy.to_string(),
                None => "(transparent)".to_string(),
            },
        }
    }

    pub fn child_ids(&self) -> Vec<String> {
        self.children.iter().map(RouteBuilder::id).collect()
    }

    /// Take this builder's direct children (used to stage plugin subtrees).
    pub fn into_children(self) -> Vec<RouteBuilder> {
        self.children
    }

    pub(crate) fn extend_children(&mut self, staged: Vec<RouteBuilder>) {
        self.children.extend(staged);
    }

    /// Remove direct children whose identifier is in `ids`; returns how many
    /// were detached.
    pub(crate) fn detach_children(&mut self, ids: &[String]) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !ids.contains(&c.id()));
        before - self.children.len()
    }

    /// Freeze into an immutable snapshot.
    pub fn freeze(self) -> Arc<RouteNode> {
        Arc::new(RouteNode {
            selector: self.selector,
            policy: self.policy,
            handler: self.handler,
            children: self.children.into_iter().map(RouteBuilder::freeze).collect(),
        })
    }

    /// Reconstruct a builder from a snapshot (copy-on-write mutation path).
    /// Handlers are shared, not cloned.
    pub(crate) fn thaw(node: &RouteNode) -> RouteBuilder {
        RouteBuilder {
            selector: node.selector.clone(),
            policy: node.policy.clone(),
            handler: node.handler.clone(),
            children: node.children.iter().map(|c| RouteBuilder::thaw(c)).collect(),
        }
    }
}

impl Default for RouteBuilder {
    fn default() -> Self {
        Self::root()
    }
}
