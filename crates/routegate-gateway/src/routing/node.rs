//! Immutable routing nodes and path resolution.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use routegate_core::{Policy, Result};

use crate::request::RequestCtx;

/// Terminal request handler attached to a route.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    async fn handle(&self, ctx: &mut RequestCtx) -> Result<()>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F> RouteHandler for FnHandler<F>
where
    F: for<'a> Fn(&'a mut RequestCtx) -> BoxFuture<'a, Result<()>> + Send + Sync,
{
    async fn handle(&self, ctx: &mut RequestCtx) -> Result<()> {
        (self.0)(ctx).await
    }
}

/// Wrap a closure returning a boxed future as a `RouteHandler`.
pub fn handler_fn<F>(f: F) -> Arc<dyn RouteHandler>
where
    F: for<'a> Fn(&'a mut RequestCtx) -> BoxFuture<'a, Result<()>> + Send + Sync + 'static,
{
    Arc::new(FnHandler(f))
}

/// How a node participates in path matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Tree root; matches nothing itself.
    Root,
    /// Matches one path segment by exact name.
    Segment(String),
    /// Matches unconditionally without consuming a segment. Guard nodes use
    /// this so they are invisible to path matching.
    Transparent,
}

/// One node of an immutable routing snapshot.
pub struct RouteNode {
    pub(crate) selector: Selector,
    pub(crate) policy: Option<Policy>,
    pub(crate) handler: Option<Arc<dyn RouteHandler>>,
    pub(crate) children: Vec<Arc<RouteNode>>,
}

impl RouteNode {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn policy(&self) -> Option<&Policy> {
        self.policy.as_ref()
    }

    pub fn handler(&self) -> Option<&Arc<dyn RouteHandler>> {
        self.handler.as_ref()
    }

    pub fn children(&self) -> &[Arc<RouteNode>] {
        &self.children
    }

    /// Stable identifier used for detachment. Segment children of the root
    /// are identified by their leading-slash path (`/reports`), which is the
    /// form plugin manifests declare in `Routings`.
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
}

/// Outcome of resolving a request path against a snapshot.
pub struct ResolvedRoute {
    /// Guard policies on the matched chain, outermost first.
    pub guards: Vec<Policy>,
    pub handler: Arc<dyn RouteHandler>,
}

/// Resolve `path` against the snapshot rooted at `root`.
pub fn resolve(root: &RouteNode, path: &str) -> Option<ResolvedRoute> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut guards = Vec::new();
    let handler = descend(root, &segments, &mut guards)?;
    Some(ResolvedRoute { guards, handler })
}

fn descend(
    node: &RouteNode,
    segments: &[&str],
    guards: &mut Vec<Policy>,
) -> Option<Arc<dyn RouteHandler>> {
    if let Some(policy) = node.policy() {
        guards.push(policy.clone());
    }

    let mut found: Option<Arc<dyn RouteHandler>> = None;
    if segments.is_empty() {
        found = node.handler.clone();
    }
    if found.is_none() {
        for child in &node.children {
            let hit = match child.selector() {
                Selector::Segment(name) => match segments.split_first() {
                    Some((first, rest)) if name == first => descend(child, rest, guards),
                    _ => None,
                },
                Selector::Transparent => descend(child, segments, guards),
                Selector::Root => None,
            };
            if hit.is_some() {
                found = hit;
                break;
            }
        }
    }

    // Guards only apply on the matched chain; unwind on dead ends.
    if found.is_none() && node.policy().is_some() {
        guards.pop();
    }
    found
}
