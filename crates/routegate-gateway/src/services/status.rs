use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use routegate_core::{Reply, Result};

use crate::plugin::PluginRegistry;
use crate::request::RequestCtx;
use crate::routing::RouteHandler;

/// Reports the gateway's mounted plugins. Mounted at `/status`.
pub struct StatusService {
    plugins: Arc<PluginRegistry>,
}

impl StatusService {
    pub fn new(plugins: Arc<PluginRegistry>) -> Self {
        Self { plugins }
    }
}

#[async_trait]
impl RouteHandler for StatusService {
    async fn handle(&self, ctx: &mut RequestCtx) -> Result<()> {
        let reply = Reply::ok(json!({ "plugins": self.plugins.loaded() }));
        ctx.reply(200, &reply);
        Ok(())
    }
}
