//! Shared application state for the routegate gateway.
//!
//! Owns the routing table, the plugin registry, the session store, and the
//! per-application authorization provider (installed once).

use std::sync::{Arc, OnceLock};

use routegate_core::{Result, RouteGateError};

use crate::auth::AuthorizationProvider;
use crate::config::GatewayConfig;
use crate::plugin::PluginRegistry;
use crate::routing::{RouteBuilder, RouteTable};
use crate::services::StatusService;
use crate::session::{MemorySessions, SessionStore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    table: RouteTable,
    plugins: Arc<PluginRegistry>,
    sessions: Arc<dyn SessionStore>,
    authorization: OnceLock<Arc<dyn AuthorizationProvider>>,
}

impl AppState {
    /// Build application state with the in-memory session store.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        Self::with_sessions(cfg, Arc::new(MemorySessions::new()))
    }

    /// Build application state with an external session store.
    pub fn with_sessions(cfg: GatewayConfig, sessions: Arc<dyn SessionStore>) -> Result<Self> {
        cfg.validate()?;

        let plugins = Arc::new(PluginRegistry::new());

        // Built-in services.
        let mut root = RouteBuilder::root();
        root.route("/status")
            .handle(Arc::new(StatusService::new(Arc::clone(&plugins))));
        let table = RouteTable::publish(root);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                table,
                plugins,
                sessions,
                authorization: OnceLock::new(),
            }),
        })
    }

    /// Install the application's authorization provider. Set once; a second
    /// call is a configuration error.
    pub fn install_authorization(&self, provider: Arc<dyn AuthorizationProvider>) -> Result<()> {
        self.inner
            .authorization
            .set(provider)
            .map_err(|_| RouteGateError::Configuration(
                "authorization provider already installed".into(),
            ))
    }

    pub fn authorization(&self) -> Option<Arc<dyn AuthorizationProvider>> {
        self.inner.authorization.get().cloned()
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn table(&self) -> &RouteTable {
        &self.inner.table
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.inner.plugins
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.inner.sessions)
    }
}
