//! Shared error type across routegate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No matching route.
    NotFound,
    /// Build-time or load-time configuration rejected.
    Configuration,
    /// Plugin already present in the catalogue.
    AlreadyLoaded,
    /// Plugin absent from the catalogue.
    NotLoaded,
    /// Manifest file malformed or incomplete.
    InvalidManifest,
    /// Bundle could not be opened or registered.
    PluginLoad,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Configuration => "CONFIGURATION",
            ClientCode::AlreadyLoaded => "ALREADY_LOADED",
            ClientCode::NotLoaded => "NOT_LOADED",
            ClientCode::InvalidManifest => "INVALID_MANIFEST",
            ClientCode::PluginLoad => "PLUGIN_LOAD",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RouteGateError>;

/// Unified error type used by core and gateway.
///
/// Authorization denial is deliberately absent: a deny is a terminal
/// decision delivered through the configured responder, never an error value.
#[derive(Debug, Error)]
pub enum RouteGateError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("plugin {0} is already loaded")]
    AlreadyLoaded(String),
    #[error("plugin {0} was not loaded")]
    NotLoaded(String),
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    #[error("plugin load failed: {0}")]
    PluginLoad(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl RouteGateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RouteGateError::BadRequest(_) => ClientCode::BadRequest,
            RouteGateError::NotFound(_) => ClientCode::NotFound,
            RouteGateError::Configuration(_) => ClientCode::Configuration,
            RouteGateError::AlreadyLoaded(_) => ClientCode::AlreadyLoaded,
            RouteGateError::NotLoaded(_) => ClientCode::NotLoaded,
            RouteGateError::InvalidManifest(_) => ClientCode::InvalidManifest,
            RouteGateError::PluginLoad(_) => ClientCode::PluginLoad,
            RouteGateError::Internal(_) => ClientCode::Internal,
        }
    }
}
