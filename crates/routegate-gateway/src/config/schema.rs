use serde::Deserialize;

use routegate_core::{Result, RouteGateError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub plugins: PluginsSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(RouteGateError::Configuration(
                "config version must be 1".into(),
            ));
        }
        self.gateway.validate()?;
        self.plugins.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Header carrying the opaque session id. Cookie transport is the
    /// host's concern; the demo binary reads this header.
    #[serde(default = "default_session_header")]
    pub session_header: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            session_header: default_session_header(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(RouteGateError::Configuration(
                "gateway.listen must not be empty".into(),
            ));
        }
        if self.session_header.is_empty() {
            return Err(RouteGateError::Configuration(
                "gateway.session_header must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_session_header() -> String {
    "x-session-id".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginsSection {
    #[serde(default = "default_plugin_dir")]
    pub dir: String,

    /// Load every bundle in `dir` at startup.
    #[serde(default)]
    pub autoload: bool,
}

impl Default for PluginsSection {
    fn default() -> Self {
        Self {
            dir: default_plugin_dir(),
            autoload: false,
        }
    }
}

impl PluginsSection {
    pub fn validate(&self) -> Result<()> {
        if self.dir.is_empty() {
            return Err(RouteGateError::Configuration(
                "plugins.dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_plugin_dir() -> String {
    "plugins".into()
}
