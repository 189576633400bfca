//! Plugin manifest format.
//!
//! A route bundle ships with a text descriptor named `<plugin>.cfg`:
//!
//! ```text
//! PluginClass=reports::plugin
//! RoutingMethods=register_reports,register_exports
//! Routings=/reports,/exports
//! ```
//!
//! Lines are `key=value`; blank lines and lines without `=` are ignored.
//! Values are comma-separated lists with no escaping, so identifiers must
//! not themselves contain a comma.

use std::collections::HashMap;

use crate::error::{Result, RouteGateError};

pub const KEY_PLUGIN_CLASS: &str = "PluginClass";
pub const KEY_ROUTING_METHODS: &str = "RoutingMethods";
pub const KEY_ROUTINGS: &str = "Routings";

/// Static description of a loadable route bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginManifest {
    /// Catalogue key; also the bundle/manifest file stem.
    pub name: String,
    /// Entry identifier of the bundle (`PluginClass`). Recorded for
    /// diagnostics; registration functions are resolved by name.
    pub entry_class: String,
    /// Registration functions to invoke against the routing tree, in order.
    pub routing_methods: Vec<String>,
    /// Route identifiers the plugin installs; the removal key set.
    pub routings: Vec<String>,
}

impl PluginManifest {
    /// Parse manifest text. Missing or empty required keys fail with
    /// `InvalidManifest` and no other effect.
    pub fn parse(name: &str, text: &str) -> Result<Self> {
        let mut pairs: HashMap<&str, &str> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                tracing::debug!(plugin = name, line, "ignoring manifest line without '='");
                continue;
            };
            pairs.insert(key.trim(), value.trim());
        }

        let entry_class = required(&pairs, KEY_PLUGIN_CLASS)?.to_string();
        let routing_methods = split_list(required(&pairs, KEY_ROUTING_METHODS)?);
        let routings = split_list(required(&pairs, KEY_ROUTINGS)?);
        if routing_methods.is_empty() {
            return Err(missing(KEY_ROUTING_METHODS));
        }
        if routings.is_empty() {
            return Err(missing(KEY_ROUTINGS));
        }

        Ok(Self {
            name: name.to_string(),
            entry_class,
            routing_methods,
            routings,
        })
    }

    /// Render back to manifest text (tooling and tests).
    pub fn render(&self) -> String {
        format!(
            "{KEY_PLUGIN_CLASS}={}\n{KEY_ROUTING_METHODS}={}\n{KEY_ROUTINGS}={}\n",
            self.entry_class,
            self.routing_methods.join(","),
            self.routings.join(",")
        )
    }
}

fn required<'a>(pairs: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str> {
    match pairs.get(key) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(missing(key)),
    }
}

fn missing(key: &str) -> RouteGateError {
    RouteGateError::InvalidManifest(format!("{key} must have a value"))
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
