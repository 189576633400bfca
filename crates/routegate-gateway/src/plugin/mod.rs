//! Runtime route-plugin subsystem.
//!
//! A plugin is a pair of colocated files in an operator directory: a dynamic
//! library bundle and a `<name>.cfg` manifest naming its registration
//! functions and the route identifiers it installs. The registry mounts
//! bundles into the live routing table and removes them again without a
//! restart.

pub mod loader;
pub mod registry;

pub use loader::{BundleLoader, DylibBundles, LoadedBundle, RegisterFn};
pub use registry::PluginRegistry;
