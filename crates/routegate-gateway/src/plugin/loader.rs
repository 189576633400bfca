//! Bundle loading seam.
//!
//! The registry never touches `libloading` directly; it talks to
//! `BundleLoader`/`LoadedBundle` so tests can substitute in-memory bundles
//! and hosts can bring their own loading mechanism.

use std::path::Path;

use libloading::Library;

use routegate_core::{Result, RouteGateError};

use crate::routing::RouteBuilder;

/// Signature every registration function exported by a bundle must have.
/// It receives a detached staging subtree, never the live tree.
pub type RegisterFn = fn(&mut RouteBuilder) -> Result<()>;

/// A bundle opened and ready to register routes.
///
/// The value must stay alive for as long as any routing snapshot may
/// reference code from the bundle.
pub trait LoadedBundle: Send + Sync {
    /// Resolve the registration function `method` and invoke it on `stage`.
    fn register(&self, method: &str, stage: &mut RouteBuilder) -> Result<()>;
}

/// Opens route bundles from disk.
pub trait BundleLoader: Send + Sync {
    fn open(&self, bundle: &Path) -> Result<Box<dyn LoadedBundle>>;
}

/// `libloading`-backed loader. Each `RoutingMethods` entry in the manifest
/// names an exported symbol with the `RegisterFn` signature.
#[derive(Default)]
pub struct DylibBundles;

impl DylibBundles {
    pub fn new() -> Self {
        Self
    }
}

impl BundleLoader for DylibBundles {
    fn open(&self, bundle: &Path) -> Result<Box<dyn LoadedBundle>> {
        // Safety: bundles are operator-installed artifacts with the same
        // trust level as the gateway binary itself.
        let library = unsafe { Library::new(bundle) }.map_err(|e| {
            RouteGateError::PluginLoad(format!("open {}: {e}", bundle.display()))
        })?;
        Ok(Box::new(DylibBundle { library }))
    }
}

struct DylibBundle {
    library: Library,
}

impl LoadedBundle for DylibBundle {
    fn register(&self, method: &str, stage: &mut RouteBuilder) -> Result<()> {
        let register: libloading::Symbol<'_, RegisterFn> =
            unsafe { self.library.get(method.as_bytes()) }.map_err(|e| {
                RouteGateError::PluginLoad(format!("resolve symbol {method}: {e}"))
            })?;
        register(stage)
    }
}
