//! Plugin catalogue and the load/unload protocol.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use routegate_core::{PluginManifest, Result, RouteGateError};

use super::loader::{BundleLoader, DylibBundles, LoadedBundle};
use crate::routing::{RouteBuilder, RouteTable};

struct LoadedPlugin {
    routings: Vec<String>,
    bundle: Box<dyn LoadedBundle>,
}

/// Catalogue of currently mounted plugins.
///
/// An explicit object with injected lifecycle: construct one per application
/// (or per test) and pass it by reference to whoever loads or unloads. The
/// catalogue mutex doubles as the single writer lock for the whole load and
/// unload protocol, so concurrent operator calls serialize here.
pub struct PluginRegistry {
    loader: Box<dyn BundleLoader>,
    catalogue: Mutex<BTreeMap<String, LoadedPlugin>>,
    // Unloaded bundles are retired, not dropped: in-flight snapshots may
    // still reference plugin code, and unmapping it mid-process is unsound.
    retired: Mutex<Vec<Box<dyn LoadedBundle>>>,
}

impl PluginRegistry {
    /// Registry with the dylib loader.
    pub fn new() -> Self {
        Self::with_loader(Box::new(DylibBundles::new()))
    }

    /// Registry with a custom bundle loader (tests, embedded hosts).
    pub fn with_loader(loader: Box<dyn BundleLoader>) -> Self {
        Self {
            loader,
            catalogue: Mutex::new(BTreeMap::new()),
            retired: Mutex::new(Vec::new()),
        }
    }

    /// Platform extension of bundle files (`so`, `dylib`, `dll`).
    pub fn bundle_extension() -> &'static str {
        std::env::consts::DLL_EXTENSION
    }

    /// Load `<name>.<ext>` + `<name>.cfg` from `dir` and mount its routes.
    ///
    /// Mounting is transactional: registration functions run against a
    /// detached staging subtree, and the live table sees exactly one splice
    /// on full success — any failure leaves table and catalogue untouched.
    pub fn load(&self, table: &RouteTable, dir: &Path, name: &str) -> Result<()> {
        let mut catalogue = lock(&self.catalogue);
        // Catalogue precondition first, before any I/O.
        if catalogue.contains_key(name) {
            return Err(RouteGateError::AlreadyLoaded(name.to_string()));
        }

        let bundle_path = dir.join(format!("{name}.{}", Self::bundle_extension()));
        let manifest_path = dir.join(format!("{name}.cfg"));
        if !bundle_path.is_file() {
            return Err(RouteGateError::PluginLoad(format!(
                "bundle not found: {}",
                bundle_path.display()
            )));
        }
        let text = fs::read_to_string(&manifest_path).map_err(|e| {
            RouteGateError::PluginLoad(format!("read {}: {e}", manifest_path.display()))
        })?;
        let manifest = PluginManifest::parse(name, &text)?;

        // Route identifiers are globally unique, enforced here rather than
        // discovered as an unload hazard later.
        let installed = table.children();
        for routing in &manifest.routings {
            let taken = installed.contains(routing)
                || catalogue.values().any(|p| p.routings.contains(routing));
            if taken {
                return Err(RouteGateError::Configuration(format!(
                    "route identifier {routing} is already installed"
                )));
            }
        }

        let bundle = self.loader.open(&bundle_path)?;

        let mut stage = RouteBuilder::root();
        for method in &manifest.routing_methods {
            bundle.register(method, &mut stage).map_err(|e| {
                RouteGateError::PluginLoad(format!("plugin {name}, method {method}: {e}"))
            })?;
        }

        let staged = stage.into_children();
        let staged_ids: Vec<String> = staged.iter().map(RouteBuilder::id).collect();
        for routing in &manifest.routings {
            if !staged_ids.contains(routing) {
                tracing::warn!(
                    plugin = name,
                    routing = %routing,
                    "manifest declares a routing the plugin did not register"
                );
            }
        }

        table.attach_children(staged)?;
        catalogue.insert(
            name.to_string(),
            LoadedPlugin {
                routings: manifest.routings.clone(),
                bundle,
            },
        );
        tracing::info!(plugin = name, routings = ?manifest.routings, "plugin loaded");
        Ok(())
    }

    /// Detach every route recorded for `name` and drop its catalogue entry.
    pub fn unload(&self, table: &RouteTable, name: &str) -> Result<()> {
        let mut catalogue = lock(&self.catalogue);
        let Some(plugin) = catalogue.get(name) else {
            return Err(RouteGateError::NotLoaded(name.to_string()));
        };

        let detached = table.detach_children(&plugin.routings)?;
        // Tree removal completed; only now drop the entry.
        if let Some(plugin) = catalogue.remove(name) {
            lock(&self.retired).push(plugin.bundle);
        }
        tracing::info!(plugin = name, detached, "plugin unloaded");
        Ok(())
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        lock(&self.catalogue).contains_key(name)
    }

    /// Names of mounted plugins, sorted.
    pub fn loaded(&self) -> Vec<String> {
        lock(&self.catalogue).keys().cloned().collect()
    }

    /// Load every bundle found in `dir`, in sorted name order. Directory
    /// enumeration order is never relied upon.
    pub fn load_all(&self, table: &RouteTable, dir: &Path) -> Result<usize> {
        let names = discover(dir)?;
        for name in &names {
            self.load(table, dir, name)?;
        }
        Ok(names.len())
    }

    /// Unload every bundle found in `dir`, in sorted name order.
    pub fn unload_all_in(&self, table: &RouteTable, dir: &Path) -> Result<usize> {
        let names = discover(dir)?;
        for name in &names {
            self.unload(table, name)?;
        }
        Ok(names.len())
    }

    /// Drain the catalogue, detaching every installed route.
    pub fn unload_all(&self, table: &RouteTable) -> Result<usize> {
        let names = self.loaded();
        for name in &names {
            self.unload(table, name)?;
        }
        Ok(names.len())
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // The catalogue is always left consistent between operations, so a
    // poisoned lock is safe to adopt.
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Bundle names (file stems) present in `dir`, sorted.
fn discover(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| RouteGateError::PluginLoad(format!("read dir {}: {e}", dir.display())))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| RouteGateError::PluginLoad(format!("read dir {}: {e}", dir.display())))?;
        let path = entry.path();
        let is_bundle = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == PluginRegistry::bundle_extension());
        if !is_bundle {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}
