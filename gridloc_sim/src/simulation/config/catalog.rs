// gridloc_sim/src/simulation/config/catalog.rs

//! This module defines the `PrefabCatalog`: reusable scenario fragments
//! (maps, sensor presets, ...) loaded from disk and referenced by key.

use figment::{
    providers::{Format, Toml},
    value::Value,
    Figment,
};
use std::{collections::HashMap, path::Path};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Holds the entire parsed catalog of prefabs.
/// The key is a namespace string (e.g., "maps.reference") and
/// the value is the raw, parsed TOML data for that prefab.
#[derive(Default, Debug, Clone)]
pub struct PrefabCatalog(pub HashMap<String, Value>);

impl PrefabCatalog {
    /// Walks `catalog_path`, parses every `.toml` file, and keys it by its
    /// relative path with separators replaced by dots.
    ///
    /// A missing directory yields an empty catalog. Files that fail to parse
    /// are skipped with a warning.
    pub fn load(catalog_path: &Path) -> Self {
        let mut catalog = Self::default();
        if !catalog_path.exists() {
            warn!(
                "Catalog directory not found at {:?}, no prefabs will be loaded.",
                catalog_path
            );
            return catalog;
        }

        info!("Loading prefab catalog from: {:?}", catalog_path);

        for entry in WalkDir::new(catalog_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                !e.file_type().is_dir() && e.path().extension().is_some_and(|ext| ext == "toml")
            })
        {
            let path = entry.path();
            let Some(key) = catalog_key(catalog_path, path) else {
                warn!("Skipping catalog file outside of {:?}: {:?}", catalog_path, path);
                continue;
            };

            match Figment::new().merge(Toml::file(path)).extract::<Value>() {
                Ok(data) => {
                    info!("Loaded catalog item: '{}'", key);
                    catalog.0.insert(key, data);
                }
                Err(e) => {
                    warn!("Failed to load catalog item from {:?}: {}", path, e);
                }
            }
        }

        info!("Prefab catalog ready with {} items.", catalog.len());
        catalog
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// All catalog keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.0.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Creates a key like "maps.reference" from `root/maps/reference.toml`.
fn catalog_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("."))
}
