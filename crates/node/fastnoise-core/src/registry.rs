use std::fmt;
use std::sync::Arc;

use fastnoise_native::{DylibEngine, EngineConfig, LoadError, NoiseEngine};
use hashbrown::hash_map::Entry;
use hashbrown::HashMap;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::catalog::load_catalog;
use crate::error::{NoiseError, Result};
use crate::metadata::{normalize_name, NodeDescriptor};

static GLOBAL: Lazy<Result<Arc<Registry>, LoadError>> = Lazy::new(|| {
    let config = EngineConfig::from_env();
    let engine = DylibEngine::load(&config)?;
    Ok(Registry::load_with(Arc::new(engine), config.simd_level))
});

/// Every node kind one engine supports, discovered once and never mutated.
pub struct Registry {
    engine: Arc<dyn NoiseEngine>,
    simd_level: u32,
    pub(crate) kinds: Vec<NodeDescriptor>,
    by_name: HashMap<String, i32>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("engine", &self.engine.describe())
            .field("simd_level", &self.simd_level)
            .field("kinds", &self.kinds.len())
            .finish()
    }
}

/// Serializable view of a registry for tooling.
#[derive(Debug, Serialize)]
pub struct CatalogSnapshot<'a> {
    pub engine: String,
    pub grid_convention: fastnoise_native::GridConvention,
    pub nodes: &'a [NodeDescriptor],
}

impl Registry {
    /// The process-wide registry over the engine named by [`EngineConfig::from_env`].
    ///
    /// The library is loaded on first call. A load failure is kept and returned to
    /// every later caller as [`NoiseError::EngineUnavailable`].
    pub fn global() -> Result<Arc<Registry>> {
        match &*GLOBAL {
            Ok(registry) => Ok(Arc::clone(registry)),
            Err(err) => Err(NoiseError::EngineUnavailable(err.clone())),
        }
    }

    /// Load the dynamic engine described by `config` and walk its catalog.
    pub fn from_config(config: &EngineConfig) -> Result<Arc<Registry>> {
        let engine = DylibEngine::load(config)?;
        Ok(Self::load_with(Arc::new(engine), config.simd_level))
    }

    /// Build a registry over any engine; nodes are allocated with SIMD level 0 (auto).
    pub fn load(engine: Arc<dyn NoiseEngine>) -> Arc<Registry> {
        Self::load_with(engine, 0)
    }

    pub fn load_with(engine: Arc<dyn NoiseEngine>, simd_level: u32) -> Arc<Registry> {
        let kinds = load_catalog(engine.as_ref());
        let mut by_name = HashMap::with_capacity(kinds.len());
        for kind in &kinds {
            if kind.name.is_empty() {
                continue;
            }
            match by_name.entry(kind.name.clone()) {
                Entry::Occupied(first) => warn!(
                    "node kinds {} and {} both normalize to '{}'; keeping {}",
                    first.get(),
                    kind.id,
                    kind.name,
                    first.get()
                ),
                Entry::Vacant(slot) => {
                    slot.insert(kind.id);
                }
            }
        }
        info!(
            "loaded {} FastNoise node kinds from {}",
            kinds.len(),
            engine.describe()
        );
        Arc::new(Registry {
            engine,
            simd_level,
            kinds,
            by_name,
        })
    }

    /// Look a kind up by name, ignoring case and spaces.
    pub fn resolve(&self, name: &str) -> Result<&NodeDescriptor> {
        self.by_name
            .get(&normalize_name(name))
            .and_then(|id| self.descriptor(*id))
            .ok_or_else(|| NoiseError::UnknownNodeKind {
                name: name.to_owned(),
            })
    }

    pub fn descriptor(&self, id: i32) -> Option<&NodeDescriptor> {
        usize::try_from(id).ok().and_then(|i| self.kinds.get(i))
    }

    pub fn kinds(&self) -> impl Iterator<Item = &NodeDescriptor> + '_ {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn engine(&self) -> &dyn NoiseEngine {
        self.engine.as_ref()
    }

    /// SIMD level requested for every node allocated through this registry.
    pub fn simd_level(&self) -> u32 {
        self.simd_level
    }

    /// Whether nodes from `other` can be wired into nodes from `self`.
    pub fn shares_engine(&self, other: &Registry) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.engine).cast::<()>(),
            Arc::as_ptr(&other.engine).cast::<()>(),
        )
    }

    pub fn snapshot(&self) -> CatalogSnapshot<'_> {
        CatalogSnapshot {
            engine: self.engine.describe(),
            grid_convention: self.engine.grid_convention(),
            nodes: &self.kinds,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastnoise_test_fixtures::MockEngine;

    fn mock_registry() -> Arc<Registry> {
        Registry::load(Arc::new(MockEngine::new()))
    }

    #[test]
    fn resolves_every_catalog_kind_by_display_name() {
        let registry = mock_registry();
        for kind in registry.kinds() {
            assert_eq!(registry.resolve(&kind.display_name).unwrap().id, kind.id);
        }
    }

    #[test]
    fn unknown_kind_reports_the_requested_name() {
        let registry = mock_registry();
        let err = registry.resolve("Perlin Worms").unwrap_err();
        assert_eq!(
            err,
            NoiseError::UnknownNodeKind {
                name: "Perlin Worms".into()
            }
        );
    }

    #[test]
    fn duplicate_normalized_kind_names_keep_the_first() {
        let engine = MockEngine::from_json(
            r#"{ "nodes": [ { "name": "Value Noise" }, { "name": "valuenoise" } ] }"#,
        )
        .unwrap();
        let registry = Registry::load(Arc::new(engine));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("VALUE NOISE").unwrap().id, 0);
    }

    #[test]
    fn registries_share_an_engine_only_through_the_same_arc() {
        let engine: Arc<dyn NoiseEngine> = Arc::new(MockEngine::new());
        let a = Registry::load(Arc::clone(&engine));
        let b = Registry::load(engine);
        let c = mock_registry();
        assert!(a.shares_engine(&b));
        assert!(!a.shares_engine(&c));
    }

    #[test]
    fn snapshot_serializes_every_kind() {
        let registry = mock_registry();
        let json: serde_json::Value = serde_json::from_str(&registry.to_json().unwrap()).unwrap();
        assert_eq!(json["grid_convention"], "stepped");
        assert_eq!(json["nodes"].as_array().unwrap().len(), registry.len());
        assert_eq!(json["nodes"][0]["name"], "constant");
    }
}
