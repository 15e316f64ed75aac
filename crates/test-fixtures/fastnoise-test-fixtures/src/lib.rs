//! In-process stand-in for the native FastNoise engine.
//!
//! [`MockEngine`] implements the full [`fastnoise_native::NoiseEngine`] table over a
//! catalog declared in `fixtures/catalog.json`. It evaluates simple deterministic
//! functions rather than real noise, counts every native call it receives, and can
//! encode a node tree so decode paths have something to chew on.

pub mod catalog;
pub mod engine;

pub use catalog::{
    default_catalog, CatalogManifest, HybridSpec, KindSpec, LookupSpec, VariableKind, VariableSpec,
};
pub use engine::{CallCounts, MockEngine, ENCODED_PREFIX};
