//! fastnoise-native: the flat C function table exposed by the FastNoise engine.
//!
//! Nothing in here knows what a node kind looks like. The engine is reached through the
//! [`NoiseEngine`] trait, which mirrors the native table one call at a time; the
//! production implementation resolves those calls from a shared library at runtime
//! ([`DylibEngine`]).

pub mod config;
pub mod dylib;
pub mod engine;
pub mod error;
pub mod grid;

pub use config::{EngineConfig, GridConvention};
pub use dylib::{open_library, DylibEngine};
pub use engine::{NoiseEngine, RawNode, VariableType};
pub use error::LoadError;
pub use grid::{Spacing, TileScale, UniformGrid};
