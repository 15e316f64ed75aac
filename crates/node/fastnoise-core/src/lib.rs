//! fastnoise-core: typed node construction and evaluation on top of the FastNoise engine.
//!
//! The engine describes its node kinds at runtime. [`Registry`] walks that description
//! once and indexes it by normalized name; [`Node`] owns one native node, validates
//! [`Node::set`] calls against its kind's [`NodeDescriptor`], and dispatches batch
//! generation into caller-owned buffers.
//!
//! ```no_run
//! use fastnoise_core::{Node, Spacing, UniformGrid};
//!
//! # fn main() -> Result<(), fastnoise_core::NoiseError> {
//! let mut fbm = Node::from_kind("Fractal FBm")?;
//! let simplex = Node::from_kind("Simplex")?;
//! fbm.set("Source", &simplex)?;
//! fbm.set("Gain", 0.3_f32)?;
//!
//! let mut out = vec![0.0; 64 * 64];
//! let grid = UniformGrid::new([64, 64], Spacing::uniform_step([0.0, 0.0], 0.02));
//! let range = fbm.gen_uniform_grid_2d(&mut out, &grid, 1337)?;
//! println!("{} .. {}", range.min, range.max);
//! # Ok(())
//! # }
//! ```

pub mod binder;
pub mod catalog;
pub mod error;
pub mod generate;
pub mod metadata;
pub mod minmax;
pub mod node;
pub mod registry;

pub use binder::MemberValue;
pub use catalog::load_catalog;
pub use error::{NoiseError, Result, ValueShape};
pub use metadata::{
    normalize_name, DefaultValue, MemberDescriptor, MemberKind, NodeDescriptor, AXIS_SUFFIXES,
};
pub use minmax::OutputMinMax;
pub use node::Node;
pub use registry::{CatalogSnapshot, Registry};

pub use fastnoise_native::{
    EngineConfig, GridConvention, LoadError, NoiseEngine, RawNode, Spacing, TileScale,
    UniformGrid,
};
