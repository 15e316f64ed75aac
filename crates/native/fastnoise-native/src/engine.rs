//! The engine's flat function table, expressed as a trait.
//!
//! Method names follow the native entry points (`fnGetMetadataVariableName` becomes
//! [`NoiseEngine::variable_name`] and so on). Ids and indices stay `i32` because that is
//! what crosses the boundary; interpreting them is the caller's job.

use std::ffi::{c_void, CStr};
use std::ptr::NonNull;

use crate::config::GridConvention;
use crate::grid::{TileScale, UniformGrid};

/// Opaque handle to one native node.
///
/// This is only the handle *value*: copying it does not copy or retain the node, and
/// dropping it releases nothing. Ownership lives one level up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct RawNode(NonNull<c_void>);

// The engine's node objects are internally reference counted and evaluation is
// read-only, so the handle value itself may cross threads.
unsafe impl Send for RawNode {}
unsafe impl Sync for RawNode {}

impl RawNode {
    /// `None` for the null handle the engine returns on failure.
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(RawNode)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// Native type code of a node variable, as returned by `fnGetMetadataVariableType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    Float,
    Int,
    Enum,
}

impl VariableType {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(VariableType::Float),
            1 => Some(VariableType::Int),
            2 => Some(VariableType::Enum),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            VariableType::Float => 0,
            VariableType::Int => 1,
            VariableType::Enum => 2,
        }
    }
}

/// One-to-one view of the native function table.
///
/// Metadata methods returning `Option`/`Vec` with a default body cover optional
/// descriptive symbols that older engine builds do not export.
pub trait NoiseEngine: Send + Sync {
    /// Human-readable origin of this engine (library path, fixture name...).
    fn describe(&self) -> String;

    /// The grid-generation ABI this engine understands.
    fn grid_convention(&self) -> GridConvention;

    // --- Lifecycle -------------------------------------------------------

    fn new_from_metadata(&self, id: i32, simd_level: u32) -> Option<RawNode>;

    fn new_from_encoded_node_tree(&self, encoded: &CStr, simd_level: u32) -> Option<RawNode>;

    /// Drop this caller's reference to `node`.
    ///
    /// # Safety
    /// `node` must have been produced by this engine and not released before. It must
    /// not be used again afterwards.
    unsafe fn delete_node_ref(&self, node: RawNode);

    fn simd_level(&self, node: RawNode) -> u32;

    fn metadata_id(&self, node: RawNode) -> i32;

    // --- Node kind metadata ---------------------------------------------

    fn metadata_count(&self) -> i32;

    fn metadata_name(&self, id: i32) -> Option<String>;

    fn metadata_description(&self, _id: i32) -> Option<String> {
        None
    }

    fn metadata_group_names(&self, _id: i32) -> Vec<String> {
        Vec::new()
    }

    // Variables

    fn variable_count(&self, id: i32) -> i32;

    fn variable_name(&self, id: i32, index: i32) -> Option<String>;

    fn variable_type(&self, id: i32, index: i32) -> i32;

    fn variable_dimension_idx(&self, id: i32, index: i32) -> i32;

    fn variable_description(&self, _id: i32, _index: i32) -> Option<String> {
        None
    }

    fn variable_default_float(&self, _id: i32, _index: i32) -> Option<f32> {
        None
    }

    fn variable_default_int_enum(&self, _id: i32, _index: i32) -> Option<i32> {
        None
    }

    fn variable_min_float(&self, _id: i32, _index: i32) -> Option<f32> {
        None
    }

    fn variable_max_float(&self, _id: i32, _index: i32) -> Option<f32> {
        None
    }

    fn enum_count(&self, id: i32, index: i32) -> i32;

    fn enum_name(&self, id: i32, index: i32, enum_index: i32) -> Option<String>;

    // Node lookups

    fn node_lookup_count(&self, id: i32) -> i32;

    fn node_lookup_name(&self, id: i32, index: i32) -> Option<String>;

    fn node_lookup_dimension_idx(&self, id: i32, index: i32) -> i32;

    fn node_lookup_description(&self, _id: i32, _index: i32) -> Option<String> {
        None
    }

    // Hybrids

    fn hybrid_count(&self, id: i32) -> i32;

    fn hybrid_name(&self, id: i32, index: i32) -> Option<String>;

    fn hybrid_dimension_idx(&self, id: i32, index: i32) -> i32;

    fn hybrid_description(&self, _id: i32, _index: i32) -> Option<String> {
        None
    }

    fn hybrid_default(&self, _id: i32, _index: i32) -> Option<f32> {
        None
    }

    // --- Mutation --------------------------------------------------------

    fn set_variable_float(&self, node: RawNode, index: i32, value: f32) -> bool;

    fn set_variable_int_enum(&self, node: RawNode, index: i32, value: i32) -> bool;

    fn set_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool;

    fn set_hybrid_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool;

    fn set_hybrid_float(&self, node: RawNode, index: i32, value: f32) -> bool;

    // --- Evaluation ------------------------------------------------------
    //
    // Every batch call writes straight into `out` and returns `[min, max]` of what it
    // wrote, or `None` when the request uses a grid convention this engine does not
    // expose (nothing is written in that case).

    /// # Safety
    /// `out.len()` must equal the product of `grid.count`, and every count must be
    /// non-negative.
    unsafe fn gen_uniform_grid_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<2>,
        seed: i32,
    ) -> Option<[f32; 2]>;

    /// # Safety
    /// Same contract as [`NoiseEngine::gen_uniform_grid_2d`].
    unsafe fn gen_uniform_grid_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<3>,
        seed: i32,
    ) -> Option<[f32; 2]>;

    /// # Safety
    /// Same contract as [`NoiseEngine::gen_uniform_grid_2d`].
    unsafe fn gen_uniform_grid_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<4>,
        seed: i32,
    ) -> Option<[f32; 2]>;

    /// # Safety
    /// `out.len()` must equal `count[0] * count[1]`, both non-negative.
    unsafe fn gen_tileable_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        count: [i32; 2],
        scale: TileScale,
        seed: i32,
    ) -> Option<[f32; 2]>;

    /// # Safety
    /// Every slice in `positions` must have exactly `out.len()` elements.
    unsafe fn gen_position_array_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 2],
        offset: [f32; 2],
        seed: i32,
    ) -> [f32; 2];

    /// # Safety
    /// Every slice in `positions` must have exactly `out.len()` elements.
    unsafe fn gen_position_array_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 3],
        offset: [f32; 3],
        seed: i32,
    ) -> [f32; 2];

    /// # Safety
    /// Every slice in `positions` must have exactly `out.len()` elements.
    unsafe fn gen_position_array_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 4],
        offset: [f32; 4],
        seed: i32,
    ) -> [f32; 2];

    fn gen_single_2d(&self, node: RawNode, position: [f32; 2], seed: i32) -> f32;

    fn gen_single_3d(&self, node: RawNode, position: [f32; 3], seed: i32) -> f32;

    fn gen_single_4d(&self, node: RawNode, position: [f32; 4], seed: i32) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_is_not_a_handle() {
        assert!(RawNode::from_ptr(std::ptr::null_mut()).is_none());
    }

    #[test]
    fn variable_type_codes_round_trip() {
        for ty in [VariableType::Float, VariableType::Int, VariableType::Enum] {
            assert_eq!(VariableType::from_code(ty.code()), Some(ty));
        }
        assert_eq!(VariableType::from_code(7), None);
    }
}
