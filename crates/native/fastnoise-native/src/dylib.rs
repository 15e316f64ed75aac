//! [`NoiseEngine`] backed by the FastNoise shared library.
//!
//! Every required entry point is resolved once, when the library is opened, so a broken
//! installation fails at load time rather than on first use. Descriptive metadata
//! symbols are optional; engine builds without them simply report no descriptions.

use std::ffi::{c_char, c_int, c_uint, c_void, CStr};
use std::path::{Path, PathBuf};

use libloading::Library;
use log::{info, warn};

use crate::config::{EngineConfig, GridConvention};
use crate::engine::{NoiseEngine, RawNode};
use crate::error::LoadError;
use crate::grid::{Spacing, TileScale, UniformGrid};

type NodePtr = *const c_void;
type CStrPtr = *const c_char;

type NewFromMetadataFn = unsafe extern "C" fn(c_int, c_uint) -> *mut c_void;
type NewFromEncodedFn = unsafe extern "C" fn(CStrPtr, c_uint) -> *mut c_void;
type DeleteNodeRefFn = unsafe extern "C" fn(*mut c_void);
type NodeUintFn = unsafe extern "C" fn(NodePtr) -> c_uint;
type NodeIntFn = unsafe extern "C" fn(NodePtr) -> c_int;

type CountFn = unsafe extern "C" fn() -> c_int;
type IdIntFn = unsafe extern "C" fn(c_int) -> c_int;
type IdStrFn = unsafe extern "C" fn(c_int) -> CStrPtr;
type IdIdxIntFn = unsafe extern "C" fn(c_int, c_int) -> c_int;
type IdIdxStrFn = unsafe extern "C" fn(c_int, c_int) -> CStrPtr;
type IdIdxFloatFn = unsafe extern "C" fn(c_int, c_int) -> f32;
type EnumNameFn = unsafe extern "C" fn(c_int, c_int, c_int) -> CStrPtr;

type SetFloatFn = unsafe extern "C" fn(*mut c_void, c_int, f32) -> bool;
type SetIntFn = unsafe extern "C" fn(*mut c_void, c_int, c_int) -> bool;
type SetNodeFn = unsafe extern "C" fn(*mut c_void, c_int, NodePtr) -> bool;

type SteppedGrid2Fn =
    unsafe extern "C" fn(NodePtr, *mut f32, f32, f32, c_int, c_int, f32, f32, c_int, *mut f32);
type SteppedGrid3Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    f32,
    f32,
    f32,
    c_int,
    c_int,
    c_int,
    f32,
    f32,
    f32,
    c_int,
    *mut f32,
);
type SteppedGrid4Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    f32,
    f32,
    f32,
    f32,
    c_int,
    c_int,
    c_int,
    c_int,
    f32,
    f32,
    f32,
    f32,
    c_int,
    *mut f32,
);
type SteppedTileable2Fn =
    unsafe extern "C" fn(NodePtr, *mut f32, c_int, c_int, f32, f32, c_int, *mut f32);

type FrequencyGrid2Fn =
    unsafe extern "C" fn(NodePtr, *mut f32, c_int, c_int, c_int, c_int, f32, c_int, *mut f32);
type FrequencyGrid3Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    f32,
    c_int,
    *mut f32,
);
type FrequencyGrid4Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    c_int,
    f32,
    c_int,
    *mut f32,
);
type FrequencyTileable2Fn =
    unsafe extern "C" fn(NodePtr, *mut f32, c_int, c_int, f32, c_int, *mut f32);

type PositionArray2Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    c_int,
    *const f32,
    *const f32,
    f32,
    f32,
    c_int,
    *mut f32,
);
type PositionArray3Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    c_int,
    *const f32,
    *const f32,
    *const f32,
    f32,
    f32,
    f32,
    c_int,
    *mut f32,
);
type PositionArray4Fn = unsafe extern "C" fn(
    NodePtr,
    *mut f32,
    c_int,
    *const f32,
    *const f32,
    *const f32,
    *const f32,
    f32,
    f32,
    f32,
    f32,
    c_int,
    *mut f32,
);

type Single2Fn = unsafe extern "C" fn(NodePtr, f32, f32, c_int) -> f32;
type Single3Fn = unsafe extern "C" fn(NodePtr, f32, f32, f32, c_int) -> f32;
type Single4Fn = unsafe extern "C" fn(NodePtr, f32, f32, f32, f32, c_int) -> f32;

struct SteppedGridFns {
    uniform_2d: SteppedGrid2Fn,
    uniform_3d: SteppedGrid3Fn,
    uniform_4d: SteppedGrid4Fn,
    tileable_2d: SteppedTileable2Fn,
}

struct FrequencyGridFns {
    uniform_2d: FrequencyGrid2Fn,
    uniform_3d: FrequencyGrid3Fn,
    uniform_4d: FrequencyGrid4Fn,
    tileable_2d: FrequencyTileable2Fn,
}

/// The grid entry points share symbol names across conventions; only the signature differs.
enum GridFns {
    Stepped(SteppedGridFns),
    Frequency(FrequencyGridFns),
}

struct FunctionTable {
    new_from_metadata: NewFromMetadataFn,
    new_from_encoded_node_tree: NewFromEncodedFn,
    delete_node_ref: DeleteNodeRefFn,
    get_simd_level: NodeUintFn,
    get_metadata_id: NodeIntFn,

    metadata_count: CountFn,
    metadata_name: IdStrFn,
    metadata_description: Option<IdStrFn>,
    metadata_group_count: Option<IdIntFn>,
    metadata_group_name: Option<IdIdxStrFn>,

    variable_count: IdIntFn,
    variable_name: IdIdxStrFn,
    variable_type: IdIdxIntFn,
    variable_dimension_idx: IdIdxIntFn,
    variable_description: Option<IdIdxStrFn>,
    variable_default_float: Option<IdIdxFloatFn>,
    variable_default_int_enum: Option<IdIdxIntFn>,
    variable_min_float: Option<IdIdxFloatFn>,
    variable_max_float: Option<IdIdxFloatFn>,
    enum_count: IdIdxIntFn,
    enum_name: EnumNameFn,

    node_lookup_count: IdIntFn,
    node_lookup_name: IdIdxStrFn,
    node_lookup_dimension_idx: IdIdxIntFn,
    node_lookup_description: Option<IdIdxStrFn>,

    hybrid_count: IdIntFn,
    hybrid_name: IdIdxStrFn,
    hybrid_dimension_idx: IdIdxIntFn,
    hybrid_description: Option<IdIdxStrFn>,
    hybrid_default: Option<IdIdxFloatFn>,

    set_variable_float: SetFloatFn,
    set_variable_int_enum: SetIntFn,
    set_node_lookup: SetNodeFn,
    set_hybrid_node_lookup: SetNodeFn,
    set_hybrid_float: SetFloatFn,

    grid: GridFns,
    position_array_2d: PositionArray2Fn,
    position_array_3d: PositionArray3Fn,
    position_array_4d: PositionArray4Fn,
    single_2d: Single2Fn,
    single_3d: Single3Fn,
    single_4d: Single4Fn,
}

/// Open a shared library, mapping loader failures to [`LoadError::LibraryNotFound`].
pub fn open_library(path: &Path) -> Result<Library, LoadError> {
    // Loading runs the library's initialisers; the engine libraries have no
    // initialisation side effects beyond registering their node kinds.
    unsafe { Library::new(path) }.map_err(|e| LoadError::LibraryNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

unsafe fn required<T: Copy>(library: &Library, symbol: &'static str) -> Result<T, LoadError> {
    library
        .get::<T>(symbol.as_bytes())
        .map(|s| *s)
        .map_err(|e| LoadError::MissingSymbol {
            symbol,
            reason: e.to_string(),
        })
}

unsafe fn optional<T: Copy>(library: &Library, symbol: &'static str) -> Option<T> {
    match library.get::<T>(symbol.as_bytes()) {
        Ok(s) => Some(*s),
        Err(_) => {
            warn!("engine does not export {symbol}; related metadata will be empty");
            None
        }
    }
}

unsafe fn owned_string(ptr: CStrPtr) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

impl FunctionTable {
    unsafe fn resolve(library: &Library, convention: GridConvention) -> Result<Self, LoadError> {
        let grid = match convention {
            GridConvention::Stepped => GridFns::Stepped(SteppedGridFns {
                uniform_2d: required(library, "fnGenUniformGrid2D")?,
                uniform_3d: required(library, "fnGenUniformGrid3D")?,
                uniform_4d: required(library, "fnGenUniformGrid4D")?,
                tileable_2d: required(library, "fnGenTileable2D")?,
            }),
            GridConvention::Frequency => GridFns::Frequency(FrequencyGridFns {
                uniform_2d: required(library, "fnGenUniformGrid2D")?,
                uniform_3d: required(library, "fnGenUniformGrid3D")?,
                uniform_4d: required(library, "fnGenUniformGrid4D")?,
                tileable_2d: required(library, "fnGenTileable2D")?,
            }),
        };

        Ok(FunctionTable {
            new_from_metadata: required(library, "fnNewFromMetadata")?,
            new_from_encoded_node_tree: required(library, "fnNewFromEncodedNodeTree")?,
            delete_node_ref: required(library, "fnDeleteNodeRef")?,
            get_simd_level: required(library, "fnGetSIMDLevel")?,
            get_metadata_id: required(library, "fnGetMetadataID")?,

            metadata_count: required(library, "fnGetMetadataCount")?,
            metadata_name: required(library, "fnGetMetadataName")?,
            metadata_description: optional(library, "fnGetMetadataDescription"),
            metadata_group_count: optional(library, "fnGetMetadataGroupCount"),
            metadata_group_name: optional(library, "fnGetMetadataGroupName"),

            variable_count: required(library, "fnGetMetadataVariableCount")?,
            variable_name: required(library, "fnGetMetadataVariableName")?,
            variable_type: required(library, "fnGetMetadataVariableType")?,
            variable_dimension_idx: required(library, "fnGetMetadataVariableDimensionIdx")?,
            variable_description: optional(library, "fnGetMetadataVariableDescription"),
            variable_default_float: optional(library, "fnGetMetadataVariableDefaultFloat"),
            variable_default_int_enum: optional(library, "fnGetMetadataVariableDefaultIntEnum"),
            variable_min_float: optional(library, "fnGetMetadataVariableMinFloat"),
            variable_max_float: optional(library, "fnGetMetadataVariableMaxFloat"),
            enum_count: required(library, "fnGetMetadataEnumCount")?,
            enum_name: required(library, "fnGetMetadataEnumName")?,

            node_lookup_count: required(library, "fnGetMetadataNodeLookupCount")?,
            node_lookup_name: required(library, "fnGetMetadataNodeLookupName")?,
            node_lookup_dimension_idx: required(library, "fnGetMetadataNodeLookupDimensionIdx")?,
            node_lookup_description: optional(library, "fnGetMetadataNodeLookupDescription"),

            hybrid_count: required(library, "fnGetMetadataHybridCount")?,
            hybrid_name: required(library, "fnGetMetadataHybridName")?,
            hybrid_dimension_idx: required(library, "fnGetMetadataHybridDimensionIdx")?,
            hybrid_description: optional(library, "fnGetMetadataHybridDescription"),
            hybrid_default: optional(library, "fnGetMetadataHybridDefault"),

            set_variable_float: required(library, "fnSetVariableFloat")?,
            set_variable_int_enum: required(library, "fnSetVariableIntEnum")?,
            set_node_lookup: required(library, "fnSetNodeLookup")?,
            set_hybrid_node_lookup: required(library, "fnSetHybridNodeLookup")?,
            set_hybrid_float: required(library, "fnSetHybridFloat")?,

            grid,
            position_array_2d: required(library, "fnGenPositionArray2D")?,
            position_array_3d: required(library, "fnGenPositionArray3D")?,
            position_array_4d: required(library, "fnGenPositionArray4D")?,
            single_2d: required(library, "fnGenSingle2D")?,
            single_3d: required(library, "fnGenSingle3D")?,
            single_4d: required(library, "fnGenSingle4D")?,
        })
    }
}

/// The engine as a loaded shared library.
pub struct DylibEngine {
    table: FunctionTable,
    path: PathBuf,
    convention: GridConvention,
    // Declared last: the function pointers above must not outlive the mapping.
    _library: Library,
}

impl std::fmt::Debug for DylibEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DylibEngine")
            .field("path", &self.path)
            .field("convention", &self.convention)
            .finish_non_exhaustive()
    }
}

impl DylibEngine {
    /// Open the library named by `config` and resolve its function table.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        let path = config.resolved_library_path();
        let library = open_library(&path)?;
        let table = unsafe { FunctionTable::resolve(&library, config.grid_convention)? };
        info!(
            "loaded FastNoise engine from {} ({} grid convention)",
            path.display(),
            config.grid_convention
        );
        Ok(DylibEngine {
            table,
            path,
            convention: config.grid_convention,
            _library: library,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NoiseEngine for DylibEngine {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn grid_convention(&self) -> GridConvention {
        self.convention
    }

    fn new_from_metadata(&self, id: i32, simd_level: u32) -> Option<RawNode> {
        RawNode::from_ptr(unsafe { (self.table.new_from_metadata)(id, simd_level) })
    }

    fn new_from_encoded_node_tree(&self, encoded: &CStr, simd_level: u32) -> Option<RawNode> {
        RawNode::from_ptr(unsafe {
            (self.table.new_from_encoded_node_tree)(encoded.as_ptr(), simd_level)
        })
    }

    unsafe fn delete_node_ref(&self, node: RawNode) {
        (self.table.delete_node_ref)(node.as_ptr())
    }

    fn simd_level(&self, node: RawNode) -> u32 {
        unsafe { (self.table.get_simd_level)(node.as_ptr()) }
    }

    fn metadata_id(&self, node: RawNode) -> i32 {
        unsafe { (self.table.get_metadata_id)(node.as_ptr()) }
    }

    fn metadata_count(&self) -> i32 {
        unsafe { (self.table.metadata_count)() }
    }

    fn metadata_name(&self, id: i32) -> Option<String> {
        unsafe { owned_string((self.table.metadata_name)(id)) }
    }

    fn metadata_description(&self, id: i32) -> Option<String> {
        let f = self.table.metadata_description?;
        unsafe { owned_string(f(id)) }
    }

    fn metadata_group_names(&self, id: i32) -> Vec<String> {
        let (Some(count), Some(name)) = (
            self.table.metadata_group_count,
            self.table.metadata_group_name,
        ) else {
            return Vec::new();
        };
        let count = unsafe { count(id) };
        (0..count.max(0))
            .filter_map(|group| unsafe { owned_string(name(id, group)) })
            .collect()
    }

    fn variable_count(&self, id: i32) -> i32 {
        unsafe { (self.table.variable_count)(id) }
    }

    fn variable_name(&self, id: i32, index: i32) -> Option<String> {
        unsafe { owned_string((self.table.variable_name)(id, index)) }
    }

    fn variable_type(&self, id: i32, index: i32) -> i32 {
        unsafe { (self.table.variable_type)(id, index) }
    }

    fn variable_dimension_idx(&self, id: i32, index: i32) -> i32 {
        unsafe { (self.table.variable_dimension_idx)(id, index) }
    }

    fn variable_description(&self, id: i32, index: i32) -> Option<String> {
        let f = self.table.variable_description?;
        unsafe { owned_string(f(id, index)) }
    }

    fn variable_default_float(&self, id: i32, index: i32) -> Option<f32> {
        let f = self.table.variable_default_float?;
        Some(unsafe { f(id, index) })
    }

    fn variable_default_int_enum(&self, id: i32, index: i32) -> Option<i32> {
        let f = self.table.variable_default_int_enum?;
        Some(unsafe { f(id, index) })
    }

    fn variable_min_float(&self, id: i32, index: i32) -> Option<f32> {
        let f = self.table.variable_min_float?;
        Some(unsafe { f(id, index) })
    }

    fn variable_max_float(&self, id: i32, index: i32) -> Option<f32> {
        let f = self.table.variable_max_float?;
        Some(unsafe { f(id, index) })
    }

    fn enum_count(&self, id: i32, index: i32) -> i32 {
        unsafe { (self.table.enum_count)(id, index) }
    }

    fn enum_name(&self, id: i32, index: i32, enum_index: i32) -> Option<String> {
        unsafe { owned_string((self.table.enum_name)(id, index, enum_index)) }
    }

    fn node_lookup_count(&self, id: i32) -> i32 {
        unsafe { (self.table.node_lookup_count)(id) }
    }

    fn node_lookup_name(&self, id: i32, index: i32) -> Option<String> {
        unsafe { owned_string((self.table.node_lookup_name)(id, index)) }
    }

    fn node_lookup_dimension_idx(&self, id: i32, index: i32) -> i32 {
        unsafe { (self.table.node_lookup_dimension_idx)(id, index) }
    }

    fn node_lookup_description(&self, id: i32, index: i32) -> Option<String> {
        let f = self.table.node_lookup_description?;
        unsafe { owned_string(f(id, index)) }
    }

    fn hybrid_count(&self, id: i32) -> i32 {
        unsafe { (self.table.hybrid_count)(id) }
    }

    fn hybrid_name(&self, id: i32, index: i32) -> Option<String> {
        unsafe { owned_string((self.table.hybrid_name)(id, index)) }
    }

    fn hybrid_dimension_idx(&self, id: i32, index: i32) -> i32 {
        unsafe { (self.table.hybrid_dimension_idx)(id, index) }
    }

    fn hybrid_description(&self, id: i32, index: i32) -> Option<String> {
        let f = self.table.hybrid_description?;
        unsafe { owned_string(f(id, index)) }
    }

    fn hybrid_default(&self, id: i32, index: i32) -> Option<f32> {
        let f = self.table.hybrid_default?;
        Some(unsafe { f(id, index) })
    }

    fn set_variable_float(&self, node: RawNode, index: i32, value: f32) -> bool {
        unsafe { (self.table.set_variable_float)(node.as_ptr(), index, value) }
    }

    fn set_variable_int_enum(&self, node: RawNode, index: i32, value: i32) -> bool {
        unsafe { (self.table.set_variable_int_enum)(node.as_ptr(), index, value) }
    }

    fn set_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool {
        unsafe { (self.table.set_node_lookup)(node.as_ptr(), index, input.as_ptr()) }
    }

    fn set_hybrid_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool {
        unsafe { (self.table.set_hybrid_node_lookup)(node.as_ptr(), index, input.as_ptr()) }
    }

    fn set_hybrid_float(&self, node: RawNode, index: i32, value: f32) -> bool {
        unsafe { (self.table.set_hybrid_float)(node.as_ptr(), index, value) }
    }

    unsafe fn gen_uniform_grid_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<2>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        let mut min_max = [0.0f32; 2];
        let [x_count, y_count] = grid.count;
        match (&self.table.grid, grid.spacing) {
            (GridFns::Stepped(fns), Spacing::Stepped { offset, step }) => (fns.uniform_2d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                offset[0],
                offset[1],
                x_count,
                y_count,
                step[0],
                step[1],
                seed,
                min_max.as_mut_ptr(),
            ),
            (GridFns::Frequency(fns), Spacing::Frequency { start, frequency }) => (fns
                .uniform_2d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                start[0],
                start[1],
                x_count,
                y_count,
                frequency,
                seed,
                min_max.as_mut_ptr(),
            ),
            _ => return None,
        }
        Some(min_max)
    }

    unsafe fn gen_uniform_grid_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<3>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        let mut min_max = [0.0f32; 2];
        let [x_count, y_count, z_count] = grid.count;
        match (&self.table.grid, grid.spacing) {
            (GridFns::Stepped(fns), Spacing::Stepped { offset, step }) => (fns.uniform_3d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                offset[0],
                offset[1],
                offset[2],
                x_count,
                y_count,
                z_count,
                step[0],
                step[1],
                step[2],
                seed,
                min_max.as_mut_ptr(),
            ),
            (GridFns::Frequency(fns), Spacing::Frequency { start, frequency }) => (fns
                .uniform_3d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                start[0],
                start[1],
                start[2],
                x_count,
                y_count,
                z_count,
                frequency,
                seed,
                min_max.as_mut_ptr(),
            ),
            _ => return None,
        }
        Some(min_max)
    }

    unsafe fn gen_uniform_grid_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<4>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        let mut min_max = [0.0f32; 2];
        let [x_count, y_count, z_count, w_count] = grid.count;
        match (&self.table.grid, grid.spacing) {
            (GridFns::Stepped(fns), Spacing::Stepped { offset, step }) => (fns.uniform_4d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                offset[0],
                offset[1],
                offset[2],
                offset[3],
                x_count,
                y_count,
                z_count,
                w_count,
                step[0],
                step[1],
                step[2],
                step[3],
                seed,
                min_max.as_mut_ptr(),
            ),
            (GridFns::Frequency(fns), Spacing::Frequency { start, frequency }) => (fns
                .uniform_4d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                start[0],
                start[1],
                start[2],
                start[3],
                x_count,
                y_count,
                z_count,
                w_count,
                frequency,
                seed,
                min_max.as_mut_ptr(),
            ),
            _ => return None,
        }
        Some(min_max)
    }

    unsafe fn gen_tileable_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        count: [i32; 2],
        scale: TileScale,
        seed: i32,
    ) -> Option<[f32; 2]> {
        let mut min_max = [0.0f32; 2];
        match (&self.table.grid, scale) {
            (GridFns::Stepped(fns), TileScale::Stepped(step)) => (fns.tileable_2d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                count[0],
                count[1],
                step[0],
                step[1],
                seed,
                min_max.as_mut_ptr(),
            ),
            (GridFns::Frequency(fns), TileScale::Frequency(frequency)) => (fns.tileable_2d)(
                node.as_ptr(),
                out.as_mut_ptr(),
                count[0],
                count[1],
                frequency,
                seed,
                min_max.as_mut_ptr(),
            ),
            _ => return None,
        }
        Some(min_max)
    }

    unsafe fn gen_position_array_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 2],
        offset: [f32; 2],
        seed: i32,
    ) -> [f32; 2] {
        let mut min_max = [0.0f32; 2];
        (self.table.position_array_2d)(
            node.as_ptr(),
            out.as_mut_ptr(),
            out.len() as c_int,
            positions[0].as_ptr(),
            positions[1].as_ptr(),
            offset[0],
            offset[1],
            seed,
            min_max.as_mut_ptr(),
        );
        min_max
    }

    unsafe fn gen_position_array_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 3],
        offset: [f32; 3],
        seed: i32,
    ) -> [f32; 2] {
        let mut min_max = [0.0f32; 2];
        (self.table.position_array_3d)(
            node.as_ptr(),
            out.as_mut_ptr(),
            out.len() as c_int,
            positions[0].as_ptr(),
            positions[1].as_ptr(),
            positions[2].as_ptr(),
            offset[0],
            offset[1],
            offset[2],
            seed,
            min_max.as_mut_ptr(),
        );
        min_max
    }

    unsafe fn gen_position_array_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 4],
        offset: [f32; 4],
        seed: i32,
    ) -> [f32; 2] {
        let mut min_max = [0.0f32; 2];
        (self.table.position_array_4d)(
            node.as_ptr(),
            out.as_mut_ptr(),
            out.len() as c_int,
            positions[0].as_ptr(),
            positions[1].as_ptr(),
            positions[2].as_ptr(),
            positions[3].as_ptr(),
            offset[0],
            offset[1],
            offset[2],
            offset[3],
            seed,
            min_max.as_mut_ptr(),
        );
        min_max
    }

    fn gen_single_2d(&self, node: RawNode, position: [f32; 2], seed: i32) -> f32 {
        unsafe { (self.table.single_2d)(node.as_ptr(), position[0], position[1], seed) }
    }

    fn gen_single_3d(&self, node: RawNode, position: [f32; 3], seed: i32) -> f32 {
        unsafe {
            (self.table.single_3d)(node.as_ptr(), position[0], position[1], position[2], seed)
        }
    }

    fn gen_single_4d(&self, node: RawNode, position: [f32; 4], seed: i32) -> f32 {
        unsafe {
            (self.table.single_4d)(
                node.as_ptr(),
                position[0],
                position[1],
                position[2],
                position[3],
                seed,
            )
        }
    }
}
