use std::ffi::CStr;
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use anyhow::Result;
use fastnoise_native::{GridConvention, NoiseEngine, RawNode, Spacing, TileScale, UniformGrid};
use serde::{Deserialize, Serialize};

use crate::catalog::{default_catalog, CatalogManifest, KindSpec, VariableKind};

/// Prefix of every tree produced by [`MockEngine::encode`].
pub const ENCODED_PREFIX: &str = "mock1:";

/// Counts of native calls observed by a [`MockEngine`].
#[derive(Debug, Default)]
pub struct CallCounts {
    allocations: AtomicUsize,
    releases: AtomicUsize,
    setter_calls: AtomicUsize,
    generation_calls: AtomicUsize,
}

impl CallCounts {
    /// Handles handed out by `new_from_metadata` / `new_from_encoded_node_tree`.
    pub fn allocations(&self) -> usize {
        self.allocations.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    /// Handles handed out and not yet released.
    pub fn live_handles(&self) -> usize {
        self.allocations() - self.releases()
    }

    pub fn setter_calls(&self) -> usize {
        self.setter_calls.load(Ordering::SeqCst)
    }

    /// Batch and single-point evaluation calls.
    pub fn generation_calls(&self) -> usize {
        self.generation_calls.load(Ordering::SeqCst)
    }

    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy)]
enum Scalar {
    Float(f32),
    Int(i32),
}

impl Scalar {
    fn as_f32(self) -> f32 {
        match self {
            Scalar::Float(v) => v,
            Scalar::Int(v) => v as f32,
        }
    }

    fn as_i32(self) -> i32 {
        match self {
            Scalar::Float(v) => v as i32,
            Scalar::Int(v) => v,
        }
    }
}

#[derive(Debug, Clone)]
enum Hybrid {
    Constant(f32),
    Node(Arc<MockNode>),
}

#[derive(Debug, Clone)]
struct NodeState {
    variables: Vec<Scalar>,
    lookups: Vec<Option<Arc<MockNode>>>,
    hybrids: Vec<Hybrid>,
}

#[derive(Debug)]
struct MockNode {
    kind: usize,
    simd_level: u32,
    state: RwLock<NodeState>,
}

impl MockNode {
    fn read(&self) -> RwLockReadGuard<'_, NodeState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct EncodedNode {
    kind: String,
    variables: Vec<EncodedScalar>,
    lookups: Vec<Option<EncodedNode>>,
    hybrids: Vec<EncodedHybrid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EncodedScalar {
    Float(f32),
    Int(i32),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EncodedHybrid {
    Constant(f32),
    Node(Box<EncodedNode>),
}

/// Deterministic in-process engine over a JSON catalog.
///
/// Outputs are smooth trigonometric functions of position and seed, so results are
/// reproducible and differ between seeds, kinds and parameter values without
/// resembling real noise.
#[derive(Debug)]
pub struct MockEngine {
    kinds: Vec<KindSpec>,
    keys: Vec<String>,
    convention: GridConvention,
    calls: CallCounts,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::from_manifest(default_catalog().clone())
    }
}

impl MockEngine {
    /// Engine over the bundled `fixtures/catalog.json`, stepped grid convention.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: CatalogManifest) -> Self {
        let keys = manifest.nodes.iter().map(|k| fold_name(&k.name)).collect();
        Self {
            kinds: manifest.nodes,
            keys,
            convention: GridConvention::Stepped,
            calls: CallCounts::default(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(Self::from_manifest(CatalogManifest::from_json(raw)?))
    }

    pub fn with_convention(mut self, convention: GridConvention) -> Self {
        self.convention = convention;
        self
    }

    pub fn calls(&self) -> &CallCounts {
        &self.calls
    }

    /// Serialise the tree rooted at `node` into a string accepted by
    /// `new_from_encoded_node_tree`.
    pub fn encode(&self, node: RawNode) -> String {
        let tree = self.encode_node(node_ref(node));
        let json = serde_json::to_string(&tree).unwrap_or_default();
        format!("{ENCODED_PREFIX}{json}")
    }

    fn encode_node(&self, node: &MockNode) -> EncodedNode {
        let state = node.read();
        EncodedNode {
            kind: self.kinds[node.kind].name.clone(),
            variables: state
                .variables
                .iter()
                .map(|v| match *v {
                    Scalar::Float(f) => EncodedScalar::Float(f),
                    Scalar::Int(i) => EncodedScalar::Int(i),
                })
                .collect(),
            lookups: state
                .lookups
                .iter()
                .map(|l| l.as_ref().map(|n| self.encode_node(n)))
                .collect(),
            hybrids: state
                .hybrids
                .iter()
                .map(|h| match h {
                    Hybrid::Constant(v) => EncodedHybrid::Constant(*v),
                    Hybrid::Node(n) => EncodedHybrid::Node(Box::new(self.encode_node(n))),
                })
                .collect(),
        }
    }

    fn decode_node(&self, encoded: EncodedNode, simd_level: u32) -> Option<Arc<MockNode>> {
        let kind = self.keys.iter().position(|k| *k == fold_name(&encoded.kind))?;
        let spec = &self.kinds[kind];
        if encoded.variables.len() != spec.variables.len()
            || encoded.lookups.len() != spec.lookups.len()
            || encoded.hybrids.len() != spec.hybrids.len()
        {
            return None;
        }
        let variables = encoded
            .variables
            .into_iter()
            .map(|v| match v {
                EncodedScalar::Float(f) => Scalar::Float(f),
                EncodedScalar::Int(i) => Scalar::Int(i),
            })
            .collect();
        let mut lookups = Vec::with_capacity(encoded.lookups.len());
        for lookup in encoded.lookups {
            lookups.push(match lookup {
                Some(child) => Some(self.decode_node(child, simd_level)?),
                None => None,
            });
        }
        let mut hybrids = Vec::with_capacity(encoded.hybrids.len());
        for hybrid in encoded.hybrids {
            hybrids.push(match hybrid {
                EncodedHybrid::Constant(v) => Hybrid::Constant(v),
                EncodedHybrid::Node(child) => Hybrid::Node(self.decode_node(*child, simd_level)?),
            });
        }
        Some(Arc::new(MockNode {
            kind,
            simd_level,
            state: RwLock::new(NodeState {
                variables,
                lookups,
                hybrids,
            }),
        }))
    }

    fn hand_out(&self, node: Arc<MockNode>) -> Option<RawNode> {
        CallCounts::bump(&self.calls.allocations);
        RawNode::from_ptr(Arc::into_raw(node) as *mut _)
    }

    fn kind(&self, id: i32) -> Option<&KindSpec> {
        usize::try_from(id).ok().and_then(|i| self.kinds.get(i))
    }

    fn entry<T>(items: &[T], index: i32) -> Option<&T> {
        usize::try_from(index).ok().and_then(|i| items.get(i))
    }

    fn sample(&self, node: &MockNode, p: [f32; 4], seed: i32) -> f32 {
        let state = node.read();
        let var = |i: usize| state.variables.get(i).copied().map_or(0.0, Scalar::as_f32);
        let var_int = |i: usize| state.variables.get(i).copied().map_or(0, Scalar::as_i32);
        let source = |i: usize, q: [f32; 4]| {
            state
                .lookups
                .get(i)
                .and_then(Option::as_ref)
                .map_or(0.0, |n| self.sample(n, q, seed))
        };
        let hybrid = |i: usize| match state.hybrids.get(i) {
            Some(Hybrid::Constant(v)) => *v,
            Some(Hybrid::Node(n)) => self.sample(n, p, seed),
            None => 0.0,
        };

        match self.keys[node.kind].as_str() {
            "constant" => var(0),
            "white" => white(p, seed),
            "simplex" => {
                let scale = var(0).max(f32::EPSILON);
                wave(p.map(|c| c / scale), seed)
            }
            "cellulardistance" => {
                let base = wave(p, seed) * hybrid(0);
                let shaped = match var_int(0) {
                    1 => base * base,
                    2 => base.abs(),
                    3 => 0.5 * (base * base + base.abs()),
                    4 => base.abs().max(0.5 * base * base),
                    _ => base,
                };
                shaped + 0.01 * (var_int(1) - var_int(2)) as f32 + 0.001 * var_int(3) as f32
            }
            "fractalfbm" => {
                let lacunarity = var(1);
                let gain = hybrid(0);
                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                let mut sum = 0.0;
                for _ in 0..var_int(0).max(1) {
                    sum += amplitude * source(0, p.map(|c| c * frequency));
                    amplitude *= gain;
                    frequency *= lacunarity;
                }
                sum
            }
            "domainscale" => {
                let scaling = var(0);
                source(0, p.map(|c| c * scaling))
            }
            "domainoffset" => {
                let mut q = p;
                for (axis, c) in q.iter_mut().enumerate() {
                    *c += hybrid(axis);
                }
                source(0, q)
            }
            "add" => source(0, p) + hybrid(0),
            _ => 0.0,
        }
    }

    fn fill(
        &self,
        node: RawNode,
        out: &mut [f32],
        seed: i32,
        position: impl Fn(usize) -> [f32; 4],
    ) -> [f32; 2] {
        CallCounts::bump(&self.calls.generation_calls);
        let node = node_ref(node);
        let mut min_max = [f32::INFINITY, f32::NEG_INFINITY];
        for (i, slot) in out.iter_mut().enumerate() {
            let v = self.sample(node, position(i), seed);
            *slot = v;
            min_max[0] = min_max[0].min(v);
            min_max[1] = min_max[1].max(v);
        }
        min_max
    }

    fn fill_grid<const D: usize>(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<D>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        if grid.spacing.convention() != self.convention {
            CallCounts::bump(&self.calls.generation_calls);
            return None;
        }
        let spacing = grid.spacing;
        let count = grid.count.map(|c| c.max(0) as usize);
        Some(self.fill(node, out, seed, |mut index| {
            let mut p = [0.0; 4];
            for axis in 0..D {
                let n = count[axis].max(1);
                p[axis] = axis_position(&spacing, axis, (index % n) as i32);
                index /= n;
            }
            p
        }))
    }

    fn single(&self, node: RawNode, p: [f32; 4], seed: i32) -> f32 {
        CallCounts::bump(&self.calls.generation_calls);
        self.sample(node_ref(node), p, seed)
    }

    fn set_scalar(&self, node: RawNode, index: i32, value: Scalar) -> bool {
        CallCounts::bump(&self.calls.setter_calls);
        let node = node_ref(node);
        let Some(spec) = Self::entry(&self.kinds[node.kind].variables, index) else {
            return false;
        };
        let accepted = match (spec.kind, value) {
            (VariableKind::Float, Scalar::Float(v)) => spec.accepts(v as f64),
            (VariableKind::Int, Scalar::Int(v)) => spec.accepts(v as f64),
            (VariableKind::Enum, Scalar::Int(v)) => {
                usize::try_from(v).map_or(false, |v| v < spec.enum_values.len())
            }
            _ => false,
        };
        if accepted {
            node.state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .variables[index as usize] = value;
        }
        accepted
    }
}

impl NoiseEngine for MockEngine {
    fn describe(&self) -> String {
        format!("mock engine ({} kinds)", self.kinds.len())
    }

    fn grid_convention(&self) -> GridConvention {
        self.convention
    }

    fn new_from_metadata(&self, id: i32, simd_level: u32) -> Option<RawNode> {
        let kind = usize::try_from(id).ok().filter(|i| *i < self.kinds.len())?;
        let spec = &self.kinds[kind];
        let variables = spec
            .variables
            .iter()
            .map(|v| match v.kind {
                VariableKind::Float => Scalar::Float(v.default as f32),
                VariableKind::Int | VariableKind::Enum => Scalar::Int(v.default as i32),
            })
            .collect();
        let node = MockNode {
            kind,
            simd_level,
            state: RwLock::new(NodeState {
                variables,
                lookups: vec![None; spec.lookups.len()],
                hybrids: spec.hybrids.iter().map(|h| Hybrid::Constant(h.default)).collect(),
            }),
        };
        self.hand_out(Arc::new(node))
    }

    fn new_from_encoded_node_tree(&self, encoded: &CStr, simd_level: u32) -> Option<RawNode> {
        let text = encoded.to_str().ok()?;
        let json = text.strip_prefix(ENCODED_PREFIX)?;
        let tree: EncodedNode = serde_json::from_str(json).ok()?;
        let node = self.decode_node(tree, simd_level)?;
        self.hand_out(node)
    }

    unsafe fn delete_node_ref(&self, node: RawNode) {
        CallCounts::bump(&self.calls.releases);
        drop(Arc::from_raw(node.as_ptr() as *const MockNode));
    }

    fn simd_level(&self, node: RawNode) -> u32 {
        node_ref(node).simd_level
    }

    fn metadata_id(&self, node: RawNode) -> i32 {
        node_ref(node).kind as i32
    }

    fn metadata_count(&self) -> i32 {
        self.kinds.len() as i32
    }

    fn metadata_name(&self, id: i32) -> Option<String> {
        self.kind(id).map(|k| k.name.clone())
    }

    fn metadata_description(&self, id: i32) -> Option<String> {
        self.kind(id)?.description.clone()
    }

    fn metadata_group_names(&self, id: i32) -> Vec<String> {
        self.kind(id).map(|k| k.groups.clone()).unwrap_or_default()
    }

    fn variable_count(&self, id: i32) -> i32 {
        self.kind(id).map_or(-1, |k| k.variables.len() as i32)
    }

    fn variable_name(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.variables, index).map(|v| v.name.clone())
    }

    fn variable_type(&self, id: i32, index: i32) -> i32 {
        self.kind(id)
            .and_then(|k| Self::entry(&k.variables, index))
            .map_or(-1, |v| v.kind.code())
    }

    fn variable_dimension_idx(&self, id: i32, index: i32) -> i32 {
        self.kind(id)
            .and_then(|k| Self::entry(&k.variables, index))
            .map_or(-1, |v| v.dimension)
    }

    fn variable_description(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.variables, index)?.description.clone()
    }

    fn variable_default_float(&self, id: i32, index: i32) -> Option<f32> {
        let v = Self::entry(&self.kind(id)?.variables, index)?;
        (v.kind == VariableKind::Float).then_some(v.default as f32)
    }

    fn variable_default_int_enum(&self, id: i32, index: i32) -> Option<i32> {
        let v = Self::entry(&self.kind(id)?.variables, index)?;
        (v.kind != VariableKind::Float).then_some(v.default as i32)
    }

    fn variable_min_float(&self, id: i32, index: i32) -> Option<f32> {
        Self::entry(&self.kind(id)?.variables, index)?
            .min
            .map(|m| m as f32)
    }

    fn variable_max_float(&self, id: i32, index: i32) -> Option<f32> {
        Self::entry(&self.kind(id)?.variables, index)?
            .max
            .map(|m| m as f32)
    }

    fn enum_count(&self, id: i32, index: i32) -> i32 {
        self.kind(id)
            .and_then(|k| Self::entry(&k.variables, index))
            .map_or(-1, |v| v.enum_values.len() as i32)
    }

    fn enum_name(&self, id: i32, index: i32, enum_index: i32) -> Option<String> {
        let v = Self::entry(&self.kind(id)?.variables, index)?;
        Self::entry(&v.enum_values, enum_index).cloned()
    }

    fn node_lookup_count(&self, id: i32) -> i32 {
        self.kind(id).map_or(-1, |k| k.lookups.len() as i32)
    }

    fn node_lookup_name(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.lookups, index).map(|l| l.name.clone())
    }

    fn node_lookup_dimension_idx(&self, id: i32, index: i32) -> i32 {
        self.kind(id)
            .and_then(|k| Self::entry(&k.lookups, index))
            .map_or(-1, |l| l.dimension)
    }

    fn node_lookup_description(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.lookups, index)?.description.clone()
    }

    fn hybrid_count(&self, id: i32) -> i32 {
        self.kind(id).map_or(-1, |k| k.hybrids.len() as i32)
    }

    fn hybrid_name(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.hybrids, index).map(|h| h.name.clone())
    }

    fn hybrid_dimension_idx(&self, id: i32, index: i32) -> i32 {
        self.kind(id)
            .and_then(|k| Self::entry(&k.hybrids, index))
            .map_or(-1, |h| h.dimension)
    }

    fn hybrid_description(&self, id: i32, index: i32) -> Option<String> {
        Self::entry(&self.kind(id)?.hybrids, index)?.description.clone()
    }

    fn hybrid_default(&self, id: i32, index: i32) -> Option<f32> {
        Self::entry(&self.kind(id)?.hybrids, index).map(|h| h.default)
    }

    fn set_variable_float(&self, node: RawNode, index: i32, value: f32) -> bool {
        self.set_scalar(node, index, Scalar::Float(value))
    }

    fn set_variable_int_enum(&self, node: RawNode, index: i32, value: i32) -> bool {
        self.set_scalar(node, index, Scalar::Int(value))
    }

    fn set_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool {
        CallCounts::bump(&self.calls.setter_calls);
        let node = node_ref(node);
        let mut state = node.state.write().unwrap_or_else(PoisonError::into_inner);
        match usize::try_from(index).ok().and_then(|i| state.lookups.get_mut(i)) {
            Some(slot) => {
                *slot = Some(retain(input));
                true
            }
            None => false,
        }
    }

    fn set_hybrid_node_lookup(&self, node: RawNode, index: i32, input: RawNode) -> bool {
        CallCounts::bump(&self.calls.setter_calls);
        let node = node_ref(node);
        let mut state = node.state.write().unwrap_or_else(PoisonError::into_inner);
        match usize::try_from(index).ok().and_then(|i| state.hybrids.get_mut(i)) {
            Some(slot) => {
                *slot = Hybrid::Node(retain(input));
                true
            }
            None => false,
        }
    }

    fn set_hybrid_float(&self, node: RawNode, index: i32, value: f32) -> bool {
        CallCounts::bump(&self.calls.setter_calls);
        let node = node_ref(node);
        let mut state = node.state.write().unwrap_or_else(PoisonError::into_inner);
        match usize::try_from(index).ok().and_then(|i| state.hybrids.get_mut(i)) {
            Some(slot) => {
                *slot = Hybrid::Constant(value);
                true
            }
            None => false,
        }
    }

    unsafe fn gen_uniform_grid_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<2>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        self.fill_grid(node, out, grid, seed)
    }

    unsafe fn gen_uniform_grid_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<3>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        self.fill_grid(node, out, grid, seed)
    }

    unsafe fn gen_uniform_grid_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        grid: &UniformGrid<4>,
        seed: i32,
    ) -> Option<[f32; 2]> {
        self.fill_grid(node, out, grid, seed)
    }

    unsafe fn gen_tileable_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        count: [i32; 2],
        scale: TileScale,
        seed: i32,
    ) -> Option<[f32; 2]> {
        if scale.convention() != self.convention {
            CallCounts::bump(&self.calls.generation_calls);
            return None;
        }
        let step = match scale {
            TileScale::Stepped(step) => step,
            TileScale::Frequency(frequency) => [frequency; 2],
        };
        let width = count[0].max(1) as usize;
        let height = count[1].max(1) as usize;
        // Each axis wraps onto a circle so the last column/row meets the first.
        let rx = width as f32 * step[0] / TAU;
        let ry = height as f32 * step[1] / TAU;
        Some(self.fill(node, out, seed, |i| {
            let ax = TAU * (i % width) as f32 / width as f32;
            let ay = TAU * (i / width) as f32 / height as f32;
            [rx * ax.cos(), rx * ax.sin(), ry * ay.cos(), ry * ay.sin()]
        }))
    }

    unsafe fn gen_position_array_2d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 2],
        offset: [f32; 2],
        seed: i32,
    ) -> [f32; 2] {
        self.fill(node, out, seed, |i| {
            [positions[0][i] + offset[0], positions[1][i] + offset[1], 0.0, 0.0]
        })
    }

    unsafe fn gen_position_array_3d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 3],
        offset: [f32; 3],
        seed: i32,
    ) -> [f32; 2] {
        self.fill(node, out, seed, |i| {
            [
                positions[0][i] + offset[0],
                positions[1][i] + offset[1],
                positions[2][i] + offset[2],
                0.0,
            ]
        })
    }

    unsafe fn gen_position_array_4d(
        &self,
        node: RawNode,
        out: &mut [f32],
        positions: [&[f32]; 4],
        offset: [f32; 4],
        seed: i32,
    ) -> [f32; 2] {
        self.fill(node, out, seed, |i| {
            [
                positions[0][i] + offset[0],
                positions[1][i] + offset[1],
                positions[2][i] + offset[2],
                positions[3][i] + offset[3],
            ]
        })
    }

    fn gen_single_2d(&self, node: RawNode, position: [f32; 2], seed: i32) -> f32 {
        self.single(node, [position[0], position[1], 0.0, 0.0], seed)
    }

    fn gen_single_3d(&self, node: RawNode, position: [f32; 3], seed: i32) -> f32 {
        self.single(node, [position[0], position[1], position[2], 0.0], seed)
    }

    fn gen_single_4d(&self, node: RawNode, position: [f32; 4], seed: i32) -> f32 {
        self.single(node, position, seed)
    }
}

fn node_ref<'a>(node: RawNode) -> &'a MockNode {
    // Handles only come from `hand_out`, and the caller keeps its reference alive for
    // the duration of any call made with it.
    unsafe { &*(node.as_ptr() as *const MockNode) }
}

fn retain(node: RawNode) -> Arc<MockNode> {
    let ptr = node.as_ptr() as *const MockNode;
    unsafe {
        Arc::increment_strong_count(ptr);
        Arc::from_raw(ptr)
    }
}

fn fold_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

fn axis_position<const D: usize>(spacing: &Spacing<D>, axis: usize, index: i32) -> f32 {
    match spacing {
        Spacing::Stepped { offset, step } => offset[axis] + index as f32 * step[axis],
        Spacing::Frequency { start, frequency } => (start[axis] + index) as f32 * frequency,
    }
}

fn wave(p: [f32; 4], seed: i32) -> f32 {
    let s = seed as f32 * 0.137;
    let a = (p[0] * 1.7 + s).sin() * (p[1] * 1.3 - s).cos();
    let b = (p[2] * 0.9 + p[3] * 0.6 + s).sin();
    0.5 * (a + b)
}

fn white(p: [f32; 4], seed: i32) -> f32 {
    let mut h = seed as u32 ^ 0x9e37_79b9;
    for c in p {
        h ^= c.to_bits();
        h = h.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 13;
    }
    (h as f32 / u32::MAX as f32) * 2.0 - 1.0
}
