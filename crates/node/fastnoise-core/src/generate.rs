//! Batch evaluation of a node tree into caller-owned buffers.
//!
//! Every batch call checks counts, buffer length and grid convention before the engine
//! is reached. The engine writes straight into `out`; only the first
//! `product(count)` elements are touched when the buffer is larger.

use fastnoise_native::{GridConvention, NoiseEngine, RawNode, TileScale, UniformGrid};
use log::debug;
use rayon::prelude::*;

use crate::error::{NoiseError, Result};
use crate::minmax::OutputMinMax;
use crate::node::Node;

const AXES: [&str; 4] = ["x", "y", "z", "w"];

/// Number of samples a grid of `counts` needs.
fn element_count(counts: &[i32]) -> Result<usize> {
    let mut total: i128 = 1;
    for (&count, axis) in counts.iter().zip(AXES) {
        if count < 0 {
            return Err(NoiseError::InvalidCount {
                axis,
                count: count.into(),
            });
        }
        total *= i128::from(count);
    }
    if total > i128::from(i32::MAX) {
        return Err(NoiseError::InvalidCount {
            axis: "total",
            count: i64::try_from(total).unwrap_or(i64::MAX),
        });
    }
    Ok(total as usize)
}

fn checked_out(out: &mut [f32], required: usize) -> Result<&mut [f32]> {
    if out.len() < required {
        return Err(NoiseError::BufferTooSmall {
            required,
            actual: out.len(),
        });
    }
    Ok(&mut out[..required])
}

fn positions_len<const D: usize>(positions: &[&[f32]; D]) -> Result<usize> {
    let expected = positions[0].len();
    for (axis, p) in AXES.into_iter().zip(positions.iter()).skip(1) {
        if p.len() != expected {
            return Err(NoiseError::LengthMismatch {
                axis,
                expected,
                actual: p.len(),
            });
        }
    }
    if expected > i32::MAX as usize {
        return Err(NoiseError::InvalidCount {
            axis: AXES[0],
            count: i64::try_from(expected).unwrap_or(i64::MAX),
        });
    }
    Ok(expected)
}

impl Node {
    fn require_convention(&self, convention: GridConvention) -> Result<()> {
        if self.registry.engine().grid_convention() == convention {
            Ok(())
        } else {
            Err(NoiseError::UnsupportedConvention { convention })
        }
    }

    fn dispatch_grid(
        &self,
        out: &mut [f32],
        counts: &[i32],
        convention: GridConvention,
        call: impl FnOnce(&dyn NoiseEngine, RawNode, &mut [f32]) -> Option<[f32; 2]>,
    ) -> Result<OutputMinMax> {
        let required = element_count(counts)?;
        let out = checked_out(out, required)?;
        self.require_convention(convention)?;
        if required == 0 {
            return Ok(OutputMinMax::default());
        }
        call(self.registry.engine(), self.raw, out)
            .map(OutputMinMax::from)
            .ok_or(NoiseError::UnsupportedConvention { convention })
    }

    fn dispatch_positions<const D: usize>(
        &self,
        out: &mut [f32],
        positions: [&[f32]; D],
        call: impl FnOnce(&dyn NoiseEngine, RawNode, &mut [f32], [&[f32]; D]) -> [f32; 2],
    ) -> Result<OutputMinMax> {
        let required = positions_len(&positions)?;
        let out = checked_out(out, required)?;
        if required == 0 {
            return Ok(OutputMinMax::default());
        }
        Ok(call(self.registry.engine(), self.raw, out, positions).into())
    }

    /// Fill `out` with a row-major 2D grid (x fastest) and return its range.
    pub fn gen_uniform_grid_2d(
        &self,
        out: &mut [f32],
        grid: &UniformGrid<2>,
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_grid(out, &grid.count, grid.spacing.convention(), |engine, raw, out| {
            // SAFETY: `out` is exactly `product(grid.count)` long and every count is >= 0.
            unsafe { engine.gen_uniform_grid_2d(raw, out, grid, seed) }
        })
    }

    pub fn gen_uniform_grid_3d(
        &self,
        out: &mut [f32],
        grid: &UniformGrid<3>,
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_grid(out, &grid.count, grid.spacing.convention(), |engine, raw, out| {
            // SAFETY: see `gen_uniform_grid_2d`.
            unsafe { engine.gen_uniform_grid_3d(raw, out, grid, seed) }
        })
    }

    pub fn gen_uniform_grid_4d(
        &self,
        out: &mut [f32],
        grid: &UniformGrid<4>,
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_grid(out, &grid.count, grid.spacing.convention(), |engine, raw, out| {
            // SAFETY: see `gen_uniform_grid_2d`.
            unsafe { engine.gen_uniform_grid_4d(raw, out, grid, seed) }
        })
    }

    /// 2D grid whose right/bottom edges wrap seamlessly onto the left/top ones.
    pub fn gen_tileable_2d(
        &self,
        out: &mut [f32],
        count: [i32; 2],
        scale: TileScale,
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_grid(out, &count, scale.convention(), |engine, raw, out| {
            // SAFETY: `out` is exactly `count[0] * count[1]` long, both counts >= 0.
            unsafe { engine.gen_tileable_2d(raw, out, count, scale, seed) }
        })
    }

    /// Sample at each `(x[i], y[i]) + offset`.
    pub fn gen_position_array_2d(
        &self,
        out: &mut [f32],
        x: &[f32],
        y: &[f32],
        offset: [f32; 2],
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_positions(out, [x, y], |engine, raw, out, positions| {
            // SAFETY: every position slice has `out.len()` elements.
            unsafe { engine.gen_position_array_2d(raw, out, positions, offset, seed) }
        })
    }

    pub fn gen_position_array_3d(
        &self,
        out: &mut [f32],
        x: &[f32],
        y: &[f32],
        z: &[f32],
        offset: [f32; 3],
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_positions(out, [x, y, z], |engine, raw, out, positions| {
            // SAFETY: every position slice has `out.len()` elements.
            unsafe { engine.gen_position_array_3d(raw, out, positions, offset, seed) }
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn gen_position_array_4d(
        &self,
        out: &mut [f32],
        x: &[f32],
        y: &[f32],
        z: &[f32],
        w: &[f32],
        offset: [f32; 4],
        seed: i32,
    ) -> Result<OutputMinMax> {
        self.dispatch_positions(out, [x, y, z, w], |engine, raw, out, positions| {
            // SAFETY: every position slice has `out.len()` elements.
            unsafe { engine.gen_position_array_4d(raw, out, positions, offset, seed) }
        })
    }

    pub fn gen_single_2d(&self, x: f32, y: f32, seed: i32) -> f32 {
        self.registry.engine().gen_single_2d(self.raw, [x, y], seed)
    }

    pub fn gen_single_3d(&self, x: f32, y: f32, z: f32, seed: i32) -> f32 {
        self.registry
            .engine()
            .gen_single_3d(self.raw, [x, y, z], seed)
    }

    pub fn gen_single_4d(&self, x: f32, y: f32, z: f32, w: f32, seed: i32) -> f32 {
        self.registry
            .engine()
            .gen_single_4d(self.raw, [x, y, z, w], seed)
    }

    /// [`Node::gen_uniform_grid_2d`] split into bands of `rows_per_batch` rows, each
    /// evaluated on the rayon pool as its own engine call.
    ///
    /// Band origins are shifted in the grid's own convention, so the output matches
    /// the single-call result sample for sample.
    pub fn gen_uniform_grid_2d_par(
        &self,
        out: &mut [f32],
        grid: &UniformGrid<2>,
        seed: i32,
        rows_per_batch: usize,
    ) -> Result<OutputMinMax> {
        let convention = grid.spacing.convention();
        let required = element_count(&grid.count)?;
        let out = checked_out(out, required)?;
        self.require_convention(convention)?;
        if required == 0 {
            return Ok(OutputMinMax::default());
        }

        let width = grid.count[0] as usize;
        let rows_per_batch = rows_per_batch.max(1);
        let engine = self.registry.engine();
        let raw = self.raw;
        debug!(
            "generating {}x{} grid in bands of {rows_per_batch} rows",
            grid.count[0], grid.count[1]
        );

        out.par_chunks_mut(width.saturating_mul(rows_per_batch))
            .enumerate()
            .map(|(band, chunk)| {
                let first_row = (band * rows_per_batch) as i32;
                let rows = (chunk.len() / width) as i32;
                let band_grid = grid.row_band(first_row, rows);
                // SAFETY: `chunk` holds exactly `width * rows` samples of disjoint output.
                unsafe { engine.gen_uniform_grid_2d(raw, chunk, &band_grid, seed) }
                    .map(OutputMinMax::from)
                    .ok_or(NoiseError::UnsupportedConvention { convention })
            })
            .try_reduce(OutputMinMax::default, |a, b| Ok(a.merge(b)))
    }
}
