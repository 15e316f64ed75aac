//! Shape parameters for grid evaluation.
//!
//! The engine has shipped two incompatible grid conventions. They are kept apart here:
//! a request carries exactly one of them and is never rewritten into the other.

use crate::config::GridConvention;

/// Sample placement along each axis of a uniform grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spacing<const D: usize> {
    /// Sample `i` on an axis sits at `offset + i * step`.
    Stepped { offset: [f32; D], step: [f32; D] },
    /// Legacy form: integer start coordinate plus one frequency shared by every axis.
    Frequency { start: [i32; D], frequency: f32 },
}

impl<const D: usize> Spacing<D> {
    pub fn stepped(offset: [f32; D], step: [f32; D]) -> Self {
        Spacing::Stepped { offset, step }
    }

    /// Same step size on every axis.
    pub fn uniform_step(offset: [f32; D], step: f32) -> Self {
        Spacing::Stepped {
            offset,
            step: [step; D],
        }
    }

    pub fn frequency(start: [i32; D], frequency: f32) -> Self {
        Spacing::Frequency { start, frequency }
    }

    pub fn convention(&self) -> GridConvention {
        match self {
            Spacing::Stepped { .. } => GridConvention::Stepped,
            Spacing::Frequency { .. } => GridConvention::Frequency,
        }
    }
}

/// A row-major block of `count[0] * count[1] * ...` samples (x varies fastest).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGrid<const D: usize> {
    pub count: [i32; D],
    pub spacing: Spacing<D>,
}

impl<const D: usize> UniformGrid<D> {
    pub fn new(count: [i32; D], spacing: Spacing<D>) -> Self {
        Self { count, spacing }
    }
}

impl UniformGrid<2> {
    /// The sub-grid covering `rows` rows starting at `first_row`, expressed in the same
    /// convention as `self`.
    pub fn row_band(&self, first_row: i32, rows: i32) -> Self {
        let spacing = match self.spacing {
            Spacing::Stepped { offset, step } => Spacing::Stepped {
                offset: [offset[0], offset[1] + first_row as f32 * step[1]],
                step,
            },
            Spacing::Frequency { start, frequency } => Spacing::Frequency {
                start: [start[0], start[1] + first_row],
                frequency,
            },
        };
        Self {
            count: [self.count[0], rows],
            spacing,
        }
    }
}

/// Sample scale for seamless 2D tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TileScale {
    Stepped([f32; 2]),
    Frequency(f32),
}

impl TileScale {
    pub fn convention(&self) -> GridConvention {
        match self {
            TileScale::Stepped(_) => GridConvention::Stepped,
            TileScale::Frequency(_) => GridConvention::Frequency,
        }
    }
}
