use serde::{Deserialize, Serialize};

/// Range of the samples written by one generation call.
///
/// The default is the empty range `{ +inf, -inf }`, which is the identity for
/// [`OutputMinMax::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputMinMax {
    pub min: f32,
    pub max: f32,
}

impl Default for OutputMinMax {
    fn default() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
        }
    }
}

impl OutputMinMax {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn merge(self, other: OutputMinMax) -> OutputMinMax {
        OutputMinMax {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// True until at least one sample has been merged in.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl From<[f32; 2]> for OutputMinMax {
    fn from([min, max]: [f32; 2]) -> Self {
        Self { min, max }
    }
}
