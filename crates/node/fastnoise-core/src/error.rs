use std::fmt;

use fastnoise_native::{GridConvention, LoadError};
use thiserror::Error;

use crate::metadata::MemberKind;

/// Shape of a value handed to [`crate::Node::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Float,
    Int,
    EnumName,
    Node,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueShape::Float => "a float",
            ValueShape::Int => "an integer",
            ValueShape::EnumName => "an enum name",
            ValueShape::Node => "a node",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("FastNoise engine unavailable: {0}")]
    EngineUnavailable(#[from] LoadError),

    #[error("unknown node kind '{name}'")]
    UnknownNodeKind { name: String },

    #[error("engine failed to allocate a '{kind}' node")]
    AllocationFailed { kind: String },

    #[error("node '{node}' has no member '{member}'")]
    UnknownMember { node: String, member: String },

    #[error("member '{member}' has no enum value '{value}'")]
    UnknownEnumValue { member: String, value: String },

    #[error("member '{member}' is {expected}, cannot take {found}")]
    TypeMismatch {
        member: String,
        expected: MemberKind,
        found: ValueShape,
    },

    #[error("node given to member '{member}' was built by a different engine")]
    ForeignNode { member: String },

    #[error("output buffer holds {actual} samples but {required} are required")]
    BufferTooSmall { required: usize, actual: usize },

    #[error("position buffer {axis} has {actual} elements, expected {expected}")]
    LengthMismatch {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid sample count {count} for {axis}")]
    InvalidCount { axis: &'static str, count: i64 },

    #[error("engine does not expose the {convention} grid convention")]
    UnsupportedConvention { convention: GridConvention },

    #[error("engine rejected the value for {kind} member '{member}'")]
    EngineRejected { member: String, kind: MemberKind },
}

impl NoiseError {
    /// Mistakes in how the API was called, as opposed to engine failures.
    pub fn is_usage_error(&self) -> bool {
        !matches!(
            self,
            NoiseError::EngineUnavailable(_)
                | NoiseError::AllocationFailed { .. }
                | NoiseError::EngineRejected { .. }
        )
    }
}

pub type Result<T, E = NoiseError> = std::result::Result<T, E>;
