use std::path::PathBuf;

use thiserror::Error;

/// Failure to reach a native library or one of its required entry points.
///
/// Cloneable so a lazily-initialised service can hand the same failure to every caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("failed to load native library {path}: {reason}", path = .path.display())]
    LibraryNotFound { path: PathBuf, reason: String },

    #[error("native library is missing required symbol `{symbol}`: {reason}")]
    MissingSymbol { symbol: &'static str, reason: String },
}
