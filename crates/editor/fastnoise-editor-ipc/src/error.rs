use fastnoise_native::LoadError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IpcError {
    #[error("node editor IPC library unavailable: {0}")]
    Unavailable(#[from] LoadError),

    #[error("failed to set up node editor shared memory")]
    SetupFailed,

    #[error("{what} contains an interior NUL byte")]
    InteriorNul { what: &'static str },
}
