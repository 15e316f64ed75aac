//! fastnoise-editor-ipc: exchange encoded node trees with a running FastNoise node editor.
//!
//! The editor ships a small `NodeEditorIpc` library that owns the shared-memory channel.
//! This crate only frames messages on top of it: strings go out NUL-terminated, and
//! inbound payloads are read into a caller-sized buffer with an explicit
//! "buffer too small" signal.

pub mod backend;
pub mod dylib;
pub mod error;
pub mod ipc;
pub mod message;

pub use backend::{IpcBackend, IpcHandle};
pub use dylib::{default_backend, DylibIpc, ENV_IPC_LIBRARY_PATH, IPC_LIBRARY_NAME};
pub use error::IpcError;
pub use ipc::{set_node_editor_path, start_node_editor, EditorIpc, DEFAULT_POLL_BUFFER};
pub use message::{MessageKind, PollResult};
