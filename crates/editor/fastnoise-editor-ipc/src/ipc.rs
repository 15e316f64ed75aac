use std::ffi::CString;
use std::sync::Arc;

use log::{debug, warn};

use crate::backend::{IpcBackend, IpcHandle};
use crate::dylib::default_backend;
use crate::error::IpcError;
use crate::message::{MessageKind, PollResult};

/// Poll buffer size used by the editor's own clients.
pub const DEFAULT_POLL_BUFFER: usize = 4096;

/// An open channel to the node editor. Closed exactly once, on drop.
pub struct EditorIpc {
    backend: Arc<dyn IpcBackend>,
    handle: IpcHandle,
}

impl std::fmt::Debug for EditorIpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorIpc")
            .field("handle", &self.handle)
            .finish()
    }
}

fn c_string(value: &str, what: &'static str) -> Result<CString, IpcError> {
    CString::new(value).map_err(|_| IpcError::InteriorNul { what })
}

impl EditorIpc {
    /// Whether the IPC library can be loaded in this process.
    pub fn is_available() -> bool {
        default_backend().is_ok()
    }

    /// Open the shared channel through the default library. With `read_previous`,
    /// a message already waiting in shared memory is delivered by the next poll.
    pub fn setup(read_previous: bool) -> Result<Self, IpcError> {
        Self::with_backend(default_backend()?, read_previous)
    }

    pub fn with_backend(backend: Arc<dyn IpcBackend>, read_previous: bool) -> Result<Self, IpcError> {
        let handle = backend
            .setup(read_previous)
            .ok_or(IpcError::SetupFailed)?;
        debug!("opened node editor IPC channel {handle:?}");
        Ok(Self { backend, handle })
    }

    pub fn send_selected_node(&self, encoded_node_tree: &str) -> Result<bool, IpcError> {
        let encoded = c_string(encoded_node_tree, "encoded node tree")?;
        Ok(self.backend.send_selected_node(self.handle, &encoded))
    }

    pub fn send_import_request(&self, encoded_node_tree: &str) -> Result<bool, IpcError> {
        let encoded = c_string(encoded_node_tree, "encoded node tree")?;
        Ok(self.backend.send_import_request(self.handle, &encoded))
    }

    /// Fetch the next inbound message, if any, into a buffer of `buffer_size` bytes.
    ///
    /// A message that does not fit is reported as [`MessageKind::BufferTooSmall`] and
    /// stays queued for a poll with a larger buffer.
    pub fn poll_message(&self, buffer_size: usize) -> PollResult {
        let mut buffer = vec![0u8; buffer_size];
        let code = self.backend.poll_message(self.handle, &mut buffer);
        let result = PollResult::decode(code, &buffer);
        if result.kind == MessageKind::BufferTooSmall {
            warn!("node editor message exceeds the {buffer_size} byte poll buffer");
        }
        result
    }
}

impl Drop for EditorIpc {
    fn drop(&mut self) {
        debug!("closing node editor IPC channel {:?}", self.handle);
        // SAFETY: the handle came from this backend's `setup` and is released only here.
        unsafe { self.backend.release(self.handle) };
    }
}

/// Tell the library where the node editor executable lives; `None` restores the default.
pub fn set_node_editor_path(backend: &dyn IpcBackend, path: Option<&str>) -> Result<(), IpcError> {
    let path = path.map(|p| c_string(p, "node editor path")).transpose()?;
    backend.set_node_editor_path(path.as_deref());
    Ok(())
}

/// Launch the node editor, optionally opening `encoded_node_tree`.
pub fn start_node_editor(
    backend: &dyn IpcBackend,
    encoded_node_tree: Option<&str>,
    detached: bool,
    child_process: bool,
) -> Result<bool, IpcError> {
    let encoded = encoded_node_tree
        .map(|e| c_string(e, "encoded node tree"))
        .transpose()?;
    Ok(backend.start_node_editor(encoded.as_deref(), detached, child_process))
}
