use std::ffi::{c_char, c_int, c_void, CStr};
use std::path::PathBuf;
use std::ptr;
use std::sync::Arc;

use fastnoise_native::{open_library, LoadError};
use libloading::Library;
use log::info;
use once_cell::sync::Lazy;

use crate::backend::{IpcBackend, IpcHandle};
use crate::error::IpcError;

/// Overrides the location of the IPC library.
pub const ENV_IPC_LIBRARY_PATH: &str = "FASTNOISE_EDITOR_IPC_LIB";
pub const IPC_LIBRARY_NAME: &str = "NodeEditorIpc";

type SetupFn = unsafe extern "C" fn(bool) -> *mut c_void;
type ReleaseFn = unsafe extern "C" fn(*mut c_void);
type SendFn = unsafe extern "C" fn(*mut c_void, *const c_char) -> bool;
type PollFn = unsafe extern "C" fn(*mut c_void, *mut u8, c_int) -> c_int;
type SetPathFn = unsafe extern "C" fn(*const c_char);
type StartFn = unsafe extern "C" fn(*const c_char, bool, bool) -> bool;

static DEFAULT_BACKEND: Lazy<Result<Arc<DylibIpc>, LoadError>> = Lazy::new(|| {
    let path = std::env::var_os(ENV_IPC_LIBRARY_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(libloading::library_filename(IPC_LIBRARY_NAME)));
    DylibIpc::load(path).map(Arc::new)
});

/// The process-wide IPC library, loaded on first use.
pub fn default_backend() -> Result<Arc<dyn IpcBackend>, IpcError> {
    match &*DEFAULT_BACKEND {
        Ok(backend) => Ok(Arc::clone(backend) as Arc<dyn IpcBackend>),
        Err(err) => Err(IpcError::Unavailable(err.clone())),
    }
}

/// [`IpcBackend`] resolved from the editor's shared library.
pub struct DylibIpc {
    setup: SetupFn,
    release: ReleaseFn,
    send_selected_node: SendFn,
    send_import_request: SendFn,
    poll_message: PollFn,
    set_node_editor_path: SetPathFn,
    start_node_editor: StartFn,
    path: PathBuf,
    _library: Library,
}

impl std::fmt::Debug for DylibIpc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DylibIpc").field("path", &self.path).finish()
    }
}

unsafe fn symbol<T: Copy>(library: &Library, name: &'static str) -> Result<T, LoadError> {
    library
        .get::<T>(name.as_bytes())
        .map(|s| *s)
        .map_err(|e| LoadError::MissingSymbol {
            symbol: name,
            reason: e.to_string(),
        })
}

impl DylibIpc {
    pub fn load(path: PathBuf) -> Result<Self, LoadError> {
        let library = open_library(&path)?;
        // SAFETY: the signatures match the library's exported C declarations.
        let ipc = unsafe {
            DylibIpc {
                setup: symbol(&library, "fnEditorIpcSetup")?,
                release: symbol(&library, "fnEditorIpcRelease")?,
                send_selected_node: symbol(&library, "fnEditorIpcSendSelectedNode")?,
                send_import_request: symbol(&library, "fnEditorIpcSendImportRequest")?,
                poll_message: symbol(&library, "fnEditorIpcPollMessage")?,
                set_node_editor_path: symbol(&library, "fnEditorIpcSetNodeEditorPath")?,
                start_node_editor: symbol(&library, "fnEditorIpcStartNodeEditor")?,
                path,
                _library: library,
            }
        };
        info!("loaded node editor IPC from {}", ipc.path.display());
        Ok(ipc)
    }
}

fn opt_ptr(value: Option<&CStr>) -> *const c_char {
    value.map_or(ptr::null(), CStr::as_ptr)
}

impl IpcBackend for DylibIpc {
    fn setup(&self, read_previous: bool) -> Option<IpcHandle> {
        IpcHandle::from_ptr(unsafe { (self.setup)(read_previous) })
    }

    unsafe fn release(&self, ipc: IpcHandle) {
        (self.release)(ipc.as_ptr())
    }

    fn send_selected_node(&self, ipc: IpcHandle, encoded: &CStr) -> bool {
        unsafe { (self.send_selected_node)(ipc.as_ptr(), encoded.as_ptr()) }
    }

    fn send_import_request(&self, ipc: IpcHandle, encoded: &CStr) -> bool {
        unsafe { (self.send_import_request)(ipc.as_ptr(), encoded.as_ptr()) }
    }

    fn poll_message(&self, ipc: IpcHandle, buffer: &mut [u8]) -> i32 {
        let len = c_int::try_from(buffer.len()).unwrap_or(c_int::MAX);
        unsafe { (self.poll_message)(ipc.as_ptr(), buffer.as_mut_ptr(), len) }
    }

    fn set_node_editor_path(&self, path: Option<&CStr>) {
        unsafe { (self.set_node_editor_path)(opt_ptr(path)) }
    }

    fn start_node_editor(
        &self,
        encoded: Option<&CStr>,
        detached: bool,
        child_process: bool,
    ) -> bool {
        unsafe { (self.start_node_editor)(opt_ptr(encoded), detached, child_process) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_library_is_unavailable() {
        let err = DylibIpc::load(PathBuf::from("/nonexistent/libNodeEditorIpc.so"))
            .expect_err("no such library");
        assert!(matches!(err, LoadError::LibraryNotFound { .. }));
    }
}
