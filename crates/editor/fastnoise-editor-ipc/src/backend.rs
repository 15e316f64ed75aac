use std::ffi::{c_void, CStr};
use std::ptr::NonNull;

/// Opaque channel handle returned by `fnEditorIpcSetup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct IpcHandle(NonNull<c_void>);

unsafe impl Send for IpcHandle {}
unsafe impl Sync for IpcHandle {}

impl IpcHandle {
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(IpcHandle)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// The IPC library's function table.
pub trait IpcBackend: Send + Sync {
    fn setup(&self, read_previous: bool) -> Option<IpcHandle>;

    /// # Safety
    /// `ipc` must come from [`IpcBackend::setup`] on this backend and must not be used
    /// afterwards.
    unsafe fn release(&self, ipc: IpcHandle);

    fn send_selected_node(&self, ipc: IpcHandle, encoded: &CStr) -> bool;

    fn send_import_request(&self, ipc: IpcHandle, encoded: &CStr) -> bool;

    /// Copy the next inbound message into `buffer` and return its type code
    /// (`-1` when it does not fit, `0` when there is none).
    fn poll_message(&self, ipc: IpcHandle, buffer: &mut [u8]) -> i32;

    fn set_node_editor_path(&self, path: Option<&CStr>);

    fn start_node_editor(&self, encoded: Option<&CStr>, detached: bool, child_process: bool)
        -> bool;
}
