use std::ffi::CString;
use std::fmt;
use std::mem::ManuallyDrop;
use std::sync::Arc;

use fastnoise_native::RawNode;
use log::{debug, warn};

use crate::error::{NoiseError, Result};
use crate::metadata::NodeDescriptor;
use crate::registry::Registry;

/// An owned native node.
///
/// The handle is released exactly once, when the `Node` is dropped. Nodes wired into
/// another node as inputs are retained by the engine, so dropping an input after
/// wiring it is fine.
pub struct Node {
    pub(crate) registry: Arc<Registry>,
    pub(crate) descriptor_id: i32,
    pub(crate) raw: RawNode,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.metadata().display_name)
            .field("descriptor_id", &self.descriptor_id)
            .field("raw", &self.raw)
            .finish()
    }
}

impl Node {
    /// Allocate a node of the kind named `kind` (case and spaces ignored).
    pub fn new(registry: &Arc<Registry>, kind: &str) -> Result<Node> {
        let descriptor = registry.resolve(kind)?;
        let raw = registry
            .engine()
            .new_from_metadata(descriptor.id, registry.simd_level())
            .ok_or_else(|| NoiseError::AllocationFailed {
                kind: descriptor.display_name.clone(),
            })?;
        debug!("allocated '{}' node {:?}", descriptor.display_name, raw);
        Ok(Node {
            registry: Arc::clone(registry),
            descriptor_id: descriptor.id,
            raw,
        })
    }

    /// [`Node::new`] against [`Registry::global`].
    pub fn from_kind(kind: &str) -> Result<Node> {
        Self::new(&Registry::global()?, kind)
    }

    /// Rebuild a node tree from an engine-encoded string.
    ///
    /// Malformed or unsupported encodings give `None`. The kind is read back from the
    /// engine since the encoding may describe any root.
    pub fn from_encoded_node_tree(registry: &Arc<Registry>, encoded: &str) -> Option<Node> {
        let Ok(token) = CString::new(encoded) else {
            warn!("encoded node tree contains an interior NUL byte");
            return None;
        };
        let Some(raw) = registry
            .engine()
            .new_from_encoded_node_tree(&token, registry.simd_level())
        else {
            warn!("engine could not decode node tree '{encoded}'");
            return None;
        };
        // SAFETY: `raw` was just produced by this registry's engine and is owned by no one.
        unsafe { Self::from_raw(registry, raw) }
    }

    /// Take ownership of a handle produced by `registry`'s engine.
    ///
    /// Returns `None` (after releasing the handle) if the engine reports a kind this
    /// registry does not know.
    ///
    /// # Safety
    /// `raw` must come from `registry.engine()`, must not have been released and must
    /// not be owned by any other `Node`.
    pub unsafe fn from_raw(registry: &Arc<Registry>, raw: RawNode) -> Option<Node> {
        let engine = registry.engine();
        let id = engine.metadata_id(raw);
        if registry.descriptor(id).is_none() {
            warn!("engine returned a node of unknown kind {id}; releasing it");
            engine.delete_node_ref(raw);
            return None;
        }
        debug!("adopted node {raw:?} of kind {id}");
        Some(Node {
            registry: Arc::clone(registry),
            descriptor_id: id,
            raw,
        })
    }

    /// Give up ownership of the handle without releasing it.
    pub fn into_raw(self) -> RawNode {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the registry handle is read out exactly once.
        drop(unsafe { std::ptr::read(&this.registry) });
        this.raw
    }

    pub fn descriptor_id(&self) -> i32 {
        self.descriptor_id
    }

    /// Descriptor of this node's kind.
    pub fn metadata(&self) -> &NodeDescriptor {
        &self.registry.kinds[self.descriptor_id as usize]
    }

    /// SIMD feature level the engine built this node with.
    pub fn simd_level(&self) -> u32 {
        self.registry.engine().simd_level(self.raw)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// The native handle, still owned by `self`.
    pub fn as_raw(&self) -> RawNode {
        self.raw
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        debug!("releasing node {:?}", self.raw);
        // SAFETY: the handle is owned by this node and this is the only release path.
        unsafe { self.registry.engine().delete_node_ref(self.raw) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastnoise_test_fixtures::MockEngine;

    fn mock() -> (Arc<MockEngine>, Arc<Registry>) {
        let engine = Arc::new(MockEngine::new());
        let registry = Registry::load(engine.clone());
        (engine, registry)
    }

    #[test]
    fn node_carries_the_resolved_descriptor_id() {
        let (_, registry) = mock();
        let node = Node::new(&registry, "cellular distance").unwrap();
        assert_eq!(
            node.descriptor_id(),
            registry.resolve("Cellular Distance").unwrap().id
        );
        assert_eq!(node.metadata().display_name, "Cellular Distance");
    }

    #[test]
    fn unknown_kind_allocates_nothing() {
        let (engine, registry) = mock();
        let err = Node::new(&registry, "Nope").unwrap_err();
        assert!(matches!(err, NoiseError::UnknownNodeKind { .. }));
        assert_eq!(engine.calls().allocations(), 0);
    }

    #[test]
    fn into_raw_then_from_raw_keeps_a_single_owner() {
        let (engine, registry) = mock();
        let raw = Node::new(&registry, "Simplex").unwrap().into_raw();
        assert_eq!(engine.calls().releases(), 0);
        let node = unsafe { Node::from_raw(&registry, raw) }.unwrap();
        assert_eq!(node.metadata().name, "simplex");
        drop(node);
        assert_eq!(engine.calls().releases(), 1);
    }

    #[test]
    fn interior_nul_is_not_decodable() {
        let (engine, registry) = mock();
        assert!(Node::from_encoded_node_tree(&registry, "mock1:\0{}").is_none());
        assert_eq!(engine.calls().allocations(), 0);
    }
}
