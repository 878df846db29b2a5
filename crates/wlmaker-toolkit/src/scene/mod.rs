//! Scene-graph collaborator.
//!
//! The compositor's scene graph is consumed through [`SceneGraph`]: a tree
//! of container ("tree") nodes and buffer nodes, each with a position
//! relative to its parent and an enabled flag. [`MemoryScene`] is the
//! in-process implementation used by the headless runner and the tests.

mod memory;

pub use memory::MemoryScene;

use wlmaker_common::{NodeId, ToolkitError};

use crate::texture::Texture;

/// Result of a hit test: the deepest node under the point and the point in
/// that node's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneHit {
    pub node: NodeId,
    pub local_x: f64,
    pub local_y: f64,
}

pub trait SceneGraph {
    fn root(&self) -> NodeId;

    /// Create a container node as topmost child of `parent`.
    fn create_tree(&mut self, parent: NodeId) -> Result<NodeId, ToolkitError>;

    /// Create a buffer node as topmost child of `parent`. Takes one
    /// reference on `texture`.
    fn create_buffer(
        &mut self,
        parent: NodeId,
        texture: Option<&Texture>,
    ) -> Result<NodeId, ToolkitError>;

    /// Destroy `node` and its whole subtree, releasing held textures.
    fn destroy(&mut self, node: NodeId);

    fn exists(&self, node: NodeId) -> bool;

    fn set_position(&mut self, node: NodeId, x: i32, y: i32);

    /// Position relative to the parent.
    fn position(&self, node: NodeId) -> Option<(i32, i32)>;

    /// Position in layout coordinates.
    fn absolute_position(&self, node: NodeId) -> Option<(i32, i32)>;

    fn set_enabled(&mut self, node: NodeId, enabled: bool);

    fn is_enabled(&self, node: NodeId) -> bool;

    /// Replace the buffer shown by a buffer node. Releases the previous
    /// texture and takes a reference on the new one.
    fn set_buffer(&mut self, node: NodeId, texture: Option<&Texture>);

    /// Override the size a buffer node is displayed at. Used for client
    /// surfaces, whose buffers live outside the toolkit.
    fn set_dest_size(&mut self, node: NodeId, width: u32, height: u32);

    fn reparent(&mut self, node: NodeId, new_parent: NodeId);

    fn raise_to_top(&mut self, node: NodeId);

    fn lower_to_bottom(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Deepest enabled buffer node at layout position `(x, y)`.
    fn node_at(&self, x: f64, y: f64) -> Option<SceneHit>;
}
