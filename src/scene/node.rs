use crate::math::{Aabb, Transform};
use crate::scene::NodeHandle;

/// A node in the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Parent node, `None` only for the root
    pub(crate) parent: Option<NodeHandle>,

    /// Child nodes in insertion order
    pub(crate) children: Vec<NodeHandle>,

    /// Transform relative to the parent
    pub(crate) transformation: Transform,

    /// Bounds of the geometry drawn by this node, in the node's own frame
    pub(crate) mesh_bounds: Option<Aabb>,
}

impl SceneNode {
    pub(crate) fn new(parent: Option<NodeHandle>, transformation: Transform) -> Self {
        Self {
            parent,
            children: Vec::new(),
            transformation,
            mesh_bounds: None,
        }
    }

    /// Returns the parent of this node
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns the children of this node
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    /// Returns the transform of this node relative to its parent
    pub fn transformation(&self) -> &Transform {
        &self.transformation
    }

    /// Returns the local bounds of the geometry attached to this node
    pub fn mesh_bounds(&self) -> Option<Aabb> {
        self.mesh_bounds
    }
}
