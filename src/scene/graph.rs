use crate::core::storage::HandleStorage;
use crate::error::PhysicsError;
use crate::math::{Aabb, Transform};
use crate::scene::{NodeHandle, SceneNode};
use crate::Result;

/// Arena of scene nodes forming a single tree under a root node
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: HandleStorage<NodeHandle, SceneNode>,
    root: NodeHandle,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    /// Creates a graph holding only an identity root node
    pub fn new() -> Self {
        let mut nodes = HandleStorage::new();
        let root = nodes.add(SceneNode::new(None, Transform::identity()));
        Self { nodes, root }
    }

    /// Returns the root node
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Returns the number of live nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the handle still refers to a node in this graph
    pub fn is_alive(&self, handle: NodeHandle) -> bool {
        self.nodes.contains(handle)
    }

    /// Gets a node by handle
    pub fn get(&self, handle: NodeHandle) -> Result<&SceneNode> {
        self.nodes.get(handle).ok_or(PhysicsError::NodeNotFound(handle))
    }

    /// Gets a mutable node by handle
    pub fn get_mut(&mut self, handle: NodeHandle) -> Result<&mut SceneNode> {
        self.nodes.get_mut(handle).ok_or(PhysicsError::NodeNotFound(handle))
    }

    /// Adds a child node under `parent` with the given local transform
    pub fn add_child(&mut self, parent: NodeHandle, transformation: Transform) -> Result<NodeHandle> {
        if !self.is_alive(parent) {
            return Err(PhysicsError::NodeNotFound(parent));
        }

        let child = self.nodes.add(SceneNode::new(Some(parent), transformation));
        self.get_mut(parent)?.children.push(child);
        Ok(child)
    }

    /// Removes a node and its whole subtree. Returns the number of nodes removed.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Result<usize> {
        if handle == self.root {
            return Err(PhysicsError::InvalidParameter("the root node cannot be removed".into()));
        }

        let parent = self.get(handle)?.parent;
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(p)) {
            parent.children.retain(|c| *c != handle);
        }

        let mut removed = 0;
        let mut pending = vec![handle];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Returns the parent of a node
    pub fn parent(&self, handle: NodeHandle) -> Result<Option<NodeHandle>> {
        Ok(self.get(handle)?.parent)
    }

    /// Returns the children of a node
    pub fn children(&self, handle: NodeHandle) -> Result<&[NodeHandle]> {
        Ok(&self.get(handle)?.children)
    }

    /// Returns the transform of a node relative to its parent
    pub fn transformation(&self, handle: NodeHandle) -> Result<Transform> {
        Ok(self.get(handle)?.transformation)
    }

    /// Sets the transform of a node relative to its parent
    pub fn set_transformation(&mut self, handle: NodeHandle, transformation: Transform) -> Result<()> {
        self.get_mut(handle)?.transformation = transformation;
        Ok(())
    }

    /// Returns the transform of a node relative to the root
    pub fn absolute_transformation(&self, handle: NodeHandle) -> Result<Transform> {
        let mut node = self.get(handle)?;
        let mut absolute = node.transformation;

        while let Some(parent) = node.parent {
            node = self.get(parent)?;
            absolute = node.transformation.combine(&absolute);
        }

        Ok(absolute)
    }

    /// Attaches drawable bounds (in the node's own frame) to a node
    pub fn set_mesh_bounds(&mut self, handle: NodeHandle, bounds: Option<Aabb>) -> Result<()> {
        self.get_mut(handle)?.mesh_bounds = bounds;
        Ok(())
    }

    /// Computes the bounding box of everything drawn by a node and its
    /// descendants, expressed in that node's own frame.
    ///
    /// Returns `None` when no node in the subtree carries bounds.
    pub fn cumulative_bb(&self, handle: NodeHandle) -> Result<Option<Aabb>> {
        let node = self.get(handle)?;
        let mut cumulative = node.mesh_bounds;

        for &child in &node.children {
            let child_node = self.get(child)?;
            if let Some(child_bb) = self.cumulative_bb(child)? {
                let in_parent = child_bb.transformed(&child_node.transformation);
                cumulative = Some(match cumulative {
                    Some(bb) => bb.union(&in_parent),
                    None => in_parent,
                });
            }
        }

        Ok(cumulative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    #[test]
    fn removing_a_node_invalidates_its_subtree() {
        let mut graph = SceneGraph::new();
        let a = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let b = graph.add_child(a, Transform::identity()).unwrap();
        let c = graph.add_child(b, Transform::identity()).unwrap();

        assert_eq!(graph.remove_node(a).unwrap(), 3);

        for handle in [a, b, c] {
            assert!(!graph.is_alive(handle));
            assert!(matches!(graph.transformation(handle), Err(PhysicsError::NodeNotFound(h)) if h == handle));
        }
        assert!(graph.children(graph.root()).unwrap().is_empty());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn root_cannot_be_removed() {
        let mut graph = SceneGraph::new();
        assert!(graph.remove_node(graph.root()).is_err());
    }

    #[test]
    fn absolute_transformation_composes_parents() {
        let mut graph = SceneGraph::new();
        let a = graph
            .add_child(graph.root(), Transform::from_position(Vector3::new(1.0, 0.0, 0.0)))
            .unwrap();
        let b = graph
            .add_child(a, Transform::from_position(Vector3::new(0.0, 2.0, 0.0)))
            .unwrap();

        let absolute = graph.absolute_transformation(b).unwrap();

        assert_relative_eq!(absolute.position, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn cumulative_bb_includes_offset_children() {
        let mut graph = SceneGraph::new();
        let parent = graph.add_child(graph.root(), Transform::identity()).unwrap();
        let child = graph
            .add_child(parent, Transform::from_position(Vector3::new(2.0, 0.0, 0.0)))
            .unwrap();
        let unit = Aabb::from_center_half_extents(Vector3::zeros(), Vector3::repeat(0.5));
        graph.set_mesh_bounds(child, Some(unit)).unwrap();

        let bb = graph.cumulative_bb(parent).unwrap().unwrap();

        assert_relative_eq!(bb.center(), Vector3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
        assert!(graph.cumulative_bb(graph.root()).unwrap().is_some());

        let empty = graph.add_child(graph.root(), Transform::identity()).unwrap();
        assert!(graph.cumulative_bb(empty).unwrap().is_none());
    }
}
