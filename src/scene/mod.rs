//! Scene-graph arena that rigid objects attach to.
//!
//! The graph owns every node. Physics objects keep a [`NodeHandle`] and are
//! handed the graph explicitly whenever they read or write a transform.

mod node;
mod graph;

pub use self::node::SceneNode;
pub use self::graph::SceneGraph;

use crate::core::storage::Handle;

/// A handle to a node in a [`SceneGraph`].
///
/// Handles are never reused, so a handle to a removed node fails
/// [`SceneGraph::is_alive`] rather than aliasing a new node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeHandle(pub(crate) u32);

impl Handle for NodeHandle {
    fn from_raw(id: u32) -> Self {
        Self(id)
    }

    fn raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
