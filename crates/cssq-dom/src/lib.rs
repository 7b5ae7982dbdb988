//! cssq DOM - Element tree
//!
//! Arena-based tree of elements, text and comments that selector queries
//! run against. Nodes are addressed by 4-byte [`NodeId`] indices and names
//! are interned once per tree.

mod interner;
mod node;
mod tree;

pub use interner::{InternedString, StringInterner};
pub use node::{Attribute, ElementData, Node, NodeData, QualName};
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Document node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Sentinel for a missing link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the NONE sentinel
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Id for an arena index; `None` past the last usable slot
    #[inline]
    pub fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index)
            .ok()
            .map(NodeId)
            .filter(|id| id.is_valid())
    }

    /// Convert a link into an Option
    #[inline]
    pub fn some(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// Result type for tree construction
pub type DomResult<T> = Result<T, DomError>;

/// Tree construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(&'static str),

    #[error("Invalid node type for {0}")]
    InvalidNodeType(&'static str),

    #[error("Node arena is full ({0} nodes)")]
    ArenaFull(usize),
}
