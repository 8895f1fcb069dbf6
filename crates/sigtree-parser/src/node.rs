//! Arena-backed type trees.
//!
//! A [`TypeTree`] stores every node in one `Vec`. Children are owned by the
//! arena and listed in order on their parent; the parent link is a plain
//! [`NodeId`] back into the same arena, so it never owns anything.
//!
//! Trees are assembled through [`TypeTreeBuilder`] and frozen by
//! [`TypeTreeBuilder::build`]. A built tree has no mutating API, which makes
//! it `Send + Sync` and safe to compare from several threads at once.

use crate::error::{IndexError, TreeError};
use crate::pattern::NamePattern;
use serde::Serialize;
use sigtree_common::NULL_TYPE_NAME;
use sigtree_common::limits::{MAX_TREE_DEPTH, TREE_INITIAL_CAPACITY};
use smallvec::SmallVec;
use std::fmt;

/// Index of a node inside its [`TypeTree`] or [`TypeTreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The root is always the first node created.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    name: Box<str>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    depth: u32,
}

/// An immutable tree of type names and their ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTree {
    nodes: Vec<NodeData>,
}

impl TypeTree {
    /// A single-leaf tree named `name`.
    pub fn leaf(name: &str) -> Result<Self, TreeError> {
        let mut builder = TypeTreeBuilder::with_capacity(1);
        builder.add_root(name)?;
        builder.build()
    }

    /// A single-leaf tree named with the reserved "no value" sentinel.
    pub fn null() -> Self {
        Self {
            nodes: vec![NodeData {
                name: NULL_TYPE_NAME.into(),
                parent: None,
                children: SmallVec::new(),
                depth: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nested `{ name, children }` form for serialization.
    pub fn snapshot(&self) -> TypeSnapshot {
        self.root().snapshot()
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Display for TypeTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root().fmt(f)
    }
}

/// Serializable copy of a subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSnapshot {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TypeSnapshot>,
}

/// A borrowed view of one node in a [`TypeTree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a TypeTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    #[inline]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn tree(self) -> &'a TypeTree {
        self.tree
    }

    #[inline]
    pub fn name(self) -> &'a str {
        &self.tree.data(self.id).name
    }

    /// The enclosing node, or `None` for the root.
    pub fn parent(self) -> Option<NodeRef<'a>> {
        self.tree
            .data(self.id)
            .parent
            .map(|id| NodeRef { tree: self.tree, id })
    }

    /// Immediate children in declaration order.
    pub fn children(self) -> impl ExactSizeIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    #[inline]
    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    #[inline]
    pub fn is_leaf(self) -> bool {
        self.child_count() == 0
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self.tree.data(self.id).parent.is_none()
    }

    /// Distance from the root; the root is at depth 0.
    #[inline]
    pub fn depth(self) -> u32 {
        self.tree.data(self.id).depth
    }

    pub fn child_at(self, index: usize) -> Result<NodeRef<'a>, IndexError> {
        let children = &self.tree.data(self.id).children;
        children
            .get(index)
            .map(|&id| NodeRef { tree: self.tree, id })
            .ok_or_else(|| IndexError {
                name: self.name().to_string(),
                index,
                len: children.len(),
            })
    }

    /// First immediate child whose whole name matches `pattern`.
    ///
    /// Grandchildren are never searched.
    pub fn first_child_matching(self, pattern: &NamePattern) -> Option<NodeRef<'a>> {
        self.children().find(|child| pattern.is_match(child.name()))
    }

    pub fn snapshot(self) -> TypeSnapshot {
        TypeSnapshot {
            name: self.name().to_string(),
            children: self.children().map(NodeRef::snapshot).collect(),
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("children", &self.child_count())
            .finish()
    }
}

/// Renders the canonical descriptor, e.g. `A<B<C, D>, E>`.
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        if self.is_leaf() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, child) in self.children().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(&child, f)?;
        }
        f.write_str(">")
    }
}

/// The mutable phase of a [`TypeTree`].
///
/// Nodes can only be appended. The first node added is the root; every later
/// node hangs off an existing one.
#[derive(Debug, Default)]
pub struct TypeTreeBuilder {
    nodes: Vec<NodeData>,
}

impl TypeTreeBuilder {
    pub fn new() -> Self {
        Self::with_capacity(TREE_INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn has_root(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn add_root(&mut self, name: &str) -> Result<NodeId, TreeError> {
        if self.has_root() {
            return Err(TreeError::RootAlreadySet);
        }
        validate_name(name)?;
        Ok(self.push(name.into(), None, 0))
    }

    /// Append a child named `name` as the last child of `parent`.
    pub fn add(&mut self, parent: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let depth = self.child_depth(parent)?;
        validate_name(name)?;
        Ok(self.push(name.into(), Some(parent), depth))
    }

    /// Append a copy of `subtree` as the last child of `parent`.
    ///
    /// Returns the id of the copied subtree root.
    pub fn graft(&mut self, parent: NodeId, subtree: &TypeTree) -> Result<NodeId, TreeError> {
        let base_depth = self.child_depth(parent)?;
        let deepest = subtree.nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        if base_depth + deepest > MAX_TREE_DEPTH {
            return Err(TreeError::DepthExceeded {
                limit: MAX_TREE_DEPTH,
            });
        }

        // Subtree ids are dense and parents precede children, so an offset
        // remaps every link.
        let offset = self.nodes.len() as u32;
        self.nodes.reserve(subtree.nodes.len());
        for node in &subtree.nodes {
            self.nodes.push(NodeData {
                name: node.name.clone(),
                parent: Some(node.parent.map_or(parent, |p| NodeId(p.0 + offset))),
                children: node.children.iter().map(|c| NodeId(c.0 + offset)).collect(),
                depth: node.depth + base_depth,
            });
        }
        let grafted = NodeId(offset);
        self.nodes[parent.index()].children.push(grafted);
        Ok(grafted)
    }

    /// Freeze the builder into an immutable tree.
    pub fn build(self) -> Result<TypeTree, TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::MissingRoot);
        }
        Ok(TypeTree { nodes: self.nodes })
    }

    /// Drop every node created at or after `len`.
    ///
    /// Used to undo a partially parsed descriptor so a failed parse leaves
    /// the builder as it found it.
    pub(crate) fn rollback(&mut self, len: usize) {
        if len >= self.nodes.len() {
            return;
        }
        self.nodes.truncate(len);
        for node in &mut self.nodes {
            node.children.retain(|c| c.index() < len);
        }
    }

    fn child_depth(&self, parent: NodeId) -> Result<u32, TreeError> {
        let parent_data = self
            .nodes
            .get(parent.index())
            .ok_or(TreeError::UnknownNode(parent))?;
        let depth = parent_data.depth + 1;
        if depth > MAX_TREE_DEPTH {
            return Err(TreeError::DepthExceeded {
                limit: MAX_TREE_DEPTH,
            });
        }
        Ok(depth)
    }

    fn push(&mut self, name: Box<str>, parent: Option<NodeId>, depth: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            name,
            parent,
            children: SmallVec::new(),
            depth,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }
}

fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.trim().is_empty() || name.contains(['<', '>', ',']) {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/node_tests.rs"]
mod tests;
