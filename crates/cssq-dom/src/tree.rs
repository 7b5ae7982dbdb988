//! DOM Tree (arena-based allocation)

use crate::{DomError, DomResult, InternedString, Node, NodeData, NodeId, QualName, StringInterner};

/// Arena-based element tree
///
/// Index 0 always holds the document node. Nodes are never freed; detached
/// nodes simply have no parent.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    interner: StringInterner,
}

impl DomTree {
    /// Create a tree containing only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            interner: StringInterner::new(),
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Resolve an interned name
    #[inline]
    pub fn resolve(&self, s: InternedString) -> &str {
        self.interner.get(s)
    }

    fn push(&mut self, node: Node) -> DomResult<NodeId> {
        let id = NodeId::from_index(self.nodes.len())
            .ok_or(DomError::ArenaFull(self.nodes.len()))?;
        self.nodes.push(node);
        Ok(id)
    }

    /// Create a detached element
    pub fn create_element(&mut self, name: &str) -> DomResult<NodeId> {
        let local = self.interner.intern(name);
        self.push(Node::element(QualName::local(local)))
    }

    /// Create a detached element in a namespace
    pub fn create_element_ns(&mut self, ns: &str, name: &str) -> DomResult<NodeId> {
        let ns = self.interner.intern(ns);
        let local = self.interner.intern(name);
        self.push(Node::element(QualName { ns: Some(ns), local }))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> DomResult<NodeId> {
        self.push(Node::text(content.to_string()))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, content: &str) -> DomResult<NodeId> {
        self.push(Node::comment(content.to_string()))
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent_node = self.node(parent)?;
        if matches!(parent_node.data, NodeData::Text(_) | NodeData::Comment(_)) {
            return Err(DomError::InvalidNodeType("append_child parent"));
        }
        let child_node = self.node(child)?;
        if child == NodeId::ROOT {
            return Err(DomError::HierarchyRequest("the document node cannot be a child"));
        }
        if child_node.parent.is_valid() {
            return Err(DomError::HierarchyRequest("node already has a parent"));
        }
        // The child may head a detached subtree that contains `parent`
        let mut cursor = parent;
        while cursor.is_valid() {
            if cursor == child {
                return Err(DomError::HierarchyRequest("node would become its own ancestor"));
            }
            cursor = self.nodes[cursor.index()].parent;
        }

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;

        tracing::trace!("Appended {:?} to {:?}", child, parent);
        Ok(child)
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attrs: &[(&str, &str)],
    ) -> DomResult<NodeId> {
        let id = self.create_element(name)?;
        for (attr, value) in attrs {
            self.set_attribute(id, attr, value)?;
        }
        self.append_child(parent, id)
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, content: &str) -> DomResult<NodeId> {
        let id = self.create_text(content)?;
        self.append_child(parent, id)
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        let name = QualName::local(self.interner.intern(name));
        let elem = self
            .get_mut(id)
            .ok_or(DomError::NotFound(id))?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType("set_attribute"))?;
        elem.set_attr(name, value.to_string());
        Ok(())
    }

    /// Get an attribute value; never interns `name`
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        let name = self.interner.lookup(name)?;
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Tag name of an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        let elem = self.get(id)?.as_element()?;
        Some(self.resolve(elem.name.local))
    }

    /// Namespace URI of an element
    pub fn namespace(&self, id: NodeId) -> Option<&str> {
        let ns = self.get(id)?.as_element()?.name.ns?;
        Some(self.resolve(ns))
    }

    /// Iterate over all children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Iterate over element children of a node
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .filter(|(_, node)| node.is_element())
            .map(|(child, _)| child)
    }

    /// First element child
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.element_children(id).next()
    }

    /// Next sibling that is an element
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.next_sibling;
        while let Some(node) = self.get(cursor) {
            if node.is_element() {
                return Some(cursor);
            }
            cursor = node.next_sibling;
        }
        None
    }

    /// Previous sibling that is an element
    pub fn prev_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.get(id)?.prev_sibling;
        while let Some(node) = self.get(cursor) {
            if node.is_element() {
                return Some(cursor);
            }
            cursor = node.prev_sibling;
        }
        None
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for (child, node) in self.children(id) {
            match node.as_text() {
                Some(text) => out.push_str(text),
                None => self.collect_text(child, out),
            }
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}
