//! [`ElementTree`] for `cssq-dom` trees

use cssq_dom::{DomTree, NodeId};

use crate::tree::ElementTree;

impl ElementTree for DomTree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        DomTree::root(self)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.tag_name(node)
    }

    fn namespace(&self, node: NodeId) -> Option<&str> {
        DomTree::namespace(self, node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.get_attribute(node, name)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node)?.parent.some()
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.first_element_child(node)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.next_element_sibling(node)
    }

    fn prev_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.prev_element_sibling(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_invisible() {
        let mut dom = DomTree::new();
        let root = dom.root();
        let list = dom.append_element(root, "list", &[]).unwrap();
        dom.append_text(list, "lead").unwrap();
        let a = dom.append_element(list, "item", &[]).unwrap();
        dom.append_text(list, " ").unwrap();
        let b = dom.append_element(list, "item", &[("class", "x")]).unwrap();

        assert_eq!(ElementTree::first_child(&dom, list), Some(a));
        assert_eq!(ElementTree::next_sibling(&dom, a), Some(b));
        assert_eq!(ElementTree::prev_sibling(&dom, b), Some(a));
        assert_eq!(ElementTree::parent(&dom, a), Some(list));
        assert_eq!(ElementTree::parent(&dom, root), None);
        assert_eq!(dom.attribute(b, "class"), Some("x"));
        assert!(!dom.is_element(root));
    }
}
