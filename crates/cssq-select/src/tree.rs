//! Tree capability trait
//!
//! The engine never owns nodes. It reads an externally owned tree through
//! [`ElementTree`] and keeps only the `Copy` handles it hands out.

use std::fmt::Debug;
use std::hash::Hash;

/// Read-only navigation over a tree of elements
///
/// Child and sibling navigation only visits elements; text and comment nodes
/// are invisible to selectors. The root may be a non-element document node.
pub trait ElementTree {
    /// Stable node identity
    type Node: Copy + Eq + Hash + Debug;

    /// Node a fresh query starts from
    fn root(&self) -> Self::Node;

    /// Whether `node` is a live handle into this tree
    fn contains(&self, node: Self::Node) -> bool;

    /// Tag name; `None` for anything that is not an element
    fn local_name(&self, node: Self::Node) -> Option<&str>;

    /// Namespace URI of an element
    fn namespace(&self, node: Self::Node) -> Option<&str>;

    /// Attribute value by name
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// First element child
    fn first_child(&self, node: Self::Node) -> Option<Self::Node>;

    /// Next element sibling
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    /// Previous element sibling
    fn prev_sibling(&self, node: Self::Node) -> Option<Self::Node>;

    fn is_element(&self, node: Self::Node) -> bool {
        self.local_name(node).is_some()
    }

    /// Element children in order
    fn children(&self, node: Self::Node) -> Children<'_, Self> {
        Children {
            tree: self,
            next: self.first_child(node),
        }
    }

    /// Element descendants in document order, `node` itself excluded
    fn descendants(&self, node: Self::Node) -> Descendants<'_, Self> {
        Descendants {
            tree: self,
            scope: node,
            next: self.first_child(node),
        }
    }

    /// Parent chain up to the root, `node` itself excluded
    fn ancestors(&self, node: Self::Node) -> Ancestors<'_, Self> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }
}

pub struct Children<'a, T: ElementTree + ?Sized> {
    tree: &'a T,
    next: Option<T::Node>,
}

impl<T: ElementTree + ?Sized> Iterator for Children<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let node = self.next?;
        self.next = self.tree.next_sibling(node);
        Some(node)
    }
}

/// Pre-order walk bounded by a scope node
pub struct Descendants<'a, T: ElementTree + ?Sized> {
    tree: &'a T,
    scope: T::Node,
    next: Option<T::Node>,
}

impl<T: ElementTree + ?Sized> Descendants<'_, T> {
    fn successor(&self, node: T::Node) -> Option<T::Node> {
        if let Some(child) = self.tree.first_child(node) {
            return Some(child);
        }
        let mut cursor = node;
        loop {
            if cursor == self.scope {
                return None;
            }
            if let Some(sibling) = self.tree.next_sibling(cursor) {
                return Some(sibling);
            }
            cursor = self.tree.parent(cursor)?;
        }
    }
}

impl<T: ElementTree + ?Sized> Iterator for Descendants<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let node = self.next?;
        self.next = self.successor(node);
        Some(node)
    }
}

pub struct Ancestors<'a, T: ElementTree + ?Sized> {
    tree: &'a T,
    next: Option<T::Node>,
}

impl<T: ElementTree + ?Sized> Iterator for Ancestors<'_, T> {
    type Item = T::Node;

    fn next(&mut self) -> Option<T::Node> {
        let node = self.next?;
        self.next = self.tree.parent(node);
        Some(node)
    }
}
