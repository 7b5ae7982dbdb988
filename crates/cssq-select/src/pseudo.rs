//! Pseudo-class and pseudo-element predicates
//!
//! Pseudo parts of a selector are evaluated through a [`PseudoPolicy`]. The
//! default policy accepts everything, so `a:hover` matches exactly what `a`
//! matches; [`StructuralPseudo`] adds the tree-structural pseudo-classes.

use crate::tree::ElementTree;

/// Decides pseudo-class and pseudo-element predicates for one node
pub trait PseudoPolicy<T: ElementTree + ?Sized> {
    fn pseudo_class(&self, tree: &T, node: T::Node, name: &str) -> bool;

    fn pseudo_element(&self, tree: &T, node: T::Node, name: &str) -> bool;
}

/// Every pseudo predicate is satisfied
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatch;

impl<T: ElementTree + ?Sized> PseudoPolicy<T> for AlwaysMatch {
    fn pseudo_class(&self, _tree: &T, _node: T::Node, _name: &str) -> bool {
        true
    }

    fn pseudo_element(&self, _tree: &T, _node: T::Node, _name: &str) -> bool {
        true
    }
}

/// Tree-structural pseudo-classes
///
/// Supports `:root`, `:empty`, `:first-child`, `:last-child`, `:only-child`,
/// `:first-of-type`, `:last-of-type` and `:only-of-type`. Anything else,
/// including every pseudo-element, falls back to [`AlwaysMatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralPseudo;

impl StructuralPseudo {
    fn same_type<T: ElementTree + ?Sized>(tree: &T, a: T::Node, b: T::Node) -> bool {
        tree.local_name(a) == tree.local_name(b)
    }

    fn first_of_type<T: ElementTree + ?Sized>(tree: &T, node: T::Node) -> bool {
        let mut cursor = tree.prev_sibling(node);
        while let Some(sibling) = cursor {
            if Self::same_type(tree, sibling, node) {
                return false;
            }
            cursor = tree.prev_sibling(sibling);
        }
        true
    }

    fn last_of_type<T: ElementTree + ?Sized>(tree: &T, node: T::Node) -> bool {
        let mut cursor = tree.next_sibling(node);
        while let Some(sibling) = cursor {
            if Self::same_type(tree, sibling, node) {
                return false;
            }
            cursor = tree.next_sibling(sibling);
        }
        true
    }
}

impl<T: ElementTree + ?Sized> PseudoPolicy<T> for StructuralPseudo {
    fn pseudo_class(&self, tree: &T, node: T::Node, name: &str) -> bool {
        let first = || tree.prev_sibling(node).is_none();
        let last = || tree.next_sibling(node).is_none();
        match name {
            // The topmost element, whose parent is not an element
            "root" => !tree.parent(node).is_some_and(|p| tree.is_element(p)),
            "empty" => tree.first_child(node).is_none(),
            "first-child" => first(),
            "last-child" => last(),
            "only-child" => first() && last(),
            "first-of-type" => Self::first_of_type(tree, node),
            "last-of-type" => Self::last_of_type(tree, node),
            "only-of-type" => Self::first_of_type(tree, node) && Self::last_of_type(tree, node),
            other => {
                tracing::trace!("Unknown pseudo-class :{} accepted", other);
                AlwaysMatch.pseudo_class(tree, node, other)
            }
        }
    }

    fn pseudo_element(&self, tree: &T, node: T::Node, name: &str) -> bool {
        AlwaysMatch.pseudo_element(tree, node, name)
    }
}
