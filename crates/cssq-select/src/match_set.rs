//! Identity-keyed node set

use std::collections::HashSet;
use std::hash::Hash;

/// Set of node handles, deduplicated by identity
///
/// Keeps first-insertion order, so a single matching pass yields nodes in
/// the order they were found.
#[derive(Debug, Clone)]
pub struct MatchSet<N> {
    order: Vec<N>,
    seen: HashSet<N>,
}

impl<N: Copy + Eq + Hash> MatchSet<N> {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Set holding a single node
    pub fn single(node: N) -> Self {
        let mut set = Self::new();
        set.insert(node);
        set
    }

    /// Insert a node; returns false if it was already present
    pub fn insert(&mut self, node: N) -> bool {
        if self.seen.insert(node) {
            self.order.push(node);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, node: N) -> bool {
        self.seen.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, N>> {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[N] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<N> {
        self.order
    }
}

impl<N: Copy + Eq + Hash> Default for MatchSet<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Equal when both hold the same nodes, in any order
impl<N: Copy + Eq + Hash> PartialEq for MatchSet<N> {
    fn eq(&self, other: &Self) -> bool {
        self.seen == other.seen
    }
}

impl<N: Copy + Eq + Hash> Eq for MatchSet<N> {}

impl<N: Copy + Eq + Hash> FromIterator<N> for MatchSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<N: Copy + Eq + Hash> Extend<N> for MatchSet<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        for node in iter {
            self.insert(node);
        }
    }
}

impl<'a, N: Copy + Eq + Hash> IntoIterator for &'a MatchSet<N> {
    type Item = N;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
