//! Stateful query engine
//!
//! A [`Finder`] holds the current match set for one tree. The first `find`
//! narrows from the starting nodes to their descendants; every later `find`
//! filters what is already there, so chained calls only ever narrow.

use crate::config::MatchOptions;
use crate::match_set::MatchSet;
use crate::matching::{Matcher, collect_candidates};
use crate::model::SelectorList;
use crate::pseudo::{AlwaysMatch, PseudoPolicy};
use crate::tree::ElementTree;
use crate::{Result, SelectError, parse};

/// Selector engine bound to one tree
pub struct Finder<'t, T: ElementTree + ?Sized, P = AlwaysMatch> {
    tree: &'t T,
    pseudo: P,
    options: MatchOptions,
    matches: MatchSet<T::Node>,
    initialized: bool,
    last: Option<SelectorList>,
}

impl<'t, T: ElementTree + ?Sized> Finder<'t, T> {
    /// Start from the tree root
    pub fn new(tree: &'t T) -> Self {
        Self::starting_at(tree, MatchSet::single(tree.root()))
    }

    /// Start from an explicit set of nodes
    pub fn from_nodes<I>(tree: &'t T, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = T::Node>,
    {
        let mut start = MatchSet::new();
        for node in nodes {
            if !tree.contains(node) {
                return Err(SelectError::TypeMismatch {
                    message: format!("node {node:?} does not belong to this tree"),
                });
            }
            start.insert(node);
        }
        Ok(Self::starting_at(tree, start))
    }

    fn starting_at(tree: &'t T, matches: MatchSet<T::Node>) -> Self {
        Self {
            tree,
            pseudo: AlwaysMatch,
            options: MatchOptions::default(),
            matches,
            initialized: false,
            last: None,
        }
    }
}

impl<'t, T, P> Finder<'t, T, P>
where
    T: ElementTree + ?Sized,
    P: PseudoPolicy<T>,
{
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    /// Swap the pseudo-class policy
    pub fn with_pseudo<Q: PseudoPolicy<T>>(self, pseudo: Q) -> Finder<'t, T, Q> {
        Finder {
            tree: self.tree,
            pseudo,
            options: self.options,
            matches: self.matches,
            initialized: self.initialized,
            last: self.last,
        }
    }

    /// Parse `selector` and narrow the current match set with it
    ///
    /// On error the finder is left exactly as it was.
    pub fn find(&mut self, selector: &str) -> Result<&mut Self> {
        let list = parse(selector)?;
        self.find_compiled(list)
    }

    /// Narrow with an already compiled selector list
    pub fn find_compiled(&mut self, list: SelectorList) -> Result<&mut Self> {
        list.ensure_supported()?;

        let before = self.matches.len();
        let matcher = Matcher::new(self.tree, &self.pseudo, &self.options);
        let next: MatchSet<T::Node> = if self.initialized {
            self.matches
                .iter()
                .filter(|&node| matcher.matches_list(&list, node))
                .collect()
        } else {
            let mut next = MatchSet::new();
            for selector in &list {
                let candidates =
                    collect_candidates(self.tree, &self.matches, selector, &self.options);
                for node in candidates {
                    if matcher.matches_selector(selector, node, false) {
                        next.insert(node);
                    } else {
                        tracing::trace!("Rejected {:?} for `{}`", node, selector);
                    }
                }
            }
            next
        };

        tracing::debug!(
            "find `{}`: {} -> {} node(s){}",
            list,
            before,
            next.len(),
            if self.initialized { "" } else { " (initial)" }
        );

        self.matches = next;
        self.initialized = true;
        self.last = Some(list);
        Ok(self)
    }

    /// Current match set
    pub fn matches(&self) -> &MatchSet<T::Node> {
        &self.matches
    }

    pub fn into_matches(self) -> MatchSet<T::Node> {
        self.matches
    }

    /// Selector used by the most recent successful `find`
    pub fn last_selector(&self) -> Option<&SelectorList> {
        self.last.as_ref()
    }

    /// False until the first successful `find`
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn tree(&self) -> &'t T {
        self.tree
    }

    /// Search the descendants of the current matches
    ///
    /// Returns a new finder; `self` is unchanged.
    pub fn within(&self, selector: &str) -> Result<Self>
    where
        P: Clone,
    {
        let mut scoped = Finder {
            tree: self.tree,
            pseudo: self.pseudo.clone(),
            options: self.options.clone(),
            matches: self.matches.clone(),
            initialized: false,
            last: None,
        };
        scoped.find(selector)?;
        Ok(scoped)
    }

    /// Back to the tree root, uninitialized
    pub fn reset(&mut self) {
        self.matches = MatchSet::single(self.tree.root());
        self.initialized = false;
        self.last = None;
    }
}

/// One-shot query from the tree root
pub fn select<T: ElementTree + ?Sized>(tree: &T, selector: &str) -> Result<MatchSet<T::Node>> {
    let mut finder = Finder::new(tree);
    finder.find(selector)?;
    Ok(finder.into_matches())
}
