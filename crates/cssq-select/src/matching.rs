//! Bottom-up selector matching
//!
//! A candidate is checked against the rightmost step first; the remaining
//! steps are then verified outward by walking ancestors or preceding
//! siblings as each combinator requires, backtracking when a branch fails.

use std::collections::HashSet;

use crate::attr::class_tokens;
use crate::config::{CombinatorMode, MatchOptions};
use crate::match_set::MatchSet;
use crate::model::{Combinator, CompiledSelector, SelectorList, SimpleSelector};
use crate::pseudo::PseudoPolicy;
use crate::tree::ElementTree;

/// Per-node verification against compiled selectors
pub(crate) struct Matcher<'a, T: ElementTree + ?Sized, P> {
    tree: &'a T,
    pseudo: &'a P,
    options: &'a MatchOptions,
}

impl<'a, T, P> Matcher<'a, T, P>
where
    T: ElementTree + ?Sized,
    P: PseudoPolicy<T>,
{
    pub fn new(tree: &'a T, pseudo: &'a P, options: &'a MatchOptions) -> Self {
        Self {
            tree,
            pseudo,
            options,
        }
    }

    fn element_matches(&self, expected: &str, actual: &str) -> bool {
        if self.options.ignore_tag_case {
            expected.eq_ignore_ascii_case(actual)
        } else {
            expected == actual
        }
    }

    /// Check every predicate of one step against `node`
    fn step_matches(&self, step: &SimpleSelector, node: T::Node, check_element: bool) -> bool {
        let tree = self.tree;
        let Some(name) = tree.local_name(node) else {
            return false;
        };

        if check_element
            && let Some(expected) = &step.element
            && !self.element_matches(expected, name)
        {
            return false;
        }

        if let Some(id) = &step.id
            && tree.attribute(node, "id") != Some(id.as_str())
        {
            return false;
        }

        if !step.classes.is_empty() {
            let Some(class) = tree.attribute(node, "class") else {
                return false;
            };
            if !step
                .classes
                .iter()
                .all(|wanted| class_tokens(class).any(|token| token == wanted))
            {
                return false;
            }
        }

        step.attributes
            .iter()
            .all(|test| test.matches(tree.attribute(node, &test.name)))
            && step
                .pseudo_classes
                .iter()
                .all(|p| self.pseudo.pseudo_class(tree, node, p))
            && step
                .pseudo_elements
                .iter()
                .all(|p| self.pseudo.pseudo_element(tree, node, p))
    }

    /// Does `node` match `selector`?
    ///
    /// With `check_element` false the rightmost step's element name is taken
    /// as already satisfied, as after the initial tag-name narrowing.
    pub fn matches_selector(
        &self,
        selector: &CompiledSelector,
        node: T::Node,
        check_element: bool,
    ) -> bool {
        let steps = selector.steps();
        let Some(last) = steps.len().checked_sub(1) else {
            return false;
        };
        let mut failed = HashSet::new();
        self.step_matches(&steps[last], node, check_element)
            && self.matches_left(steps, last, node, &mut failed)
    }

    /// Does `node` match any member of `list`?
    pub fn matches_list(&self, list: &SelectorList, node: T::Node) -> bool {
        list.iter().any(|selector| self.matches_selector(selector, node, true))
    }

    /// `steps[index]` matched `node`; verify the steps to its left
    ///
    /// `failed` records `(index, node)` pairs already known not to satisfy
    /// the steps left of `index`, so each pair is walked at most once per
    /// candidate.
    fn matches_left(
        &self,
        steps: &[SimpleSelector],
        index: usize,
        node: T::Node,
        failed: &mut HashSet<(usize, T::Node)>,
    ) -> bool {
        if index == 0 {
            return true;
        }
        if failed.contains(&(index, node)) {
            return false;
        }

        let combinator = match self.options.combinators {
            CombinatorMode::Compat => Combinator::Descendant,
            CombinatorMode::Strict => steps[index].combinator,
        };

        let tree = self.tree;
        let found = match combinator {
            Combinator::Descendant | Combinator::None => tree
                .ancestors(node)
                .any(|ancestor| self.try_step(steps, index - 1, ancestor, failed)),
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|parent| self.try_step(steps, index - 1, parent, failed)),
            Combinator::AdjacentSibling => tree
                .prev_sibling(node)
                .is_some_and(|sibling| self.try_step(steps, index - 1, sibling, failed)),
            Combinator::GeneralSibling => {
                let mut found = false;
                let mut cursor = tree.prev_sibling(node);
                while let Some(sibling) = cursor {
                    if self.try_step(steps, index - 1, sibling, failed) {
                        found = true;
                        break;
                    }
                    cursor = tree.prev_sibling(sibling);
                }
                found
            }
        };

        if !found {
            failed.insert((index, node));
        }
        found
    }

    /// Does `candidate` match `steps[index]` and everything left of it?
    fn try_step(
        &self,
        steps: &[SimpleSelector],
        index: usize,
        candidate: T::Node,
        failed: &mut HashSet<(usize, T::Node)>,
    ) -> bool {
        self.step_matches(&steps[index], candidate, true)
            && self.matches_left(steps, index, candidate, failed)
    }
}

/// Initial narrowing: descendants of `roots` carrying the target's tag name
pub(crate) fn collect_candidates<T: ElementTree + ?Sized>(
    tree: &T,
    roots: &MatchSet<T::Node>,
    selector: &CompiledSelector,
    options: &MatchOptions,
) -> Vec<T::Node> {
    let target = selector.rightmost().element.as_deref();
    let mut candidates = Vec::new();
    for root in roots {
        candidates.extend(tree.descendants(root).filter(|&node| {
            match (target, tree.local_name(node)) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(expected), Some(name)) if options.ignore_tag_case => {
                    expected.eq_ignore_ascii_case(name)
                }
                (Some(expected), Some(name)) => expected == name,
            }
        }));
    }
    candidates
}
