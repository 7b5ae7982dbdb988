//! Rayon-backed selection
//!
//! Narrowing stays sequential; verification of the candidates, which never
//! share state, runs on the rayon pool. Results come back in the same order
//! as the sequential [`select`](crate::select).

use rayon::prelude::*;

use crate::config::MatchOptions;
use crate::match_set::MatchSet;
use crate::matching::{Matcher, collect_candidates};
use crate::pseudo::{AlwaysMatch, PseudoPolicy};
use crate::tree::ElementTree;
use crate::{Result, parse};

/// One-shot query from the root with parallel candidate verification
pub fn select_parallel<T>(
    tree: &T,
    selector: &str,
    options: &MatchOptions,
) -> Result<MatchSet<T::Node>>
where
    T: ElementTree + Sync + ?Sized,
    T::Node: Send + Sync,
{
    select_parallel_with(tree, selector, options, &AlwaysMatch)
}

/// [`select_parallel`] with a custom pseudo-class policy
pub fn select_parallel_with<T, P>(
    tree: &T,
    selector: &str,
    options: &MatchOptions,
    pseudo: &P,
) -> Result<MatchSet<T::Node>>
where
    T: ElementTree + Sync + ?Sized,
    T::Node: Send + Sync,
    P: PseudoPolicy<T> + Sync,
{
    let list = parse(selector)?;
    list.ensure_supported()?;

    let roots = MatchSet::single(tree.root());
    let matcher = Matcher::new(tree, pseudo, options);
    let mut found = MatchSet::new();
    for member in &list {
        let candidates = collect_candidates(tree, &roots, member, options);
        let verified: Vec<T::Node> = candidates
            .par_iter()
            .copied()
            .filter(|&node| matcher.matches_selector(member, node, false))
            .collect();
        found.extend(verified);
    }

    tracing::debug!("select_parallel `{}`: {} node(s)", list, found.len());
    Ok(found)
}

/// Run independent one-shot queries concurrently, one result per selector
pub fn select_many<T>(
    tree: &T,
    selectors: &[&str],
    options: &MatchOptions,
) -> Vec<Result<MatchSet<T::Node>>>
where
    T: ElementTree + Sync + ?Sized,
    T::Node: Send + Sync,
{
    selectors
        .par_iter()
        .map(|selector| select_parallel(tree, selector, options))
        .collect()
}
