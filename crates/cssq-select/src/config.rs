//! Matching configuration

/// How combinators between steps are enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombinatorMode {
    /// Each combinator walks its real relationship: any ancestor, the
    /// parent, the previous sibling, or any previous sibling
    #[default]
    Strict,
    /// Every combinator is evaluated as a descendant combinator, so `a > b`
    /// and `a + b` behave like `a b`. Reproduces the legacy engine's results.
    Compat,
}

/// Matching options
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub combinators: CombinatorMode,

    /// Compare element names ignoring ASCII case (HTML-style trees)
    pub ignore_tag_case: bool,
}

impl MatchOptions {
    /// Options reproducing the legacy combinator behavior
    pub fn compat() -> Self {
        Self {
            combinators: CombinatorMode::Compat,
            ..Self::default()
        }
    }
}
