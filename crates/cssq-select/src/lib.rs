//! cssq - CSS selector engine
//!
//! Compiles CSS selector text into a structured form and evaluates it against
//! any tree implementing [`ElementTree`], bottom-up from the rightmost step.
//!
//! ```ignore
//! let mut finder = Finder::new(&dom);
//! finder.find("cd.a")?.find("[lang|=en]")?;
//! for node in finder.matches() { /* ... */ }
//! ```
//!
//! # Features
//! - `dom` (default): [`ElementTree`] for `cssq_dom::DomTree`
//! - `parallel`: rayon-backed [`parallel::select_parallel`]
//! - `serde`: serialization of compiled selectors

pub mod attr;
mod config;
mod error;
mod finder;
mod match_set;
mod matching;
mod model;
mod parser;
mod pseudo;
mod tree;

#[cfg(feature = "dom")]
mod dom;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use config::{CombinatorMode, MatchOptions};
pub use error::{Result, SelectError};
pub use finder::{Finder, select};
pub use match_set::MatchSet;
pub use model::{
    AttrOperator, AttributeTest, Combinator, CompiledSelector, SelectorList, SimpleSelector,
};
pub use parser::{SelectorBuilder, parse};
pub use pseudo::{AlwaysMatch, PseudoPolicy, StructuralPseudo};
pub use tree::{Ancestors, Children, Descendants, ElementTree};

#[cfg(feature = "dom")]
pub use cssq_dom;
