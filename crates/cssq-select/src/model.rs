//! Compiled selector model
//!
//! A selector list is a set of independent [`CompiledSelector`]s. Each one is
//! an ordered sequence of [`SimpleSelector`] steps written left to right and
//! matched right to left: the last step describes the target element, and
//! every step's [`Combinator`] says how it relates to the step before it.

use std::collections::BTreeSet;
use std::fmt::{self, Write};
use std::str::FromStr;

use crate::{Result, SelectError};

/// Relationship between a step and the step to its left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Combinator {
    /// First step of a selector
    #[default]
    None,
    /// `a b` - any ancestor
    Descendant,
    /// `a > b` - the parent
    Child,
    /// `a + b` - the immediately preceding sibling
    AdjacentSibling,
    /// `a ~ b` - any preceding sibling
    GeneralSibling,
}

impl Combinator {
    /// Source text used between two steps
    pub fn separator(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::AdjacentSibling => " + ",
            Self::GeneralSibling => " ~ ",
        }
    }
}

/// Attribute comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrOperator {
    /// `[attr]` - presence only
    Exists,
    /// `[attr=value]`
    Exact,
    /// `[attr~=value]` - whitespace-separated token
    Includes,
    /// `[attr|=value]` - hyphen-separated segment
    DashMatch,
    /// `[attr*=value]` - substring
    Substring,
    /// `[attr^=value]`
    Prefix,
    /// `[attr$=value]`
    Suffix,
}

impl AttrOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Exists => "",
            Self::Exact => "=",
            Self::Includes => "~=",
            Self::DashMatch => "|=",
            Self::Substring => "*=",
            Self::Prefix => "^=",
            Self::Suffix => "$=",
        }
    }
}

/// One `[attr...]` clause
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeTest {
    pub name: String,
    pub namespace: Option<String>,
    pub operator: AttrOperator,
    /// Present for every operator except `Exists`
    pub value: Option<String>,
}

impl AttributeTest {
    /// `[name]`
    pub fn exists(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            operator: AttrOperator::Exists,
            value: None,
        }
    }

    /// `[name<op>value]`
    pub fn new(name: impl Into<String>, operator: AttrOperator, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            operator,
            value: Some(value.into()),
        }
    }

    /// Test an attribute value; `None` means the attribute is absent
    pub fn matches(&self, actual: Option<&str>) -> bool {
        match (self.operator, actual, self.value.as_deref()) {
            (_, None, _) => false,
            (AttrOperator::Exists, Some(_), _) => true,
            (op, Some(haystack), Some(needle)) => crate::attr::matches(op, needle, haystack),
            // An operator without a value can only come from a hand-built test
            (_, Some(_), None) => false,
        }
    }
}

/// One compound step: element, id, classes, attributes and pseudos
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleSelector {
    /// Tag name; `None` matches any element
    pub element: Option<String>,
    pub namespace: Option<String>,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: Vec<AttributeTest>,
    pub pseudo_classes: Vec<String>,
    pub pseudo_elements: Vec<String>,
    /// Relationship to the previous step
    pub combinator: Combinator,
}

impl SimpleSelector {
    /// The universal step `*`
    pub fn any() -> Self {
        Self::default()
    }

    /// Step constrained to a tag name; `*` and `""` leave it unconstrained
    pub fn element(name: &str) -> Self {
        let mut step = Self::default();
        step.set_element(name);
        step
    }

    pub fn set_element(&mut self, name: &str) {
        self.element = match name {
            "" | "*" => None,
            name => Some(name.to_string()),
        };
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    pub fn with_attribute(mut self, test: AttributeTest) -> Self {
        self.attributes.push(test);
        self
    }

    pub fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// True when the step constrains nothing
    pub fn is_universal(&self) -> bool {
        self.element.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attributes.is_empty()
            && self.pseudo_classes.is_empty()
            && self.pseudo_elements.is_empty()
    }

    /// Reject an empty element name and namespace-qualified parts
    pub fn ensure_supported(&self) -> Result<()> {
        if self.element.as_deref() == Some("") {
            return Err(SelectError::invalid(
                "empty element name; use `None` for any element",
            ));
        }
        if let Some(ns) = &self.namespace {
            return Err(SelectError::namespace(format!("element namespace `{ns}`")));
        }
        if let Some(attr) = self.attributes.iter().find(|a| a.namespace.is_some()) {
            return Err(SelectError::namespace(format!(
                "namespaced attribute `{}`",
                attr.name
            )));
        }
        Ok(())
    }
}

/// A sequence of steps, matched right to left
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSelector"))]
pub struct CompiledSelector {
    steps: Vec<SimpleSelector>,
}

/// Unchecked wire form of [`CompiledSelector`]
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSelector {
    steps: Vec<SimpleSelector>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSelector> for CompiledSelector {
    type Error = SelectError;

    fn try_from(raw: RawSelector) -> Result<Self> {
        if raw.steps.iter().any(|step| step.element.as_deref() == Some("")) {
            return Err(SelectError::invalid("empty element name"));
        }
        Self::new(raw.steps).ok_or_else(|| SelectError::invalid("selector has no steps"))
    }
}

impl CompiledSelector {
    /// Build from steps; a selector needs at least one
    pub fn new(steps: Vec<SimpleSelector>) -> Option<Self> {
        (!steps.is_empty()).then_some(Self { steps })
    }

    /// Steps in source order
    pub fn steps(&self) -> &[SimpleSelector] {
        &self.steps
    }

    /// The target step
    pub fn rightmost(&self) -> &SimpleSelector {
        // Non-empty by construction
        &self.steps[self.steps.len() - 1]
    }

    pub fn ensure_supported(&self) -> Result<()> {
        if self.steps.is_empty() {
            return Err(SelectError::invalid("selector has no steps"));
        }
        self.steps.iter().try_for_each(SimpleSelector::ensure_supported)
    }
}

/// Comma-separated selectors; a node matches if any member matches
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorList {
    selectors: Vec<CompiledSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<CompiledSelector>) -> Self {
        Self { selectors }
    }

    pub fn selectors(&self) -> &[CompiledSelector] {
        &self.selectors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompiledSelector> {
        self.selectors.iter()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn ensure_supported(&self) -> Result<()> {
        self.selectors.iter().try_for_each(CompiledSelector::ensure_supported)
    }
}

impl FromStr for SelectorList {
    type Err = SelectError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse(s)
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a CompiledSelector;
    type IntoIter = std::slice::Iter<'a, CompiledSelector>;

    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

// ============================================================================
// Canonical text
// ============================================================================

fn write_ident(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    for (i, c) in ident.chars().enumerate() {
        let plain = c == '_' || c == '-' || c.is_alphanumeric() || !c.is_ascii();
        if !plain || (i == 0 && c.is_ascii_digit()) {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    Ok(())
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

impl fmt::Display for AttributeTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        write_ident(f, &self.name)?;
        if let Some(value) = &self.value {
            f.write_str(self.operator.symbol())?;
            write_string(f, value)?;
        }
        f.write_char(']')
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.element {
            Some(name) => write_ident(f, name)?,
            None if self.is_universal() => f.write_char('*')?,
            None => {}
        }
        if let Some(id) = &self.id {
            f.write_char('#')?;
            write_ident(f, id)?;
        }
        for class in &self.classes {
            f.write_char('.')?;
            write_ident(f, class)?;
        }
        for attr in &self.attributes {
            write!(f, "{attr}")?;
        }
        for pseudo in &self.pseudo_classes {
            f.write_char(':')?;
            write_ident(f, pseudo)?;
        }
        for pseudo in &self.pseudo_elements {
            f.write_str("::")?;
            write_ident(f, pseudo)?;
        }
        Ok(())
    }
}

impl fmt::Display for CompiledSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(step.combinator.separator())?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
