//! Selector builder
//!
//! Receives parse events one part at a time and assembles the selector list.
//! A combinator closes the current step and is attached to the step that
//! follows it; a comma closes the whole selector.

use std::mem;

use crate::model::{AttributeTest, Combinator, CompiledSelector, SelectorList, SimpleSelector};

#[derive(Debug, Default)]
pub struct SelectorBuilder {
    selectors: Vec<CompiledSelector>,
    steps: Vec<SimpleSelector>,
    current: SimpleSelector,
    pending: Combinator,
}

impl SelectorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&mut self, name: &str) {
        self.current.set_element(name);
    }

    pub fn id(&mut self, id: &str) {
        self.current.id = Some(id.to_string());
    }

    pub fn class(&mut self, class: &str) {
        self.current.classes.insert(class.to_string());
    }

    pub fn attribute(&mut self, test: AttributeTest) {
        self.current.attributes.push(test);
    }

    pub fn pseudo_class(&mut self, name: &str) {
        self.current.pseudo_classes.push(name.to_string());
    }

    pub fn pseudo_element(&mut self, name: &str) {
        self.current.pseudo_elements.push(name.to_string());
    }

    /// Close the current step; the next one is joined by `combinator`
    pub fn combinator(&mut self, combinator: Combinator) {
        self.close_step();
        self.pending = combinator;
    }

    /// Close the current selector and start an independent one
    pub fn next_selector(&mut self) {
        self.close_step();
        self.close_selector();
    }

    /// Close everything and return the list
    pub fn finish(mut self) -> SelectorList {
        self.next_selector();
        SelectorList::new(self.selectors)
    }

    fn close_step(&mut self) {
        let mut step = mem::take(&mut self.current);
        step.combinator = mem::take(&mut self.pending);
        self.steps.push(step);
    }

    fn close_selector(&mut self) {
        if let Some(selector) = CompiledSelector::new(mem::take(&mut self.steps)) {
            self.selectors.push(selector);
        }
        self.pending = Combinator::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combinator_attaches_to_next_step() {
        let mut builder = SelectorBuilder::new();
        builder.element("cd");
        builder.combinator(Combinator::Child);
        builder.element("title");
        let list = builder.finish();

        let steps = list.selectors()[0].steps();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].combinator, Combinator::None);
        assert_eq!(steps[1].combinator, Combinator::Child);
        assert_eq!(steps[1].element.as_deref(), Some("title"));
    }

    #[test]
    fn test_next_selector_starts_fresh() {
        let mut builder = SelectorBuilder::new();
        builder.element("title");
        builder.next_selector();
        builder.element("cd");
        builder.class("a");
        let list = builder.finish();

        assert_eq!(list.len(), 2);
        assert_eq!(list.selectors()[1].steps()[0].combinator, Combinator::None);
        assert!(list.selectors()[1].rightmost().classes.contains("a"));
    }
}
