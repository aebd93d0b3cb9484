use crate::element::Element;
use crate::error::{DomError, SelectorError};
use crate::selector::Selector;

/// A live document: a synthetic `#document` root that every inserted
/// element hangs off. Cloning shares the same tree.
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: Element::new("#document"),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn append_child(&self, child: &Element) -> Result<(), DomError> {
        self.root.append_child(child)
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.root.contains(element)
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, SelectorError> {
        self.root.query_selector_all(selector)
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
        self.root.query_selector(selector)
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<Element> {
        self.root.select_all(selector)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        crate::element::find_element(&self.root, id)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
