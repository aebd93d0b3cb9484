use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{Instance, PropertyDescriptor, UpgradeMarker};
use crate::error::{DomError, SelectorError};
use crate::selector::Selector;

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

struct Node {
    key: u64,
    tag: String,
    attributes: RefCell<Vec<(String, String)>>,
    children: RefCell<Vec<Element>>,
    parent: RefCell<Weak<Node>>,
    marker: RefCell<UpgradeMarker>,
    properties: RefCell<Vec<(String, PropertyDescriptor)>>,
}

/// Shared handle to a node in a live element tree.
///
/// Cloning the handle does not clone the node. All mutation goes through
/// `&self`, so any holder of a handle (including a component constructor)
/// may change the tree while others are reading it. Callers that iterate
/// must work on snapshots such as [`Element::children`] and
/// [`Element::query_selector_all`], never on borrowed internals.
#[derive(Clone)]
pub struct Element(Rc<Node>);

/// Non-owning handle to an element.
///
/// A node owns its upgrade marker and properties, which own the component
/// instances. Instances that need their root element hold this handle so the
/// node can still be freed.
#[derive(Clone, Default)]
pub struct WeakElement(Weak<Node>);

impl WeakElement {
    pub fn new() -> Self {
        Self(Weak::new())
    }

    /// `None` once every owning handle is gone.
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(element) => f.debug_tuple("WeakElement").field(&element).finish(),
            None => f.write_str("WeakElement(<dropped>)"),
        }
    }
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Rc::new(Node {
            key: NEXT_KEY.fetch_add(1, Ordering::Relaxed),
            tag: tag.into().to_ascii_lowercase(),
            attributes: RefCell::new(Vec::new()),
            children: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            marker: RefCell::new(UpgradeMarker::new()),
            properties: RefCell::new(Vec::new()),
        }))
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    pub fn button() -> Self {
        Self::new("button")
    }

    // Builders

    pub fn id(self, id: impl Into<String>) -> Self {
        self.set_attribute("id", id);
        self
    }

    pub fn class(self, class: impl AsRef<str>) -> Self {
        for name in class.as_ref().split_whitespace() {
            self.add_class(name);
        }
        self
    }

    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn child(self, child: Element) -> Self {
        if let Err(e) = self.append_child(&child) {
            log::warn!("[domtree] {e}");
        }
        self
    }

    pub fn children_from(self, children: impl IntoIterator<Item = Element>) -> Self {
        for child in children {
            if let Err(e) = self.append_child(&child) {
                log::warn!("[domtree] {e}");
            }
        }
        self
    }

    // Identity

    /// Lowercased tag name.
    pub fn tag_name(&self) -> &str {
        &self.0.tag
    }

    /// Process-unique key, stable for the node's lifetime.
    pub fn key(&self) -> u64 {
        self.0.key
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn get_id(&self) -> Option<String> {
        self.attribute("id")
    }

    // Attributes

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .attributes
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.0.attributes.borrow().iter().any(|(n, _)| n == name)
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        let mut attributes = self.0.attributes.borrow_mut();
        match attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => attributes.push((name, value)),
        }
    }

    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        let mut attributes = self.0.attributes.borrow_mut();
        let index = attributes.iter().position(|(n, _)| n == name)?;
        Some(attributes.remove(index).1)
    }

    /// Snapshot of all attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.0.attributes.borrow().clone()
    }

    // Classes

    pub fn class_list(&self) -> Vec<String> {
        self.attribute("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|c| c.split_whitespace().any(|n| n == name))
    }

    pub fn add_class(&self, name: &str) {
        if name.is_empty() || self.has_class(name) {
            return;
        }
        let mut classes = self.class_list();
        classes.push(name.to_string());
        self.set_attribute("class", classes.join(" "));
    }

    pub fn remove_class(&self, name: &str) {
        if !self.has_class(name) {
            return;
        }
        let classes: Vec<String> = self.class_list().into_iter().filter(|c| c != name).collect();
        self.set_attribute("class", classes.join(" "));
    }

    // Tree

    pub fn parent(&self) -> Option<Element> {
        self.0.parent.borrow().upgrade().map(Element)
    }

    /// Snapshot of the direct children.
    pub fn children(&self) -> Vec<Element> {
        self.0.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.children.borrow().len()
    }

    /// Snapshot of every descendant in document (pre-)order, excluding `self`.
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        let mut stack: Vec<Element> = self.children().into_iter().rev().collect();
        while let Some(element) = stack.pop() {
            stack.extend(element.children().into_iter().rev());
            out.push(element);
        }
        out
    }

    /// True if `other` is `self` or one of its descendants.
    pub fn contains(&self, other: &Element) -> bool {
        let mut current = Some(other.clone());
        while let Some(element) = current {
            if element.ptr_eq(self) {
                return true;
            }
            current = element.parent();
        }
        false
    }

    /// Append `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Element) -> Result<(), DomError> {
        if child.contains(self) {
            return Err(DomError::HierarchyRequest {
                parent: self.to_string(),
                child: child.to_string(),
            });
        }
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
        Ok(())
    }

    /// Remove `child` if it is a direct child. Returns whether it was found.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = {
            let mut children = self.0.children.borrow_mut();
            match children.iter().position(|c| c.ptr_eq(child)) {
                Some(index) => {
                    children.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            *child.0.parent.borrow_mut() = Weak::new();
        }
        removed
    }

    /// Detach from the parent, if any.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    // Selectors

    pub fn matches(&self, selector: &Selector) -> bool {
        selector.matches(self)
    }

    /// Parse `selector` and return all matching descendants in document order.
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Element>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(&selector))
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<Element>, SelectorError> {
        let selector = Selector::parse(selector)?;
        Ok(self.descendants().into_iter().find(|e| selector.matches(e)))
    }

    /// Matching descendants for an already parsed selector.
    pub fn select_all(&self, selector: &Selector) -> Vec<Element> {
        self.descendants()
            .into_iter()
            .filter(|e| selector.matches(e))
            .collect()
    }

    // Upgrade marker

    pub fn marker(&self) -> Ref<'_, UpgradeMarker> {
        self.0.marker.borrow()
    }

    /// True if `name` is upgraded or still upgrading on this element.
    pub fn is_marked(&self, name: &str) -> bool {
        self.0.marker.borrow().contains(name)
    }

    pub fn is_upgraded(&self, name: &str) -> bool {
        self.0.marker.borrow().is_upgraded(name)
    }

    pub fn upgraded_names(&self) -> Vec<String> {
        self.0.marker.borrow().names()
    }

    pub fn instance(&self, name: &str) -> Option<Instance> {
        self.0.marker.borrow().instance(name)
    }

    pub fn instance_as<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        self.instance(name).and_then(|i| i.downcast::<T>().ok())
    }

    pub fn begin_upgrade(&self, name: &str) -> bool {
        self.0.marker.borrow_mut().begin(name)
    }

    pub fn complete_upgrade(&self, name: &str, instance: Instance) {
        self.0.marker.borrow_mut().complete(name, instance);
    }

    pub fn abort_upgrade(&self, name: &str) {
        self.0.marker.borrow_mut().abort(name);
    }

    // Properties

    pub fn define_property(
        &self,
        name: impl Into<String>,
        descriptor: PropertyDescriptor,
    ) -> Result<(), DomError> {
        let name = name.into();
        let mut properties = self.0.properties.borrow_mut();
        match properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) if !existing.configurable => Err(DomError::NotConfigurable(name)),
            Some((_, existing)) => {
                *existing = descriptor;
                Ok(())
            }
            None => {
                properties.push((name, descriptor));
                Ok(())
            }
        }
    }

    /// Assign a new value to an existing writable property.
    pub fn set_property(&self, name: &str, value: Instance) -> Result<(), DomError> {
        let mut properties = self.0.properties.borrow_mut();
        match properties.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) if !existing.writable => {
                Err(DomError::NotWritable(name.to_string()))
            }
            Some((_, existing)) => {
                existing.value = value;
                Ok(())
            }
            None => Err(DomError::Undefined(name.to_string())),
        }
    }

    /// Delete a configurable property. Returns whether it existed.
    pub fn delete_property(&self, name: &str) -> Result<bool, DomError> {
        let mut properties = self.0.properties.borrow_mut();
        let Some(index) = properties.iter().position(|(n, _)| n == name) else {
            return Ok(false);
        };
        if !properties[index].1.configurable {
            return Err(DomError::NotConfigurable(name.to_string()));
        }
        properties.remove(index);
        Ok(true)
    }

    pub fn property(&self, name: &str) -> Option<Instance> {
        self.property_descriptor(name).map(|d| d.value)
    }

    pub fn property_as<T: Any>(&self, name: &str) -> Option<Rc<T>> {
        self.property(name).and_then(|v| v.downcast::<T>().ok())
    }

    pub fn property_descriptor(&self, name: &str) -> Option<PropertyDescriptor> {
        self.0
            .properties
            .borrow()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, d)| d.clone())
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.0.properties.borrow().iter().any(|(n, _)| n == name)
    }

    /// Names of enumerable properties.
    pub fn property_names(&self) -> Vec<String> {
        self.0
            .properties
            .borrow()
            .iter()
            .filter(|(_, d)| d.enumerable)
            .map(|(n, _)| n.clone())
            .collect()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Element {}

impl fmt::Display for Element {
    /// Renders the opening tag, e.g. `<div id="a" class="foo">`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        for (name, value) in self.0.attributes.borrow().iter() {
            write!(f, " {name}=\"{value}\"")?;
        }
        write!(f, ">")
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element")
            .field(&format_args!("{self}"))
            .finish()
    }
}
