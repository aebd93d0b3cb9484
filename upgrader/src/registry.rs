//! Component registry: name → constructor and discovery selector.

use std::fmt;
use std::rc::Rc;

use crate::component::{Component, Constructor, constructor_of};

/// One registered component.
#[derive(Clone)]
pub struct Registration {
    name: String,
    selector: Option<String>,
    constructor: Constructor,
    widget: bool,
}

impl Registration {
    pub fn new(name: impl Into<String>, constructor: Constructor) -> Self {
        Self {
            name: name.into(),
            selector: None,
            constructor,
            widget: true,
        }
    }

    /// Registration built from a [`Component`]'s `attach_to`.
    pub fn of<C: Component>(name: impl Into<String>) -> Self {
        Self::new(name, constructor_of::<C>())
    }

    /// Selector used to discover candidate elements.
    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Whether the instance is also exposed as a property on its element.
    pub fn widget(mut self, widget: bool) -> Self {
        self.widget = widget;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn css_selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn constructor(&self) -> &Constructor {
        &self.constructor
    }

    pub fn is_widget(&self) -> bool {
        self.widget
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("selector", &self.selector)
            .field("widget", &self.widget)
            .finish_non_exhaustive()
    }
}

/// Registered components in registration order.
///
/// At most one record exists per name. Registering a name again replaces the
/// record in place, so iteration order stays that of the first registration.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    records: Vec<Rc<Registration>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `registration.name()`.
    ///
    /// A registration without a selector keeps the selector of the record it
    /// replaces. Returns the replaced record, if any.
    pub fn register(&mut self, mut registration: Registration) -> Option<Rc<Registration>> {
        match self.position(registration.name()) {
            Some(index) => {
                if registration.selector.is_none() {
                    registration.selector = self.records[index].selector.clone();
                }
                Some(std::mem::replace(
                    &mut self.records[index],
                    Rc::new(registration),
                ))
            }
            None => {
                self.records.push(Rc::new(registration));
                None
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<Rc<Registration>> {
        self.position(name).map(|index| self.records[index].clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// `supplied` if given, else the registered selector for `name`.
    pub fn resolve_selector(&self, name: &str, supplied: Option<&str>) -> Option<String> {
        match supplied {
            Some(selector) => Some(selector.to_string()),
            None => self
                .find(name)
                .and_then(|record| record.selector.clone()),
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.name.clone()).collect()
    }

    /// Snapshot of every record.
    pub fn records(&self) -> Vec<Rc<Registration>> {
        self.records.clone()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use domtree::Element;

    use super::*;
    use crate::component::{ComponentError, Instance};

    fn unit_ctor() -> Constructor {
        Rc::new(|_: &Element| -> Result<Instance, ComponentError> { Ok(Rc::new(())) })
    }

    #[test]
    fn register_and_find() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.find("Foo").is_none());
        assert!(
            registry
                .register(Registration::new("Foo", unit_ctor()).selector(".foo"))
                .is_none()
        );
        let record = registry.find("Foo").unwrap();
        assert_eq!(record.css_selector(), Some(".foo"));
        assert!(record.is_widget());
    }

    #[test]
    fn last_writer_wins_in_place() {
        let mut registry = ComponentRegistry::new();
        registry.register(Registration::new("A", unit_ctor()).selector(".a"));
        registry.register(Registration::new("B", unit_ctor()).selector(".b"));
        let old = registry.register(Registration::new("A", unit_ctor()).selector(".a2"));

        assert_eq!(old.unwrap().css_selector(), Some(".a"));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names(), vec!["A", "B"]);
        assert_eq!(registry.resolve_selector("A", None).as_deref(), Some(".a2"));
    }

    #[test]
    fn missing_selector_is_inherited() {
        let mut registry = ComponentRegistry::new();
        registry.register(Registration::new("A", unit_ctor()).selector(".a"));
        registry.register(Registration::new("A", unit_ctor()).widget(false));
        let record = registry.find("A").unwrap();
        assert_eq!(record.css_selector(), Some(".a"));
        assert!(!record.is_widget());
    }

    #[test]
    fn resolve_selector_prefers_supplied() {
        let mut registry = ComponentRegistry::new();
        assert_eq!(registry.resolve_selector("A", None), None);
        assert_eq!(registry.resolve_selector("A", Some(".x")).as_deref(), Some(".x"));
        registry.register(Registration::new("A", unit_ctor()));
        assert_eq!(registry.resolve_selector("A", None), None);
    }
}
