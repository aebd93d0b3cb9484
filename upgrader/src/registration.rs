//! Static registrations submitted at link time by `#[component]`.

use std::rc::Rc;

use domtree::Element;

use crate::component::{ComponentError, Instance};
use crate::registry::Registration;

/// Component registration entry for inventory.
pub struct ComponentRegistration {
    /// Component name.
    pub name: &'static str,
    /// Selector used to discover candidate elements.
    pub selector: Option<&'static str>,
    /// Whether to expose the instance as a property on its element.
    pub widget: bool,
    /// Builds the instance for an element.
    pub factory: fn(&Element) -> Result<Instance, ComponentError>,
}

impl ComponentRegistration {
    pub const fn new(
        name: &'static str,
        selector: Option<&'static str>,
        widget: bool,
        factory: fn(&Element) -> Result<Instance, ComponentError>,
    ) -> Self {
        Self {
            name,
            selector,
            widget,
            factory,
        }
    }

    /// Convert into a runtime registry record.
    pub fn to_registration(&self) -> Registration {
        let registration = Registration::new(self.name, Rc::new(self.factory)).widget(self.widget);
        match self.selector {
            Some(selector) => registration.selector(selector),
            None => registration,
        }
    }
}

inventory::collect!(ComponentRegistration);

/// Every statically submitted component.
pub fn registered_components() -> impl Iterator<Item = &'static ComponentRegistration> {
    inventory::iter::<ComponentRegistration>()
}

/// Find a statically submitted component by name.
pub fn find_registered(name: &str) -> Option<&'static ComponentRegistration> {
    registered_components().find(|r| r.name == name)
}
