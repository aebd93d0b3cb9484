//! Attribute-driven discovery.
//!
//! Elements opt in one at a time with a marker attribute naming their
//! component (`<div data-mdc-auto-init="MDCRipple">`). Unlike the
//! selector-driven [`ComponentHandler`](crate::handler::ComponentHandler),
//! unknown names and empty markers abort the pass.

mod config;
mod registry;

use std::cell::RefCell;
use std::rc::Rc;

use domtree::{Element, PropertyDescriptor, Selector};
use log::{debug, warn};

use crate::component::{Component, Constructor, Instance, constructor_of};
use crate::error::UpgradeError;
use crate::registration::registered_components;

pub use config::AutoInitConfig;
pub use registry::AutoInitRegistry;

type WarnFn = Rc<dyn Fn(&str)>;

/// Result of an [`AutoInit::auto_init`] pass.
#[derive(Clone, Default)]
pub struct AutoInitReport {
    /// Instances created in this pass, in document order.
    pub created: Vec<Instance>,
    /// Elements skipped because they were already initialized.
    pub skipped: usize,
}

impl AutoInitReport {
    pub fn created_count(&self) -> usize {
        self.created.len()
    }
}

impl std::fmt::Debug for AutoInitReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoInitReport")
            .field("created", &self.created.len())
            .field("skipped", &self.skipped)
            .finish()
    }
}

/// Attribute-driven initializer with its own name → constructor registry.
pub struct AutoInit {
    config: AutoInitConfig,
    registry: RefCell<AutoInitRegistry>,
    warn: WarnFn,
}

impl AutoInit {
    pub fn new() -> Self {
        Self::with_config(AutoInitConfig::default())
    }

    pub fn with_config(config: AutoInitConfig) -> Self {
        Self {
            config,
            registry: RefCell::new(AutoInitRegistry::new()),
            warn: Rc::new(|message: &str| warn!("{message}")),
        }
    }

    /// Replace the default warning channel (`log::warn!`).
    pub fn with_warn(mut self, warn: impl Fn(&str) + 'static) -> Self {
        self.warn = Rc::new(warn);
        self
    }

    pub fn config(&self) -> &AutoInitConfig {
        &self.config
    }

    pub fn register(&self, name: &str, constructor: Constructor) {
        let overridden = self.registry.borrow_mut().insert(name, constructor);
        if overridden {
            (self.warn)(&format!("(auto-init) Overriding registration for {name}"));
        }
    }

    /// Register `C` under `name` using its `attach_to` factory.
    pub fn register_component<C: Component>(&self, name: &str) {
        self.register(name, constructor_of::<C>());
    }

    /// Register every component submitted with `#[component]`.
    pub fn register_discovered(&self) {
        for registration in registered_components() {
            self.register(registration.name, Rc::new(registration.factory));
        }
    }

    /// Stop discovering `name`. Existing instances are untouched.
    pub fn deregister(&self, name: &str) -> bool {
        self.registry.borrow_mut().remove(name)
    }

    pub fn deregister_all(&self) {
        self.registry.borrow_mut().clear();
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.borrow().contains(name)
    }

    /// Initialize every descendant of `root` carrying the marker attribute.
    ///
    /// Each instance is exposed on its element as a hidden, read-only,
    /// configurable property named after the component. Elements that
    /// already carry that property are reported through `warn` (or the
    /// configured channel) and skipped.
    ///
    /// The check is by property name only, so an element whose
    /// [`ComponentHandler`](crate::handler::ComponentHandler) upgrade
    /// exposed a widget property under the same name is skipped too.
    ///
    /// An empty marker or an unregistered name stops the pass; elements
    /// initialized before the failure keep their instances.
    pub fn auto_init(
        &self,
        root: &Element,
        warn: Option<&dyn Fn(&str)>,
    ) -> Result<AutoInitReport, UpgradeError> {
        let warn = warn.unwrap_or(&*self.warn);
        let selector = Selector::attribute(&self.config.marker_attribute);
        let mut report = AutoInitReport::default();

        for element in root.select_all(&selector) {
            let name = element
                .attribute(&self.config.marker_attribute)
                .unwrap_or_default();
            if name.is_empty() {
                return Err(UpgradeError::MissingConstructorName {
                    element: element.to_string(),
                });
            }

            let constructor = self.registry.borrow().get(&name);
            let Some(constructor) = constructor else {
                return Err(UpgradeError::ConstructorNotFound { name });
            };

            if element.has_property(&name) {
                warn(&format!(
                    "(auto-init) Component already initialized for {element}. Skipping..."
                ));
                report.skipped += 1;
                continue;
            }

            let instance = constructor(&element)?;
            element.define_property(name.as_str(), PropertyDescriptor::hidden(instance.clone()))?;
            debug!("[auto-init] Initialized {element} with {name}");
            report.created.push(instance);
        }

        Ok(report)
    }
}

impl Default for AutoInit {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AutoInit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoInit")
            .field("config", &self.config)
            .field("registry", &self.registry.borrow())
            .finish_non_exhaustive()
    }
}
