//! The upgrade engine.
//!
//! A [`ComponentHandler`] turns "scan this subtree" into "one constructor
//! call per matching, unmarked element". Every pass works on a snapshot of
//! the matched elements and never holds an internal borrow while a
//! constructor or callback runs, so components may mutate the tree or call
//! back into the handler from inside their constructor.

mod config;
mod report;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use domtree::{Document, Element, PropertyDescriptor, Selector};
use log::{debug, trace, warn};

use crate::component::{Constructor, Instance};
use crate::error::UpgradeError;
use crate::registration::registered_components;
use crate::registry::{ComponentRegistry, Registration};
use crate::scope::ConstructorScope;

pub use config::HandlerConfig;
pub use report::{UpgradeDecision, UpgradeOutcome, UpgradeReport, Upgraded};

type UpgradedCallback = Rc<dyn Fn(&Element, &Instance)>;
type UpgradeGuard = Rc<dyn Fn(&Element, &str) -> UpgradeDecision>;

/// A constructor together with how its instances are exposed.
struct Resolved {
    constructor: Constructor,
    widget: bool,
}

/// Registry plus upgrade engine, bound to one document.
pub struct ComponentHandler {
    document: Document,
    config: HandlerConfig,
    registry: RefCell<ComponentRegistry>,
    fallback: RefCell<Option<Rc<dyn ConstructorScope>>>,
    callbacks: RefCell<HashMap<String, Vec<UpgradedCallback>>>,
    guards: RefCell<Vec<UpgradeGuard>>,
}

impl ComponentHandler {
    pub fn new(document: Document) -> Self {
        Self::with_config(document, HandlerConfig::default())
    }

    pub fn with_config(document: Document, config: HandlerConfig) -> Self {
        Self {
            document,
            config,
            registry: RefCell::new(ComponentRegistry::new()),
            fallback: RefCell::new(None),
            callbacks: RefCell::new(HashMap::new()),
            guards: RefCell::new(Vec::new()),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    // Registry

    /// Register a component, then upgrade every matching element already in
    /// the document.
    ///
    /// Re-registering a name replaces its record. Instances created under the
    /// old constructor are left alone.
    pub fn register(&self, registration: Registration) -> Result<UpgradeReport, UpgradeError> {
        let name = registration.name().to_string();

        let replaced = self.registry.borrow_mut().register(registration);
        if replaced.is_some() {
            debug!("[upgrader] Overriding registration for {name}");
        } else {
            debug!("[upgrader] Registered {name}");
        }

        self.upgrade_dom(Some(&name), None)
    }

    /// Register every component submitted with `#[component]`.
    pub fn register_discovered(&self) -> Result<UpgradeReport, UpgradeError> {
        let mut report = UpgradeReport::new();
        for registration in registered_components() {
            report.merge(self.register(registration.to_registration())?);
        }
        Ok(report)
    }

    pub fn find(&self, name: &str) -> Option<Rc<Registration>> {
        self.registry.borrow().find(name)
    }

    pub fn resolve_selector(&self, name: &str, supplied: Option<&str>) -> Option<String> {
        self.registry.borrow().resolve_selector(name, supplied)
    }

    pub fn registered_names(&self) -> Vec<String> {
        self.registry.borrow().names()
    }

    /// Install the scope consulted for names the registry does not know.
    pub fn set_fallback_scope(&self, scope: impl ConstructorScope + 'static) {
        *self.fallback.borrow_mut() = Some(Rc::new(scope));
    }

    pub fn clear_fallback_scope(&self) {
        *self.fallback.borrow_mut() = None;
    }

    /// Call `callback` after every successful upgrade of `name`.
    ///
    /// Returns false, and does nothing, if `name` is not registered.
    pub fn register_upgraded_callback(
        &self,
        name: &str,
        callback: impl Fn(&Element, &Instance) + 'static,
    ) -> bool {
        if !self.registry.borrow().contains(name) {
            return false;
        }
        self.callbacks
            .borrow_mut()
            .entry(name.to_string())
            .or_default()
            .push(Rc::new(callback));
        true
    }

    /// Add a guard consulted right before each construction. Any guard
    /// returning [`UpgradeDecision::Cancel`] skips that upgrade.
    pub fn add_upgrade_guard(&self, guard: impl Fn(&Element, &str) -> UpgradeDecision + 'static) {
        self.guards.borrow_mut().push(Rc::new(guard));
    }

    // Upgrade passes

    /// Document-wide pass. `selector` overrides the registered selector.
    /// With no `name`, every registered component is upgraded.
    pub fn upgrade_dom(
        &self,
        name: Option<&str>,
        selector: Option<&str>,
    ) -> Result<UpgradeReport, UpgradeError> {
        self.upgrade_scope(self.document.root(), name, selector)
    }

    /// Pass over the descendants of `root`.
    pub fn upgrade_all(
        &self,
        root: &Element,
        name: Option<&str>,
    ) -> Result<UpgradeReport, UpgradeError> {
        self.upgrade_scope(root, name, None)
    }

    pub fn upgrade_all_registered(&self) -> Result<UpgradeReport, UpgradeError> {
        self.upgrade_dom(None, None)
    }

    fn upgrade_scope(
        &self,
        root: &Element,
        name: Option<&str>,
        selector: Option<&str>,
    ) -> Result<UpgradeReport, UpgradeError> {
        let Some(name) = name else {
            let names = self.registered_names();
            let mut report = UpgradeReport::new();
            for name in names {
                report.merge(self.upgrade_scope(root, Some(&name), None)?);
            }
            return Ok(report);
        };

        let Some(selector) = self.resolve_selector(name, selector) else {
            trace!("[upgrader] No selector for {name}, nothing to upgrade");
            return Ok(UpgradeReport::new());
        };
        let selector = Selector::parse(&selector)?;

        let mut report = UpgradeReport::new();
        for element in root.select_all(&selector) {
            let outcome = self.upgrade_one(&element, name)?;
            report.record(&element, name, outcome);
        }
        Ok(report)
    }

    /// Upgrade a single element, either for one named component or for every
    /// registered component whose selector matches it.
    pub fn upgrade_element(
        &self,
        element: &Element,
        name: Option<&str>,
    ) -> Result<UpgradeReport, UpgradeError> {
        let mut report = UpgradeReport::new();

        if let Some(name) = name {
            let outcome = self.upgrade_one(element, name)?;
            report.record(element, name, outcome);
            return Ok(report);
        }

        let records = self.registry.borrow().records();
        for record in records {
            let Some(selector) = record.css_selector() else {
                continue;
            };
            if element.matches(&Selector::parse(selector)?) {
                let outcome = self.upgrade_one(element, record.name())?;
                report.record(element, record.name(), outcome);
            }
        }
        Ok(report)
    }

    /// [`upgrade_element`](Self::upgrade_element) for each element and,
    /// recursively, all of its children.
    pub fn upgrade_elements(&self, elements: &[Element]) -> Result<UpgradeReport, UpgradeError> {
        let mut report = UpgradeReport::new();
        for element in elements {
            report.merge(self.upgrade_element(element, None)?);
            report.merge(self.upgrade_elements(&element.children())?);
        }
        Ok(report)
    }

    /// Instantiate `name` on `element` unless it is already there.
    ///
    /// Constructor failures are returned as-is. Other elements upgraded in the
    /// same pass keep their instances.
    pub fn upgrade_one(&self, element: &Element, name: &str) -> Result<UpgradeOutcome, UpgradeError> {
        if element.is_marked(name) {
            trace!("[upgrader] {element} already has {name}");
            return Ok(UpgradeOutcome::AlreadyUpgraded);
        }

        let Some(resolved) = self.resolve_constructor(name) else {
            warn!("[upgrader] Unable to find a registered component for '{name}'");
            return Ok(UpgradeOutcome::ComponentNotFound);
        };

        let guards = self.guards.borrow().clone();
        for guard in guards {
            if guard(element, name) == UpgradeDecision::Cancel {
                debug!("[upgrader] Upgrade of {element} with {name} cancelled");
                return Ok(UpgradeOutcome::Cancelled);
            }
        }

        // A guard may have re-entered and upgraded this pair already.
        if !element.begin_upgrade(name) {
            return Ok(UpgradeOutcome::AlreadyUpgraded);
        }
        self.sync_marker_attribute(element);

        let instance = match (resolved.constructor)(element) {
            Ok(instance) => instance,
            Err(e) => {
                element.abort_upgrade(name);
                self.sync_marker_attribute(element);
                return Err(e.into());
            }
        };

        // The pair only counts as upgraded once its widget property exists.
        let exposed = match resolved.widget {
            true => element.define_property(name, PropertyDescriptor::data(instance.clone())),
            false => Ok(()),
        };
        if let Err(e) = exposed {
            element.abort_upgrade(name);
            self.sync_marker_attribute(element);
            return Err(e.into());
        }
        element.complete_upgrade(name, instance.clone());
        debug!("[upgrader] Upgraded {element} with {name}");

        let callbacks = self
            .callbacks
            .borrow()
            .get(name)
            .cloned()
            .unwrap_or_default();
        for callback in callbacks {
            callback(element, &instance);
        }

        Ok(UpgradeOutcome::Upgraded(instance))
    }

    fn resolve_constructor(&self, name: &str) -> Option<Resolved> {
        if let Some(record) = self.find(name) {
            return Some(Resolved {
                constructor: record.constructor().clone(),
                widget: record.is_widget(),
            });
        }

        if !self.config.global_fallback {
            return None;
        }
        let scope = self.fallback.borrow().clone()?;
        let constructor = scope.lookup(name)?;
        debug!("[upgrader] '{name}' is not registered, using fallback constructor");
        Some(Resolved {
            constructor,
            widget: true,
        })
    }

    fn sync_marker_attribute(&self, element: &Element) {
        let value = element.marker().to_attribute_value();
        if value.is_empty() {
            element.remove_attribute(&self.config.upgraded_attribute);
        } else {
            element.set_attribute(self.config.upgraded_attribute.as_str(), value);
        }
    }
}

impl std::fmt::Debug for ComponentHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentHandler")
            .field("config", &self.config)
            .field("registry", &self.registry.borrow())
            .field("fallback", &self.fallback.borrow().is_some())
            .finish_non_exhaustive()
    }
}
