//! Results of upgrade passes.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use domtree::Element;

use crate::component::Instance;

/// What `upgrade_one` did for a single (element, component) pair.
#[derive(Clone)]
pub enum UpgradeOutcome {
    /// A new instance was constructed and recorded.
    Upgraded(Instance),
    /// The pair was already marked; nothing happened.
    AlreadyUpgraded,
    /// An upgrade guard vetoed construction.
    Cancelled,
    /// Neither the registry nor the fallback scope knows the name.
    ComponentNotFound,
}

impl UpgradeOutcome {
    pub fn is_upgraded(&self) -> bool {
        matches!(self, Self::Upgraded(_))
    }

    pub fn instance(&self) -> Option<&Instance> {
        match self {
            Self::Upgraded(instance) => Some(instance),
            _ => None,
        }
    }
}

impl fmt::Debug for UpgradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgraded(_) => write!(f, "Upgraded(..)"),
            Self::AlreadyUpgraded => write!(f, "AlreadyUpgraded"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::ComponentNotFound => write!(f, "ComponentNotFound"),
        }
    }
}

/// Returned by upgrade guards before construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpgradeDecision {
    #[default]
    Proceed,
    Cancel,
}

/// One instance created during a pass.
#[derive(Clone)]
pub struct Upgraded {
    pub element: Element,
    pub component: String,
    pub instance: Instance,
}

impl fmt::Debug for Upgraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upgraded")
            .field("element", &self.element)
            .field("component", &self.component)
            .finish_non_exhaustive()
    }
}

/// Summary of an upgrade pass.
#[derive(Debug, Clone, Default)]
pub struct UpgradeReport {
    pub upgraded: Vec<Upgraded>,
    pub already_upgraded: usize,
    pub cancelled: usize,
    /// Names that could not be resolved, once each.
    pub not_found: Vec<String>,
}

impl UpgradeReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, element: &Element, component: &str, outcome: UpgradeOutcome) {
        match outcome {
            UpgradeOutcome::Upgraded(instance) => self.upgraded.push(Upgraded {
                element: element.clone(),
                component: component.to_string(),
                instance,
            }),
            UpgradeOutcome::AlreadyUpgraded => self.already_upgraded += 1,
            UpgradeOutcome::Cancelled => self.cancelled += 1,
            UpgradeOutcome::ComponentNotFound => {
                if !self.is_not_found(component) {
                    self.not_found.push(component.to_string());
                }
            }
        }
    }

    pub fn merge(&mut self, other: UpgradeReport) {
        self.upgraded.extend(other.upgraded);
        self.already_upgraded += other.already_upgraded;
        self.cancelled += other.cancelled;
        for name in other.not_found {
            if !self.is_not_found(&name) {
                self.not_found.push(name);
            }
        }
    }

    pub fn upgraded_count(&self) -> usize {
        self.upgraded.len()
    }

    pub fn is_not_found(&self, component: &str) -> bool {
        self.not_found.iter().any(|n| n == component)
    }

    /// Typed instances of `component` created in this pass.
    pub fn instances_of<T: Any>(&self, component: &str) -> Vec<Rc<T>> {
        self.upgraded
            .iter()
            .filter(|u| u.component == component)
            .filter_map(|u| u.instance.clone().downcast::<T>().ok())
            .collect()
    }
}
