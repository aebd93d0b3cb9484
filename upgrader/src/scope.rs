//! Secondary constructor lookup for components that never registered.

use std::collections::HashMap;
use std::rc::Rc;

use crate::component::{Component, Constructor, constructor_of};
use crate::registration::find_registered;

/// A host-supplied name → constructor lookup, consulted only when the
/// registry has no record for a name.
pub trait ConstructorScope {
    fn lookup(&self, name: &str) -> Option<Constructor>;
}

/// Explicit lookup table.
#[derive(Default)]
pub struct FallbackTable {
    constructors: HashMap<String, Constructor>,
}

impl FallbackTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, constructor: Constructor) -> &mut Self {
        self.constructors.insert(name.into(), constructor);
        self
    }

    pub fn with(mut self, name: impl Into<String>, constructor: Constructor) -> Self {
        self.insert(name, constructor);
        self
    }

    pub fn with_component<C: Component>(self, name: impl Into<String>) -> Self {
        self.with(name, constructor_of::<C>())
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl ConstructorScope for FallbackTable {
    fn lookup(&self, name: &str) -> Option<Constructor> {
        self.constructors.get(name).cloned()
    }
}

impl std::fmt::Debug for FallbackTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackTable")
            .field("names", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Resolves against every `#[component]` linked into the binary, whether or
/// not it was registered with a handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryScope;

impl ConstructorScope for InventoryScope {
    fn lookup(&self, name: &str) -> Option<Constructor> {
        find_registered(name).map(|r| Rc::new(r.factory) as Constructor)
    }
}
