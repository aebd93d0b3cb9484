use std::collections::HashMap;

use crate::component::Constructor;

/// Name → constructor map for attribute-driven discovery. No selectors:
/// the marker attribute is the discovery mechanism.
#[derive(Default)]
pub struct AutoInitRegistry {
    constructors: HashMap<String, Constructor>,
}

impl AutoInitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Returns true if an entry was replaced.
    pub fn insert(&mut self, name: &str, constructor: Constructor) -> bool {
        self.constructors
            .insert(name.to_string(), constructor)
            .is_some()
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.constructors.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.constructors.clear();
    }

    pub fn get(&self, name: &str) -> Option<Constructor> {
        self.constructors.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl std::fmt::Debug for AutoInitRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoInitRegistry")
            .field("names", &self.names())
            .finish()
    }
}
