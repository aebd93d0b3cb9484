use std::fmt;

use super::Instance;

/// Where a single component stands on an element.
#[derive(Clone)]
pub enum MarkerState {
    /// Construction is in progress. Re-entrant upgrades of the same pair
    /// observe this and back off.
    Upgrading,
    /// Construction finished and produced this instance.
    Upgraded(Instance),
}

impl fmt::Debug for MarkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrading => write!(f, "Upgrading"),
            Self::Upgraded(_) => write!(f, "Upgraded(..)"),
        }
    }
}

/// Per-element record of which components have been instantiated on it.
///
/// Entries keep insertion order so the string form is stable:
/// `",MaterialButton,MaterialRipple"`.
#[derive(Debug, Clone, Default)]
pub struct UpgradeMarker {
    entries: Vec<(String, MarkerState)>,
}

impl UpgradeMarker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `name` is upgraded or currently upgrading.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// True only once construction of `name` has completed.
    pub fn is_upgraded(&self, name: &str) -> bool {
        matches!(self.state(name), Some(MarkerState::Upgraded(_)))
    }

    pub fn state(&self, name: &str) -> Option<&MarkerState> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, state)| state)
    }

    pub fn instance(&self, name: &str) -> Option<Instance> {
        match self.state(name) {
            Some(MarkerState::Upgraded(instance)) => Some(instance.clone()),
            _ => None,
        }
    }

    /// Names of every marked component, in the order they were marked.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Move `name` from unmarked to upgrading. Returns false if it was
    /// already marked in any state.
    pub fn begin(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.entries.push((name.to_string(), MarkerState::Upgrading));
        true
    }

    /// Record the finished instance for `name`.
    pub fn complete(&mut self, name: &str, instance: Instance) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, state)) => *state = MarkerState::Upgraded(instance),
            None => self
                .entries
                .push((name.to_string(), MarkerState::Upgraded(instance))),
        }
    }

    /// Drop a pending `Upgrading` entry. Completed entries are left alone.
    pub fn abort(&mut self, name: &str) {
        self.entries
            .retain(|(n, state)| n != name || !matches!(state, MarkerState::Upgrading));
    }

    /// The attribute form: comma-prefixed, comma-separated names.
    pub fn to_attribute_value(&self) -> String {
        self.entries.iter().fold(String::new(), |mut acc, (name, _)| {
            acc.push(',');
            acc.push_str(name);
            acc
        })
    }

    /// Parse the attribute form back into names, ignoring empty segments.
    pub fn parse_attribute_value(value: &str) -> Vec<String> {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}
