use thiserror::Error;

/// Errors raised by tree mutation and element properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// An element was inserted into its own subtree.
    #[error("cannot insert {child} into {parent}: the new child is an ancestor of the parent")]
    HierarchyRequest { parent: String, child: String },

    /// Redefinition or deletion of a property that is not configurable.
    #[error("property '{0}' is not configurable")]
    NotConfigurable(String),

    /// Assignment to a read-only property.
    #[error("property '{0}' is not writable")]
    NotWritable(String),

    /// Assignment to a property that was never defined.
    #[error("property '{0}' is not defined")]
    Undefined(String),
}

/// A selector string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid selector '{selector}' at {position}: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub position: usize,
    pub reason: &'static str,
}
