//! Upgrade error types.

use domtree::{DomError, SelectorError};
use thiserror::Error;

use crate::component::ComponentError;

/// Errors surfaced by the upgrade engine and auto-init.
///
/// Not every failure is an error: an unknown component in the selector path
/// and already-upgraded elements are reported through
/// [`UpgradeOutcome`](crate::handler::UpgradeOutcome) instead.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// An auto-init element carries the marker attribute with no value.
    #[error("(auto-init) Constructor name must be given.")]
    MissingConstructorName {
        /// The offending element, rendered as its opening tag.
        element: String,
    },

    /// Auto-init found a name that is not in its registry.
    #[error("(auto-init) Could not find constructor in registry for {name}")]
    ConstructorNotFound { name: String },

    /// A component's own constructor failed. Passed through untouched.
    #[error(transparent)]
    Constructor(#[from] ComponentError),

    /// A registered or supplied selector does not parse.
    #[error(transparent)]
    Selector(#[from] SelectorError),

    /// The instance could not be exposed on the element.
    #[error(transparent)]
    Dom(#[from] DomError),
}
