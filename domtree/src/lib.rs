pub mod document;
pub mod element;
pub mod error;
pub mod selector;

pub use document::Document;
pub use element::{Element, Instance, MarkerState, PropertyDescriptor, UpgradeMarker, WeakElement};
pub use error::{DomError, SelectorError};
pub use selector::Selector;
