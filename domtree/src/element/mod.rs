mod marker;
mod node;
mod property;

use std::any::Any;
use std::rc::Rc;

pub use marker::{MarkerState, UpgradeMarker};
pub use node::{Element, WeakElement};
pub use property::PropertyDescriptor;

/// A type-erased behavior object attached to an element.
pub type Instance = Rc<dyn Any>;

/// Find an element by ID in the tree rooted at `root` (inclusive).
pub fn find_element(root: &Element, id: &str) -> Option<Element> {
    if root.get_id().as_deref() == Some(id) {
        return Some(root.clone());
    }

    for child in root.children() {
        if let Some(found) = find_element(&child, id) {
            return Some(found);
        }
    }

    None
}
