//! The contract every upgradable component satisfies.

use std::any::Any;
use std::error::Error as StdError;
use std::rc::Rc;

use domtree::Element;
use thiserror::Error;

pub use domtree::Instance;

/// Builds a behavior object for one element.
pub type Constructor = Rc<dyn Fn(&Element) -> Result<Instance, ComponentError>>;

/// A behavior bound to a single root element.
///
/// `attach_to` is called exactly once per (element, component) pair and is
/// expected to do all of its setup synchronously before returning.
///
/// The element owns the returned instance through its upgrade marker. A
/// component that needs its root later must keep a
/// [`WeakElement`](domtree::WeakElement) from [`Element::downgrade`], not an
/// owning `Element`, or the pair forms a cycle and is never freed.
pub trait Component: Any {
    fn attach_to(element: &Element) -> Result<Self, ComponentError>
    where
        Self: Sized;

    /// Release anything `attach_to` set up.
    fn destroy(&self) {}
}

/// Failure raised by a component's own constructor.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ComponentError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ComponentError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Run `C::attach_to` and erase the result.
///
/// A plain function so it can sit in a `fn` pointer inside static
/// registrations.
pub fn construct<C: Component>(element: &Element) -> Result<Instance, ComponentError> {
    let component = C::attach_to(element)?;
    Ok(Rc::new(component))
}

pub fn constructor_of<C: Component>() -> Constructor {
    Rc::new(construct::<C>)
}
