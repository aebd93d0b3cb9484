pub mod auto_init;
pub mod component;
pub mod error;
pub mod handler;
pub mod registration;
pub mod registry;
pub mod scope;

pub use auto_init::{AutoInit, AutoInitConfig, AutoInitRegistry, AutoInitReport};
pub use component::{Component, ComponentError, Constructor, Instance, construct, constructor_of};
pub use error::UpgradeError;
pub use handler::{
    ComponentHandler, HandlerConfig, UpgradeDecision, UpgradeOutcome, UpgradeReport, Upgraded,
};
pub use registration::{ComponentRegistration, registered_components};
pub use registry::{ComponentRegistry, Registration};
pub use scope::{ConstructorScope, FallbackTable, InventoryScope};

pub use domtree;
pub use inventory;
pub use upgrader_derive::*;

pub mod prelude {
    pub use crate::auto_init::{AutoInit, AutoInitConfig};
    pub use crate::component::{Component, ComponentError, Instance};
    pub use crate::error::UpgradeError;
    pub use crate::handler::{ComponentHandler, HandlerConfig, UpgradeOutcome};
    pub use crate::registry::Registration;
    pub use domtree::{Document, Element, WeakElement};

    pub use upgrader_derive::*;
}
