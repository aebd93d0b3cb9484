use std::fmt;

use super::Instance;

/// A named value exposed on an element, with the usual access flags.
#[derive(Clone)]
pub struct PropertyDescriptor {
    pub value: Instance,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// A plain data property: writable, enumerable and configurable.
    pub fn data(value: Instance) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Hidden from enumeration and read-only, but may be redefined or deleted.
    pub fn hidden(value: Instance) -> Self {
        Self {
            value,
            writable: false,
            enumerable: false,
            configurable: true,
        }
    }

    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = enumerable;
        self
    }

    pub fn configurable(mut self, configurable: bool) -> Self {
        self.configurable = configurable;
        self
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("writable", &self.writable)
            .field("enumerable", &self.enumerable)
            .field("configurable", &self.configurable)
            .finish_non_exhaustive()
    }
}
