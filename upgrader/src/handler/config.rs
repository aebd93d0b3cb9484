//! Handler configuration.

/// Configuration for a [`ComponentHandler`](super::ComponentHandler).
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    /// Attribute mirroring each element's upgrade marker as `",A,B"`.
    pub upgraded_attribute: String,

    /// Consult the fallback scope for names with no registry record.
    pub global_fallback: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            upgraded_attribute: "data-upgraded".to_string(),
            global_fallback: true,
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the attribute that mirrors the upgrade marker.
    pub fn upgraded_attribute(mut self, name: impl Into<String>) -> Self {
        self.upgraded_attribute = name.into();
        self
    }

    /// Enable or disable the fallback constructor scope.
    pub fn global_fallback(mut self, enabled: bool) -> Self {
        self.global_fallback = enabled;
        self
    }
}
