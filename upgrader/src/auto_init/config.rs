/// Configuration for [`AutoInit`](super::AutoInit).
#[derive(Debug, Clone)]
pub struct AutoInitConfig {
    /// Attribute whose value names the component to attach.
    pub marker_attribute: String,
}

impl Default for AutoInitConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "data-mdc-auto-init".to_string(),
        }
    }
}

impl AutoInitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.marker_attribute = name.into();
        self
    }
}
