use smartstring::alias::String as SmartString;

/// How class names reach the native class list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassNamePolicy {
    /// Pass tokens through unchanged
    #[default]
    Verbatim,
    /// Replace every character outside `[A-Za-z0-9_-]` with `_xHH_`
    Escape,
}

/// Adapter-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    pub class_names: ClassNamePolicy,
    /// Keyword written to `display` when an instance is hidden
    pub hidden_display: SmartString,
}

impl AdapterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class_names(mut self, policy: ClassNamePolicy) -> Self {
        self.class_names = policy;
        self
    }

    pub fn with_hidden_display(mut self, keyword: &str) -> Self {
        self.hidden_display = keyword.into();
        self
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            class_names: ClassNamePolicy::Verbatim,
            hidden_display: "none".into(),
        }
    }
}
