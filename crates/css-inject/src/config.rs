//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Id given to the injected style element unless configured otherwise.
pub const DEFAULT_ELEMENT_ID: &str = "css-inject-style";

/// Behavior switches for a [`StyleRegistry`](crate::StyleRegistry).
///
/// Every field has a default, so partial JSON or YAML documents deserialize:
///
/// ```rust
/// use css_inject::RegistryConfig;
///
/// let config: RegistryConfig = serde_json::from_str(r#"{"omit_empty_rules": true}"#).unwrap();
/// assert_eq!(config.element_id, "css-inject-style");
/// assert!(config.omit_empty_rules);
/// assert!(!config.prune_empty_selectors);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Id of the style element written by `apply`.
    pub element_id: String,
    /// Drop a selector entry once its last property is removed.
    pub prune_empty_selectors: bool,
    /// Leave selectors without declarations out of the stylesheet
    /// instead of emitting `"selector {}"`.
    pub omit_empty_rules: bool,
}

impl RegistryConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the id of the injected style element.
    pub fn with_element_id(mut self, id: impl Into<String>) -> Self {
        self.element_id = id.into();
        self
    }

    /// Sets whether emptied selectors are removed.
    pub fn prune_empty_selectors(mut self, prune: bool) -> Self {
        self.prune_empty_selectors = prune;
        self
    }

    /// Sets whether empty rules are left out of the stylesheet.
    pub fn omit_empty_rules(mut self, omit: bool) -> Self {
        self.omit_empty_rules = omit;
        self
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            element_id: DEFAULT_ELEMENT_ID.to_string(),
            prune_empty_selectors: false,
            omit_empty_rules: false,
        }
    }
}
