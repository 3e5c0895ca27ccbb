//! Configuration options for form enhancement.

use serde::{Deserialize, Serialize};

/// Options controlling presentation classes and list parsing.
///
/// Every field has a default matching the Bootstrap 5 markup the attributes
/// are usually generated for, so a partial JSON document is enough to
/// override a single class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceOptions {
    /// Class marking an element as hidden.
    pub hidden_class: String,

    /// Class applied by the `strikethru` field effect.
    pub strike_class: String,

    /// Class added to every drop target region.
    pub drop_zone_class: String,

    /// Classes added while a drag hovers a drop target.
    pub drop_highlight_classes: Vec<String>,

    /// Separates several allowed values inside one dependency value spec.
    pub value_separator: char,

    /// Delimiter of string-list field values.
    pub list_separator: char,

    /// Descendant tags disabled while their dependent element is hidden.
    pub suppressible_tags: Vec<String>,

    /// Suffix relating a row template id to its container id.
    pub container_suffix: String,

    /// Tag of the element wrapping each instantiated row.
    pub row_wrapper_tag: String,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            hidden_class: "d-none".to_string(),
            strike_class: "text-decoration-line-through".to_string(),
            drop_zone_class: "drop-zone".to_string(),
            drop_highlight_classes: vec![
                "border".to_string(),
                "border-2".to_string(),
                "p-3".to_string(),
            ],
            value_separator: ':',
            list_separator: ',',
            suppressible_tags: vec!["input".to_string()],
            container_suffix: "-container".to_string(),
            row_wrapper_tag: "div".to_string(),
        }
    }
}

impl EnhanceOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hidden_class(mut self, class: impl Into<String>) -> Self {
        self.hidden_class = class.into();
        self
    }

    pub fn with_value_separator(mut self, separator: char) -> Self {
        self.value_separator = separator;
        self
    }

    pub fn with_suppressible_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suppressible_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Container id for a row template id.
    pub fn container_id(&self, template_id: &str) -> String {
        format!("{template_id}{}", self.container_suffix)
    }

    pub fn is_suppressible(&self, tag: &str) -> bool {
        self.suppressible_tags
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(tag))
    }
}
