//! Declarative table configuration.
//!
//! Hosts describe the table with a [`Config`], either built in Rust with the
//! `with_*` builders or deserialized from JSON using the camelCase option
//! names (`sendChanges`, `displayHeadersFromData`, `customHeaders`, ...).
//!
//! ```rust
//! use bubbletea_datatable::Config;
//!
//! let conf = Config::from_json(
//!     r#"{ "displayHeadersFromData": true, "allowOptions": true, "allowEdit": true }"#,
//! )
//! .unwrap();
//! assert!(conf.display_headers_from_data());
//! assert!(conf.allow_edit());
//! assert!(!conf.allow_delete());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while reading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or has the wrong field types.
    #[error("invalid table configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The document parsed, but is not a JSON object.
    #[error("table configuration must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Table configuration. Every option is optional; unset boolean options read
/// as `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    send_changes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_headers_from_data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_headers_from_custom_headers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    initial_order_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_options: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_edit: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_delete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    allow_add: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers_to_uppercase: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers_to_capitalized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers_to_lowercase: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    txt_edit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    txt_delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    txt_add: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    txt_cancel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    txt_confirm_delete: Option<String>,

    /// Options this crate does not recognize. They only count towards the
    /// configuration being non-empty.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Config {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object into a configuration.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }

    /// Converts an already parsed JSON value into a configuration.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let kind = match &value {
            Value::Object(_) => None,
            Value::Null => Some("null"),
            Value::Bool(_) => Some("a boolean"),
            Value::Number(_) => Some("a number"),
            Value::String(_) => Some("a string"),
            Value::Array(_) => Some("an array"),
        };
        if let Some(kind) = kind {
            return Err(ConfigError::NotAnObject(kind));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Returns true if no option at all, recognized or not, has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether commits emit the full row sequence to the change sink.
    pub fn send_changes(&self) -> bool {
        self.send_changes.unwrap_or(false)
    }

    /// Whether headers come from the first row's keys.
    pub fn display_headers_from_data(&self) -> bool {
        self.display_headers_from_data.unwrap_or(false)
    }

    /// Whether headers come from the custom header mapping.
    pub fn display_headers_from_custom_headers(&self) -> bool {
        self.display_headers_from_custom_headers.unwrap_or(false)
    }

    /// The original-key to display-key mapping, if supplied.
    pub fn custom_headers(&self) -> Option<&BTreeMap<String, String>> {
        self.custom_headers.as_ref()
    }

    /// The column sorted ascending at initialization. Empty names read as unset.
    pub fn initial_order_by(&self) -> Option<&str> {
        self.initial_order_by.as_deref().filter(|s| !s.is_empty())
    }

    /// Whether the per-row options popover is enabled.
    pub fn allow_options(&self) -> bool {
        self.allow_options.unwrap_or(false)
    }

    /// Whether rows may be edited.
    pub fn allow_edit(&self) -> bool {
        self.allow_edit.unwrap_or(false)
    }

    /// Whether rows may be deleted.
    pub fn allow_delete(&self) -> bool {
        self.allow_delete.unwrap_or(false)
    }

    /// Whether rows may be added.
    pub fn allow_add(&self) -> bool {
        self.allow_add.unwrap_or(false)
    }

    /// Whether header labels are upper-cased.
    pub fn headers_to_uppercase(&self) -> bool {
        self.headers_to_uppercase.unwrap_or(false)
    }

    /// Whether header labels are capitalized word by word.
    pub fn headers_to_capitalized(&self) -> bool {
        self.headers_to_capitalized.unwrap_or(false)
    }

    /// Whether header labels are lower-cased.
    pub fn headers_to_lowercase(&self) -> bool {
        self.headers_to_lowercase.unwrap_or(false)
    }

    /// Number of header casing flags that are set.
    pub fn casing_flag_count(&self) -> usize {
        [
            self.headers_to_uppercase(),
            self.headers_to_capitalized(),
            self.headers_to_lowercase(),
        ]
        .into_iter()
        .filter(|set| *set)
        .count()
    }

    /// The header casing selected by the flags. When several flags are set
    /// (which validation rejects) upper case wins, then capitalized.
    pub fn header_case(&self) -> HeaderCase {
        if self.headers_to_uppercase() {
            HeaderCase::Upper
        } else if self.headers_to_capitalized() {
            HeaderCase::Capitalized
        } else if self.headers_to_lowercase() {
            HeaderCase::Lower
        } else {
            HeaderCase::AsIs
        }
    }

    /// Button and prompt texts with defaults applied.
    pub fn labels(&self) -> Labels {
        fn pick(custom: &Option<String>, default: &str) -> String {
            match custom.as_deref() {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => default.to_string(),
            }
        }
        Labels {
            edit: pick(&self.txt_edit, Labels::DEFAULT_EDIT),
            delete: pick(&self.txt_delete, Labels::DEFAULT_DELETE),
            add: pick(&self.txt_add, Labels::DEFAULT_ADD),
            cancel: pick(&self.txt_cancel, Labels::DEFAULT_CANCEL),
            confirm_delete: pick(&self.txt_confirm_delete, Labels::DEFAULT_CONFIRM_DELETE),
        }
    }

    /// Sets `sendChanges` (builder pattern).
    pub fn with_send_changes(mut self, on: bool) -> Self {
        self.send_changes = Some(on);
        self
    }

    /// Sets `displayHeadersFromData` (builder pattern).
    pub fn with_headers_from_data(mut self, on: bool) -> Self {
        self.display_headers_from_data = Some(on);
        self
    }

    /// Sets `displayHeadersFromCustomHeaders` (builder pattern).
    pub fn with_headers_from_custom_headers(mut self, on: bool) -> Self {
        self.display_headers_from_custom_headers = Some(on);
        self
    }

    /// Sets the `customHeaders` mapping (builder pattern).
    pub fn with_custom_headers<K, V, I>(mut self, mapping: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.custom_headers = Some(
            mapping
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sets `initialOrderBy` (builder pattern).
    pub fn with_initial_order_by(mut self, header: impl Into<String>) -> Self {
        self.initial_order_by = Some(header.into());
        self
    }

    /// Sets `allowOptions` and the three individual allowances (builder pattern).
    pub fn with_options(mut self, options: bool, edit: bool, delete: bool, add: bool) -> Self {
        self.allow_options = Some(options);
        self.allow_edit = Some(edit);
        self.allow_delete = Some(delete);
        self.allow_add = Some(add);
        self
    }

    /// Sets the header casing flags (builder pattern).
    pub fn with_header_casing(mut self, upper: bool, capitalized: bool, lower: bool) -> Self {
        self.headers_to_uppercase = Some(upper);
        self.headers_to_capitalized = Some(capitalized);
        self.headers_to_lowercase = Some(lower);
        self
    }

    /// Sets the button and prompt text overrides (builder pattern). `None`
    /// keeps the default text.
    pub fn with_labels(
        mut self,
        edit: Option<&str>,
        delete: Option<&str>,
        add: Option<&str>,
        cancel: Option<&str>,
        confirm_delete: Option<&str>,
    ) -> Self {
        self.txt_edit = edit.map(str::to_string);
        self.txt_delete = delete.map(str::to_string);
        self.txt_add = add.map(str::to_string);
        self.txt_cancel = cancel.map(str::to_string);
        self.txt_confirm_delete = confirm_delete.map(str::to_string);
        self
    }

    pub(crate) fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.extra.keys().map(String::as_str)
    }
}

/// How header labels are cased when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderCase {
    /// Labels are shown exactly as the header keys.
    #[default]
    AsIs,
    /// `ALL CAPS`.
    Upper,
    /// `First Letter Of Every Word`.
    Capitalized,
    /// `all lower`.
    Lower,
}

/// Texts of the popover buttons and the delete confirmation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Edit button.
    pub edit: String,
    /// Delete button.
    pub delete: String,
    /// Add button.
    pub add: String,
    /// Cancel button.
    pub cancel: String,
    /// Delete confirmation prompt.
    pub confirm_delete: String,
}

impl Labels {
    /// Default edit button text.
    pub const DEFAULT_EDIT: &'static str = "Edit";
    /// Default delete button text.
    pub const DEFAULT_DELETE: &'static str = "Delete";
    /// Default add button text.
    pub const DEFAULT_ADD: &'static str = "Add";
    /// Default cancel button text.
    pub const DEFAULT_CANCEL: &'static str = "Cancel";
    /// Default delete confirmation prompt.
    pub const DEFAULT_CONFIRM_DELETE: &'static str = "Do you really want to delete this entry?";
}

impl Default for Labels {
    fn default() -> Self {
        Config::default().labels()
    }
}
