//! Header resolution.
//!
//! Headers are derived once, when the table initializes, from either the
//! first row's keys ([`HeaderMode::Data`]) or the custom header mapping
//! ([`HeaderMode::Custom`]). In custom mode every row is rebuilt with its keys
//! renamed, so the rest of the table only ever deals with display keys.

use crate::config::{Config, HeaderCase};
use crate::row::Row;
use std::collections::BTreeMap;
use unicode_segmentation::UnicodeSegmentation;

/// Where headers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderMode {
    /// Headers are the first row's keys and rows are used unchanged.
    Data,
    /// Row keys are renamed through the mapping (original key -> display key).
    Custom(BTreeMap<String, String>),
    /// Neither mode was requested: the table has no columns.
    None,
}

impl HeaderMode {
    /// Picks the mode from a configuration that already passed validation.
    pub fn from_config(config: &Config) -> Self {
        if config.display_headers_from_data() {
            HeaderMode::Data
        } else if config.display_headers_from_custom_headers() {
            match config.custom_headers() {
                Some(mapping) => HeaderMode::Custom(mapping.clone()),
                None => HeaderMode::None,
            }
        } else {
            HeaderMode::None
        }
    }
}

/// Output of header resolution: the render-ordered headers and the working
/// row collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    /// Column keys in render order.
    pub headers: Vec<String>,
    /// Rows used for every later display, sort and mutation.
    pub rows: Vec<Row>,
}

/// Resolves headers and the working rows from the source data.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::headers::{resolve, HeaderMode};
/// use bubbletea_datatable::Row;
/// use serde_json::json;
/// use std::collections::BTreeMap;
///
/// let data = vec![Row::from_pairs([("a", json!(1)), ("b", json!(2))])];
/// let mapping = BTreeMap::from([("a".to_string(), "Alpha".to_string())]);
///
/// let resolved = resolve(&HeaderMode::Custom(mapping), &data);
/// assert_eq!(resolved.headers, vec!["Alpha", "b"]);
/// assert_eq!(resolved.rows[0].get("Alpha"), Some(&json!(1)));
/// ```
pub fn resolve(mode: &HeaderMode, data: &[Row]) -> Resolved {
    let rows = match mode {
        HeaderMode::Data => data.to_vec(),
        HeaderMode::Custom(mapping) => data
            .iter()
            .map(|row| row.renamed(|key| mapping.get(key).cloned()))
            .collect(),
        HeaderMode::None => return Resolved::default(),
    };
    let headers = rows
        .first()
        .map(|row| row.keys().map(str::to_string).collect())
        .unwrap_or_default();
    Resolved { headers, rows }
}

/// Applies the configured casing to a header label for display.
pub fn display_header(header: &str, case: HeaderCase) -> String {
    match case {
        HeaderCase::AsIs => header.to_string(),
        HeaderCase::Upper => header.to_uppercase(),
        HeaderCase::Lower => header.to_lowercase(),
        HeaderCase::Capitalized => capitalize_words(header),
    }
}

fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_word_bounds() {
        let mut graphemes = word.graphemes(true);
        match graphemes.next() {
            Some(first) if first.chars().any(char::is_alphanumeric) => {
                out.push_str(&first.to_uppercase());
                out.extend(graphemes);
            }
            Some(first) => {
                out.push_str(first);
                out.extend(graphemes);
            }
            None => {}
        }
    }
    out
}
