//! Editable data table component.
//!
//! The table renders one-dimensional row data, sorts columns on demand and,
//! when enabled, offers a per-row options popover for editing, deleting and
//! adding rows. Configuration is declarative (see [`Config`](crate::Config)):
//! the table validates it once in [`Model::init`] and either becomes fully
//! operational or renders a single warning in place of the grid.
//!
//! ## Lifecycle
//!
//! 1. Build the model with its inputs (`with_config`, `with_data`,
//!    `with_entries_to_show`, `with_active_page`, `with_change_sink`).
//! 2. Call [`Model::init`]: validation, header resolution and the initial
//!    sort run in that order.
//! 3. Drive it with [`Model::sort_column`], [`Model::show_options`] and the
//!    commit methods, or forward key messages to [`Model::update`].
//!
//! ```rust
//! use bubbletea_datatable::{Config, Row, Table};
//! use serde_json::json;
//!
//! let data = vec![
//!     Row::from_pairs([("a", json!(1)), ("b", json!(2))]),
//!     Row::from_pairs([("a", json!(3)), ("b", json!(4))]),
//! ];
//! let mut table = Table::new()
//!     .with_config(Config::new().with_headers_from_data(true))
//!     .with_data(data)
//!     .with_entries_to_show(10)
//!     .with_active_page(1);
//!
//! assert!(table.init().is_ok());
//! assert_eq!(table.headers(), ["a", "b"]);
//!
//! table.sort_column("a"); // ascending: unchanged
//! table.sort_column("a"); // descending
//! assert_eq!(table.rows()[0].get("a"), Some(&json!(3)));
//! ```

mod keys;
mod model;
mod view;

#[cfg(test)]
mod tests;

pub use keys::TableKeyMap;
pub use model::Model;
pub use view::{Styles, TerminalLayout};
