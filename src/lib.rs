#![warn(missing_docs)]

//! # bubbletea-datatable
//!
//! A configurable data table component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: header resolution, tri-state column sorting and a per-row
//! options popover for editing, deleting and adding rows.
//!
//! ## Overview
//!
//! The table is driven by a declarative [`Config`] and the host's row data.
//! [`Table::init`] validates both and either returns a [`Warning`] (which
//! the view renders in place of the grid) or resolves the headers and applies
//! the initial sort. From then on the table owns a working copy of the rows;
//! every committed edit, delete or add is handed back to the host through a
//! [`ChangeSink`] when `sendChanges` is on.
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//! use serde_json::json;
//!
//! let config = Config::from_json(r#"{
//!     "displayHeadersFromData": true,
//!     "initialOrderBy": "name",
//!     "allowOptions": true,
//!     "allowDelete": true
//! }"#).unwrap();
//!
//! let mut table = Table::new()
//!     .with_config(config)
//!     .with_data(vec![
//!         Row::from_pairs([("name", json!("beta"))]),
//!         Row::from_pairs([("name", json!("alpha"))]),
//!     ])
//!     .with_entries_to_show(10)
//!     .with_active_page(1);
//!
//! table.init().unwrap();
//! assert_eq!(table.rows()[0].get("name"), Some(&json!("alpha")));
//! ```
//!
//! ## Modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`config`] | Declarative table options |
//! | [`warning`] | Warning codes and their catalog text |
//! | [`validate`] | Ordered configuration checks |
//! | [`headers`] | Header resolution and display casing |
//! | [`sort`] | Sort flags and the stable row sort |
//! | [`options`] | Popover session, placement and change sinks |
//! | [`table`] | The component itself |
//! | [`paginator`] | Page inputs for the table |
//! | [`key`] | Key bindings |
//!
//! ## Focus Management
//!
//! The table implements [`Component`]; it only reacts to key messages while
//! focused.
//!
//! ```rust
//! use bubbletea_datatable::prelude::*;
//!
//! let mut table = Table::new();
//! assert!(!table.focused());
//! table.focus();
//! assert!(table.focused());
//! table.blur();
//! assert!(!table.focused());
//! ```

pub mod config;
pub mod headers;
pub mod key;
pub mod options;
pub mod paginator;
pub mod row;
pub mod sort;
pub mod table;
pub mod validate;
pub mod warning;

use bubbletea_rs::Cmd;

/// Components that take keyboard focus.
pub trait Component {
    /// Focuses the component. May return a command for the runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component is focused.
    fn focused(&self) -> bool;
}

pub use config::{Config, ConfigError, HeaderCase, Labels};
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use options::{ChangeSink, LayoutProvider, Panel, Placement, PopoverOffsets, Rect};
pub use paginator::Model as Paginator;
pub use row::Row;
pub use sort::SortOrder;
pub use table::{Model as Table, Styles as TableStyles, TableKeyMap, TerminalLayout};
pub use warning::Warning;

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_datatable::prelude::*;
///
/// let _table = Table::new().with_config(Config::new().with_headers_from_data(true));
/// ```
pub mod prelude {
    pub use crate::config::{Config, HeaderCase, Labels};
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::options::{ChangeSink, LayoutProvider, Panel, Rect};
    pub use crate::paginator::Model as Paginator;
    pub use crate::row::Row;
    pub use crate::sort::SortOrder;
    pub use crate::table::Model as Table;
    pub use crate::warning::Warning;
    pub use crate::Component;
}
