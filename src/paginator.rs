//! A paginator that supplies the table's page inputs.
//!
//! The table only checks that a page size and an active page are present; it
//! never slices its rows. This component keeps those two numbers in step with
//! the row count and renders the page indicator next to the table.
//!
//! ```rust
//! use bubbletea_datatable::{Config, Paginator, Row, Table};
//!
//! let paginator = Paginator::new().with_per_page(10).with_total_items(25);
//! assert_eq!(paginator.total_pages(), 3);
//! assert_eq!(paginator.active_page(), 1);
//!
//! let mut table = Table::new()
//!     .with_config(Config::new().with_headers_from_data(true))
//!     .with_data(vec![Row::new()]);
//! paginator.apply_to(&mut table);
//! assert!(table.init().is_ok());
//! ```

use crate::key::{Binding, KeyMap};
use crate::table::Model as Table;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::KeyCode;

/// How the page indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Numerals, e.g. "2/5".
    #[default]
    Arabic,
    /// One dot per page, e.g. "○ ● ○".
    Dots,
}

/// Key bindings for page navigation.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    /// Previous page.
    pub prev_page: Binding,
    /// Next page.
    pub next_page: Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: Binding::new(vec![KeyCode::PageUp, KeyCode::Char('<')])
                .with_help("pgup/<", "prev page"),
            next_page: Binding::new(vec![KeyCode::PageDown, KeyCode::Char('>')])
                .with_help("pgdn/>", "next page"),
        }
    }
}

impl KeyMap for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.prev_page, &self.next_page]]
    }
}

/// Pagination state and its indicator.
#[derive(Debug, Clone)]
pub struct Model {
    /// Indicator style.
    pub paginator_type: Type,
    page: usize,
    per_page: usize,
    total_pages: usize,
    /// Dot for the current page.
    pub active_dot: String,
    /// Dot for every other page.
    pub inactive_dot: String,
    /// Arabic format; the two `%d` are the page and the page count.
    pub arabic_format: String,
    /// Navigation bindings.
    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 0,
            per_page: 1,
            total_pages: 1,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    /// A single-page paginator showing one entry per page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indicator style (builder pattern).
    pub fn with_type(mut self, paginator_type: Type) -> Self {
        self.paginator_type = paginator_type;
        self
    }

    /// Sets the entries per page; zero is treated as one (builder pattern).
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.set_per_page(per_page);
        self
    }

    /// Derives the page count from `items` (builder pattern).
    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    /// Sets the entries per page; zero is treated as one.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
    }

    /// Derives the page count from `items`, keeping the current page in range.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_pages = items.div_ceil(self.per_page).max(1);
        if self.page >= self.total_pages {
            self.page = self.total_pages - 1;
        }
    }

    /// Entries per page, as the table's `entriesToShow` input.
    pub fn entries_to_show(&self) -> usize {
        self.per_page
    }

    /// The current page, 1-based, as the table's `activePage` input.
    pub fn active_page(&self) -> usize {
        self.page + 1
    }

    /// Number of pages.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Start and end indices of the current page within `length` items.
    pub fn slice_bounds(&self, length: usize) -> (usize, usize) {
        let start = (self.page * self.per_page).min(length);
        let end = (start + self.per_page).min(length);
        (start, end)
    }

    /// Moves back one page, stopping at the first.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Moves forward one page, stopping at the last.
    pub fn next_page(&mut self) {
        if !self.on_last_page() {
            self.page += 1;
        }
    }

    /// Whether the first page is shown.
    pub fn on_first_page(&self) -> bool {
        self.page == 0
    }

    /// Whether the last page is shown.
    pub fn on_last_page(&self) -> bool {
        self.page + 1 >= self.total_pages
    }

    /// Hands the page size and active page to `table`. They take effect on
    /// the table's next `init`.
    pub fn apply_to(&self, table: &mut Table) {
        table.set_page_inputs(Some(self.entries_to_show()), Some(self.active_page()));
    }

    /// Handles navigation keys.
    pub fn update(&mut self, msg: &Msg) {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_page.matches(key_msg) {
                self.next_page();
            } else if self.keymap.prev_page.matches(key_msg) {
                self.prev_page();
            }
        }
    }

    /// Renders the page indicator.
    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self
                .arabic_format
                .replacen("%d", &self.active_page().to_string(), 1)
                .replacen("%d", &self.total_pages.to_string(), 1),
            Type::Dots => (0..self.total_pages)
                .map(|i| {
                    if i == self.page {
                        self.active_dot.as_str()
                    } else {
                        self.inactive_dot.as_str()
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}
