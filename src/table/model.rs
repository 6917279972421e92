//! Table state and operations.

use super::keys::TableKeyMap;
use super::view::Styles;
use crate::config::{Config, HeaderCase, Labels};
use crate::headers::{self, HeaderMode};
use crate::options::{ChangeSink, LayoutProvider, Panel, Placement, PopoverOffsets, PopoverSession};
use crate::row::{display_value, Row};
use crate::sort::{self, SortOrder, Sorters};
use crate::validate::{self, Inputs};
use crate::warning::Warning;
use serde_json::Value;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// The data table component.
///
/// One instance owns one rendered table: its working rows, sort flags and the
/// options popover session. The host keeps the source configuration and
/// receives copies of mutated rows through the change sink.
pub struct Model {
    // Host inputs
    pub(super) config: Option<Config>,
    pub(super) source: Option<Vec<Row>>,
    pub(super) entries_to_show: Option<usize>,
    pub(super) active_page: Option<usize>,
    pub(super) sink: Option<Box<dyn ChangeSink>>,

    // Resolved at init
    pub(super) warning: Option<Warning>,
    pub(super) labels: Labels,
    pub(super) header_case: HeaderCase,
    pub(super) send_changes: bool,
    pub(super) allow_options: bool,
    pub(super) allow_edit: bool,
    pub(super) allow_delete: bool,
    pub(super) allow_add: bool,
    pub(super) headers: Vec<String>,
    pub(super) rows: Vec<Row>,
    pub(super) sorters: Sorters,

    // Interaction
    pub(super) session: Option<PopoverSession>,
    pub(super) offsets: PopoverOffsets,
    pub(super) focus: bool,
    pub(super) cursor_row: usize,
    pub(super) cursor_col: usize,

    /// Key bindings used by [`Model::update`].
    pub keymap: TableKeyMap,
    /// Styles used by [`Model::view`].
    pub styles: Styles,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("config", &self.config)
            .field("entries_to_show", &self.entries_to_show)
            .field("active_page", &self.active_page)
            .field("has_change_sink", &self.sink.is_some())
            .field("warning", &self.warning)
            .field("headers", &self.headers)
            .field("rows", &self.rows.len())
            .field("sorters", &self.sorters)
            .field("session", &self.session)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a table with no configuration, data or inputs.
    pub fn new() -> Self {
        Self {
            config: None,
            source: None,
            entries_to_show: None,
            active_page: None,
            sink: None,
            warning: None,
            labels: Labels::default(),
            header_case: HeaderCase::AsIs,
            send_changes: false,
            allow_options: false,
            allow_edit: false,
            allow_delete: false,
            allow_add: false,
            headers: Vec::new(),
            rows: Vec::new(),
            sorters: Sorters::default(),
            session: None,
            offsets: PopoverOffsets::default(),
            focus: false,
            cursor_row: 0,
            cursor_col: 0,
            keymap: TableKeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// Sets the configuration (builder pattern).
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the source rows (builder pattern).
    pub fn with_data(mut self, data: Vec<Row>) -> Self {
        self.source = Some(data);
        self
    }

    /// Sets the page-size input (builder pattern).
    pub fn with_entries_to_show(mut self, entries: usize) -> Self {
        self.entries_to_show = Some(entries);
        self
    }

    /// Sets the active-page input, 1-based (builder pattern).
    pub fn with_active_page(mut self, page: usize) -> Self {
        self.active_page = Some(page);
        self
    }

    /// Registers the sink that receives rows after each commit (builder
    /// pattern). Only used when `sendChanges` is on.
    pub fn with_change_sink<S: ChangeSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets the popover placement offsets (builder pattern).
    pub fn with_popover_offsets(mut self, offsets: PopoverOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Replaces the page-size and active-page inputs, e.g. from a paginator.
    /// They are only checked again on the next [`Model::init`].
    pub fn set_page_inputs(&mut self, entries_to_show: Option<usize>, active_page: Option<usize>) {
        self.entries_to_show = entries_to_show;
        self.active_page = active_page;
    }

    /// Validates the inputs, then resolves headers and applies the initial
    /// sort.
    ///
    /// On a warning nothing else is initialized and [`Model::view`] renders
    /// the warning alone. Calling `init` again starts over from the source
    /// data.
    pub fn init(&mut self) -> Result<(), Warning> {
        self.reset_state();

        let inputs = Inputs {
            entries_to_show: self.entries_to_show,
            active_page: self.active_page,
            has_change_sink: self.sink.is_some(),
            has_data: self.source.is_some(),
        };
        if let Err(warning) = validate::validate(self.config.as_ref(), &inputs) {
            tracing::warn!(code = warning.code(), "table not initialized: {}", warning.title());
            self.warning = Some(warning);
            return Err(warning);
        }

        let Some(conf) = self.config.as_ref() else {
            return Err(Warning::ConfigurationMissing);
        };
        for key in conf.unrecognized_keys() {
            tracing::debug!(key, "ignoring unrecognized table option");
        }

        self.labels = conf.labels();
        self.header_case = conf.header_case();
        self.send_changes = conf.send_changes();
        if conf.allow_options() {
            self.allow_options = true;
            self.allow_edit = conf.allow_edit();
            self.allow_delete = conf.allow_delete();
            self.allow_add = conf.allow_add();
        }
        self.keymap
            .set_allowances(self.allow_options, self.allow_edit, self.allow_delete, self.allow_add);

        let mode = HeaderMode::from_config(conf);
        let initial_order_by = conf.initial_order_by().map(str::to_string);
        let resolved = headers::resolve(&mode, self.source.as_deref().unwrap_or_default());
        self.headers = resolved.headers;
        self.rows = resolved.rows;
        self.sorters = Sorters::new(&self.headers);

        if let Some(order_by) = initial_order_by {
            sort::sort_rows(&mut self.rows, &order_by, SortOrder::Ascending);
            if !self.sorters.activate(&order_by, SortOrder::Ascending) {
                tracing::warn!(column = %order_by, "initial sort column is not a header");
            }
        }

        tracing::debug!(
            headers = self.headers.len(),
            rows = self.rows.len(),
            "table initialized"
        );
        Ok(())
    }

    fn reset_state(&mut self) {
        self.warning = None;
        self.labels = Labels::default();
        self.header_case = HeaderCase::AsIs;
        self.send_changes = false;
        self.allow_options = false;
        self.allow_edit = false;
        self.allow_delete = false;
        self.allow_add = false;
        self.headers.clear();
        self.rows.clear();
        self.sorters = Sorters::default();
        self.session = None;
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// The warning shown instead of the table, if initialization failed.
    pub fn warning(&self) -> Option<Warning> {
        self.warning
    }

    /// Column keys in render order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Header labels with the configured casing applied.
    pub fn display_headers(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| headers::display_header(h, self.header_case))
            .collect()
    }

    /// The working rows, in display order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Per-header sort flags.
    pub fn sorters(&self) -> &Sorters {
        &self.sorters
    }

    /// Button and prompt texts.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Whether the options popover can be opened.
    pub fn allow_options(&self) -> bool {
        self.allow_options
    }

    /// Whether `panel` is enabled by the configuration.
    pub fn allows(&self, panel: Panel) -> bool {
        self.allow_options
            && match panel {
                Panel::Edit => self.allow_edit,
                Panel::Delete => self.allow_delete,
                Panel::Add => self.allow_add,
            }
    }

    /// Sorts by `header`: ascending from neutral or descending, descending
    /// from ascending. Closes the popover first. Every other header goes back
    /// to neutral.
    pub fn sort_column(&mut self, header: &str) {
        self.close_options();
        if !self.sorters.contains(header) {
            tracing::debug!(header, "sort requested for unknown header");
            return;
        }
        let order = self.sorters.next_order(header);
        sort::sort_rows(&mut self.rows, header, order);
        self.sorters.activate(header, order);
        tracing::debug!(header, ?order, "sorted column");
    }

    /// Opens the options popover for the row at `index`, placing it with the
    /// geometry from `layout`.
    ///
    /// Returns false, leaving the table untouched, when options are disabled
    /// or `index` is out of range. If the layout cannot measure the row or
    /// the popover, the popover opens without a placement.
    pub fn show_options<L>(&mut self, index: usize, layout: &L) -> bool
    where
        L: LayoutProvider + ?Sized,
    {
        self.open_options(index, layout, self.offsets)
    }

    pub(super) fn open_options<L>(&mut self, index: usize, layout: &L, offsets: PopoverOffsets) -> bool
    where
        L: LayoutProvider + ?Sized,
    {
        if !self.allow_options {
            return false;
        }
        let Some(row) = self.rows.get(index) else {
            tracing::debug!(index, "options requested for missing row");
            return false;
        };
        let mut session = PopoverSession::new(index, row, &self.headers);
        session.placement = match (layout.row_bounds(index), layout.popover_bounds()) {
            (Some(row_box), Some(popover_box)) => {
                Some(Placement::compute(row_box, popover_box, offsets))
            }
            _ => {
                tracing::debug!(index, "layout unavailable, popover left unplaced");
                None
            }
        };
        self.session = Some(session);
        tracing::debug!(index, "opened row options");
        true
    }

    /// Flips the visibility of `which`, hiding the other panels. `None` hides
    /// every panel. Disabled panels and a closed popover are ignored.
    pub fn toggle_panel(&mut self, which: Option<Panel>) {
        if let Some(panel) = which {
            if !self.allows(panel) {
                tracing::debug!(?panel, "panel not enabled");
                return;
            }
        }
        if let Some(session) = self.session.as_mut() {
            session.toggle(which);
        }
    }

    /// Closes the popover and discards its session.
    pub fn close_options(&mut self) {
        if self.session.take().is_some() {
            tracing::debug!("closed row options");
        }
    }

    /// The open popover session, if any.
    pub fn session(&self) -> Option<&PopoverSession> {
        self.session.as_ref()
    }

    /// Whether the popover is open.
    pub fn popover_visible(&self) -> bool {
        self.session.is_some()
    }

    /// Whether `panel` is currently visible.
    pub fn panel_visible(&self, panel: Panel) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.panel() == Some(panel))
    }

    /// Index of the row whose options are open.
    pub fn selected_index(&self) -> Option<usize> {
        self.session.as_ref().map(PopoverSession::selected)
    }

    /// Popover and pointer positions, when placed.
    pub fn placement(&self) -> Option<Placement> {
        self.session.as_ref().and_then(PopoverSession::placement)
    }

    /// Writes `value` under `key` in the edit buffer. No validation is done.
    /// Returns false when the popover is closed.
    pub fn edit_field(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.edited.set(key, value);
                true
            }
            None => false,
        }
    }

    /// Writes `value` under `key` in the add buffer. No validation is done.
    /// Returns false when the popover is closed.
    pub fn add_field(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.session.as_mut() {
            Some(session) => {
                session.added.set(key, value);
                true
            }
            None => false,
        }
    }

    /// Key of the focused field in the visible edit or add panel.
    pub fn focused_field(&self) -> Option<&str> {
        self.session.as_ref()?.focused_field()
    }

    /// Moves the field focus forward (`true`) or back, wrapping around.
    pub fn move_field(&mut self, forward: bool) {
        if let Some(session) = self.session.as_mut() {
            session.move_field(forward);
        }
    }

    /// Appends `c` to the focused field of the visible edit or add panel.
    /// The field becomes a string. Returns false when no field is focused.
    pub fn insert_char(&mut self, c: char) -> bool {
        self.edit_focused_text(|text| text.push(c))
    }

    /// Removes the last character (grapheme) of the focused field. Returns
    /// false when no field is focused.
    pub fn delete_char(&mut self) -> bool {
        self.edit_focused_text(|text| {
            let end = text.grapheme_indices(true).next_back().map_or(0, |(i, _)| i);
            text.truncate(end);
        })
    }

    fn edit_focused_text<F: FnOnce(&mut String)>(&mut self, change: F) -> bool {
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        let (Some(panel), Some(buffer), Some(key)) =
            (session.panel(), session.input_buffer(), session.focused_field())
        else {
            return false;
        };
        let key = key.to_string();
        let mut text = buffer.get(&key).map(display_value).unwrap_or_default();
        change(&mut text);
        match panel {
            Panel::Edit => self.edit_field(&key, text),
            Panel::Add => self.add_field(&key, text),
            Panel::Delete => false,
        }
    }

    /// Replaces the selected row with the edit buffer and propagates the
    /// change. Returns false if nothing was applied.
    pub fn commit_edit(&mut self) -> bool {
        if !self.allows(Panel::Edit) {
            return false;
        }
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(slot) = self.rows.get_mut(session.selected) else {
            tracing::debug!(index = session.selected, "edit target no longer exists");
            return false;
        };
        *slot = session.edited.clone();
        tracing::debug!(index = session.selected, "committed edit");
        self.after_commit(Some(0));
        true
    }

    /// Inserts the add buffer as the first row and propagates the change.
    /// The popover stays on the row it was opened for. Returns false if
    /// nothing was applied.
    pub fn commit_add(&mut self) -> bool {
        if !self.allows(Panel::Add) {
            return false;
        }
        let Some(session) = self.session.as_ref() else {
            return false;
        };
        self.rows.insert(0, session.added.clone());
        tracing::debug!(rows = self.rows.len(), "committed add");
        self.after_commit(Some(1));
        true
    }

    /// Removes the selected row, shifting later rows up, propagates the
    /// change and closes the popover. Returns false if nothing was applied.
    pub fn commit_delete(&mut self) -> bool {
        if !self.allows(Panel::Delete) {
            return false;
        }
        let Some(index) = self.selected_index() else {
            return false;
        };
        if index >= self.rows.len() {
            tracing::debug!(index, "delete target no longer exists");
            return false;
        }
        self.rows.remove(index);
        tracing::debug!(index, rows = self.rows.len(), "committed delete");
        self.after_commit(None);
        true
    }

    /// Emits the rows when `sendChanges` is on, hides every panel and resets
    /// the session buffers. `follow` shifts the selection so it stays on its
    /// row; `None` closes the popover.
    fn after_commit(&mut self, follow: Option<usize>) {
        self.emit_changes();
        self.toggle_panel(None);

        if self.cursor_row >= self.rows.len() {
            self.cursor_row = self.rows.len().saturating_sub(1);
        }
        let Some(shift) = follow else {
            self.close_options();
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let index = session.selected + shift;
        match self.rows.get(index) {
            Some(row) => {
                let placement = session.placement;
                *session = PopoverSession::new(index, row, &self.headers);
                session.placement = placement;
            }
            None => self.session = None,
        }
    }

    fn emit_changes(&mut self) {
        if !self.send_changes {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.send_changes(&self.rows);
            tracing::debug!(rows = self.rows.len(), "sent changes");
        }
    }

    /// Index of the row under the keyboard cursor.
    pub fn cursor(&self) -> usize {
        self.cursor_row
    }

    /// Header under the keyboard cursor.
    pub fn cursor_header(&self) -> Option<&str> {
        self.headers.get(self.cursor_col).map(String::as_str)
    }
}
