//! Keyboard bindings and message handling for the table.

use super::model::Model;
use crate::key::{Binding, KeyMap, KeyPress};
use crate::options::{Panel, PopoverOffsets};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};

/// Key bindings of the table component.
///
/// The option bindings are enabled according to the configuration when the
/// table initializes.
#[derive(Debug, Clone)]
pub struct TableKeyMap {
    /// Move the row cursor up.
    pub row_up: Binding,
    /// Move the row cursor down.
    pub row_down: Binding,
    /// Move the column cursor left.
    pub column_left: Binding,
    /// Move the column cursor right.
    pub column_right: Binding,
    /// Sort the column under the cursor.
    pub sort: Binding,
    /// Open the options of the row under the cursor.
    pub options: Binding,
    /// Toggle the edit panel.
    pub edit: Binding,
    /// Toggle the delete panel.
    pub delete: Binding,
    /// Toggle the add panel.
    pub add: Binding,
    /// Commit the visible panel.
    pub confirm: Binding,
    /// Focus the next field of the edit or add panel.
    pub next_field: Binding,
    /// Focus the previous field of the edit or add panel.
    pub prev_field: Binding,
    /// Delete the last character of the focused field.
    pub delete_char: Binding,
    /// Close the popover.
    pub close: Binding,
}

impl Default for TableKeyMap {
    fn default() -> Self {
        Self {
            row_up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            row_down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            column_left: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev column"),
            column_right: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next column"),
            sort: Binding::new(vec!['s']).with_help("s", "sort"),
            options: Binding::new(vec![KeyCode::Enter]).with_help("enter", "options"),
            edit: Binding::new(vec!['e']).with_help("e", "edit"),
            delete: Binding::new(vec!['d']).with_help("d", "delete"),
            add: Binding::new(vec!['a']).with_help("a", "add"),
            confirm: Binding::new(vec![KeyPress::ctrl('s')]).with_help("ctrl+s", "confirm"),
            next_field: Binding::new(vec![KeyCode::Tab]).with_help("tab", "next field"),
            prev_field: Binding::new(vec![KeyCode::BackTab]).with_help("shift+tab", "prev field"),
            delete_char: Binding::new(vec![KeyCode::Backspace]).with_help("backspace", "delete char"),
            close: Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
        }
    }
}

impl TableKeyMap {
    pub(super) fn set_allowances(&mut self, options: bool, edit: bool, delete: bool, add: bool) {
        self.options.set_enabled(options);
        self.edit.set_enabled(options && edit);
        self.delete.set_enabled(options && delete);
        self.add.set_enabled(options && add);
        self.confirm.set_enabled(options);
        let inputs = options && (edit || add);
        self.next_field.set_enabled(inputs);
        self.prev_field.set_enabled(inputs);
        self.delete_char.set_enabled(inputs);
        self.close.set_enabled(options);
    }
}

impl KeyMap for TableKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        [&self.row_up, &self.row_down, &self.sort, &self.options]
            .into_iter()
            .filter(|b| b.enabled())
            .collect()
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        let columns = vec![
            vec![&self.row_up, &self.row_down, &self.column_left, &self.column_right],
            vec![&self.sort, &self.options, &self.close],
            vec![&self.edit, &self.delete, &self.add, &self.confirm],
            vec![&self.next_field, &self.prev_field, &self.delete_char],
        ];
        columns
            .into_iter()
            .map(|col| col.into_iter().filter(|b| b.enabled()).collect::<Vec<_>>())
            .filter(|col| !col.is_empty())
            .collect()
    }
}

impl Model {
    /// Handles key messages while the table is focused.
    ///
    /// Opening options uses [`Model::terminal_layout`] for placement. While
    /// the edit or add panel is visible, printable keys are typed into its
    /// focused field instead of toggling panels.
    pub fn update(&mut self, msg: &Msg) {
        if !self.focus || self.warning.is_some() {
            return;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg);
        }
    }

    fn handle_key(&mut self, key: &KeyMsg) {
        tracing::trace!(code = ?key.key, "table key");
        if self.popover_visible() {
            if self.keymap.close.matches(key) {
                self.close_options();
            } else if self.keymap.confirm.matches(key) {
                self.commit_visible_panel();
            } else if self.focused_field().is_some() {
                self.handle_input(key);
            } else if self.keymap.edit.matches(key) {
                self.toggle_panel(Some(Panel::Edit));
            } else if self.keymap.delete.matches(key) {
                self.toggle_panel(Some(Panel::Delete));
            } else if self.keymap.add.matches(key) {
                self.toggle_panel(Some(Panel::Add));
            }
            return;
        }

        if self.keymap.row_up.matches(key) {
            self.cursor_row = self.cursor_row.saturating_sub(1);
        } else if self.keymap.row_down.matches(key) {
            if self.cursor_row + 1 < self.rows.len() {
                self.cursor_row += 1;
            }
        } else if self.keymap.column_left.matches(key) {
            self.cursor_col = self.cursor_col.saturating_sub(1);
        } else if self.keymap.column_right.matches(key) {
            if self.cursor_col + 1 < self.headers.len() {
                self.cursor_col += 1;
            }
        } else if self.keymap.sort.matches(key) {
            if let Some(header) = self.cursor_header().map(str::to_string) {
                self.sort_column(&header);
            }
        } else if self.keymap.options.matches(key) {
            let layout = self.terminal_layout();
            self.open_options(self.cursor_row, &layout, PopoverOffsets::cells());
        }
    }

    fn handle_input(&mut self, key: &KeyMsg) {
        if self.keymap.next_field.matches(key) {
            self.move_field(true);
        } else if self.keymap.prev_field.matches(key) {
            self.move_field(false);
        } else if self.keymap.delete_char.matches(key) {
            self.delete_char();
        } else if let KeyCode::Char(c) = key.key {
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            {
                self.insert_char(c);
            }
        }
    }

    fn commit_visible_panel(&mut self) -> bool {
        match self.session().and_then(|s| s.panel()) {
            Some(Panel::Edit) => self.commit_edit(),
            Some(Panel::Delete) => self.commit_delete(),
            Some(Panel::Add) => self.commit_add(),
            None => false,
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
