//! Terminal rendering of the table and its options popover.

use super::model::Model;
use crate::options::{LayoutProvider, Panel, Rect};
use crate::row::{display_value, Row};
use crate::sort::SortOrder;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_width::UnicodeWidthStr;

const COLUMN_SEPARATOR: &str = " | ";
const CURSOR: &str = "> ";
const NO_CURSOR: &str = "  ";
const POINTER: &str = "▲";

/// Styles for the table view.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Header labels.
    pub header: Style,
    /// Sort icons next to header labels.
    pub sort_icon: Style,
    /// Header separator line.
    pub separator: Style,
    /// Regular cells.
    pub cell: Style,
    /// The row under the cursor or with open options.
    pub selected: Style,
    /// Warning title.
    pub warning_title: Style,
    /// Warning explanation.
    pub warning_body: Style,
    /// Popover lines.
    pub popover: Style,
    /// The button of the visible panel.
    pub active_button: Style,
    /// The focused field of the edit or add panel.
    pub focused_field: Style,
    /// The pointer above the popover.
    pub pointer: Style,
}

fn accent() -> lipgloss::AdaptiveColor {
    lipgloss::AdaptiveColor {
        Light: "#5A56E0",
        Dark: "#7571F9",
    }
}

fn subdued() -> lipgloss::AdaptiveColor {
    lipgloss::AdaptiveColor {
        Light: "#A49FA5",
        Dark: "#777777",
    }
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            header: Style::new().bold(true),
            sort_icon: Style::new().foreground(subdued()),
            separator: Style::new().foreground(subdued()),
            cell: Style::new(),
            selected: Style::new().foreground(accent()),
            warning_title: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#D7263D",
                Dark: "#FF5F87",
            }),
            warning_body: Style::new().foreground(subdued()),
            popover: Style::new().foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#DDDDDD",
            }),
            active_button: Style::new().bold(true).foreground(accent()),
            focused_field: Style::new().underline(true).foreground(accent()),
            pointer: Style::new().foreground(accent()),
        }
    }
}

/// Geometry of the rendered table in terminal cells.
///
/// Row `i` sits on line `2 + i`, below the header and its separator, and
/// spans the full table width. The popover is one line high when it opens:
/// its button bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerminalLayout {
    /// Number of rendered rows.
    pub rows: usize,
    /// Width of the widest table line.
    pub width: usize,
    /// Width of the popover button bar.
    pub popover_width: usize,
}

impl LayoutProvider for TerminalLayout {
    fn row_bounds(&self, index: usize) -> Option<Rect> {
        (index < self.rows).then(|| Rect::new(0.0, 2.0 + index as f64, self.width as f64, 1.0))
    }

    fn popover_bounds(&self) -> Option<Rect> {
        (self.popover_width > 0).then(|| Rect::new(0.0, 0.0, self.popover_width as f64, 1.0))
    }
}

fn pad(s: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(used)))
}

/// Spaces for a host-supplied offset, clamped to `0..=max`. Non-finite
/// offsets give no indent.
fn indent(cells: f64, max: usize) -> String {
    if !cells.is_finite() {
        return String::new();
    }
    let cells = cells.clamp(0.0, max as f64).round() as usize;
    " ".repeat(cells.min(max))
}

impl Model {
    fn header_cells(&self) -> Vec<(String, &'static str)> {
        self.display_headers()
            .into_iter()
            .zip(&self.headers)
            .map(|(label, key)| (label, SortOrder::icon(self.sorters.get(key))))
            .collect()
    }

    fn row_cells(&self, row: &Row) -> Vec<String> {
        self.headers
            .iter()
            .map(|h| row.get(h).map(display_value).unwrap_or_default())
            .collect()
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .header_cells()
            .iter()
            .map(|(label, icon)| label.width() + 1 + icon.width())
            .collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(self.row_cells(row)) {
                *w = (*w).max(cell.width());
            }
        }
        widths
    }

    fn table_width(&self, widths: &[usize]) -> usize {
        let separators = COLUMN_SEPARATOR.width() * widths.len().saturating_sub(1);
        CURSOR.width() + widths.iter().sum::<usize>() + separators
    }

    fn button_bar(&self, styled: bool) -> String {
        let active = self.session.as_ref().and_then(|s| s.panel());
        [
            (Panel::Edit, &self.labels.edit),
            (Panel::Delete, &self.labels.delete),
            (Panel::Add, &self.labels.add),
        ]
        .into_iter()
        .filter(|(panel, _)| self.allows(*panel))
        .map(|(panel, label)| {
            let text = format!("[{label}]");
            if styled && active == Some(panel) {
                self.styles.active_button.render(&text)
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Geometry of the current render, for placing the popover.
    pub fn terminal_layout(&self) -> TerminalLayout {
        let widths = self.column_widths();
        TerminalLayout {
            rows: self.rows.len(),
            width: self.table_width(&widths),
            popover_width: self.button_bar(false).width(),
        }
    }

    fn popover_lines(&self) -> Vec<String> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        let mut lines = vec![self.button_bar(true)];
        let focused = session.focused_field();
        let fields = |row: &Row| -> Vec<String> {
            row.iter()
                .map(|(k, v)| {
                    let text = format!("{k}: {}", display_value(v));
                    if focused == Some(k) {
                        format!("{CURSOR}{}", self.styles.focused_field.render(&text))
                    } else {
                        format!("{NO_CURSOR}{text}")
                    }
                })
                .collect()
        };
        let actions = |label: &str| format!("[{label}] [{}]", self.labels.cancel);
        match session.panel() {
            Some(Panel::Edit) => {
                lines.extend(fields(session.edited()));
                lines.push(actions(&self.labels.edit));
            }
            Some(Panel::Delete) => {
                lines.push(self.labels.confirm_delete.clone());
                lines.push(actions(&self.labels.delete));
            }
            Some(Panel::Add) => {
                lines.extend(fields(session.added()));
                lines.push(actions(&self.labels.add));
            }
            None => {}
        }
        lines
    }

    fn warning_view(&self) -> Option<String> {
        let warning = self.warning?;
        Some(format!(
            "{}\n{}",
            self.styles.warning_title.render(warning.title()),
            self.styles.warning_body.render(warning.explanation())
        ))
    }

    /// Renders the table, or the initialization warning alone.
    pub fn view(&self) -> String {
        if let Some(warning) = self.warning_view() {
            return warning;
        }

        let widths = self.column_widths();
        let table_width = self.table_width(&widths);
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let header = self
            .header_cells()
            .iter()
            .zip(&widths)
            .map(|((label, icon), w)| {
                let text = pad(&format!("{label} {icon}"), *w);
                let (label_part, icon_part) = text.split_at(label.len());
                format!(
                    "{}{}",
                    self.styles.header.render(label_part),
                    self.styles.sort_icon.render(icon_part)
                )
            })
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);
        lines.push(format!("{NO_CURSOR}{header}"));

        let rule = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-");
        lines.push(format!("{NO_CURSOR}{}", self.styles.separator.render(&rule)));

        let selected = self.selected_index();
        for (index, row) in self.rows.iter().enumerate() {
            let under_cursor = self.focus && index == self.cursor_row;
            let text = self
                .row_cells(row)
                .iter()
                .zip(&widths)
                .map(|(cell, w)| pad(cell, *w))
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR);
            let prefix = if under_cursor { CURSOR } else { NO_CURSOR };
            let style = if under_cursor || selected == Some(index) {
                &self.styles.selected
            } else {
                &self.styles.cell
            };
            lines.push(format!("{prefix}{}", style.render(&text)));

            if selected == Some(index) {
                let placement = self.placement();
                let pointer_left = placement.map_or(0.0, |p| p.pointer.left);
                let popover_left = placement.map_or(0.0, |p| p.popover.left);
                lines.push(format!(
                    "{}{}",
                    indent(pointer_left, table_width),
                    self.styles.pointer.render(POINTER)
                ));
                let margin = indent(popover_left, table_width);
                for line in self.popover_lines() {
                    lines.push(format!("{margin}{}", self.styles.popover.render(&line)));
                }
            }
        }

        lines.join("\n")
    }
}
