//! Row options: the popover session, its placement and change sinks.
//!
//! Opening a row's options starts a [`PopoverSession`] holding the selected
//! index, a snapshot of the row, an edit buffer and an add buffer. The
//! session lives until the popover is closed. Placement is computed from
//! bounding boxes supplied by a [`LayoutProvider`], which keeps the table free
//! of any rendering environment.

use crate::row::Row;
use serde_json::Value;
use std::sync::mpsc::Sender;

/// The three panels of the options popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    /// Edit the selected row.
    Edit,
    /// Confirm deletion of the selected row.
    Delete,
    /// Add a new row at the top.
    Add,
}

/// An axis-aligned rectangle in host units (pixels for a DOM, cells for a
/// terminal).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// A position in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub left: f64,
    /// Vertical coordinate.
    pub top: f64,
}

/// Geometry queries the host answers for popover placement.
pub trait LayoutProvider {
    /// Bounding box of the rendered row at `index`.
    fn row_bounds(&self, index: usize) -> Option<Rect>;

    /// Bounding box of the popover element itself.
    fn popover_bounds(&self) -> Option<Rect>;
}

/// Fixed offsets applied when placing the popover and its pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverOffsets {
    /// Distance from the row's top to the popover's top.
    pub popover_top: f64,
    /// Distance from the row's top to the pointer's top.
    pub pointer_top: f64,
    /// Distance from the popover's left edge to the pointer.
    pub pointer_left: f64,
}

impl Default for PopoverOffsets {
    /// Pixel offsets for DOM-like hosts.
    fn default() -> Self {
        Self {
            popover_top: 34.0,
            pointer_top: 21.0,
            pointer_left: 50.0,
        }
    }
}

impl PopoverOffsets {
    /// Cell offsets for terminal hosts: pointer on the line below the row,
    /// popover right under the pointer.
    pub fn cells() -> Self {
        Self {
            popover_top: 2.0,
            pointer_top: 1.0,
            pointer_left: 2.0,
        }
    }
}

/// Where the popover and its pointer go.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Top-left corner of the popover.
    pub popover: Point,
    /// Position of the pointer.
    pub pointer: Point,
}

impl Placement {
    /// Places the popover below `row`, horizontally centered on it.
    ///
    /// ```rust
    /// use bubbletea_datatable::options::{Placement, PopoverOffsets, Rect};
    ///
    /// let row = Rect::new(0.0, 100.0, 400.0, 30.0);
    /// let popover = Rect::new(0.0, 0.0, 200.0, 80.0);
    /// let p = Placement::compute(row, popover, PopoverOffsets::default());
    /// assert_eq!(p.popover.top, 134.0);
    /// assert_eq!(p.popover.left, 100.0);
    /// assert_eq!(p.pointer.top, 121.0);
    /// assert_eq!(p.pointer.left, 150.0);
    /// ```
    pub fn compute(row: Rect, popover: Rect, offsets: PopoverOffsets) -> Self {
        let popover_left = row.left + row.width / 2.0 - popover.width / 2.0;
        Self {
            popover: Point {
                left: popover_left,
                top: row.top + offsets.popover_top,
            },
            pointer: Point {
                left: popover_left + offsets.pointer_left,
                top: row.top + offsets.pointer_top,
            },
        }
    }
}

/// Transient state of an open options popover.
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverSession {
    pub(crate) selected: usize,
    pub(crate) snapshot: Row,
    pub(crate) edited: Row,
    pub(crate) added: Row,
    pub(crate) panel: Option<Panel>,
    pub(crate) field: usize,
    pub(crate) placement: Option<Placement>,
}

impl PopoverSession {
    /// Starts a session for `row` at `index`. The add buffer gets an empty
    /// string for every header.
    pub fn new(index: usize, row: &Row, headers: &[String]) -> Self {
        Self {
            selected: index,
            snapshot: row.clone(),
            edited: row.clone(),
            added: Row::from_pairs(headers.iter().map(|h| (h.clone(), Value::from("")))),
            panel: None,
            field: 0,
            placement: None,
        }
    }

    /// Index of the selected row.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// The selected row as it was when the popover opened (or last saved).
    pub fn snapshot(&self) -> &Row {
        &self.snapshot
    }

    /// The in-progress edit.
    pub fn edited(&self) -> &Row {
        &self.edited
    }

    /// The in-progress new row.
    pub fn added(&self) -> &Row {
        &self.added
    }

    /// The visible panel, if any.
    pub fn panel(&self) -> Option<Panel> {
        self.panel
    }

    /// The buffer the visible panel edits: the edit buffer for the edit
    /// panel, the add buffer for the add panel.
    pub fn input_buffer(&self) -> Option<&Row> {
        match self.panel? {
            Panel::Edit => Some(&self.edited),
            Panel::Add => Some(&self.added),
            Panel::Delete => None,
        }
    }

    /// Index of the focused field within [`PopoverSession::input_buffer`].
    pub fn field(&self) -> usize {
        self.field
    }

    /// Key of the focused field, when an input panel is visible.
    pub fn focused_field(&self) -> Option<&str> {
        self.input_buffer()?.keys().nth(self.field)
    }

    /// Moves the field focus one step, wrapping around at either end.
    pub fn move_field(&mut self, forward: bool) {
        let len = self.input_buffer().map_or(0, Row::len);
        if len == 0 {
            return;
        }
        self.field = if forward {
            (self.field + 1) % len
        } else {
            (self.field + len - 1) % len
        };
    }

    /// Where the popover was placed, if the layout could be measured.
    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    /// Flips `which`, hiding the other panels. `None` hides every panel.
    /// The field focus goes back to the first field.
    pub fn toggle(&mut self, which: Option<Panel>) {
        self.field = 0;
        self.panel = match which {
            Some(p) if self.panel == Some(p) => None,
            Some(p) => Some(p),
            None => None,
        };
    }
}

/// Receives the full row sequence after every commit when `sendChanges` is on.
///
/// Implemented for closures and for `std::sync::mpsc::Sender<Vec<Row>>`.
///
/// ```rust
/// use bubbletea_datatable::options::ChangeSink;
/// use bubbletea_datatable::Row;
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel::<Vec<Row>>();
/// let mut sink: Box<dyn ChangeSink> = Box::new(tx);
/// sink.send_changes(&[Row::new()]);
/// assert_eq!(rx.recv().unwrap().len(), 1);
/// ```
pub trait ChangeSink: Send {
    /// Called with the complete current rows.
    fn send_changes(&mut self, rows: &[Row]);
}

impl<F> ChangeSink for F
where
    F: FnMut(&[Row]) + Send,
{
    fn send_changes(&mut self, rows: &[Row]) {
        self(rows)
    }
}

impl ChangeSink for Sender<Vec<Row>> {
    fn send_changes(&mut self, rows: &[Row]) {
        if self.send(rows.to_vec()).is_err() {
            tracing::debug!("change receiver dropped, rows not delivered");
        }
    }
}
