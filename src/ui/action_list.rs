/// Selection state machine over the display rows
///
/// The list owns focus and selection only; rendering and input decoding live
/// with the menu widget. Transition methods return the resulting selection
/// instead of firing callbacks, so the same state machine drives the event
/// loop and the tests.

use crate::action::CodeAction;
use crate::grouping::DisplayRow;

/// Whether a confirm gesture applies the action or previews it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptMode {
    Apply,
    Preview,
}

/// Payload handed to the menu when a row is confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub action: CodeAction,
    pub preview: bool,
}

pub struct ActionList {
    rows: Vec<DisplayRow>,
    focus: Option<usize>,
    selection: Option<usize>,
}

impl ActionList {
    /// Build the list and advance focus to the first focusable row
    pub fn new(rows: Vec<DisplayRow>) -> Self {
        let mut list = Self {
            rows,
            focus: None,
            selection: None,
        };
        list.focus_next();
        list
    }

    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn focused_row(&self) -> Option<&DisplayRow> {
        self.focus.and_then(|index| self.rows.get(index))
    }

    fn is_focusable(&self, index: usize) -> bool {
        self.rows
            .get(index)
            .map(DisplayRow::is_focusable)
            .unwrap_or(false)
    }

    /// Move focus forward to the next focusable row, wrapping around.
    /// Headers and disabled rows are skipped; with no focusable row at all
    /// the focus is left unchanged.
    pub fn focus_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let start = self.focus.map(|index| index + 1).unwrap_or(0);
        for step in 0..self.rows.len() {
            let index = (start + step) % self.rows.len();
            if self.is_focusable(index) {
                self.focus = Some(index);
                return;
            }
        }
    }

    /// Move focus backward to the previous focusable row, wrapping around
    pub fn focus_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len();
        let start = self.focus.map(|index| (index + len - 1) % len).unwrap_or(len - 1);
        for step in 0..len {
            let index = (start + len - (step % len)) % len;
            if self.is_focusable(index) {
                self.focus = Some(index);
                return;
            }
        }
    }

    /// Pointer hover focuses any row, headers included
    pub fn hover(&mut self, index: usize) {
        if index < self.rows.len() {
            self.focus = Some(index);
        }
    }

    /// Pointer click on a row. A focusable row confirms it as an apply
    /// selection; a header or disabled row only clears focus.
    pub fn click(&mut self, index: usize) -> Option<Selection> {
        if self.is_focusable(index) {
            self.select(index, AcceptMode::Apply)
        } else {
            self.focus = None;
            None
        }
    }

    /// Confirm the currently focused row. No-ops when nothing is focused or
    /// the focused row fails the focusable predicate (header, disabled).
    pub fn accept_focused(&mut self, mode: AcceptMode) -> Option<Selection> {
        let index = self.focus?;
        if !self.is_focusable(index) {
            return None;
        }
        self.select(index, mode)
    }

    /// Selection-change handling: only a non-disabled action row produces a
    /// selection; anything else clears it without confirming.
    fn select(&mut self, index: usize, mode: AcceptMode) -> Option<Selection> {
        match self.rows.get(index) {
            Some(DisplayRow::Action { action, .. }) if action.is_enabled() => {
                self.selection = Some(index);
                Some(Selection {
                    action: action.clone(),
                    preview: mode == AcceptMode::Preview,
                })
            }
            _ => {
                self.selection = None;
                None
            }
        }
    }
}
