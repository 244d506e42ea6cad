/// Turns a flat candidate list into the ordered display rows of the menu
///
/// Grouping is a pure function of the input list and the headers flag; the
/// menu rebuilds rows from scratch on every show.

use crate::action::CodeAction;
use crate::categories::{self, ActionCategory};

/// One line of the rendered menu
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRow {
    /// Non-interactive category header
    Header { category: &'static ActionCategory },
    /// A selectable (unless disabled) candidate action
    Action {
        action: CodeAction,
        category: &'static ActionCategory,
    },
}

impl DisplayRow {
    /// Headers and disabled actions never receive selection
    pub fn is_focusable(&self) -> bool {
        match self {
            DisplayRow::Header { .. } => false,
            DisplayRow::Action { action, .. } => action.is_enabled(),
        }
    }

    pub fn action(&self) -> Option<&CodeAction> {
        match self {
            DisplayRow::Header { .. } => None,
            DisplayRow::Action { action, .. } => Some(action),
        }
    }
}

/// Build the ordered row sequence for a candidate list.
///
/// With headers: for each registry category in order, emit one header
/// followed by that category's actions in input order; empty categories emit
/// nothing. Without headers: one action row per input, tagged with the
/// catch-all category, input order preserved.
pub fn build_rows(actions: &[CodeAction], show_headers: bool) -> Vec<DisplayRow> {
    if !show_headers {
        return actions
            .iter()
            .map(|action| DisplayRow::Action {
                action: action.clone(),
                category: categories::catch_all(),
            })
            .collect();
    }

    let mut rows = Vec::new();
    for category in categories::registry() {
        let matched: Vec<&CodeAction> = actions
            .iter()
            .filter(|action| categories::categorize(action) == category)
            .collect();
        if matched.is_empty() {
            continue;
        }
        rows.push(DisplayRow::Header { category });
        for action in matched {
            rows.push(DisplayRow::Action {
                action: action.clone(),
                category,
            });
        }
    }
    rows
}
