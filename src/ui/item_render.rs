/// Pure row renderers: display row → styled line
///
/// Kept free of widget state so the menu can measure natural widths before
/// committing a final layout.

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use crate::action::CodeAction;
use crate::categories::ActionCategory;
use crate::grouping::DisplayRow;
use crate::keybinding::KeyboardShortcut;
use crate::theme::MenuTheme;

/// Fallback glyph for actions whose category carries no icon
pub const DEFAULT_ACTION_ICON: &str = "💡";

/// Marker shown before preferred actions
pub const PREFERRED_MARKER: &str = "★";

/// Row heights are per-variant and summed for the total menu height
pub const ACTION_ROW_HEIGHT: u16 = 1;
pub const HEADER_ROW_HEIGHT: u16 = 1;

pub fn row_height(row: &DisplayRow) -> u16 {
    match row {
        DisplayRow::Header { .. } => HEADER_ROW_HEIGHT,
        DisplayRow::Action { .. } => ACTION_ROW_HEIGHT,
    }
}

/// Total menu body height is the sum of per-row heights, not a uniform
/// height times the row count
pub fn total_height(rows: &[DisplayRow]) -> u16 {
    rows.iter().map(row_height).sum()
}

/// Collapse newline runs to single spaces so titles stay on one line
pub fn collapse_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_break = false;
    for ch in title.chars() {
        if ch == '\n' || ch == '\r' {
            in_break = true;
            continue;
        }
        if in_break {
            out.push(' ');
            in_break = false;
        }
        out.push(ch);
    }
    out
}

pub fn action_icon(category: &ActionCategory) -> &'static str {
    category.icon.unwrap_or(DEFAULT_ACTION_ICON)
}

/// Label for assistive output, combining the title with the disabled reason
pub fn accessible_label(action: &CodeAction) -> String {
    let title = collapse_title(&action.title);
    match &action.disabled_reason {
        Some(reason) => format!("{}, disabled: {}", title, reason),
        None => title,
    }
}

/// Hover text for an action row: the disabled reason, or how to apply and
/// preview the item when it is enabled
pub fn tooltip(
    action: &CodeAction,
    accept: &KeyboardShortcut,
    preview: &KeyboardShortcut,
) -> String {
    match &action.disabled_reason {
        Some(reason) => reason.clone(),
        None => format!("{} to apply, {} to preview", accept, preview),
    }
}

fn display_width(text: &str) -> u16 {
    text.chars().count() as u16
}

/// Natural content width of a row with its width constraint relaxed
pub fn natural_width(row: &DisplayRow, shortcut: Option<&KeyboardShortcut>) -> u16 {
    match row {
        DisplayRow::Header { category } => display_width(category.title) + 2,
        DisplayRow::Action { action, category } => {
            // icon, space, optional marker, title, gap and shortcut label
            let mut width = display_width(action_icon(category)) + 1;
            if action.is_preferred {
                width += display_width(PREFERRED_MARKER) + 1;
            }
            width += display_width(&collapse_title(&action.title));
            if let Some(shortcut) = shortcut {
                width += display_width(&shortcut.to_string()) + 2;
            }
            width + 2
        }
    }
}

/// Render one row at the committed content width
pub fn render_row(
    row: &DisplayRow,
    shortcut: Option<&KeyboardShortcut>,
    focused: bool,
    width: u16,
    theme: &MenuTheme,
) -> ListItem<'static> {
    match row {
        DisplayRow::Header { category } => {
            let line = Line::from(Span::styled(
                format!(" {} ", category.title),
                theme.header,
            ));
            ListItem::new(line)
        }
        DisplayRow::Action { action, category } => {
            let base_style = if !action.is_enabled() {
                theme.action_disabled
            } else if focused {
                theme.action_focused
            } else {
                theme.action
            };

            let mut spans = Vec::new();
            spans.push(Span::styled(format!(" {} ", action_icon(category)), base_style));
            if action.is_preferred {
                let marker_style = if focused || !action.is_enabled() {
                    base_style
                } else {
                    theme.preferred
                };
                spans.push(Span::styled(format!("{} ", PREFERRED_MARKER), marker_style));
            }
            spans.push(Span::styled(collapse_title(&action.title), base_style));

            if let Some(shortcut) = shortcut {
                let label = shortcut.to_string();
                let used: u16 = spans.iter().map(|span| display_width(&span.content)).sum();
                let pad = width
                    .saturating_sub(used)
                    .saturating_sub(display_width(&label) + 1)
                    .max(1);
                spans.push(Span::styled(" ".repeat(pad as usize), base_style));
                let shortcut_style = if focused && action.is_enabled() {
                    base_style
                } else {
                    theme.shortcut
                };
                spans.push(Span::styled(format!("{} ", label), shortcut_style));
            }

            ListItem::new(Line::from(spans))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CodeAction;
    use crate::categories;
    use crossterm::event::KeyCode;

    #[test]
    fn test_collapse_title() {
        assert_eq!(collapse_title("one line"), "one line");
        assert_eq!(collapse_title("two\nlines"), "two lines");
        assert_eq!(collapse_title("crlf\r\nbreak\n\nrun"), "crlf break run");
    }

    #[test]
    fn test_accessible_label_includes_disabled_reason() {
        let action = CodeAction::new("Extract\nto function", "refactor.extract")
            .disabled("selection is empty");
        assert_eq!(
            accessible_label(&action),
            "Extract to function, disabled: selection is empty"
        );

        let action = CodeAction::new("Fix typo", "quickfix");
        assert_eq!(accessible_label(&action), "Fix typo");
    }

    #[test]
    fn test_tooltip_variants() {
        let accept = KeyboardShortcut::simple(KeyCode::Enter);
        let preview = KeyboardShortcut::ctrl(KeyCode::Enter);

        let enabled = CodeAction::new("Fix typo", "quickfix");
        assert_eq!(
            tooltip(&enabled, &accept, &preview),
            "Enter to apply, Ctrl+Enter to preview"
        );

        let disabled = CodeAction::new("Fix typo", "quickfix").disabled("file is read-only");
        assert_eq!(tooltip(&disabled, &accept, &preview), "file is read-only");
    }

    #[test]
    fn test_total_height_sums_per_row_heights() {
        let rows = crate::grouping::build_rows(
            &[
                CodeAction::new("a", "quickfix"),
                CodeAction::new("b", "refactor.extract"),
            ],
            true,
        );
        let expected = 2 * HEADER_ROW_HEIGHT + 2 * ACTION_ROW_HEIGHT;
        assert_eq!(total_height(&rows), expected);
    }

    #[test]
    fn test_natural_width_grows_with_shortcut() {
        let category = categories::catch_all();
        let row = DisplayRow::Action {
            action: CodeAction::new("Fix typo", "quickfix"),
            category,
        };
        let bare = natural_width(&row, None);
        let with_shortcut = natural_width(
            &row,
            Some(&KeyboardShortcut::ctrl(KeyCode::Char('.'))),
        );
        assert!(with_shortcut > bare);
    }
}
