/// Secondary action bar under the list: documentation links plus the
/// show/hide-disabled toggle
///
/// Suppressed entirely for lightbulb-glyph triggers, matching the compact
/// lightbulb presentation.

use ratatui::text::{Line, Span};

use crate::action::{CodeActionSet, Command};
use crate::theme::MenuTheme;
use crate::ui::menu::ShowOptions;

/// What a bar item does when activated
#[derive(Debug, Clone, PartialEq)]
pub enum BarCommand {
    /// Run a documentation command through the command executor
    Documentation(Command),
    /// Flip the process-wide disabled-actions visibility to this value
    ToggleShowDisabled(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub label: String,
    pub command: BarCommand,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionBar {
    items: Vec<BarItem>,
}

impl ActionBar {
    /// Assemble the bar for a session, or `None` when it has nothing to show
    pub fn build(
        set: &CodeActionSet,
        options: &ShowOptions,
        show_disabled: bool,
    ) -> Option<Self> {
        if options.from_lightbulb {
            return None;
        }

        let mut items: Vec<BarItem> = set
            .documentation
            .iter()
            .map(|command| BarItem {
                label: command.title.clone(),
                command: BarCommand::Documentation(command.clone()),
            })
            .collect();

        // The toggle only makes sense when hiding disabled actions would
        // actually change what is listed
        if options.include_disabled && set.has_mixed_enablement() {
            let label = if show_disabled {
                "Hide Disabled"
            } else {
                "Show Disabled"
            };
            items.push(BarItem {
                label: label.to_string(),
                command: BarCommand::ToggleShowDisabled(!show_disabled),
            });
        }

        if items.is_empty() {
            None
        } else {
            Some(Self { items })
        }
    }

    pub fn items(&self) -> &[BarItem] {
        &self.items
    }

    pub fn height(&self) -> u16 {
        1
    }

    /// Natural width of the rendered bar line
    pub fn width(&self) -> u16 {
        let labels: u16 = self
            .items
            .iter()
            .map(|item| item.label.chars().count() as u16)
            .sum();
        // leading space plus " | " separators
        let separators = (self.items.len().saturating_sub(1) as u16) * 3;
        labels + separators + 2
    }

    /// Which item a click at this column (relative to the bar's left edge)
    /// lands on
    pub fn hit_test(&self, column: u16) -> Option<&BarItem> {
        let mut cursor = 1u16;
        for (index, item) in self.items.iter().enumerate() {
            let label_width = item.label.chars().count() as u16;
            if column >= cursor && column < cursor + label_width {
                return Some(item);
            }
            cursor += label_width;
            if index + 1 < self.items.len() {
                cursor += 3;
            }
        }
        None
    }

    pub fn render_line(&self, theme: &MenuTheme) -> Line<'static> {
        let mut spans = vec![Span::styled(" ".to_string(), theme.action_bar)];
        for (index, item) in self.items.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(" | ".to_string(), theme.action_bar));
            }
            spans.push(Span::styled(item.label.clone(), theme.action_bar));
        }
        Line::from(spans)
    }
}
