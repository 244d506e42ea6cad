/// Widget lifecycle controller
///
/// One `CodeActionMenu` instance is owned by the host's composition root and
/// holds at most one live session. Every dismissal path (selection, escape,
/// click-away, focus loss, re-show, toggle) funnels through `hide_with`, so
/// the per-session outcome event fires exactly once and the delegate always
/// observes the hide before the selection callback runs.

use std::sync::Arc;

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::action::{CodeAction, CodeActionSet, Command, MenuTrigger};
use crate::grouping::build_rows;
use crate::keybinding::{KeybindingResolver, KeyboardShortcut};
use crate::telemetry::{MenuOutcome, TelemetrySink};
use crate::theme::MenuTheme;
use crate::ui::action_bar::{ActionBar, BarCommand};
use crate::ui::action_list::{AcceptMode, ActionList, Selection};
use crate::ui::item_render::{natural_width, render_row, total_height};
use crate::ui::layout::{Anchor, MenuLayout};

/// Host hooks invoked on selection and dismissal.
///
/// `on_select_code_action` runs fire-and-forget on the host's tokio runtime;
/// the menu is already hidden by the time it is polled, so a failing
/// delegate cannot leave the menu visible.
#[async_trait]
pub trait MenuDelegate: Send + Sync {
    async fn on_select_code_action(&self, action: CodeAction, trigger: MenuTrigger, preview: bool);

    fn on_hide(&self, cancelled: bool);
}

/// Executes documentation commands from the action bar
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, command: &Command) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// Allow disabled actions into the menu (subject to the visibility
    /// toggle, or to no valid action being available)
    pub include_disabled: bool,
    /// Group actions under category headers
    pub show_headers: bool,
    /// The menu was opened from the lightbulb glyph; suppresses the bar
    pub from_lightbulb: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            include_disabled: false,
            show_headers: true,
            from_lightbulb: false,
        }
    }
}

/// Everything describing one open menu, discarded on hide
struct MenuSession {
    trigger: MenuTrigger,
    actions: CodeActionSet,
    anchor: Anchor,
    options: ShowOptions,
    list: ActionList,
    action_bar: Option<ActionBar>,
    layout: MenuLayout,
    /// Swallows pointer input until the first movement or button press, so
    /// the gesture that opened the menu cannot also interact with it
    shield: bool,
    popup_area: Rect,
    list_area: Rect,
    bar_area: Option<Rect>,
}

enum MouseOutcome {
    Handled,
    Complete(Selection),
    Bar(BarCommand),
    Dismiss,
}

pub struct CodeActionMenu {
    delegate: Arc<dyn MenuDelegate>,
    resolver: Arc<dyn KeybindingResolver>,
    executor: Arc<dyn CommandExecutor>,
    telemetry: Arc<dyn TelemetrySink>,
    theme: MenuTheme,
    accept_binding: KeyboardShortcut,
    preview_binding: KeyboardShortcut,
    /// Visibility of disabled actions; survives across sessions for the
    /// lifetime of this instance, never persisted
    show_disabled: bool,
    session: Option<MenuSession>,
}

impl CodeActionMenu {
    pub fn new(
        delegate: Arc<dyn MenuDelegate>,
        resolver: Arc<dyn KeybindingResolver>,
        executor: Arc<dyn CommandExecutor>,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            delegate,
            resolver,
            executor,
            telemetry,
            theme: MenuTheme::default(),
            accept_binding: KeyboardShortcut::simple(KeyCode::Enter),
            preview_binding: KeyboardShortcut::ctrl(KeyCode::Enter),
            show_disabled: false,
            session: None,
        }
    }

    pub fn with_theme(mut self, theme: MenuTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_accept_binding(mut self, shortcut: KeyboardShortcut) -> Self {
        self.accept_binding = shortcut;
        self
    }

    pub fn with_preview_binding(mut self, shortcut: KeyboardShortcut) -> Self {
        self.preview_binding = shortcut;
        self
    }

    /// The host-wide visibility flag: true only while a session is showing
    pub fn is_visible(&self) -> bool {
        self.session.is_some()
    }

    pub fn show_disabled(&self) -> bool {
        self.show_disabled
    }

    /// Display rows of the current session, if one is showing
    pub fn rows(&self) -> Option<&[crate::grouping::DisplayRow]> {
        self.session.as_ref().map(|session| session.list.rows())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.session.as_ref().and_then(|session| session.list.focused_index())
    }

    pub fn accept_binding(&self) -> &KeyboardShortcut {
        &self.accept_binding
    }

    pub fn preview_binding(&self) -> &KeyboardShortcut {
        &self.preview_binding
    }

    /// Open the menu for a candidate set. Returns false (and stays hidden)
    /// when the disabled-visibility filter leaves nothing to show.
    pub fn show(
        &mut self,
        trigger: MenuTrigger,
        actions: &CodeActionSet,
        anchor: Anchor,
        options: ShowOptions,
    ) -> bool {
        let actions_to_show: &[CodeAction] =
            if options.include_disabled && (self.show_disabled || actions.valid_actions.is_empty())
            {
                &actions.all_actions
            } else {
                &actions.valid_actions
            };

        if actions_to_show.is_empty() {
            tracing::debug!("code action menu not shown: nothing to display");
            return false;
        }

        // Re-showing fully dismisses any live session first
        self.hide_with(true);

        let list = ActionList::new(build_rows(actions_to_show, options.show_headers));
        let action_bar = ActionBar::build(actions, &options, self.show_disabled);

        // Two-pass layout: measure every row at a relaxed width constraint,
        // then commit the final width including the action bar
        let mut layout = MenuLayout::new();
        layout.measure(list.rows().iter().map(|row| {
            let shortcut = row.action().and_then(|action| self.resolver.resolve(action));
            natural_width(row, shortcut.as_ref())
        }));
        layout.commit(action_bar.as_ref().map(ActionBar::width).unwrap_or(0));

        tracing::debug!(
            source = trigger.source.as_str(),
            shown = actions_to_show.len(),
            valid = actions.valid_actions.len(),
            "showing code action menu"
        );

        self.session = Some(MenuSession {
            trigger,
            actions: actions.clone(),
            anchor,
            options,
            list,
            action_bar,
            layout,
            shield: true,
            popup_area: Rect::default(),
            list_area: Rect::default(),
            bar_area: None,
        });
        true
    }

    /// Dismiss the current session, if any. Idempotent.
    pub fn hide(&mut self) {
        self.hide_with(true);
    }

    fn hide_with(&mut self, cancelled: bool) {
        if let Some(session) = self.session.take() {
            let outcome = MenuOutcome {
                source: session.trigger.source,
                valid_actions: session.actions.valid_actions.len(),
                cancelled,
            };
            self.telemetry.record(&outcome);
            tracing::debug!(cancelled, "hiding code action menu");
            self.delegate.on_hide(cancelled);
        }
    }

    /// Flip disabled-action visibility. A live session is hidden and
    /// re-shown with identical parameters under the new filter.
    pub fn toggle_show_disabled(&mut self, show_disabled: bool) {
        let stored = self
            .session
            .as_ref()
            .map(|session| (session.trigger, session.actions.clone(), session.anchor, session.options));
        // The session logically continues, so the implicit hide is not a
        // user cancellation
        self.hide_with(false);
        self.show_disabled = show_disabled;
        if let Some((trigger, actions, anchor, options)) = stored {
            self.show(trigger, &actions, anchor, options);
        }
    }

    /// Keyboard command: move focus down. No-op while hidden.
    pub fn focus_next(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.list.focus_next();
        }
    }

    /// Keyboard command: move focus up. No-op while hidden.
    pub fn focus_previous(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.list.focus_previous();
        }
    }

    /// Keyboard command: confirm the focused row, applying or previewing.
    /// No-op while hidden or when focus is not on a selectable row.
    pub fn accept_focused(&mut self, preview: bool) {
        let mode = if preview {
            AcceptMode::Preview
        } else {
            AcceptMode::Apply
        };
        let selection = match self.session.as_mut() {
            Some(session) => session.list.accept_focused(mode),
            None => return,
        };
        if let Some(selection) = selection {
            self.complete(selection);
        }
    }

    /// Route a key event into the menu. Returns true when consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.session.is_none() {
            return false;
        }
        if self.preview_binding.matches(key) {
            self.accept_focused(true);
            return true;
        }
        if self.accept_binding.matches(key) {
            self.accept_focused(false);
            return true;
        }
        match key.code {
            KeyCode::Esc => {
                self.hide_with(true);
                true
            }
            KeyCode::Up => {
                self.focus_previous();
                true
            }
            KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::Char('k') if key.modifiers == KeyModifiers::NONE => {
                self.focus_previous();
                true
            }
            KeyCode::Char('j') if key.modifiers == KeyModifiers::NONE => {
                self.focus_next();
                true
            }
            _ => false,
        }
    }

    /// Route a mouse event into the menu. While a session is visible every
    /// pointer event is consumed, so clicks never leak to the host UI.
    pub fn handle_mouse(&mut self, event: &MouseEvent) -> bool {
        if self.session.is_none() {
            return false;
        }

        let outcome = {
            let session = self.session.as_mut().unwrap();

            if session.shield {
                if matches!(
                    event.kind,
                    MouseEventKind::Moved | MouseEventKind::Down(_)
                ) {
                    session.shield = false;
                }
                return true;
            }

            // Nothing rendered yet, nothing to hit-test against
            if session.popup_area.width == 0 {
                return true;
            }

            match event.kind {
                MouseEventKind::Moved => {
                    if let Some(index) = Self::row_at(session, event.column, event.row) {
                        session.list.hover(index);
                    }
                    MouseOutcome::Handled
                }
                MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(index) = Self::row_at(session, event.column, event.row) {
                        match session.list.click(index) {
                            Some(selection) => MouseOutcome::Complete(selection),
                            None => MouseOutcome::Handled,
                        }
                    } else if let Some(command) =
                        Self::bar_command_at(session, event.column, event.row)
                    {
                        MouseOutcome::Bar(command)
                    } else if !Self::contains(session.popup_area, event.column, event.row) {
                        MouseOutcome::Dismiss
                    } else {
                        MouseOutcome::Handled
                    }
                }
                _ => MouseOutcome::Handled,
            }
        };

        match outcome {
            MouseOutcome::Handled => {}
            MouseOutcome::Complete(selection) => self.complete(selection),
            MouseOutcome::Bar(command) => self.run_bar_command(command),
            MouseOutcome::Dismiss => self.hide_with(true),
        }
        true
    }

    /// The whole menu lost input focus; dismiss
    pub fn handle_focus_lost(&mut self) {
        self.hide_with(true);
    }

    fn contains(area: Rect, column: u16, row: u16) -> bool {
        column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height
    }

    fn row_at(session: &MenuSession, column: u16, row: u16) -> Option<usize> {
        if !Self::contains(session.list_area, column, row) {
            return None;
        }
        let index = (row - session.list_area.y) as usize;
        if index < session.list.len() {
            Some(index)
        } else {
            None
        }
    }

    fn bar_command_at(session: &MenuSession, column: u16, row: u16) -> Option<BarCommand> {
        let bar_area = session.bar_area?;
        if !Self::contains(bar_area, column, row) {
            return None;
        }
        session
            .action_bar
            .as_ref()
            .and_then(|bar| bar.hit_test(column - bar_area.x))
            .map(|item| item.command.clone())
    }

    fn run_bar_command(&mut self, command: BarCommand) {
        match command {
            BarCommand::Documentation(command) => {
                let executor = Arc::clone(&self.executor);
                tokio::spawn(async move {
                    if let Err(error) = executor.execute(&command).await {
                        tracing::warn!(%error, command = %command.id, "documentation command failed");
                    }
                });
            }
            BarCommand::ToggleShowDisabled(value) => self.toggle_show_disabled(value),
        }
    }

    /// Hide first, then fire the delegate; the menu is guaranteed gone by
    /// the time the selection callback runs
    fn complete(&mut self, selection: Selection) {
        let trigger = match self.session.as_ref() {
            Some(session) => session.trigger,
            None => return,
        };
        self.hide_with(false);

        let delegate = Arc::clone(&self.delegate);
        tokio::spawn(async move {
            delegate
                .on_select_code_action(selection.action, trigger, selection.preview)
                .await;
        });
    }

    /// Draw the popup anchored inside `area` and remember the hit-test
    /// rectangles for mouse routing
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let resolver = Arc::clone(&self.resolver);
        let theme = self.theme.clone();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let rows_height = total_height(session.list.rows());
        let bar_height = session
            .action_bar
            .as_ref()
            .map(ActionBar::height)
            .unwrap_or(0);
        let popup_area = session
            .layout
            .popup_rect(&session.anchor, rows_height + bar_height, area);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .style(theme.popup);
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let list_height = rows_height.min(inner.height.saturating_sub(bar_height));
        let list_area = Rect::new(inner.x, inner.y, inner.width, list_height);

        let focused = session.list.focused_index();
        let items: Vec<ListItem> = session
            .list
            .rows()
            .iter()
            .enumerate()
            .map(|(index, display_row)| {
                let shortcut = display_row
                    .action()
                    .and_then(|action| resolver.resolve(action));
                render_row(
                    display_row,
                    shortcut.as_ref(),
                    Some(index) == focused,
                    inner.width,
                    &theme,
                )
            })
            .collect();
        frame.render_widget(List::new(items), list_area);

        let bar_area = session.action_bar.as_ref().map(|bar| {
            Rect::new(
                inner.x,
                list_area.y + list_area.height,
                inner.width,
                bar.height().min(inner.height.saturating_sub(list_height)),
            )
        });
        if let (Some(bar), Some(bar_rect)) = (session.action_bar.as_ref(), bar_area) {
            if bar_rect.height > 0 {
                frame.render_widget(
                    Paragraph::new(bar.render_line(&theme)).style(theme.action_bar),
                    bar_rect,
                );
            }
        }

        session.popup_area = popup_area;
        session.list_area = list_area;
        session.bar_area = bar_area;
    }
}
