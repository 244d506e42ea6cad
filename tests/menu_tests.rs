use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, Terminal};

use code_action_menu::{
    Anchor, CodeAction, CodeActionMenu, CodeActionSet, Command, CommandExecutor, DisplayRow,
    KeyboardShortcut, MenuDelegate, MenuOutcome, MenuTrigger, NoKeybindings, ShowOptions,
    TelemetrySink, TriggerSource,
};

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<String>>,
}

impl Recorder {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

struct RecordingDelegate {
    recorder: Arc<Recorder>,
}

#[async_trait]
impl MenuDelegate for RecordingDelegate {
    async fn on_select_code_action(&self, action: CodeAction, _trigger: MenuTrigger, preview: bool) {
        self.recorder
            .push(format!("select:{}:{}", action.title, preview));
    }

    fn on_hide(&self, cancelled: bool) {
        self.recorder.push(format!("hide:{}", cancelled));
    }
}

#[derive(Default)]
struct RecordingSink {
    outcomes: Mutex<Vec<MenuOutcome>>,
}

impl RecordingSink {
    fn outcomes(&self) -> Vec<MenuOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl TelemetrySink for RecordingSink {
    fn record(&self, outcome: &MenuOutcome) {
        self.outcomes.lock().unwrap().push(outcome.clone());
    }
}

struct NullExecutor;

#[async_trait]
impl CommandExecutor for NullExecutor {
    async fn execute(&self, _command: &Command) -> anyhow::Result<()> {
        Ok(())
    }
}

fn new_menu() -> (CodeActionMenu, Arc<Recorder>, Arc<RecordingSink>) {
    let recorder = Arc::new(Recorder::default());
    let sink = Arc::new(RecordingSink::default());
    let menu = CodeActionMenu::new(
        Arc::new(RecordingDelegate {
            recorder: Arc::clone(&recorder),
        }),
        Arc::new(NoKeybindings),
        Arc::new(NullExecutor),
        sink.clone(),
    );
    (menu, recorder, sink)
}

fn mixed_set() -> CodeActionSet {
    CodeActionSet::from_actions(
        vec![
            CodeAction::new("Fix typo", "quickfix"),
            CodeAction::new("Broken fix", "quickfix").disabled("unavailable"),
            CodeAction::new("Extract", "refactor.extract"),
        ],
        Vec::new(),
    )
}

fn trigger() -> MenuTrigger {
    MenuTrigger::new(TriggerSource::Keyboard)
}

fn anchor() -> Anchor {
    Anchor::Point { x: 0, y: 0 }
}

fn action_count(menu: &CodeActionMenu) -> usize {
    menu.rows()
        .map(|rows| {
            rows.iter()
                .filter(|row| matches!(row, DisplayRow::Action { .. }))
                .count()
        })
        .unwrap_or(0)
}

async fn drain_spawned() {
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

#[test]
fn show_is_a_noop_without_displayable_actions() {
    let (mut menu, recorder, sink) = new_menu();
    let set = CodeActionSet::from_actions(
        vec![CodeAction::new("Broken", "quickfix").disabled("no")],
        Vec::new(),
    );

    // include_disabled=false always filters down to valid actions
    let shown = menu.show(trigger(), &set, anchor(), ShowOptions::default());
    assert!(!shown);
    assert!(!menu.is_visible());

    // nothing was shown, so nothing is dismissed and no event fires
    menu.hide();
    assert!(sink.outcomes().is_empty());
    assert!(recorder.events().is_empty());
}

#[test]
fn all_disabled_set_shows_when_inclusion_is_requested() {
    let (mut menu, _recorder, _sink) = new_menu();
    let set = CodeActionSet::from_actions(
        vec![
            CodeAction::new("Broken a", "quickfix").disabled("no"),
            CodeAction::new("Broken b", "refactor.extract").disabled("no"),
        ],
        Vec::new(),
    );

    let shown = menu.show(
        trigger(),
        &set,
        anchor(),
        ShowOptions {
            include_disabled: true,
            ..ShowOptions::default()
        },
    );
    assert!(shown);
    assert!(menu.is_visible());
    assert_eq!(action_count(&menu), 2);
    // no focusable row exists, so nothing is focused
    assert_eq!(menu.focused_index(), None);
}

#[test]
fn accept_without_focusable_rows_is_a_noop() {
    let (mut menu, recorder, sink) = new_menu();
    let set = CodeActionSet::from_actions(
        vec![CodeAction::new("Broken", "quickfix").disabled("no")],
        Vec::new(),
    );
    menu.show(
        trigger(),
        &set,
        anchor(),
        ShowOptions {
            include_disabled: true,
            ..ShowOptions::default()
        },
    );

    menu.accept_focused(false);
    assert!(menu.is_visible());
    assert!(sink.outcomes().is_empty());
    assert!(recorder.events().is_empty());
}

#[test]
fn disabled_actions_stay_hidden_until_toggled() {
    let (mut menu, _recorder, sink) = new_menu();
    let options = ShowOptions {
        include_disabled: true,
        ..ShowOptions::default()
    };

    menu.show(trigger(), &mixed_set(), anchor(), options);
    // valid actions exist and the toggle is off: disabled stay hidden
    assert_eq!(action_count(&menu), 2);

    menu.toggle_show_disabled(true);
    assert!(menu.is_visible());
    assert_eq!(action_count(&menu), 3);

    // the implicit hide of the continuing session is not a cancellation
    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].cancelled);

    // the toggle survives sessions within this instance
    menu.hide();
    menu.show(trigger(), &mixed_set(), anchor(), options);
    assert_eq!(action_count(&menu), 3);
}

#[test]
fn reshowing_fully_dismisses_the_previous_session() {
    let (mut menu, _recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    assert!(menu.is_visible());
    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].cancelled);
}

#[test]
fn identical_shows_build_identical_rows() {
    let (mut menu, _recorder, _sink) = new_menu();
    let set = mixed_set();

    menu.show(trigger(), &set, anchor(), ShowOptions::default());
    let first: Vec<DisplayRow> = menu.rows().unwrap().to_vec();
    menu.hide();

    menu.show(trigger(), &set, anchor(), ShowOptions::default());
    let second: Vec<DisplayRow> = menu.rows().unwrap().to_vec();

    assert_eq!(first, second);
}

#[test]
fn escape_dismisses_as_cancelled() {
    let (mut menu, recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    let consumed = menu.handle_key(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    assert!(consumed);
    assert!(!menu.is_visible());

    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].cancelled);
    assert_eq!(outcomes[0].valid_actions, 2);
    assert_eq!(outcomes[0].source, TriggerSource::Keyboard);
    assert_eq!(recorder.events(), vec!["hide:true"]);
}

#[test]
fn outcome_is_recorded_exactly_once_per_session() {
    let (mut menu, _recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());
    menu.hide();
    menu.hide();
    menu.handle_focus_lost();

    assert_eq!(sink.outcomes().len(), 1);
}

#[test]
fn commands_are_noops_while_hidden() {
    let (mut menu, recorder, sink) = new_menu();

    menu.focus_next();
    menu.focus_previous();
    menu.accept_focused(false);
    menu.handle_focus_lost();
    let consumed = menu.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

    assert!(!consumed);
    assert!(recorder.events().is_empty());
    assert!(sink.outcomes().is_empty());
}

#[test]
fn keyboard_navigation_skips_disabled_rows_and_wraps() {
    let (mut menu, _recorder, _sink) = new_menu();
    let options = ShowOptions {
        include_disabled: true,
        ..ShowOptions::default()
    };

    menu.toggle_show_disabled(true);
    menu.show(trigger(), &mixed_set(), anchor(), options);
    // rows: header, Fix typo, Broken fix (disabled), header, Extract
    assert_eq!(menu.focused_index(), Some(1));

    menu.focus_next();
    assert_eq!(menu.focused_index(), Some(4));
    menu.focus_next();
    assert_eq!(menu.focused_index(), Some(1));
    menu.focus_previous();
    assert_eq!(menu.focused_index(), Some(4));
}

#[tokio::test]
async fn accepting_hides_first_then_fires_the_delegate() {
    let (mut menu, recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());
    assert_eq!(menu.focused_index(), Some(1));

    menu.accept_focused(false);
    assert!(!menu.is_visible());
    drain_spawned().await;

    assert_eq!(
        recorder.events(),
        vec!["hide:false", "select:Fix typo:false"]
    );
    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(!outcomes[0].cancelled);
}

#[tokio::test]
async fn preview_binding_requests_a_preview() {
    let (mut menu, recorder, _sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    let consumed = menu.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL));
    assert!(consumed);
    assert!(!menu.is_visible());
    drain_spawned().await;

    assert_eq!(
        recorder.events(),
        vec!["hide:false", "select:Fix typo:true"]
    );
}

#[tokio::test]
async fn custom_accept_binding_is_honored() {
    let (menu, recorder, _sink) = new_menu();
    let mut menu = menu.with_accept_binding(KeyboardShortcut::simple(KeyCode::Tab));
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    // Enter no longer accepts
    assert!(!menu.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    assert!(menu.is_visible());

    assert!(menu.handle_key(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
    drain_spawned().await;
    assert_eq!(
        recorder.events(),
        vec!["hide:false", "select:Fix typo:false"]
    );
}

#[tokio::test]
async fn mouse_click_applies_the_clicked_row() {
    let (mut menu, recorder, _sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.size();
            menu.render(frame, area);
        })
        .unwrap();

    // the first pointer event only lifts the input shield
    let moved = MouseEvent {
        kind: MouseEventKind::Moved,
        column: 2,
        row: 2,
        modifiers: KeyModifiers::NONE,
    };
    assert!(menu.handle_mouse(&moved));
    assert!(menu.is_visible());

    // rows: border at y=0, header at y=1, "Fix typo" at y=2
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 2,
        row: 2,
        modifiers: KeyModifiers::NONE,
    };
    assert!(menu.handle_mouse(&click));
    assert!(!menu.is_visible());
    drain_spawned().await;

    assert_eq!(
        recorder.events(),
        vec!["hide:false", "select:Fix typo:false"]
    );
}

#[test]
fn click_away_dismisses_as_cancelled() {
    let (mut menu, recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.size();
            menu.render(frame, area);
        })
        .unwrap();

    let moved = MouseEvent {
        kind: MouseEventKind::Moved,
        column: 60,
        row: 20,
        modifiers: KeyModifiers::NONE,
    };
    menu.handle_mouse(&moved);

    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 60,
        row: 20,
        modifiers: KeyModifiers::NONE,
    };
    // consumed even though it lands outside the popup
    assert!(menu.handle_mouse(&click));
    assert!(!menu.is_visible());

    let outcomes = sink.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].cancelled);
    assert_eq!(recorder.events(), vec!["hide:true"]);
}

#[test]
fn hovering_a_header_focuses_but_accept_stays_inert() {
    let (mut menu, recorder, sink) = new_menu();
    menu.show(trigger(), &mixed_set(), anchor(), ShowOptions::default());

    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.size();
            menu.render(frame, area);
        })
        .unwrap();

    // lift the shield, then hover the header row at y=1
    menu.handle_mouse(&MouseEvent {
        kind: MouseEventKind::Moved,
        column: 2,
        row: 3,
        modifiers: KeyModifiers::NONE,
    });
    menu.handle_mouse(&MouseEvent {
        kind: MouseEventKind::Moved,
        column: 2,
        row: 1,
        modifiers: KeyModifiers::NONE,
    });
    assert_eq!(menu.focused_index(), Some(0));

    menu.accept_focused(false);
    assert!(menu.is_visible());
    assert!(sink.outcomes().is_empty());
    assert!(recorder.events().is_empty());
}
