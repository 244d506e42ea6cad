use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};

use code_action_menu::{
    Anchor, CodeAction, CodeActionMenu, CodeActionSet, Command, CommandExecutor,
    KeyboardShortcut, KindKeybindingResolver, MenuDelegate, MenuTheme, MenuTrigger, ShowOptions,
    TracingTelemetry, TriggerSource,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeChoice {
    Dark,
    Light,
    HighContrast,
}

/// Interactive demo for the code action menu widget
#[derive(Parser)]
#[command(name = "code-action-menu")]
struct Cli {
    /// Built-in theme to use
    #[arg(long, value_enum, default_value = "dark")]
    theme: ThemeChoice,

    /// Load a custom theme from a TOML file (overrides --theme)
    #[arg(long)]
    theme_file: Option<PathBuf>,
}

struct DemoDelegate {
    last_applied: Arc<Mutex<Option<String>>>,
}

#[async_trait]
impl MenuDelegate for DemoDelegate {
    async fn on_select_code_action(&self, action: CodeAction, trigger: MenuTrigger, preview: bool) {
        tracing::info!(
            title = %action.title,
            source = trigger.source.as_str(),
            preview,
            "applying code action"
        );
        let verb = if preview { "Previewed" } else { "Applied" };
        *self.last_applied.lock().unwrap() = Some(format!("{}: {}", verb, action.title));
    }

    fn on_hide(&self, cancelled: bool) {
        tracing::debug!(cancelled, "menu hidden");
    }
}

struct DemoExecutor;

#[async_trait]
impl CommandExecutor for DemoExecutor {
    async fn execute(&self, command: &Command) -> Result<()> {
        tracing::info!(id = %command.id, "running documentation command");
        Ok(())
    }
}

fn sample_actions() -> CodeActionSet {
    CodeActionSet::from_actions(
        vec![
            CodeAction::new("Fix spelling of 'receive'", "quickfix").preferred(),
            CodeAction::new("Extract to function", "refactor.extract"),
            CodeAction::new("Extract to constant", "refactor.extract")
                .disabled("selection is not an expression"),
            CodeAction::new("Inline variable", "refactor.inline"),
            CodeAction::new("Convert to template string", "refactor.rewrite"),
            CodeAction::new("Move to new file", "refactor.move")
                .disabled("file contains a single declaration"),
            CodeAction::new("Surround with try/catch", "refactor.surround"),
            CodeAction::new("Organize imports", "source.organizeImports"),
        ],
        vec![Command::new(
            "docs.refactorings",
            "Learn about refactorings",
        )],
    )
}

fn sample_resolver() -> KindKeybindingResolver {
    KindKeybindingResolver::new()
        .bind("quickfix", KeyboardShortcut::ctrl(KeyCode::Char('.')))
        .bind(
            "refactor.extract",
            KeyboardShortcut::ctrl(KeyCode::Char('e')),
        )
        .bind(
            "source.organizeImports",
            KeyboardShortcut::alt(KeyCode::Char('o')),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let theme = match &cli.theme_file {
        Some(path) => MenuTheme::load_from_file(path)?,
        None => match cli.theme {
            ThemeChoice::Dark => MenuTheme::professional_dark(),
            ThemeChoice::Light => MenuTheme::professional_light(),
            ThemeChoice::HighContrast => MenuTheme::high_contrast(),
        },
    };

    if !io::stdout().is_tty() {
        return Err(anyhow::anyhow!(
            "the demo requires a proper terminal (TTY) to run"
        ));
    }

    let last_applied = Arc::new(Mutex::new(None));
    let delegate = Arc::new(DemoDelegate {
        last_applied: Arc::clone(&last_applied),
    });
    let mut menu = CodeActionMenu::new(
        delegate,
        Arc::new(sample_resolver()),
        Arc::new(DemoExecutor),
        Arc::new(TracingTelemetry),
    )
    .with_theme(theme);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut menu, &last_applied).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    menu: &mut CodeActionMenu,
    last_applied: &Arc<Mutex<Option<String>>>,
) -> Result<()> {
    let actions = sample_actions();
    let tick_rate = Duration::from_millis(50);

    loop {
        terminal.draw(|frame| draw(frame, menu, last_applied))?;

        if !event::poll(tick_rate)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if menu.handle_key(&key) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Char('a') => {
                        menu.show(
                            MenuTrigger::new(TriggerSource::Keyboard),
                            &actions,
                            Anchor::Point { x: 10, y: 4 },
                            ShowOptions {
                                include_disabled: true,
                                ..ShowOptions::default()
                            },
                        );
                    }
                    KeyCode::Char('b') => {
                        // Lightbulb-style invocation: no action bar, flat list
                        menu.show(
                            MenuTrigger::new(TriggerSource::Lightbulb),
                            &actions,
                            Anchor::Point { x: 10, y: 4 },
                            ShowOptions {
                                from_lightbulb: true,
                                show_headers: false,
                                ..ShowOptions::default()
                            },
                        );
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => {
                if !menu.handle_mouse(&mouse) {
                    if let event::MouseEventKind::Down(event::MouseButton::Right) = mouse.kind {
                        menu.show(
                            MenuTrigger::new(TriggerSource::Mouse),
                            &actions,
                            Anchor::Point {
                                x: mouse.column,
                                y: mouse.row,
                            },
                            ShowOptions {
                                include_disabled: true,
                                ..ShowOptions::default()
                            },
                        );
                    }
                }
            }
            Event::FocusLost => menu.handle_focus_lost(),
            _ => {}
        }
    }
    Ok(())
}

fn draw(frame: &mut Frame, menu: &mut CodeActionMenu, last_applied: &Arc<Mutex<Option<String>>>) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    draw_editor(frame, chunks[0]);
    draw_status(frame, chunks[1], menu, last_applied);
    menu.render(frame, area);
}

fn draw_editor(frame: &mut Frame, area: Rect) {
    let code = vec![
        Line::from("fn main() {"),
        Line::from("    let message = recieve_message();"),
        Line::from("    println!(\"{}\", message);"),
        Line::from("}"),
        Line::from(""),
        Line::from(Span::styled(
            "press 'a' for code actions, 'b' for the lightbulb view,",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "right-click anywhere to open the menu there, 'q' to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(code), area);
}

fn draw_status(
    frame: &mut Frame,
    area: Rect,
    menu: &CodeActionMenu,
    last_applied: &Arc<Mutex<Option<String>>>,
) {
    let status = match last_applied.lock().unwrap().clone() {
        Some(text) => text,
        None => format!(
            "{} applies, {} previews, Esc dismisses",
            menu.accept_binding(),
            menu.preview_binding()
        ),
    };
    let line = Line::from(Span::styled(
        status,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ));
    frame.render_widget(Paragraph::new(line), area);
}
