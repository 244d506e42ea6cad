pub mod action;
pub mod categories;
pub mod grouping;
pub mod keybinding;
pub mod telemetry;
pub mod theme;
pub mod ui;

pub use action::{ActionKind, CodeAction, CodeActionSet, Command, MenuTrigger, TriggerSource};
pub use grouping::{build_rows, DisplayRow};
pub use keybinding::{KeybindingResolver, KeyboardShortcut, KindKeybindingResolver, NoKeybindings};
pub use telemetry::{MenuOutcome, NullTelemetry, TelemetrySink, TracingTelemetry};
pub use theme::MenuTheme;
pub use ui::{Anchor, CodeActionMenu, CommandExecutor, MenuDelegate, ShowOptions};
