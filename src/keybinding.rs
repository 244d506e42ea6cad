use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::{ActionKind, CodeAction};

/// Represents a keyboard shortcut with key and modifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyboardShortcut {
    /// Create a new keyboard shortcut with the specified key and modifiers
    pub fn new(key: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a simple key shortcut without modifiers
    pub fn simple(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Create a Ctrl+key shortcut
    pub fn ctrl(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::CONTROL)
    }

    /// Create an Alt+key shortcut
    pub fn alt(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::ALT)
    }

    /// Create a Shift+key shortcut
    pub fn shift(key: KeyCode) -> Self {
        Self::new(key, KeyModifiers::SHIFT)
    }

    /// Whether an incoming key event triggers this shortcut
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == self.key && event.modifiers == self.modifiers
    }
}

impl std::fmt::Display for KeyboardShortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            parts.push("Shift");
        }

        let key_str = match self.key {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_uppercase().to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            _ => format!("{:?}", self.key),
        };

        if parts.is_empty() {
            write!(f, "{}", key_str)
        } else {
            write!(f, "{}+{}", parts.join("+"), key_str)
        }
    }
}

/// Host-provided keybinding lookup for candidate actions.
///
/// Returning `None` simply hides the shortcut label for that item.
pub trait KeybindingResolver: Send + Sync {
    fn resolve(&self, action: &CodeAction) -> Option<KeyboardShortcut>;
}

/// Resolver that never finds a binding
pub struct NoKeybindings;

impl KeybindingResolver for NoKeybindings {
    fn resolve(&self, _action: &CodeAction) -> Option<KeyboardShortcut> {
        None
    }
}

/// Table-driven resolver binding shortcuts to action kinds.
///
/// An action resolves to the most specific bound kind that contains its own
/// kind, so a binding for `refactor.extract` beats one for `refactor`.
pub struct KindKeybindingResolver {
    bindings: Vec<(ActionKind, KeyboardShortcut)>,
}

impl KindKeybindingResolver {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    pub fn bind(mut self, kind: impl Into<ActionKind>, shortcut: KeyboardShortcut) -> Self {
        self.bindings.push((kind.into(), shortcut));
        self
    }
}

impl Default for KindKeybindingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingResolver for KindKeybindingResolver {
    fn resolve(&self, action: &CodeAction) -> Option<KeyboardShortcut> {
        self.bindings
            .iter()
            .filter(|(kind, _)| kind.contains(&action.kind))
            .max_by_key(|(kind, _)| kind.as_str().len())
            .map(|(_, shortcut)| shortcut.clone())
    }
}
