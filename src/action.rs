/// Core data types for the code action menu
///
/// Candidate actions are produced by an upstream analysis (language server,
/// linter, refactoring provider) and handed to the menu as an immutable set.

/// Hierarchical, dot-segmented kind tag classifying an action
/// (e.g. `refactor.extract.function`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ActionKind(String);

impl ActionKind {
    pub fn new(value: impl Into<String>) -> Self {
        ActionKind(value.into())
    }

    /// The empty kind; as a matcher it accepts every kind
    pub fn empty() -> Self {
        ActionKind(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `other` is this kind or a dot-delimited descendant of it.
    ///
    /// `refactor.extract` contains `refactor.extract` and
    /// `refactor.extract.function`, but not `refactor.extraction`.
    pub fn contains(&self, other: &ActionKind) -> bool {
        if self.0.is_empty() {
            return true;
        }
        if other.0 == self.0 {
            return true;
        }
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0.as_bytes()[self.0.len()] == b'.'
    }
}

impl From<&str> for ActionKind {
    fn from(value: &str) -> Self {
        ActionKind::new(value)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A host command, executed through the injected `CommandExecutor`
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub id: String,
    pub title: String,
}

impl Command {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// A single proposed fix or refactoring
#[derive(Debug, Clone, PartialEq)]
pub struct CodeAction {
    pub title: String,
    pub kind: ActionKind,
    /// Reason the action cannot currently be applied; `Some` means the action
    /// renders greyed out and is not selectable
    pub disabled_reason: Option<String>,
    pub is_preferred: bool,
    pub command: Option<Command>,
}

impl CodeAction {
    pub fn new(title: impl Into<String>, kind: impl Into<ActionKind>) -> Self {
        Self {
            title: title.into(),
            kind: kind.into(),
            disabled_reason: None,
            is_preferred: false,
            command: None,
        }
    }

    /// Mark the action as disabled with the reason shown to the user
    pub fn disabled(mut self, reason: impl Into<String>) -> Self {
        self.disabled_reason = Some(reason.into());
        self
    }

    pub fn preferred(mut self) -> Self {
        self.is_preferred = true;
        self
    }

    pub fn with_command(mut self, command: Command) -> Self {
        self.command = Some(command);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.disabled_reason.is_none()
    }
}

/// The full candidate set produced by the upstream analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeActionSet {
    /// Actions that can currently be applied
    pub valid_actions: Vec<CodeAction>,
    /// Every candidate, including disabled ones
    pub all_actions: Vec<CodeAction>,
    /// Documentation commands attached to the set, shown in the action bar
    pub documentation: Vec<Command>,
}

impl CodeActionSet {
    /// Split a flat candidate list into the valid/all views
    pub fn from_actions(all_actions: Vec<CodeAction>, documentation: Vec<Command>) -> Self {
        let valid_actions = all_actions
            .iter()
            .filter(|action| action.is_enabled())
            .cloned()
            .collect();
        Self {
            valid_actions,
            all_actions,
            documentation,
        }
    }

    /// True when the set holds both enabled and disabled actions
    pub fn has_mixed_enablement(&self) -> bool {
        !self.valid_actions.is_empty() && self.valid_actions.len() < self.all_actions.len()
    }
}

/// What kind of gesture opened the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Keyboard,
    Mouse,
    Lightbulb,
}

impl TriggerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Keyboard => "keyboard",
            TriggerSource::Mouse => "mouse",
            TriggerSource::Lightbulb => "lightbulb",
        }
    }
}

/// Context describing the gesture that opened the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTrigger {
    pub source: TriggerSource,
}

impl MenuTrigger {
    pub fn new(source: TriggerSource) -> Self {
        Self { source }
    }
}
