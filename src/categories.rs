/// Fixed, ordered registry of action categories
///
/// Grouping headers appear in this order. Matching is first-match-wins
/// against an action's kind; the trailing catch-all category has the empty
/// matcher and therefore accepts every kind.

use once_cell::sync::Lazy;

use crate::action::{ActionKind, CodeAction};

/// A named grouping bucket for actions sharing a kind-hierarchy prefix
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCategory {
    pub matcher: ActionKind,
    pub title: &'static str,
    pub icon: Option<&'static str>,
}

impl ActionCategory {
    fn new(matcher: &'static str, title: &'static str, icon: Option<&'static str>) -> Self {
        Self {
            matcher: ActionKind::new(matcher),
            title,
            icon,
        }
    }

    pub fn matches(&self, action: &CodeAction) -> bool {
        self.matcher.contains(&action.kind)
    }
}

static REGISTRY: Lazy<Vec<ActionCategory>> = Lazy::new(|| {
    vec![
        ActionCategory::new("quickfix", "Quick Fix", Some("💡")),
        ActionCategory::new("refactor.extract", "Extract", Some("🔧")),
        ActionCategory::new("refactor.inline", "Inline", Some("🔧")),
        ActionCategory::new("refactor.rewrite", "Rewrite", Some("🔧")),
        ActionCategory::new("refactor.move", "Move", Some("🔧")),
        ActionCategory::new("refactor.surround", "Surround With", Some("🧩")),
        ActionCategory::new("source", "Source Action", Some("📄")),
        // Catch-all stays last; the empty matcher accepts everything
        ActionCategory::new("", "More Actions...", None),
    ]
});

/// All categories in display order, catch-all last
pub fn registry() -> &'static [ActionCategory] {
    &REGISTRY
}

/// The category an unmatched action falls into
pub fn catch_all() -> &'static ActionCategory {
    REGISTRY.last().unwrap()
}

/// Map an action to the first category whose matcher accepts its kind
pub fn categorize(action: &CodeAction) -> &'static ActionCategory {
    registry()
        .iter()
        .find(|category| category.matches(action))
        .unwrap_or_else(catch_all)
}
