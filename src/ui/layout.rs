/// Popup sizing and placement
///
/// Width is settled in two explicit passes: `measure` records the widest
/// natural row width at a relaxed constraint, `commit` folds in the action
/// bar and the minimum width. Placement anchors the popup below the trigger
/// point and clamps it into the viewport.

use ratatui::layout::Rect;

/// Where the menu is anchored: a point (cursor) or a rectangle (a word or
/// line span in the host view)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Point { x: u16, y: u16 },
    Rect(Rect),
}

impl Anchor {
    /// Top-left corner the popup opens from: the point itself, or just
    /// below the anchored rectangle
    pub fn origin(&self) -> (u16, u16) {
        match self {
            Anchor::Point { x, y } => (*x, *y),
            Anchor::Rect(rect) => (rect.x, rect.y.saturating_add(rect.height)),
        }
    }
}

pub const MIN_MENU_WIDTH: u16 = 24;

#[derive(Debug, Clone)]
pub struct MenuLayout {
    min_width: u16,
    measured_width: u16,
    committed_width: u16,
}

impl MenuLayout {
    pub fn new() -> Self {
        Self::with_min_width(MIN_MENU_WIDTH)
    }

    pub fn with_min_width(min_width: u16) -> Self {
        Self {
            min_width,
            measured_width: min_width,
            committed_width: min_width,
        }
    }

    /// First pass: record the widest natural row width
    pub fn measure(&mut self, natural_widths: impl Iterator<Item = u16>) -> u16 {
        self.measured_width = natural_widths.fold(self.min_width, |acc, width| acc.max(width));
        self.measured_width
    }

    /// Second pass: settle the final content width
    pub fn commit(&mut self, action_bar_width: u16) -> u16 {
        self.committed_width = self
            .measured_width
            .max(action_bar_width)
            .max(self.min_width);
        self.committed_width
    }

    pub fn content_width(&self) -> u16 {
        self.committed_width
    }

    /// Outer popup rectangle (content plus borders) placed at the anchor and
    /// clamped into the viewport
    pub fn popup_rect(&self, anchor: &Anchor, content_height: u16, area: Rect) -> Rect {
        let width = (self.committed_width + 2).min(area.width);
        let height = (content_height + 2).min(area.height);

        let (mut x, mut y) = anchor.origin();
        if x + width > area.x + area.width {
            x = (area.x + area.width).saturating_sub(width);
        }
        if y + height > area.y + area.height {
            y = (area.y + area.height).saturating_sub(height);
        }

        Rect::new(x.max(area.x), y.max(area.y), width, height)
    }
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_takes_widest_row() {
        let mut layout = MenuLayout::new();
        assert_eq!(layout.measure([10, 42, 17].into_iter()), 42);
        assert_eq!(layout.commit(0), 42);
    }

    #[test]
    fn test_minimum_width_floor() {
        let mut layout = MenuLayout::new();
        layout.measure([3, 5].into_iter());
        assert_eq!(layout.commit(0), MIN_MENU_WIDTH);
    }

    #[test]
    fn test_action_bar_can_widen_menu() {
        let mut layout = MenuLayout::new();
        layout.measure([30].into_iter());
        assert_eq!(layout.commit(48), 48);
    }

    #[test]
    fn test_popup_rect_clamps_to_viewport() {
        let mut layout = MenuLayout::new();
        layout.measure([30].into_iter());
        layout.commit(0);

        let area = Rect::new(0, 0, 80, 24);
        let anchor = Anchor::Point { x: 70, y: 20 };
        let rect = layout.popup_rect(&anchor, 10, area);
        assert!(rect.x + rect.width <= 80);
        assert!(rect.y + rect.height <= 24);
    }

    #[test]
    fn test_rect_anchor_opens_below() {
        let layout = MenuLayout::new();
        let area = Rect::new(0, 0, 80, 24);
        let anchor = Anchor::Rect(Rect::new(4, 2, 10, 1));
        let rect = layout.popup_rect(&anchor, 5, area);
        assert_eq!((rect.x, rect.y), (4, 3));
    }
}
