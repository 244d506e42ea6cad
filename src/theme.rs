/// Visual styling for the menu popup
///
/// Themes are plain data so hosts can ship their own as TOML files; the
/// presets mirror the application-wide professional dark/light pair plus a
/// high-contrast variant.

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse theme file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize theme: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuTheme {
    pub name: String,
    /// Popup body background
    pub popup: Style,
    pub border: Style,
    /// Category header rows
    pub header: Style,
    pub action: Style,
    pub action_focused: Style,
    pub action_disabled: Style,
    /// Keybinding label on the right edge of an action row
    pub shortcut: Style,
    /// Marker glyph for preferred actions
    pub preferred: Style,
    pub action_bar: Style,
}

impl MenuTheme {
    pub fn professional_dark() -> Self {
        Self {
            name: "Professional Dark".to_string(),
            popup: Style::default().bg(Color::Rgb(30, 34, 42)),
            border: Style::default().fg(Color::Rgb(97, 175, 239)),
            header: Style::default()
                .fg(Color::Rgb(130, 137, 151))
                .add_modifier(Modifier::BOLD),
            action: Style::default().fg(Color::Rgb(220, 223, 228)),
            action_focused: Style::default()
                .fg(Color::Rgb(30, 34, 42))
                .bg(Color::Rgb(97, 175, 239))
                .add_modifier(Modifier::BOLD),
            action_disabled: Style::default()
                .fg(Color::Rgb(92, 99, 112))
                .add_modifier(Modifier::DIM),
            shortcut: Style::default().fg(Color::Rgb(130, 137, 151)),
            preferred: Style::default().fg(Color::Rgb(229, 192, 123)),
            action_bar: Style::default()
                .fg(Color::Rgb(130, 137, 151))
                .bg(Color::Rgb(40, 44, 52)),
        }
    }

    pub fn professional_light() -> Self {
        Self {
            name: "Professional Light".to_string(),
            popup: Style::default().bg(Color::Rgb(250, 250, 250)),
            border: Style::default().fg(Color::Rgb(1, 102, 204)),
            header: Style::default()
                .fg(Color::Rgb(110, 110, 110))
                .add_modifier(Modifier::BOLD),
            action: Style::default().fg(Color::Rgb(36, 41, 46)),
            action_focused: Style::default()
                .fg(Color::Rgb(250, 250, 250))
                .bg(Color::Rgb(1, 102, 204))
                .add_modifier(Modifier::BOLD),
            action_disabled: Style::default()
                .fg(Color::Rgb(170, 170, 170))
                .add_modifier(Modifier::DIM),
            shortcut: Style::default().fg(Color::Rgb(110, 110, 110)),
            preferred: Style::default().fg(Color::Rgb(176, 136, 0)),
            action_bar: Style::default()
                .fg(Color::Rgb(110, 110, 110))
                .bg(Color::Rgb(240, 240, 240)),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            name: "High Contrast".to_string(),
            popup: Style::default().bg(Color::Black),
            border: Style::default().fg(Color::White),
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            action: Style::default().fg(Color::White),
            action_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
            action_disabled: Style::default().fg(Color::DarkGray),
            shortcut: Style::default().fg(Color::Cyan),
            preferred: Style::default().fg(Color::Yellow),
            action_bar: Style::default().fg(Color::White).bg(Color::DarkGray),
        }
    }

    /// Load a user-supplied theme from a TOML file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the theme out as TOML
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ThemeError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for MenuTheme {
    fn default() -> Self {
        Self::professional_dark()
    }
}
