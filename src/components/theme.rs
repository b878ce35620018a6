//! Colour palettes for the dark and light themes

use crate::model::ui::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Colours used across components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub selected_row_bg: Color,
    pub selected_cell_bg: Color,
    pub selected_fg: Color,
    pub key: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
            border: Color::DarkGray,
            header_fg: Color::Cyan,
            header_bg: Color::Reset,
            selected_row_bg: Color::Rgb(40, 44, 52),
            selected_cell_bg: Color::Blue,
            selected_fg: Color::White,
            key: Color::Yellow,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
            border: Color::Gray,
            header_fg: Color::Blue,
            header_bg: Color::Rgb(230, 230, 230),
            selected_row_bg: Color::Rgb(220, 230, 245),
            selected_cell_bg: Color::LightBlue,
            selected_fg: Color::Black,
            key: Color::Magenta,
            success: Color::Green,
            warning: Color::Rgb(180, 110, 0),
            error: Color::Red,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.fg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.key).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        assert_ne!(Palette::for_mode(ThemeMode::Dark), Palette::for_mode(ThemeMode::Light));
        assert_eq!(Palette::default(), Palette::dark());
    }
}
