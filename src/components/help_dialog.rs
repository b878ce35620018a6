//! Help dialog component
//!
//! Lists every keyboard shortcut.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("l / →", "Next column"),
            ("h / ←", "Previous column"),
            ("g / G", "First / last row"),
            ("PgUp/PgDn", "Page up / down"),
        ],
    ),
    (
        "Data",
        &[
            ("s", "Choose data source"),
            ("r", "Reload current source"),
            ("e", "Export matching rows"),
            ("E", "Export all rows"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Search visible columns"),
            ("Esc / Enter", "Leave search box"),
            ("Ctrl+u", "Clear search (in search box)"),
            ("Esc", "Clear search (in grid)"),
        ],
    ),
    (
        "Columns",
        &[
            ("c", "Show / hide columns"),
            ("+ / -", "Widen / narrow selected column"),
            ("=", "Fit selected column to content"),
            ("A", "Fit all visible columns"),
        ],
    ),
    (
        "General",
        &[
            ("t", "Toggle dark / light theme"),
            ("?", "Show this help"),
            ("q", "Quit"),
            ("Ctrl+c", "Quit immediately"),
        ],
    ),
];

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    /// Mirrors the modal's scroll offset
    pub scroll_offset: usize,
    pub palette: Palette,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ModalDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ModalUp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        frame.render_widget(Clear, area);

        let dialog_area = area.inner(Margin {
            vertical: 2,
            horizontal: 4,
        });

        let content = build_help_content(&self.palette);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        let scroll = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(self.palette.title())
                    .border_style(Style::default().fg(self.palette.accent)),
            )
            .scroll((scroll as u16, 0));
        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            palette.key_hint(),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            palette.dim(),
        )));
        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:14}", key), palette.title()),
                Span::styled(description.to_string(), palette.text()),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        palette.dim(),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_section() {
        let lines = build_help_content(&Palette::dark());
        let text: String = lines.iter().map(|l| l.to_string()).collect::<Vec<_>>().join("\n");
        for (title, shortcuts) in SECTIONS {
            assert!(text.contains(title));
            for (_, description) in shortcuts.iter() {
                assert!(text.contains(description));
            }
        }
    }
}
