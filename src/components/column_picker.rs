//! Column visibility dialog
//!
//! A checklist of every schema column in schema order.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct ColumnPickerDialog {
    /// Column name and whether it is shown
    pub entries: Vec<(String, bool)>,
    pub selected_index: usize,
    list_state: ListState,
    pub palette: Palette,
}

impl ColumnPickerDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_entries(&mut self, entries: Vec<(String, bool)>) {
        self.entries = entries;
    }

    pub fn selected_column(&self) -> Option<&str> {
        self.entries
            .get(self.selected_index)
            .map(|(name, _)| name.as_str())
    }
}

impl Component for ColumnPickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char(' ') | KeyCode::Enter => self
                .selected_column()
                .map(|name| Action::ToggleColumn(name.to_string())),
            KeyCode::Char('a') => Some(Action::ShowAllColumns),
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let palette = self.palette;
        frame.render_widget(Clear, area);

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let content_height = if self.entries.is_empty() {
            3
        } else {
            u16::try_from(self.entries.len())
                .unwrap_or(u16::MAX)
                .saturating_add(2)
        };
        let popup_height = content_height
            .saturating_add(6)
            .min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        let shown = self.entries.iter().filter(|(_, visible)| *visible).count();
        let header = Paragraph::new(Line::from(Span::styled(
            format!("{} of {} shown", shown, self.entries.len()),
            Style::default().fg(palette.accent),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Columns ")
                .title_style(palette.title()),
        );
        frame.render_widget(header, chunks[0]);

        if self.entries.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No columns loaded",
                Style::default().fg(palette.warning),
            )))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border_style()),
            );
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|(name, visible)| {
                    let (checkbox, style) = if *visible {
                        ("[x] ", palette.text())
                    } else {
                        ("[ ] ", palette.dim())
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(checkbox, Style::default().fg(palette.success)),
                        Span::styled(name.clone(), style),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(palette.border_style()),
                )
                .highlight_style(
                    Style::default()
                        .bg(palette.selected_cell_bg)
                        .fg(palette.selected_fg)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            self.list_state.select(Some(self.selected_index));
            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Space ", palette.key_hint()),
            Span::raw("Toggle  "),
            Span::styled(" a ", palette.key_hint()),
            Span::raw("Show all  "),
            Span::styled(" Esc ", palette.key_hint()),
            Span::raw("Close"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(dialog: &mut ColumnPickerDialog, code: KeyCode) -> Option<Action> {
        dialog
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_space_toggles_column_under_cursor() {
        let mut dialog = ColumnPickerDialog::new();
        dialog.set_entries(vec![("Title".into(), true), ("Region".into(), false)]);
        dialog.selected_index = 1;

        assert_eq!(
            press(&mut dialog, KeyCode::Char(' ')),
            Some(Action::ToggleColumn("Region".into()))
        );
        assert_eq!(press(&mut dialog, KeyCode::Char('a')), Some(Action::ShowAllColumns));
    }

    #[test]
    fn test_toggle_without_columns_does_nothing() {
        let mut dialog = ColumnPickerDialog::new();
        assert_eq!(press(&mut dialog, KeyCode::Char(' ')), None);
        assert_eq!(press(&mut dialog, KeyCode::Esc), Some(Action::CloseModal));
    }

    #[test]
    fn test_draw_with_more_columns_than_rows_fit() {
        let mut dialog = ColumnPickerDialog::new();
        dialog.set_entries(
            (0..70_000)
                .map(|i| (format!("Column {}", i), i % 2 == 0))
                .collect(),
        );
        dialog.selected_index = 69_999;

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dialog.draw(frame, area).unwrap();
            })
            .unwrap();
    }
}
