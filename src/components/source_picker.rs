//! Data source picker dialog
//!
//! Lists the configured sources below a "no source" entry. The cursor
//! position lives in the modal stack; the dialog mirrors it for drawing.

use crate::action::Action;
use crate::component::Component;
use crate::components::theme::Palette;
use crate::model::source::DataSource;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Label of the entry that clears the selection
pub const NO_SOURCE_LABEL: &str = "-- Choose a CSV file --";

#[derive(Default)]
pub struct SourcePickerDialog {
    pub sources: Vec<DataSource>,
    /// Id of the source currently selected in the viewer
    pub current: Option<String>,
    pub selected_index: usize,
    list_state: ListState,
    pub palette: Palette,
}

impl SourcePickerDialog {
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self {
            sources,
            ..Self::default()
        }
    }

    /// Entry count including the "no source" entry
    pub fn len(&self) -> usize {
        self.sources.len() + 1
    }

    /// Cursor position that points at `current`, or the "no source" entry
    pub fn index_of_current(&self) -> usize {
        self.current
            .as_deref()
            .and_then(|id| self.sources.iter().position(|s| s.id == id))
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    /// Source under the cursor (None means clear the selection)
    pub fn selected_source(&self) -> Option<&DataSource> {
        if self.selected_index == 0 {
            None
        } else {
            self.sources.get(self.selected_index - 1)
        }
    }
}

impl Component for SourcePickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Enter => match self.selected_source() {
                Some(source) => Some(Action::SelectSource(source.id.clone())),
                None => Some(Action::ClearSource),
            },
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ModalUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ModalDown),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let palette = self.palette;
        frame.render_widget(Clear, area);

        let popup_width = 60u16.min(area.width.saturating_sub(4));
        let popup_height = u16::try_from(self.len())
            .unwrap_or(u16::MAX)
            .saturating_add(8)
            .min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
        let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
        let popup_area = Rect::new(x, y, popup_width, popup_height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(3),    // Source list
                Constraint::Length(3), // Help bar
            ])
            .split(popup_area);

        let header_text = match self.current.as_deref() {
            Some(id) => format!("Current: {}", id),
            None => "No source selected".to_string(),
        };
        let header = Paragraph::new(Line::from(Span::styled(
            header_text,
            Style::default().fg(palette.accent),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Data Source ")
                .title_style(palette.title()),
        );
        frame.render_widget(header, chunks[0]);

        let marker = |is_current: bool| {
            Span::styled(
                if is_current { "● " } else { "  " },
                Style::default().fg(palette.success),
            )
        };

        let mut items = vec![ListItem::new(Line::from(vec![
            marker(self.current.is_none()),
            Span::styled(NO_SOURCE_LABEL, palette.dim()),
        ]))];
        for source in &self.sources {
            let is_current = self.current.as_deref() == Some(source.id.as_str());
            let style = if is_current {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                palette.text()
            };
            items.push(ListItem::new(Line::from(vec![
                marker(is_current),
                Span::styled(source.name.clone(), style),
            ])));
        }

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

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Enter ", palette.key_hint()),
            Span::raw("Select  "),
            Span::styled(" j/k ", Style::default().fg(palette.accent)),
            Span::raw("Navigate  "),
            Span::styled(" Esc ", palette.key_hint()),
            Span::raw("Cancel"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}
