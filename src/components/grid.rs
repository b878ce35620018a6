//! Data grid component
//!
//! Renders the visible columns of the filtered rows with a row cursor and a
//! column cursor. Widths come from the viewer's column state and are
//! converted from pixels to cells by [`CellMeasure`]. Columns that do not fit
//! are scrolled horizontally so the selected column is always in view.

use crate::action::Action;
use crate::component::Component;
use crate::components::measure::{truncate_to_width, CellMeasure};
use crate::components::theme::Palette;
use crate::model::row::cell;
use crate::model::viewer::{LoadState, Viewer};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Paragraph, Row as TableRow, Scrollbar, ScrollbarOrientation,
        ScrollbarState, Table,
    },
    Frame,
};
use std::ops::Range;

/// Grid cursor and scroll state
pub struct GridComponent {
    pub selected_row: usize,
    pub selected_column: usize,
    row_offset: usize,
    column_offset: usize,
    /// Data rows that fit on screen, as of the last draw
    viewport_height: usize,
    pub palette: Palette,
}

impl Default for GridComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl GridComponent {
    pub fn new() -> Self {
        Self {
            selected_row: 0,
            selected_column: 0,
            row_offset: 0,
            column_offset: 0,
            viewport_height: 20,
            palette: Palette::default(),
        }
    }

    /// Back to the top-left corner
    pub fn reset(&mut self) {
        self.selected_row = 0;
        self.selected_column = 0;
        self.row_offset = 0;
        self.column_offset = 0;
    }

    pub fn next_row(&mut self, total: usize) {
        if self.selected_row + 1 < total {
            self.selected_row += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    pub fn first_row(&mut self) {
        self.selected_row = 0;
        self.row_offset = 0;
    }

    pub fn last_row(&mut self, total: usize) {
        self.selected_row = total.saturating_sub(1);
    }

    pub fn page_down(&mut self, total: usize) {
        let page = self.viewport_height.max(1);
        self.selected_row = (self.selected_row + page).min(total.saturating_sub(1));
    }

    pub fn page_up(&mut self) {
        let page = self.viewport_height.max(1);
        self.selected_row = self.selected_row.saturating_sub(page);
    }

    pub fn next_column(&mut self, count: usize) {
        if self.selected_column + 1 < count {
            self.selected_column += 1;
        }
    }

    pub fn prev_column(&mut self) {
        self.selected_column = self.selected_column.saturating_sub(1);
    }

    /// Pull the cursors back inside a grid of `total` rows and `count` columns
    pub fn clamp(&mut self, total: usize, count: usize) {
        self.selected_row = self.selected_row.min(total.saturating_sub(1));
        self.selected_column = self.selected_column.min(count.saturating_sub(1));
        self.row_offset = self.row_offset.min(self.selected_row);
        self.column_offset = self.column_offset.min(self.selected_column);
    }

    /// Indices of the filtered rows currently on screen
    pub fn viewport(&self, total: usize) -> Range<usize> {
        let start = self.row_offset.min(total);
        let end = (self.row_offset + self.viewport_height.max(1)).min(total);
        start..end
    }

    /// Name of the column under the column cursor
    pub fn selected_column_name<'a>(&self, columns: &[&'a str]) -> Option<&'a str> {
        columns.get(self.selected_column).copied()
    }

    fn scroll_rows_into_view(&mut self) {
        let height = self.viewport_height.max(1);
        if self.selected_row < self.row_offset {
            self.row_offset = self.selected_row;
        } else if self.selected_row >= self.row_offset + height {
            self.row_offset = self.selected_row + 1 - height;
        }
    }

    /// Draw the grid for `viewer`
    pub fn draw_with_viewer(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        viewer: &Viewer,
        measure: &CellMeasure,
    ) -> Result<()> {
        let palette = self.palette;
        let title = match viewer.source() {
            Some(source) => format!(" {} ", source.name),
            None => " Data ".to_string(),
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .title_style(palette.title())
            .border_style(palette.border_style());
        let inner = block.inner(area);

        let columns = viewer.visible_columns();
        let rows = viewer.filtered_rows();

        let placeholder = match viewer.state() {
            LoadState::Idle => Some(("Choose a CSV file (press s)".to_string(), palette.dim())),
            LoadState::Loading if viewer.rows().is_empty() => Some((
                "Loading…".to_string(),
                Style::default().fg(palette.warning),
            )),
            LoadState::Failed { message } => Some((
                format!("Could not load data: {}", message),
                Style::default().fg(palette.error),
            )),
            _ if viewer.schema().is_empty() => Some(("No rows".to_string(), palette.dim())),
            _ if columns.is_empty() => Some((
                "All columns are hidden (press c)".to_string(),
                palette.dim(),
            )),
            _ if rows.is_empty() => Some((
                format!("No rows match \"{}\"", viewer.search()),
                palette.dim(),
            )),
            _ => None,
        };

        if let Some((message, style)) = placeholder {
            let paragraph = Paragraph::new(vec![Line::from(""), Line::from(Span::styled(message, style))])
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(paragraph, area);
            return Ok(());
        }

        // One line goes to the header row
        self.viewport_height = inner.height.saturating_sub(1).max(1) as usize;
        self.clamp(rows.len(), columns.len());
        self.scroll_rows_into_view();

        let widths: Vec<u16> = columns
            .iter()
            .map(|c| {
                let px = viewer
                    .columns()
                    .width(c)
                    .unwrap_or(viewer.columns().limits().default);
                measure.px_to_cells(px)
            })
            .collect();
        self.column_offset =
            first_column_in_view(&widths, self.column_offset, self.selected_column, inner.width);
        let shown = columns_in_view(&widths, self.column_offset, inner.width);
        let shown_range = self.column_offset..self.column_offset + shown;

        let header_style = Style::default()
            .fg(palette.header_fg)
            .bg(palette.header_bg)
            .add_modifier(Modifier::BOLD);
        let header = TableRow::new(shown_range.clone().map(|i| {
            Cell::from(truncate_to_width(columns[i], widths[i] as usize))
        }))
        .style(header_style);

        let viewport = self.viewport(rows.len());
        let body: Vec<TableRow> = viewport
            .clone()
            .map(|row_index| {
                let row = rows[row_index];
                let is_selected_row = row_index == self.selected_row;
                let cells = shown_range.clone().map(|i| {
                    let text = truncate_to_width(cell(row, columns[i]), widths[i] as usize);
                    let mut cell_widget = Cell::from(text);
                    if is_selected_row && i == self.selected_column {
                        cell_widget = cell_widget.style(
                            Style::default()
                                .bg(palette.selected_cell_bg)
                                .fg(palette.selected_fg)
                                .add_modifier(Modifier::BOLD),
                        );
                    }
                    cell_widget
                });
                let style = if is_selected_row {
                    Style::default().bg(palette.selected_row_bg).fg(palette.selected_fg)
                } else {
                    palette.text()
                };
                TableRow::new(cells).style(style)
            })
            .collect();

        let constraints: Vec<Constraint> = shown_range
            .clone()
            .map(|i| Constraint::Length(widths[i]))
            .collect();
        let table = Table::new(body, constraints)
            .header(header)
            .column_spacing(1)
            .block(block);
        frame.render_widget(table, area);

        if rows.len() > self.viewport_height {
            let mut scrollbar_state =
                ScrollbarState::new(rows.len().saturating_sub(self.viewport_height))
                    .position(self.row_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

/// Span of `widths[from..=to]` including one separator cell between columns
fn span_width(widths: &[u16], from: usize, to: usize) -> u32 {
    let cells: u32 = widths[from..=to].iter().map(|w| *w as u32).sum();
    cells + (to - from) as u32
}

/// Smallest adjustment of `offset` that keeps `selected` on screen
fn first_column_in_view(widths: &[u16], offset: usize, selected: usize, available: u16) -> usize {
    if widths.is_empty() {
        return 0;
    }
    let selected = selected.min(widths.len() - 1);
    let mut offset = offset.min(selected);
    while offset < selected && span_width(widths, offset, selected) > available as u32 {
        offset += 1;
    }
    offset
}

/// How many columns starting at `offset` fit in `available` cells, at least one
fn columns_in_view(widths: &[u16], offset: usize, available: u16) -> usize {
    if offset >= widths.len() {
        return 0;
    }
    let mut count = 1;
    while offset + count < widths.len()
        && span_width(widths, offset, offset + count) <= available as u32
    {
        count += 1;
    }
    count
}

impl Component for GridComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextRow),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevRow),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstRow),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastRow),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),

            // Dialogs
            KeyCode::Char('s') => Some(Action::OpenSourcePicker),
            KeyCode::Char('c') => Some(Action::OpenColumnPicker),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),

            // Search
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Esc => Some(Action::ClearSearch),

            // Column widths
            KeyCode::Char('+') => Some(Action::WidenColumn),
            KeyCode::Char('-') => Some(Action::NarrowColumn),
            KeyCode::Char('=') => Some(Action::AutoSizeColumn),
            KeyCode::Char('A') => Some(Action::AutoSizeAllColumns),

            // Data
            KeyCode::Char('r') => Some(Action::ReloadSource),
            KeyCode::Char('e') => Some(Action::ExportFiltered),
            KeyCode::Char('E') => Some(Action::ExportAll),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Data ")
            .border_style(self.palette.border_style());
        frame.render_widget(block, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::row;
    use crate::model::source::DataSource;
    use ratatui::{backend::TestBackend, Terminal};

    fn loaded_viewer() -> Viewer {
        let mut viewer = Viewer::default();
        let ticket = viewer.select(Some(DataSource::new("a.csv", "List A"))).unwrap();
        viewer.commit(
            &ticket,
            Ok(vec![
                row(&[("Title", "Alpha"), ("Region", "US")]),
                row(&[("Title", "Beta"), ("Region", "EU")]),
            ]),
        );
        viewer
    }

    fn render(grid: &mut GridComponent, viewer: &Viewer) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        let measure = CellMeasure::new(9.0);
        terminal
            .draw(|frame| {
                let area = frame.area();
                grid.draw_with_viewer(frame, area, viewer, &measure).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_row_navigation_is_bounded() {
        let mut grid = GridComponent::new();
        grid.prev_row();
        assert_eq!(grid.selected_row, 0);

        grid.next_row(3);
        grid.next_row(3);
        grid.next_row(3);
        assert_eq!(grid.selected_row, 2);

        grid.first_row();
        assert_eq!(grid.selected_row, 0);
        grid.last_row(3);
        assert_eq!(grid.selected_row, 2);
        grid.last_row(0);
        assert_eq!(grid.selected_row, 0);
    }

    #[test]
    fn test_paging_uses_viewport_height() {
        let mut grid = GridComponent::new();
        grid.viewport_height = 5;
        grid.page_down(12);
        assert_eq!(grid.selected_row, 5);
        grid.page_down(12);
        grid.page_down(12);
        assert_eq!(grid.selected_row, 11);
        grid.page_up();
        assert_eq!(grid.selected_row, 6);
    }

    #[test]
    fn test_column_navigation_and_clamp() {
        let mut grid = GridComponent::new();
        grid.next_column(2);
        grid.next_column(2);
        assert_eq!(grid.selected_column, 1);
        assert_eq!(grid.selected_column_name(&["Title", "Region"]), Some("Region"));

        // A column got hidden
        grid.clamp(10, 1);
        assert_eq!(grid.selected_column, 0);
        grid.clamp(0, 0);
        assert_eq!(grid.selected_column_name(&[]), None);
    }

    #[test]
    fn test_viewport_follows_offset() {
        let mut grid = GridComponent::new();
        grid.viewport_height = 4;
        assert_eq!(grid.viewport(10), 0..4);
        assert_eq!(grid.viewport(2), 0..2);

        grid.selected_row = 7;
        grid.scroll_rows_into_view();
        assert_eq!(grid.viewport(10), 4..8);
    }

    #[test]
    fn test_columns_in_view() {
        let widths = [10, 10, 10, 10];
        assert_eq!(columns_in_view(&widths, 0, 32), 3);
        assert_eq!(columns_in_view(&widths, 0, 31), 2);
        assert_eq!(columns_in_view(&widths, 2, 100), 2);
        // Always at least one, even if it is wider than the screen
        assert_eq!(columns_in_view(&[50], 0, 20), 1);
        assert_eq!(columns_in_view(&widths, 4, 100), 0);
    }

    #[test]
    fn test_first_column_in_view_scrolls_to_selection() {
        let widths = [10, 10, 10, 10];
        assert_eq!(first_column_in_view(&widths, 0, 1, 32), 0);
        assert_eq!(first_column_in_view(&widths, 0, 3, 21), 2);
        assert_eq!(first_column_in_view(&widths, 3, 1, 21), 1);
        assert_eq!(first_column_in_view(&[], 2, 0, 21), 0);
    }

    #[test]
    fn test_key_mapping() {
        let mut grid = GridComponent::new();
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);

        assert_eq!(grid.handle_key_event(key('j')).unwrap(), Some(Action::NextRow));
        assert_eq!(grid.handle_key_event(key('=')).unwrap(), Some(Action::AutoSizeColumn));
        assert_eq!(grid.handle_key_event(key('E')).unwrap(), Some(Action::ExportAll));
        assert_eq!(
            grid.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::ForceQuit)
        );
        assert_eq!(grid.handle_key_event(key('c')).unwrap(), Some(Action::OpenColumnPicker));
    }

    #[test]
    fn test_renders_visible_columns_only() {
        let mut viewer = loaded_viewer();
        let mut grid = GridComponent::new();

        let screen = render(&mut grid, &viewer);
        assert!(screen.contains("Title"));
        assert!(screen.contains("Region"));
        assert!(screen.contains("Alpha"));

        viewer.toggle_visibility("Region");
        let screen = render(&mut grid, &viewer);
        assert!(screen.contains("Title"));
        assert!(!screen.contains("Region"));
    }

    #[test]
    fn test_renders_placeholders() {
        let mut grid = GridComponent::new();
        let screen = render(&mut grid, &Viewer::default());
        assert!(screen.contains("Choose a CSV file"));

        let mut viewer = loaded_viewer();
        viewer.set_search("zzz");
        let screen = render(&mut grid, &viewer);
        assert!(screen.contains("No rows match"));
    }
}
