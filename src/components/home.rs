//! Home screen - header, grid, status line and help bar

use crate::components::grid::GridComponent;
use crate::components::layout::calculate_main_layout;
use crate::components::measure::CellMeasure;
use crate::components::theme::Palette;
use crate::model::ui::InputMode;
use crate::model::viewer::{LoadState, Viewer};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Duration;

/// Everything the home screen reads besides the grid itself
pub struct HomeRenderContext<'a> {
    pub viewer: &'a Viewer,
    pub measure: &'a CellMeasure,
    pub palette: Palette,
    pub input_mode: InputMode,
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
    /// How long the last committed load took
    pub load_duration: Option<Duration>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    grid: &mut GridComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_header(frame, layout.header, ctx);
    grid.draw_with_viewer(frame, layout.grid, ctx.viewer, ctx.measure)?;
    render_status_bar(frame, layout.status, ctx);
    render_help_bar(frame, layout.help, ctx);

    Ok(())
}

fn state_label(state: &LoadState) -> String {
    match state {
        LoadState::Idle => "no source".to_string(),
        LoadState::Loading => "loading…".to_string(),
        LoadState::Ready { loaded_at } => format!("loaded {}", loaded_at.format("%H:%M:%S")),
        LoadState::Failed { .. } => "failed".to_string(),
    }
}

fn render_header(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let palette = ctx.palette;
    let viewer = ctx.viewer;

    let source_name = viewer
        .source()
        .map(|s| s.name.as_str())
        .unwrap_or("-- Choose a CSV file --");
    let state_style = match viewer.state() {
        LoadState::Ready { .. } => Style::default().fg(palette.success),
        LoadState::Loading => Style::default().fg(palette.warning),
        LoadState::Failed { .. } => Style::default().fg(palette.error),
        LoadState::Idle => palette.dim(),
    };

    let searching = ctx.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        palette.text()
    };
    let cursor = if searching { "▏" } else { "" };

    let line = Line::from(vec![
        Span::styled("Source: ", palette.dim()),
        Span::styled(
            source_name.to_string(),
            palette.text().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", state_label(viewer.state())), state_style),
        Span::raw("   "),
        Span::styled("Search: ", palette.dim()),
        Span::styled(format!("{}{}", viewer.search(), cursor), search_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" GameID Viewer ")
        .title_style(palette.title())
        .border_style(if searching {
            Style::default().fg(palette.accent)
        } else {
            palette.border_style()
        });
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let palette = ctx.palette;
    let viewer = ctx.viewer;
    let mut spans = vec![];

    if !viewer.schema().is_empty() {
        let visible = viewer.visible_columns().len();
        spans.push(Span::styled(
            format!(
                " {}/{} rows  {}/{} columns ",
                viewer.filtered_rows().len(),
                viewer.rows().len(),
                visible,
                viewer.schema().len()
            ),
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.selected_cell_bg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    if let Some(duration) = ctx.load_duration {
        spans.push(Span::styled(
            format!("{} ms ", duration.as_millis()),
            palette.dim(),
        ));
    }

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(palette.error),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(palette.warning),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, ctx: &HomeRenderContext) {
    let palette = ctx.palette;
    let hints: &[(&str, &str)] = match ctx.input_mode {
        InputMode::Search => &[
            ("Esc/Enter", "Done"),
            ("Backspace", "Delete"),
            ("Ctrl+u", "Clear"),
        ],
        InputMode::Normal => &[
            ("s", "Source"),
            ("/", "Search"),
            ("c", "Columns"),
            ("+/-/=", "Width"),
            ("e/E", "Export"),
            ("r", "Reload"),
            ("t", "Theme"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {} ", key), palette.key_hint()),
                Span::styled(format!("{} ", label), palette.text()),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::row::row;
    use crate::model::source::DataSource;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(viewer: &Viewer, input_mode: InputMode, error: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 12)).unwrap();
        let measure = CellMeasure::new(9.0);
        let mut grid = GridComponent::new();
        let ctx = HomeRenderContext {
            viewer,
            measure: &measure,
            palette: Palette::dark(),
            input_mode,
            error,
            status_message: None,
            load_duration: None,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_home_screen(frame, area, &mut grid, &ctx).unwrap();
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
    fn test_state_label() {
        assert_eq!(state_label(&LoadState::Idle), "no source");
        assert_eq!(
            state_label(&LoadState::Failed {
                message: "boom".into()
            }),
            "failed"
        );
    }

    #[test]
    fn test_counts_and_search_shown() {
        let mut viewer = Viewer::default();
        let ticket = viewer.select(Some(DataSource::new("a.csv", "List A"))).unwrap();
        viewer.commit(
            &ticket,
            Ok(vec![
                row(&[("Title", "Alpha"), ("Region", "US")]),
                row(&[("Title", "Beta"), ("Region", "EU")]),
            ]),
        );
        viewer.set_search("alp");

        let screen = render(&viewer, InputMode::Search, None);
        assert!(screen.contains("1/2 rows"));
        assert!(screen.contains("2/2 columns"));
        assert!(screen.contains("Search: alp"));
        assert!(screen.contains("Ctrl+u"));
    }

    #[test]
    fn test_error_shown_in_status_bar() {
        let screen = render(&Viewer::default(), InputMode::Normal, Some("Nothing to export"));
        assert!(screen.contains("Error: Nothing to export"));
        assert!(screen.contains("-- Choose a CSV file --"));
    }
}
