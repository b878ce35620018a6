//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that routes events to the grid or the open modal and applies the resulting
//! Actions to the viewer engine. Loads run on the background loader and are
//! committed on `Tick`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    draw_home_screen, CellMeasure, ColumnPickerDialog, GridComponent, HelpDialog,
    HomeRenderContext, Palette, QuitDialog, SourcePickerDialog,
};
use crate::config::Config;
use crate::model::modal::{Modal, ModalStack};
use crate::model::ui::{InputMode, ThemeMode};
use crate::model::{CommitOutcome, DataSource, LoadState, LoadTicket, Viewer};
use crate::services::{export_file_name, write_export, LoadMessage, SourceLoader, SourceLocation};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Cells added or removed by one widen/narrow step
const RESIZE_STEP_CELLS: u16 = 4;

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Engine state: selection, rows, schema, columns, search
    pub viewer: Viewer,

    /// Background source loader
    pub loader: SourceLoader,

    /// Modal overlay stack
    pub modals: ModalStack,

    pub theme: ThemeMode,
    pub input_mode: InputMode,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    /// Duration of the last committed load
    pub load_duration: Option<Duration>,

    measure: CellMeasure,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub grid: GridComponent,
    pub quit_dialog: QuitDialog,
    pub source_picker: SourcePickerDialog,
    pub column_picker: ColumnPickerDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl App {
    pub fn new(config: Config) -> App {
        let mut app = App {
            viewer: Viewer::new(config.widths),
            loader: SourceLoader::new(),
            modals: ModalStack::new(),
            theme: config.theme,
            input_mode: InputMode::Normal,
            should_quit: false,
            error: None,
            status_message: None,
            load_duration: None,
            measure: CellMeasure::new(config.cell_width_px),
            grid: GridComponent::new(),
            quit_dialog: QuitDialog::default(),
            source_picker: SourcePickerDialog::new(config.sources.clone()),
            column_picker: ColumnPickerDialog::new(),
            help_dialog: HelpDialog::default(),
            config,
        };
        app.apply_theme();
        app
    }

    fn apply_theme(&mut self) {
        let palette = Palette::for_mode(self.theme);
        self.grid.palette = palette;
        self.quit_dialog.palette = palette;
        self.source_picker.palette = palette;
        self.column_picker.palette = palette;
        self.help_dialog.palette = palette;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Loading
    // ─────────────────────────────────────────────────────────────────────────

    fn start_load(&mut self, source: Option<DataSource>) {
        self.error = None;
        self.status_message = None;
        self.load_duration = None;
        self.grid.reset();

        match self.viewer.select(source) {
            Some(ticket) => self.spawn_load(ticket),
            None => self.loader.cancel(),
        }
    }

    fn spawn_load(&mut self, ticket: LoadTicket) {
        let location = SourceLocation::resolve(&self.config.base_url, &ticket.source().id);
        self.loader.spawn(ticket, location);
    }

    /// Commit a finished load, if any
    fn poll_loader(&mut self) {
        let started = self.loader.start_instant();
        let Some(LoadMessage { ticket, result }) = self.loader.poll() else {
            return;
        };

        if self.viewer.commit(&ticket, result) == CommitOutcome::Stale {
            return;
        }
        self.load_duration = started.map(|s| s.elapsed());

        let name = &ticket.source().name;
        match self.viewer.state() {
            LoadState::Ready { .. } => {
                self.error = None;
                self.status_message = Some(format!(
                    "Loaded {} rows from {}",
                    self.viewer.rows().len(),
                    name
                ));
            }
            LoadState::Failed { message } => {
                self.status_message = None;
                self.error = Some(format!("Failed to load {}: {}", name, message));
            }
            _ => {}
        }
        self.clamp_grid();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────

    fn filtered_count(&self) -> usize {
        self.viewer.filtered_rows().len()
    }

    fn visible_count(&self) -> usize {
        self.viewer.visible_columns().len()
    }

    fn clamp_grid(&mut self) {
        let (total, count) = (self.filtered_count(), self.visible_count());
        self.grid.clamp(total, count);
    }

    fn selected_column(&self) -> Option<String> {
        self.grid
            .selected_column_name(&self.viewer.visible_columns())
            .map(str::to_string)
    }

    fn step_width(&mut self, steps: f64) {
        let Some(column) = self.selected_column() else {
            return;
        };
        let columns = self.viewer.columns();
        let current = columns.width(&column).unwrap_or(columns.limits().default);
        let step = self.measure.cells_to_px(RESIZE_STEP_CELLS);

        let width = self.viewer.resize(&column, current + steps * step);
        self.status_message = Some(format!("{}: {:.0}px", column, width));
    }

    fn auto_size_selected(&mut self) {
        let Some(column) = self.selected_column() else {
            return;
        };
        let range = self.grid.viewport(self.filtered_count());
        let width = self.viewer.auto_size_visible(&self.measure, &column, range);
        self.status_message = Some(format!("{}: {:.0}px", column, width));
    }

    fn auto_size_all(&mut self) {
        let columns: Vec<String> = self
            .viewer
            .visible_columns()
            .into_iter()
            .map(str::to_string)
            .collect();
        let range = self.grid.viewport(self.filtered_count());
        for column in &columns {
            self.viewer
                .auto_size_visible(&self.measure, column, range.clone());
        }
        self.status_message = Some(format!("Fitted {} columns", columns.len()));
    }

    fn column_entries(&self) -> Vec<(String, bool)> {
        self.viewer
            .schema()
            .iter()
            .map(|c| (c.clone(), self.viewer.columns().is_visible(c)))
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    fn export(&mut self, all_rows: bool) {
        let payload = if all_rows {
            self.viewer.export_all()
        } else {
            self.viewer.export_filtered()
        };
        if payload.is_empty() {
            self.status_message = Some("Nothing to export".to_string());
            return;
        }

        let file_name = export_file_name(self.viewer.source().map(|s| s.id.as_str()));
        match write_export(&self.config.export_dir(), &file_name, &payload) {
            Ok(path) => {
                self.error = None;
                self.status_message = Some(format!(
                    "Exported {} to {}",
                    row_count(payload.rows.len()),
                    path.display()
                ));
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Export failed");
                self.error = Some(format!("Export failed: {:#}", e));
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────

    fn modal_len(&self) -> usize {
        match self.modals.top() {
            Some(Modal::SourcePicker { .. }) => self.source_picker.len(),
            Some(Modal::ColumnPicker { .. }) => self.viewer.schema().len(),
            _ => 0,
        }
    }

    fn move_modal_selection(&mut self, delta: isize) {
        let len = self.modal_len();
        if let Some(modal) = self.modals.top_mut() {
            modal.move_selection(delta, len);
        }
    }

    fn close_source_picker(&mut self) {
        if matches!(self.modals.top(), Some(Modal::SourcePicker { .. })) {
            self.modals.pop();
        }
    }

    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::SourcePicker { selected_index } => {
                self.source_picker.selected_index = *selected_index;
                self.source_picker.handle_key_event(key)
            }
            Modal::ColumnPicker { selected_index } => {
                let entries = self.column_entries();
                self.column_picker.set_entries(entries);
                self.column_picker.selected_index = *selected_index;
                self.column_picker.handle_key_event(key)
            }
            Modal::Help { scroll_offset } => {
                self.help_dialog.scroll_offset = *scroll_offset;
                self.help_dialog.handle_key_event(key)
            }
        }
    }

    fn handle_search_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::ExitSearchMode),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ClearSearch)
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::ForceQuit)
            }
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::SourcePicker { selected_index } => {
                self.source_picker.selected_index = *selected_index;
                self.source_picker.draw(frame, area)?;
            }
            Modal::ColumnPicker { selected_index } => {
                let entries = self.column_entries();
                self.column_picker.set_entries(entries);
                self.column_picker.selected_index = *selected_index;
                self.column_picker.draw(frame, area)?;
            }
            Modal::Help { scroll_offset } => {
                self.help_dialog.scroll_offset = *scroll_offset;
                self.help_dialog.draw(frame, area)?;
            }
        }
        Ok(())
    }
}

fn row_count(n: usize) -> String {
    if n == 1 {
        "1 row".to_string()
    } else {
        format!("{} rows", n)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        info!(
            sources = self.config.sources.len(),
            base_url = %self.config.base_url,
            "Viewer ready"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if let Some(modal) = self.modals.top().cloned() {
            self.handle_modal_key_event(&modal, key)
        } else if self.input_mode == InputMode::Search {
            self.handle_search_key_event(key)
        } else {
            self.grid.handle_key_event(key)
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            trace!(%action, "Handling action");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => self.poll_loader(),
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.loader.cancel();
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Grid Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextRow => {
                let total = self.filtered_count();
                self.grid.next_row(total);
            }
            Action::PrevRow => self.grid.prev_row(),
            Action::FirstRow => self.grid.first_row(),
            Action::LastRow => {
                let total = self.filtered_count();
                self.grid.last_row(total);
            }
            Action::PageDown => {
                let total = self.filtered_count();
                self.grid.page_down(total);
            }
            Action::PageUp => self.grid.page_up(),
            Action::NextColumn => {
                let count = self.visible_count();
                self.grid.next_column(count);
            }
            Action::PrevColumn => self.grid.prev_column(),

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenSourcePicker => {
                self.source_picker.current = self.viewer.source().map(|s| s.id.clone());
                let selected_index = self.source_picker.index_of_current();
                self.modals.push(Modal::SourcePicker { selected_index });
            }
            Action::OpenColumnPicker => {
                self.modals.push(Modal::ColumnPicker { selected_index: 0 });
            }
            Action::OpenHelp => self.modals.push(Modal::Help { scroll_offset: 0 }),
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ModalUp => self.move_modal_selection(-1),
            Action::ModalDown => self.move_modal_selection(1),

            // ─────────────────────────────────────────────────────────────────
            // Data Source
            // ─────────────────────────────────────────────────────────────────
            Action::SelectSource(id) => {
                self.close_source_picker();
                match self.config.find_source(&id).cloned() {
                    Some(source) => self.start_load(Some(source)),
                    None => {
                        warn!(source = %id, "Unknown data source");
                        self.error = Some(format!("Unknown data source: {}", id));
                    }
                }
            }
            Action::ClearSource => {
                self.close_source_picker();
                self.start_load(None);
            }
            Action::ReloadSource => match self.viewer.reload() {
                Some(ticket) => {
                    self.error = None;
                    self.status_message = Some("Reloading…".to_string());
                    self.spawn_load(ticket);
                }
                None => self.status_message = Some("No source selected".to_string()),
            },

            // ─────────────────────────────────────────────────────────────────
            // Search
            // ─────────────────────────────────────────────────────────────────
            Action::EnterSearchMode => self.input_mode = InputMode::Search,
            Action::ExitSearchMode => self.input_mode = InputMode::Normal,
            Action::SearchInput(c) => {
                self.viewer.push_search(c);
                self.grid.first_row();
            }
            Action::SearchBackspace => {
                self.viewer.pop_search();
                self.grid.first_row();
            }
            Action::ClearSearch => {
                self.viewer.clear_search();
                self.grid.first_row();
            }

            // ─────────────────────────────────────────────────────────────────
            // Columns
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleColumn(name) => {
                if let Some(visible) = self.viewer.toggle_visibility(&name) {
                    debug!(column = %name, visible, "Toggled column");
                }
                self.clamp_grid();
            }
            Action::ShowAllColumns => {
                self.viewer.show_all_columns();
                self.clamp_grid();
            }
            Action::WidenColumn => self.step_width(1.0),
            Action::NarrowColumn => self.step_width(-1.0),
            Action::AutoSizeColumn => self.auto_size_selected(),
            Action::AutoSizeAllColumns => self.auto_size_all(),

            // ─────────────────────────────────────────────────────────────────
            // Export & View
            // ─────────────────────────────────────────────────────────────────
            Action::ExportFiltered => self.export(false),
            Action::ExportAll => self.export(true),
            Action::ToggleTheme => {
                self.theme = self.theme.toggle();
                self.apply_theme();
                self.status_message = Some(format!("Theme: {}", self.theme.name()));
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let ctx = HomeRenderContext {
            viewer: &self.viewer,
            measure: &self.measure,
            palette: Palette::for_mode(self.theme),
            input_mode: self.input_mode,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
            load_duration: self.load_duration,
        };
        draw_home_screen(frame, area, &mut self.grid, &ctx)?;

        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::thread;

    struct Fixture {
        _dir: tempfile::TempDir,
        app: App,
        export_dir: std::path::PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.csv"),
            "Title,Region\nAlpha,US\nBeta,EU\n,\n",
        )
        .unwrap();
        fs::write(dir.path().join("b.csv"), "Serial,Title\nSLUS-1,Gamma\n").unwrap();

        let export_dir = dir.path().join("exports");
        let config = Config {
            base_url: dir.path().display().to_string(),
            sources: vec![
                DataSource::new("a.csv", "List A"),
                DataSource::new("b.csv", "List B"),
            ],
            export_dir: Some(export_dir.display().to_string()),
            ..Config::default()
        };

        Fixture {
            _dir: dir,
            app: App::new(config),
            export_dir,
        }
    }

    fn settle(app: &mut App) {
        for _ in 0..500 {
            app.update(Action::Tick).unwrap();
            if !app.viewer.is_loading() {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("load did not settle");
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_select_source_loads_rows() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        assert!(f.app.viewer.is_loading());

        settle(&mut f.app);
        assert_eq!(f.app.viewer.schema(), ["Title", "Region"]);
        assert_eq!(f.app.viewer.rows().len(), 2);
        assert_eq!(f.app.status_message.as_deref(), Some("Loaded 2 rows from List A"));
        assert!(f.app.load_duration.is_some());
    }

    #[test]
    fn test_switching_source_keeps_only_latest() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        f.app.update(Action::SelectSource("b.csv".into())).unwrap();

        settle(&mut f.app);
        assert_eq!(f.app.viewer.source().map(|s| s.id.as_str()), Some("b.csv"));
        assert_eq!(f.app.viewer.schema(), ["Serial", "Title"]);
    }

    #[test]
    fn test_missing_file_reports_error() {
        let mut f = fixture();
        f.app.config.sources.push(DataSource::new("gone.csv", "Gone"));
        f.app.update(Action::SelectSource("gone.csv".into())).unwrap();

        settle(&mut f.app);
        assert!(matches!(f.app.viewer.state(), LoadState::Failed { .. }));
        assert!(f.app.error.as_deref().unwrap().starts_with("Failed to load Gone"));
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("nope.csv".into())).unwrap();
        assert_eq!(f.app.error.as_deref(), Some("Unknown data source: nope.csv"));
        assert!(f.app.viewer.source().is_none());
    }

    #[test]
    fn test_clear_source_returns_to_idle() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        settle(&mut f.app);

        f.app.update(Action::ClearSource).unwrap();
        assert_eq!(f.app.viewer.state(), &LoadState::Idle);
        assert!(f.app.viewer.rows().is_empty());
        assert!(!f.app.loader.is_busy());
    }

    #[test]
    fn test_source_picker_flow() {
        let mut f = fixture();
        let action = f.app.handle_key_event(key('s')).unwrap().unwrap();
        f.app.update(action).unwrap();
        assert_eq!(f.app.modals.top(), Some(&Modal::SourcePicker { selected_index: 0 }));

        let action = f.app.handle_key_event(key('j')).unwrap().unwrap();
        f.app.update(action).unwrap();
        let action = f
            .app
            .handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(action, Some(Action::SelectSource("a.csv".into())));

        f.app.update(action.unwrap()).unwrap();
        assert!(f.app.modals.is_empty());
        settle(&mut f.app);
        assert_eq!(f.app.viewer.rows().len(), 2);
    }

    #[test]
    fn test_search_mode_routes_typing_to_search() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        settle(&mut f.app);

        let action = f.app.handle_key_event(key('/')).unwrap().unwrap();
        f.app.update(action).unwrap();
        for c in "bet".chars() {
            let action = f.app.handle_key_event(key(c)).unwrap().unwrap();
            f.app.update(action).unwrap();
        }
        assert_eq!(f.app.viewer.search(), "bet");
        assert_eq!(f.app.viewer.filtered_rows().len(), 1);

        let clear = KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL);
        let action = f.app.handle_key_event(clear).unwrap().unwrap();
        f.app.update(action).unwrap();
        assert_eq!(f.app.viewer.search(), "");
    }

    #[test]
    fn test_column_picker_toggles_visibility() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        settle(&mut f.app);

        f.app.update(Action::OpenColumnPicker).unwrap();
        f.app.update(Action::ModalDown).unwrap();
        let action = f.app.handle_key_event(key(' ')).unwrap().unwrap();
        assert_eq!(action, Action::ToggleColumn("Region".into()));
        f.app.update(action).unwrap();

        assert_eq!(f.app.viewer.visible_columns(), vec!["Title"]);
        // The picker stays open for more toggles
        assert!(matches!(f.app.modals.top(), Some(Modal::ColumnPicker { .. })));
    }

    #[test]
    fn test_widen_narrow_and_autosize_selected_column() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        settle(&mut f.app);

        f.app.update(Action::WidenColumn).unwrap();
        assert_eq!(f.app.viewer.columns().width("Title"), Some(180.0 + 36.0));
        f.app.update(Action::NarrowColumn).unwrap();
        f.app.update(Action::NarrowColumn).unwrap();
        assert_eq!(f.app.viewer.columns().width("Title"), Some(180.0 - 36.0));

        // "Title" and "Alpha" are both five cells wide
        f.app.update(Action::AutoSizeColumn).unwrap();
        assert_eq!(f.app.viewer.columns().width("Title"), Some(5.0 * 9.0 + 24.0));

        f.app.update(Action::NextColumn).unwrap();
        f.app.update(Action::AutoSizeColumn).unwrap();
        // Padding pushes "Region" (54px) to 78px
        assert_eq!(f.app.viewer.columns().width("Region"), Some(78.0));
    }

    #[test]
    fn test_export_filtered_writes_file() {
        let mut f = fixture();
        f.app.update(Action::SelectSource("a.csv".into())).unwrap();
        settle(&mut f.app);
        f.app.viewer.set_search("beta");

        f.app.update(Action::ExportFiltered).unwrap();
        let written = fs::read_to_string(f.export_dir.join("a.csv")).unwrap();
        assert_eq!(written, "Title,Region\nBeta,EU\n");
        assert!(f.app.status_message.as_deref().unwrap().starts_with("Exported 1 row to "));

        f.app.update(Action::ExportAll).unwrap();
        let written = fs::read_to_string(f.export_dir.join("a.csv")).unwrap();
        assert_eq!(written, "Title,Region\nAlpha,US\nBeta,EU\n");
        assert!(f.app.status_message.as_deref().unwrap().starts_with("Exported 2 rows to "));
    }

    #[test]
    fn test_row_count() {
        assert_eq!(row_count(0), "0 rows");
        assert_eq!(row_count(1), "1 row");
        assert_eq!(row_count(2), "2 rows");
    }

    #[test]
    fn test_export_nothing() {
        let mut f = fixture();
        f.app.update(Action::ExportFiltered).unwrap();
        assert_eq!(f.app.status_message.as_deref(), Some("Nothing to export"));
        assert!(!f.export_dir.exists());
    }

    #[test]
    fn test_toggle_theme() {
        let mut f = fixture();
        assert_eq!(f.app.theme, ThemeMode::Dark);
        f.app.update(Action::ToggleTheme).unwrap();
        assert_eq!(f.app.theme, ThemeMode::Light);
        assert_eq!(f.app.grid.palette, Palette::light());
    }

    #[test]
    fn test_quit_flow() {
        let mut f = fixture();
        let action = f.app.handle_key_event(key('q')).unwrap().unwrap();
        f.app.update(action).unwrap();
        assert_eq!(f.app.modals.top(), Some(&Modal::QuitConfirm));

        let action = f.app.handle_key_event(key('y')).unwrap().unwrap();
        f.app.update(action).unwrap();
        assert!(f.app.should_quit);
    }
}
