//! Viewer state - the engine's single state holder
//!
//! Owns the current selection, the ingested rows, the inferred schema, the
//! column state and the search term. All mutations go through methods here
//! so the schema and the column maps never drift apart.
//!
//! Loads are identified by a selection token. Every call to [`Viewer::select`]
//! or [`Viewer::reload`] bumps it and hands out a [`LoadTicket`]; a result is
//! only applied when its ticket still carries the current token.

use super::columns::{ColumnState, Measure, WidthLimits};
use super::export::{project, ExportPayload};
use super::filter::filter_rows;
use super::row::Row;
use super::schema::{drop_blank_rows, infer_schema};
use super::source::DataSource;
use crate::error::IngestError;
use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

/// Proof that a load was started for a particular selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
    source: DataSource,
}

impl LoadTicket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }
}

/// Where the current selection is in its lifecycle
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Nothing selected
    Idle,
    Loading,
    Ready { loaded_at: DateTime<Local> },
    /// Ingestion failed; rows and schema are empty
    Failed { message: String },
}

/// Result of offering a load result to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Applied,
    /// The ticket belongs to a superseded selection and was discarded
    Stale,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    token: u64,
    source: Option<DataSource>,
    state: LoadState,
    rows: Vec<Row>,
    schema: Vec<String>,
    columns: ColumnState,
    search: String,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(WidthLimits::default())
    }
}

impl Viewer {
    pub fn new(limits: WidthLimits) -> Self {
        Self {
            token: 0,
            source: None,
            state: LoadState::Idle,
            rows: Vec::new(),
            schema: Vec::new(),
            columns: ColumnState::new(limits),
            search: String::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection & Loading
    // ─────────────────────────────────────────────────────────────────────────

    /// Select a data source (or none) and supersede any load in flight
    ///
    /// Switching to a different source drops the current rows right away.
    /// Selecting the source that is already selected behaves like a reload.
    pub fn select(&mut self, source: Option<DataSource>) -> Option<LoadTicket> {
        self.token += 1;

        let same_source = matches!(
            (&self.source, &source),
            (Some(current), Some(next)) if current.id == next.id
        );
        if !same_source {
            self.replace_rows(Vec::new());
        }
        self.source = source.clone();

        match source {
            Some(source) => {
                info!(source = %source.id, token = self.token, "Selected data source");
                self.state = LoadState::Loading;
                Some(LoadTicket {
                    token: self.token,
                    source,
                })
            }
            None => {
                info!(token = self.token, "Cleared data source selection");
                self.state = LoadState::Idle;
                None
            }
        }
    }

    /// Start a fresh load of the current source, keeping rows until it lands
    pub fn reload(&mut self) -> Option<LoadTicket> {
        let source = self.source.clone()?;
        self.select(Some(source))
    }

    /// Apply a load result if `ticket` still belongs to the current selection
    pub fn commit(
        &mut self,
        ticket: &LoadTicket,
        result: Result<Vec<Row>, IngestError>,
    ) -> CommitOutcome {
        if ticket.token != self.token {
            warn!(
                source = %ticket.source.id,
                ticket = ticket.token,
                current = self.token,
                "Discarding result for superseded selection"
            );
            return CommitOutcome::Stale;
        }

        match result {
            Ok(rows) => {
                let received = rows.len();
                self.replace_rows(rows);
                info!(
                    source = %ticket.source.id,
                    rows = self.rows.len(),
                    blank = received - self.rows.len(),
                    columns = self.schema.len(),
                    "Loaded data source"
                );
                self.state = LoadState::Ready {
                    loaded_at: Local::now(),
                };
            }
            Err(err) => {
                warn!(source = %ticket.source.id, error = %err, "Failed to load data source");
                self.replace_rows(Vec::new());
                self.state = LoadState::Failed {
                    message: err.to_string(),
                };
            }
        }
        CommitOutcome::Applied
    }

    fn replace_rows(&mut self, rows: Vec<Row>) {
        self.rows = drop_blank_rows(rows);
        self.schema = infer_schema(&self.rows);
        self.columns.reconcile(&self.schema);
        debug!(schema = ?self.schema, "Reconciled column state");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshots
    // ─────────────────────────────────────────────────────────────────────────

    pub fn source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn columns(&self) -> &ColumnState {
        &self.columns
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn visible_columns(&self) -> Vec<&str> {
        self.columns.visible_columns(&self.schema)
    }

    pub fn filtered_rows(&self) -> Vec<&Row> {
        filter_rows(
            &self.rows,
            &self.schema,
            self.columns.visibility(),
            &self.search,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────

    #[cfg(test)]
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Column State
    // ─────────────────────────────────────────────────────────────────────────

    pub fn toggle_visibility(&mut self, column: &str) -> Option<bool> {
        self.columns.toggle_visibility(column)
    }

    pub fn show_all_columns(&mut self) {
        self.columns.show_all();
    }

    pub fn resize(&mut self, column: &str, requested: f64) -> f64 {
        self.columns.resize(column, requested)
    }

    /// Autosize `column` against the filtered rows in `range`
    ///
    /// `range` is the slice of the filtered view the renderer currently
    /// shows; it is cut down to what exists.
    pub fn auto_size_visible<M: Measure + ?Sized>(
        &mut self,
        measure: &M,
        column: &str,
        range: std::ops::Range<usize>,
    ) -> f64 {
        let filtered = filter_rows(
            &self.rows,
            &self.schema,
            self.columns.visibility(),
            &self.search,
        );
        let end = range.end.min(filtered.len());
        let start = range.start.min(end);
        self.columns
            .auto_size_with(measure, column, &filtered[start..end])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Visible columns of the rows matching the current search
    pub fn export_filtered(&self) -> ExportPayload {
        self.payload(self.filtered_rows())
    }

    /// Visible columns of every row, ignoring the search term
    pub fn export_all(&self) -> ExportPayload {
        self.payload(self.rows.iter())
    }

    fn payload<'a>(&self, rows: impl IntoIterator<Item = &'a Row>) -> ExportPayload {
        ExportPayload {
            columns: self.visible_columns().into_iter().map(str::to_string).collect(),
            rows: project(rows, &self.schema, self.columns.visibility()),
        }
    }
}
