//! Column state - per-column visibility and width
//!
//! Visibility flags and pixel widths live independently of the row data.
//! Whenever the schema changes they are reconciled against it: columns that
//! persist keep whatever the user chose, new columns get defaults and
//! columns that disappeared are dropped.
//!
//! Widths are always kept inside [`WidthLimits::min`, `WidthLimits::max`].
//! Every path that stores a width goes through [`WidthLimits::clamp`].

use super::row::{cell, Row};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{trace, warn};

pub const DEFAULT_WIDTH: f64 = 180.0;
pub const MIN_WIDTH: f64 = 60.0;
pub const MAX_WIDTH: f64 = 600.0;
/// Extra room added on top of measured content when autosizing
pub const PADDING: f64 = 24.0;

/// Width policy for columns, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthLimits {
    pub default: f64,
    pub min: f64,
    pub max: f64,
    pub padding: f64,
}

impl Default for WidthLimits {
    fn default() -> Self {
        Self {
            default: DEFAULT_WIDTH,
            min: MIN_WIDTH,
            max: MAX_WIDTH,
            padding: PADDING,
        }
    }
}

impl WidthLimits {
    pub fn is_valid(&self) -> bool {
        [self.default, self.min, self.max, self.padding]
            .iter()
            .all(|v| v.is_finite())
            && self.min > 0.0
            && self.min <= self.max
            && (self.min..=self.max).contains(&self.default)
            && self.padding >= 0.0
    }

    /// These limits if they are usable, the built-in ones otherwise
    pub fn validated(self) -> Self {
        if self.is_valid() {
            self
        } else {
            warn!(limits = ?self, "Invalid column width limits, using defaults");
            Self::default()
        }
    }

    /// Clamp a requested width into bounds
    ///
    /// Infinite values land on the nearest bound and NaN collapses to the
    /// lower bound.
    pub fn clamp(&self, width: f64) -> f64 {
        width.max(self.min).min(self.max)
    }
}

/// Capability that reports the rendered width of a piece of text
///
/// The engine never measures anything itself; the renderer supplies this.
pub trait Measure {
    fn text_width(&self, text: &str) -> f64;
}

impl<F> Measure for F
where
    F: Fn(&str) -> f64,
{
    fn text_width(&self, text: &str) -> f64 {
        self(text)
    }
}

/// Merge previous per-column state with a new schema
///
/// Retained columns keep their previous entries, new columns get `true` and
/// the default width, and columns missing from `schema` are left out of the
/// result. Previous widths are re-clamped so a change of limits cannot leave
/// an out-of-bounds value behind.
pub fn reconcile(
    schema: &[String],
    prev_visibility: &HashMap<String, bool>,
    prev_widths: &HashMap<String, f64>,
    limits: &WidthLimits,
) -> (HashMap<String, bool>, HashMap<String, f64>) {
    let visibility = schema
        .iter()
        .map(|col| (col.clone(), prev_visibility.get(col).copied().unwrap_or(true)))
        .collect();

    let widths = schema
        .iter()
        .map(|col| {
            let width = prev_widths
                .get(col)
                .map(|w| limits.clamp(*w))
                .unwrap_or(limits.default);
            (col.clone(), width)
        })
        .collect();

    (visibility, widths)
}

/// Owner of the visibility and width maps
#[derive(Debug, Clone, Default)]
pub struct ColumnState {
    visibility: HashMap<String, bool>,
    widths: HashMap<String, f64>,
    limits: WidthLimits,
}

impl ColumnState {
    pub fn new(limits: WidthLimits) -> Self {
        Self {
            visibility: HashMap::new(),
            widths: HashMap::new(),
            limits: limits.validated(),
        }
    }

    pub fn limits(&self) -> &WidthLimits {
        &self.limits
    }

    pub fn visibility(&self) -> &HashMap<String, bool> {
        &self.visibility
    }

    /// Bring the maps in line with `schema`
    pub fn reconcile(&mut self, schema: &[String]) {
        let (visibility, widths) =
            reconcile(schema, &self.visibility, &self.widths, &self.limits);
        self.visibility = visibility;
        self.widths = widths;
    }

    /// Whether `column` is a tracked column
    #[cfg(test)]
    pub fn contains(&self, column: &str) -> bool {
        self.visibility.contains_key(column)
    }

    pub fn is_visible(&self, column: &str) -> bool {
        self.visibility.get(column).copied().unwrap_or(false)
    }

    pub fn width(&self, column: &str) -> Option<f64> {
        self.widths.get(column).copied()
    }

    /// Schema columns that are currently visible, in schema order
    pub fn visible_columns<'a>(&self, schema: &'a [String]) -> Vec<&'a str> {
        schema
            .iter()
            .filter(|col| self.is_visible(col))
            .map(String::as_str)
            .collect()
    }

    /// Flip visibility of `column`, returning the new flag
    ///
    /// Columns that are not tracked are left alone and yield `None`.
    pub fn toggle_visibility(&mut self, column: &str) -> Option<bool> {
        let visible = self.visibility.get_mut(column)?;
        *visible = !*visible;
        Some(*visible)
    }

    /// Make every tracked column visible
    pub fn show_all(&mut self) {
        self.visibility.values_mut().for_each(|v| *v = true);
    }

    /// Set the width of `column` to `requested`, clamped into bounds
    ///
    /// Returns the width that was applied.
    pub fn resize(&mut self, column: &str, requested: f64) -> f64 {
        let applied = self.limits.clamp(requested);
        self.store_width(column, applied);
        applied
    }

    /// Size `column` to fit its measured header and cells plus padding
    ///
    /// Non-finite measurements are ignored. Without any cell measurements
    /// the header alone decides.
    pub fn auto_size(&mut self, column: &str, header_width: f64, cell_widths: &[f64]) -> f64 {
        let widest_cell = cell_widths
            .iter()
            .copied()
            .filter(|w| w.is_finite())
            .fold(0.0, f64::max);
        let header = if header_width.is_finite() {
            header_width
        } else {
            0.0
        };

        let applied = self.limits.clamp(header.max(widest_cell) + self.limits.padding);
        self.store_width(column, applied);
        applied
    }

    /// Measure the header and the given cells of `column`, then autosize it
    pub fn auto_size_with<M: Measure + ?Sized>(
        &mut self,
        measure: &M,
        column: &str,
        rows: &[&Row],
    ) -> f64 {
        let header_width = measure.text_width(column);
        let cell_widths: Vec<f64> = rows
            .iter()
            .map(|row| measure.text_width(cell(row, column)))
            .collect();
        self.auto_size(column, header_width, &cell_widths)
    }

    fn store_width(&mut self, column: &str, width: f64) {
        if let Some(slot) = self.widths.get_mut(column) {
            *slot = width;
        } else {
            trace!(column, "Ignoring width for untracked column");
        }
    }
}
