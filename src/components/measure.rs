//! Text measurement for the terminal grid
//!
//! Column widths are kept in pixels; the terminal draws in cells. One cell
//! is treated as `cell_px` pixels wide.

use crate::model::columns::Measure;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    cell_px: f64,
}

impl CellMeasure {
    pub fn new(cell_px: f64) -> Self {
        Self { cell_px }
    }

    /// Number of whole cells a pixel width occupies, at least one
    pub fn px_to_cells(&self, px: f64) -> u16 {
        let cells = (px / self.cell_px).round();
        if cells.is_finite() {
            cells.clamp(1.0, u16::MAX as f64) as u16
        } else {
            1
        }
    }

    pub fn cells_to_px(&self, cells: u16) -> f64 {
        cells as f64 * self.cell_px
    }
}

impl Measure for CellMeasure {
    fn text_width(&self, text: &str) -> f64 {
        text.width() as f64 * self.cell_px
    }
}

/// Cut `text` to at most `max_cells` display cells, marking the cut with `…`
pub fn truncate_to_width(text: &str, max_cells: usize) -> String {
    if text.width() <= max_cells {
        return text.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w + 1 > max_cells {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
