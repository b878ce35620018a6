//! Action enum - All possible application actions
//!
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; polls the background loader
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Grid Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextRow,
    PrevRow,
    FirstRow,
    LastRow,
    PageUp,
    PageDown,
    /// Move the column cursor right
    NextColumn,
    /// Move the column cursor left
    PrevColumn,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenSourcePicker,
    OpenColumnPicker,
    OpenHelp,
    /// Close the current modal
    CloseModal,
    ModalUp,
    ModalDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Data Source
    // ─────────────────────────────────────────────────────────────────────────
    /// Select a source by id and start loading it
    SelectSource(String),
    /// Deselect the current source
    ClearSource,
    /// Load the current source again
    ReloadSource,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    ExitSearchMode,
    /// Add character to search query
    SearchInput(char),
    /// Remove last character from search query
    SearchBackspace,
    ClearSearch,

    // ─────────────────────────────────────────────────────────────────────────
    // Columns
    // ─────────────────────────────────────────────────────────────────────────
    /// Flip visibility of a column by name
    ToggleColumn(String),
    ShowAllColumns,
    /// Widen the selected column by one step
    WidenColumn,
    /// Narrow the selected column by one step
    NarrowColumn,
    /// Fit the selected column to its content
    AutoSizeColumn,
    /// Fit every visible column to its content
    AutoSizeAllColumns,

    // ─────────────────────────────────────────────────────────────────────────
    // Export & View
    // ─────────────────────────────────────────────────────────────────────────
    /// Export the rows matching the search
    ExportFiltered,
    /// Export every loaded row
    ExportAll,
    ToggleTheme,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextRow => write!(f, "NextRow"),
            Action::PrevRow => write!(f, "PrevRow"),
            Action::FirstRow => write!(f, "FirstRow"),
            Action::LastRow => write!(f, "LastRow"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::NextColumn => write!(f, "NextColumn"),
            Action::PrevColumn => write!(f, "PrevColumn"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenSourcePicker => write!(f, "OpenSourcePicker"),
            Action::OpenColumnPicker => write!(f, "OpenColumnPicker"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ModalUp => write!(f, "ModalUp"),
            Action::ModalDown => write!(f, "ModalDown"),
            Action::SelectSource(id) => write!(f, "SelectSource({})", id),
            Action::ClearSource => write!(f, "ClearSource"),
            Action::ReloadSource => write!(f, "ReloadSource"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::ToggleColumn(name) => write!(f, "ToggleColumn({})", name),
            Action::ShowAllColumns => write!(f, "ShowAllColumns"),
            Action::WidenColumn => write!(f, "WidenColumn"),
            Action::NarrowColumn => write!(f, "NarrowColumn"),
            Action::AutoSizeColumn => write!(f, "AutoSizeColumn"),
            Action::AutoSizeAllColumns => write!(f, "AutoSizeAllColumns"),
            Action::ExportFiltered => write!(f, "ExportFiltered"),
            Action::ExportAll => write!(f, "ExportAll"),
            Action::ToggleTheme => write!(f, "ToggleTheme"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_payload() {
        assert_eq!(Action::SelectSource("a.csv".into()).to_string(), "SelectSource(a.csv)");
        assert_eq!(Action::SearchInput('x').to_string(), "SearchInput('x')");
        assert_eq!(Action::Resize(80, 24).to_string(), "Resize(80, 24)");
    }
}
