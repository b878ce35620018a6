//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod column_picker;
pub mod grid;
pub mod help_dialog;
pub mod home;
pub mod layout;
pub mod measure;
pub mod quit_dialog;
pub mod source_picker;
pub mod theme;

pub use column_picker::ColumnPickerDialog;
pub use grid::GridComponent;
pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use measure::CellMeasure;
pub use quit_dialog::QuitDialog;
pub use source_picker::SourcePickerDialog;
pub use theme::Palette;
