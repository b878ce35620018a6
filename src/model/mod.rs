//! Model layer - the viewer engine
//!
//! - `row` / `schema` - row representation and column inference
//! - `columns` - per-column visibility and width state
//! - `filter` / `export` - search over visible columns, export projection
//! - `viewer` - the selection token and load lifecycle tying it together
//! - `modal` / `ui` - presentation state

pub mod columns;
pub mod export;
pub mod filter;
pub mod modal;
pub mod row;
pub mod schema;
pub mod source;
pub mod ui;
pub mod viewer;

pub use source::DataSource;
pub use viewer::{CommitOutcome, LoadState, LoadTicket, Viewer};
