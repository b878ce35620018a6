//! External service interactions
//!
//! - Fetching source text over HTTP or from disk
//! - CSV parsing and serialization
//! - Background loading of sources
//! - Writing exports to disk

pub mod csv_codec;
pub mod export;
pub mod fetch;
pub mod loader;

pub use export::{export_file_name, write_export};
pub use fetch::SourceLocation;
pub use loader::{LoadMessage, SourceLoader};
