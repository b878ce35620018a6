//! Writing export payloads to disk

use crate::model::export::ExportPayload;
use crate::services::csv_codec;
use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::info;

/// File name used when no data source is selected
pub const FALLBACK_FILE_NAME: &str = "export.csv";

/// Characters that are not safe in a file name on every platform
static UNSAFE_FILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[^A-Za-z0-9._() -]"#).unwrap());

/// File name for an export of `source_id`
///
/// URL-style identifiers keep only their last path segment.
pub fn export_file_name(source_id: Option<&str>) -> String {
    let Some(id) = source_id else {
        return FALLBACK_FILE_NAME.to_string();
    };

    let last_segment = id.rsplit('/').next().unwrap_or(id);
    let cleaned = UNSAFE_FILE_CHARS.replace_all(last_segment, "_");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());

    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else if cleaned.to_ascii_lowercase().ends_with(".csv") {
        cleaned.to_string()
    } else {
        format!("{}.csv", cleaned)
    }
}

/// Serialize `payload` into `dir/file_name`, creating `dir` if needed
pub fn write_export(dir: &Path, file_name: &str, payload: &ExportPayload) -> Result<PathBuf> {
    let text = csv_codec::serialize(payload)?;

    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    }

    let path = dir.join(file_name);
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), rows = payload.rows.len(), "Exported rows");
    Ok(path)
}
