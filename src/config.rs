use crate::model::columns::WidthLimits;
use crate::model::source::{default_sources, DataSource, DEFAULT_BASE_URL};
use crate::model::ui::ThemeMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Terminal cell width assumed when converting pixel widths to columns
pub const DEFAULT_CELL_WIDTH_PX: f64 = 9.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL or local directory the source ids are resolved against
    pub base_url: String,
    /// Selectable sources, in menu order
    pub sources: Vec<DataSource>,
    pub theme: ThemeMode,
    /// Where exports are written (current directory when unset)
    pub export_dir: Option<String>,
    pub widths: WidthLimits,
    pub cell_width_px: f64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sources: default_sources(),
            theme: ThemeMode::Dark,
            export_dir: None,
            widths: WidthLimits::default(),
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            tick_rate_ms: 100,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".gameid-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the user config, falling back to defaults
    pub fn load() -> Config {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!(error = %format!("{:#}", e), "Ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Read and validate a config file
    pub fn load_from(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config.validated())
    }

    fn validated(mut self) -> Self {
        self.widths = self.widths.validated();
        if !(self.cell_width_px.is_finite() && self.cell_width_px > 0.0) {
            warn!(cell_width_px = self.cell_width_px, "Invalid cell width, using default");
            self.cell_width_px = DEFAULT_CELL_WIDTH_PX;
        }
        if self.tick_rate_ms == 0 {
            self.tick_rate_ms = Config::default().tick_rate_ms;
        }
        self
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn find_source(&self, id: &str) -> Option<&DataSource> {
        self.sources.iter().find(|s| s.id == id)
    }
}
