use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Looked up in the working directory at startup.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Startup configuration. Read once; never changed while the app runs.
///
/// ```json
/// { "revenue_target": 80000000, "data_path": "data.xlsx" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Expected revenue for the reporting horizon (8 Cr).
    pub revenue_target: f64,
    /// Source loaded at startup when it exists.
    pub data_path: PathBuf,
    pub window_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            revenue_target: 80_000_000.0,
            data_path: PathBuf::from("data.xlsx"),
            window_title: "Operations Revenue Dashboard".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parse a config file. Absent keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load `path` if it exists; fall back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No {} found, using default configuration", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring configuration: {e:#}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.revenue_target, 80_000_000.0);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "revenue_target": 0 }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.revenue_target, 0.0);
        assert_eq!(config.data_path, PathBuf::from("data.xlsx"));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ revenue_target: ").unwrap();

        assert!(DashboardConfig::from_file(&path).is_err());
        assert_eq!(
            DashboardConfig::load_or_default(&path),
            DashboardConfig::default()
        );
    }
}
