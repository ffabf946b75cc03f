// ⚙️ Configuration - JSON file plus command-line overrides

use anyhow::{anyhow, Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// LAYOUT MODE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Input, Results and Charts on separate tabs
    #[default]
    Tabbed,
    /// Everything on one screen, with the spending plan and hero's journey
    Single,
}

impl LayoutMode {
    pub fn window_title(&self) -> &'static str {
        match self {
            LayoutMode::Tabbed => "Financial Independence Tracker",
            LayoutMode::Single => "Financial Adventure",
        }
    }
}

impl FromStr for LayoutMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tabbed" | "tabs" => Ok(LayoutMode::Tabbed),
            "single" => Ok(LayoutMode::Single),
            other => Err(anyhow!("unknown layout '{}', expected 'tabbed' or 'single'", other)),
        }
    }
}

// ============================================================================
// APP CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub layout: LayoutMode,

    /// Time between two financial tips
    pub tip_interval_ms: u64,

    /// How long a popup stays on screen
    pub popup_duration_ms: u64,

    /// Prefix shown before every amount
    pub currency: String,

    /// Fixed seed for events and tips; random when absent
    pub rng_seed: Option<u64>,

    /// Where UI mode writes its log; logs are discarded when absent
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            layout: LayoutMode::Tabbed,
            tip_interval_ms: 900_000,
            popup_duration_ms: 5_000,
            currency: "KES".to_string(),
            rng_seed: None,
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Load config from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tip_interval_ms == 0 {
            return Err(anyhow!("tip_interval_ms must be greater than 0"));
        }
        if self.popup_duration_ms == 0 {
            return Err(anyhow!("popup_duration_ms must be greater than 0"));
        }
        Ok(())
    }

    pub fn tip_interval(&self) -> Duration {
        Duration::from_millis(self.tip_interval_ms)
    }

    pub fn popup_duration(&self) -> Duration {
        Duration::from_millis(self.popup_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout, LayoutMode::Tabbed);
        assert_eq!(config.tip_interval(), Duration::from_millis(900_000));
        assert_eq!(config.popup_duration(), Duration::from_millis(5_000));
        assert_eq!(config.currency, "KES");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "layout": "single", "rng_seed": 42 }"#).unwrap();
        assert_eq!(config.layout, LayoutMode::Single);
        assert_eq!(config.rng_seed, Some(42));
        assert_eq!(config.tip_interval_ms, 900_000);
    }

    #[test]
    fn test_rejects_zero_interval() {
        assert!(AppConfig::from_json(r#"{ "tip_interval_ms": 0 }"#).is_err());
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(AppConfig::from_json("{ layout: ").is_err());
    }

    #[test]
    fn test_missing_file_mentions_path() {
        let err = AppConfig::from_file("/nonexistent/financial-adventure.json").unwrap_err();
        assert!(format!("{:#}", err).contains("financial-adventure.json"));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("single".parse::<LayoutMode>().unwrap(), LayoutMode::Single);
        assert_eq!("Tabbed".parse::<LayoutMode>().unwrap(), LayoutMode::Tabbed);
        assert!("grid".parse::<LayoutMode>().is_err());
        assert_eq!(LayoutMode::Single.window_title(), "Financial Adventure");
    }
}
