//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the resibo pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResiboConfig {
    /// Extraction tuning.
    pub extraction: ExtractionConfig,

    /// Output defaults.
    pub output: OutputConfig,
}

impl Default for ResiboConfig {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Extraction tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Apply the stated-item-count cap (`** N item(s) **`) inside item extractors.
    pub enable_stated_count_cap: bool,

    /// Multiplier used by the item-sum-vs-total tolerance check (default 1.5,
    /// i.e. flag only when the item sum exceeds 150% of the stated total).
    pub item_sum_tolerance: f64,

    /// Run the pharmacy orphan-inference step.
    pub enable_orphan_inference: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enable_stated_count_cap: true,
            item_sum_tolerance: 1.5,
            enable_orphan_inference: true,
        }
    }
}

/// Output formatting defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format for the CLI ("json", "csv", "text").
    pub default_format: String,

    /// Currency symbol used when formatting amounts.
    pub currency_symbol: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "json".to_string(),
            currency_symbol: "₱".to_string(),
        }
    }
}

impl ResiboConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::ConfigError::Read(e.to_string()))?;
        let config = serde_json::from_str(&content).map_err(crate::error::ConfigError::Parse)?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(crate::error::ConfigError::Parse)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ResiboConfig::default();
        assert!(config.extraction.enable_stated_count_cap);
        assert_eq!(config.extraction.item_sum_tolerance, 1.5);
        assert_eq!(config.output.currency_symbol, "₱");
    }

    #[test]
    fn test_roundtrip_json() {
        let config = ResiboConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: ResiboConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.extraction.item_sum_tolerance, config.extraction.item_sum_tolerance);
    }
}
