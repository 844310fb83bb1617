//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct SiteConfig {
    /// Unique deployment identifier
    #[serde(default = "default_site_id")]
    pub id: String,
}

fn default_site_id() -> String {
    "geofence".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct StorageConfig {
    /// Path of the persisted region list (single JSON document)
    #[serde(default = "default_regions_file")]
    pub regions_file: String,
}

fn default_regions_file() -> String {
    "data/regions.json".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProviderConfig {
    /// Path of the JSONL sample file to replay
    #[serde(default = "default_samples_file")]
    pub samples_file: String,
    /// Delay between replayed samples
    #[serde(default = "default_sample_interval_ms")]
    pub interval_ms: u64,
}

fn default_samples_file() -> String {
    "data/samples.jsonl".to_string()
}

fn default_sample_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct EgressConfig {
    /// File path for event egress (JSONL format)
    #[serde(default = "default_egress_file")]
    pub file: String,
    /// Disable to keep events log-only
    #[serde(default = "default_egress_enabled")]
    pub enabled: bool,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self { file: default_egress_file(), enabled: default_egress_enabled() }
    }
}

fn default_egress_file() -> String {
    "events.jsonl".to_string()
}

fn default_egress_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval")]
    pub interval_secs: u64,
}

fn default_metrics_interval() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub egress: EgressConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    regions_file: String,
    samples_file: String,
    sample_interval_ms: u64,
    egress_file: String,
    egress_enabled: bool,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_id: default_site_id(),
            regions_file: default_regions_file(),
            samples_file: default_samples_file(),
            sample_interval_ms: default_sample_interval_ms(),
            egress_file: default_egress_file(),
            egress_enabled: true,
            metrics_interval_secs: default_metrics_interval(),
            config_file: "default".to_string(),
        }
    }
}

impl Config {
    /// Determine config file path from args or environment
    pub fn resolve_config_path(args: &[String]) -> String {
        // Check for --config argument
        for (i, arg) in args.iter().enumerate() {
            if arg == "--config" {
                if let Some(path) = args.get(i + 1) {
                    return path.clone();
                }
            }
            if let Some(path) = arg.strip_prefix("--config=") {
                return path.to_string();
            }
        }

        // Check CONFIG_FILE environment variable
        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        // Default to dev.toml
        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self {
            site_id: toml_config.site.id,
            regions_file: toml_config.storage.regions_file,
            samples_file: toml_config.provider.samples_file,
            sample_interval_ms: toml_config.provider.interval_ms,
            egress_file: toml_config.egress.file,
            egress_enabled: toml_config.egress.enabled,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file: path.display().to_string(),
        })
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn regions_file(&self) -> &str {
        &self.regions_file
    }

    pub fn samples_file(&self) -> &str {
        &self.samples_file
    }

    pub fn sample_interval_ms(&self) -> u64 {
        self.sample_interval_ms
    }

    pub fn egress_file(&self) -> &str {
        &self.egress_file
    }

    pub fn egress_enabled(&self) -> bool {
        self.egress_enabled
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}
