use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_cache_size")]
    pub cache_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            cache_size: default_cache_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }
fn default_cache_size() -> u64 { 10_000 }
fn default_cache_ttl_secs() -> u64 { 300 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Maximum points per breakdown entry; must sum to 100
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_age_range_weight")]
    pub age_range: f64,
    #[serde(default = "default_modality_weight")]
    pub modality: f64,
    #[serde(default = "default_activities_weight")]
    pub activities: f64,
    #[serde(default = "default_regime_weight")]
    pub regime: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_children_count_weight")]
    pub children_count: f64,
    #[serde(default = "default_seal_weight")]
    pub seal: f64,
    #[serde(default = "default_reviews_weight")]
    pub reviews: f64,
    #[serde(default = "default_distance_bonus_weight")]
    pub distance_bonus: f64,
    #[serde(default = "default_budget_bonus_weight")]
    pub budget_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            age_range: default_age_range_weight(),
            modality: default_modality_weight(),
            activities: default_activities_weight(),
            regime: default_regime_weight(),
            availability: default_availability_weight(),
            children_count: default_children_count_weight(),
            seal: default_seal_weight(),
            reviews: default_reviews_weight(),
            distance_bonus: default_distance_bonus_weight(),
            budget_bonus: default_budget_bonus_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            age_range: config.age_range,
            modality: config.modality,
            activities: config.activities,
            regime: config.regime,
            availability: config.availability,
            children_count: config.children_count,
            seal: config.seal,
            reviews: config.reviews,
            distance_bonus: config.distance_bonus,
            budget_bonus: config.budget_bonus,
        }
    }
}

fn default_age_range_weight() -> f64 { 15.0 }
fn default_modality_weight() -> f64 { 10.0 }
fn default_activities_weight() -> f64 { 15.0 }
fn default_regime_weight() -> f64 { 10.0 }
fn default_availability_weight() -> f64 { 15.0 }
fn default_children_count_weight() -> f64 { 10.0 }
fn default_seal_weight() -> f64 { 10.0 }
fn default_reviews_weight() -> f64 { 10.0 }
fn default_distance_bonus_weight() -> f64 { 3.0 }
fn default_budget_bonus_weight() -> f64 { 2.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CAREMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CAREMATCH__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Weight table from configuration
    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("CAREMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
        assert_eq!(weights.total(), 100.0);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_partial_weight_override() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [scoring.weights]
            age_range = 20.0
            availability = 10.0
        "#;

        let settings: Settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let weights = settings.scoring_weights();
        assert_eq!(weights.age_range, 20.0);
        assert_eq!(weights.availability, 10.0);
        assert_eq!(weights.modality, 10.0);
        assert!(weights.validate().is_ok());
        assert_eq!(settings.matching.max_limit, 100);
        assert_eq!(settings.logging.format, "json");
    }
}
