// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for recommendation tracking and profile validation

pub mod validation_config;

use crate::constants::{env_config, model_defaults};
use crate::recommendation::RecommendationSource;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

pub use validation_config::ValidationConfig;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub recommendation: RecommendationDefaults,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Tracking values assigned to recommendations constructed without them
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RecommendationDefaults {
    pub source: RecommendationSource,
    pub confidence: f64,
    pub version: String,
}

impl Default for RecommendationDefaults {
    fn default() -> Self {
        Self {
            source: RecommendationSource::default(),
            confidence: model_defaults::CONFIDENCE,
            version: model_defaults::VERSION.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, the user config directory,
    /// or environment overrides on top of the defaults
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path.or_else(env_config::config_path) {
            return Self::load_from_file(&config_path);
        }

        let default_path = dirs::config_dir()
            .map(|p| p.join("pierre-recommendations/config.toml"))
            .unwrap_or_else(|| "config.toml".into());

        if default_path.exists() {
            return Self::load_from_file(&default_path.to_string_lossy());
        }

        dotenv::dotenv().ok();
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        config.check()?;

        info!(config.path = %path, "Loaded recommendation configuration");
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Some(source) = env_config::default_source() {
            match RecommendationSource::from_name(&source) {
                Some(parsed) => self.recommendation.source = parsed,
                None => warn!(source = %source, "Ignoring unknown RECOMMENDATION_DEFAULT_SOURCE"),
            }
        }
        if let Some(version) = env_config::default_version() {
            self.recommendation.version = version;
        }
        if let Some(strict) = env_config::strict_validation() {
            self.validation.strict_by_default = strict;
        }
    }

    fn check(&self) -> Result<()> {
        let confidence = self.recommendation.confidence;
        if !(0.0..=1.0).contains(&confidence) {
            anyhow::bail!("recommendation.confidence must be within [0, 1], got {}", confidence);
        }
        self.validation.check()
    }
}
