// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tunables for profile validation and sanitization

use crate::constants::profile_limits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Profile validator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Character cap applied to free-text values during sanitization
    pub max_string_length: usize,
    /// Goals above this count raise a warning and are dropped by sanitization
    pub max_goals: usize,
    /// Promote warnings to errors unless the caller overrides it
    pub strict_by_default: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_string_length: profile_limits::MAX_STRING_LENGTH,
            max_goals: profile_limits::MAX_GOALS,
            strict_by_default: false,
        }
    }
}

impl ValidationConfig {
    /// Load validation configuration from a TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read validation config file: {}", path))?;

        let config: ValidationConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse validation config file: {}", path))?;
        config.check()?;

        Ok(config)
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.max_string_length == 0 {
            anyhow::bail!("validation.max_string_length must be greater than 0");
        }
        if self.max_goals == 0 {
            anyhow::bail!("validation.max_goals must be greater than 0");
        }
        Ok(())
    }
}
