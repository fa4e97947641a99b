// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Domain constants for recommendations and profile validation, plus
//! environment-based configuration values.

use std::env;

/// Defaults applied when a recommendation is constructed without tracking data
pub mod model_defaults {
    /// Confidence assumed when none is supplied
    pub const CONFIDENCE: f64 = 1.0;

    /// Semantic version assumed when none is supplied
    pub const VERSION: &str = "1.0";

    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;

    pub const MIN_PERCEIVED_EXERTION: u8 = 1;
    pub const MAX_PERCEIVED_EXERTION: u8 = 10;
}

/// Metadata keys that carry tracking data in the snapshot form.
///
/// Callers may not write these through `update_metadata`.
pub mod metadata_keys {
    pub const IS_ACTIVE: &str = "isActive";
    pub const IS_COMPLETED: &str = "isCompleted";
    pub const COMPLETED_AT: &str = "completedAt";
    pub const RATING: &str = "rating";
    pub const FEEDBACK: &str = "feedback";
    pub const VIEW_COUNT: &str = "viewCount";
    pub const SHARE_COUNT: &str = "shareCount";
    pub const SOURCE: &str = "source";
    pub const CONFIDENCE: &str = "confidence";
    pub const VERSION: &str = "version";
    pub const LAST_VIEWED_AT: &str = "lastViewedAt";
    pub const LAST_SHARED_AT: &str = "lastSharedAt";

    pub const RESERVED: &[&str] = &[
        IS_ACTIVE,
        IS_COMPLETED,
        COMPLETED_AT,
        RATING,
        FEEDBACK,
        VIEW_COUNT,
        SHARE_COUNT,
        SOURCE,
        CONFIDENCE,
        VERSION,
        LAST_VIEWED_AT,
        LAST_SHARED_AT,
    ];

    /// Check whether a key is owned by tracking operations
    pub fn is_reserved(key: &str) -> bool {
        RESERVED.contains(&key)
    }
}

/// Numeric ranges enforced by the profile validator and sanitizer
pub mod profile_limits {
    pub const USER_ID_MAX_LENGTH: usize = 100;

    pub const AGE_MIN: u32 = 13;
    pub const AGE_MAX: u32 = 120;
    /// Below this age a medical consultation notice is raised
    pub const AGE_MINOR_THRESHOLD: u32 = 18;
    /// Above this age a medical consultation notice is raised
    pub const AGE_SENIOR_THRESHOLD: u32 = 65;

    /// Kilograms
    pub const WEIGHT_MIN: f64 = 30.0;
    pub const WEIGHT_MAX: f64 = 300.0;

    /// Centimetres
    pub const HEIGHT_MIN: f64 = 100.0;
    pub const HEIGHT_MAX: f64 = 250.0;

    pub const BODY_FAT_MIN: f64 = 3.0;
    pub const BODY_FAT_MAX: f64 = 50.0;

    pub const BMI_LOW: f64 = 16.0;
    pub const BMI_HIGH: f64 = 40.0;

    pub const MAX_STRING_LENGTH: usize = 100;
    pub const MAX_GOALS: usize = 3;
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }

    /// Get configuration file path from environment
    pub fn config_path() -> Option<String> {
        env::var("PIERRE_RECOMMENDATIONS_CONFIG").ok()
    }

    /// Override for the default recommendation source
    pub fn default_source() -> Option<String> {
        env::var("RECOMMENDATION_DEFAULT_SOURCE").ok()
    }

    /// Override for the default recommendation version
    pub fn default_version() -> Option<String> {
        env::var("RECOMMENDATION_DEFAULT_VERSION").ok()
    }

    /// Whether profile validation should run in strict mode by default
    pub fn strict_validation() -> Option<bool> {
        env::var("PROFILE_VALIDATION_STRICT")
            .ok()
            .and_then(|v| v.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_keys() {
        assert!(metadata_keys::is_reserved("viewCount"));
        assert!(metadata_keys::is_reserved("lastSharedAt"));
        assert!(!metadata_keys::is_reserved("coachNote"));
        assert_eq!(metadata_keys::RESERVED.len(), 12);
    }

    #[test]
    fn test_profile_limits_are_ordered() {
        assert!(profile_limits::AGE_MIN < profile_limits::AGE_MINOR_THRESHOLD);
        assert!(profile_limits::AGE_SENIOR_THRESHOLD < profile_limits::AGE_MAX);
        assert!(profile_limits::BMI_LOW < profile_limits::BMI_HIGH);
    }
}
