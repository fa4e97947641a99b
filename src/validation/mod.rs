// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Profile Validation
//!
//! Checks user profiles against domain rules before they drive
//! recommendation generation, and repairs profiles for safe storage.
//!
//! Findings come in two severities:
//! - **errors** reject the profile
//! - **warnings** accept it but flag medical or best-practice concerns
//!
//! Strict mode promotes every warning to an error. Sanitization is a
//! separate path: it never reports, it only repairs.

use crate::config::ValidationConfig;
use crate::logging::AppLogger;
use crate::models::SanitizedProfile;
use serde::Serialize;
use serde_json::Value;

pub mod fields;
pub mod sanitize;

/// Fields that must be present unless partial profiles are allowed
pub const REQUIRED_FIELDS: &[&str] = &[
    "userId",
    "age",
    "physicalStats",
    "goals",
    "fitnessLevel",
    "activityLevel",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Promote warnings to errors
    pub strict: bool,
    /// Skip required-field checks for partial updates
    pub allow_partial: bool,
}

impl ValidationOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            allow_partial: false,
        }
    }

    pub fn partial() -> Self {
        Self {
            strict: false,
            allow_partial: true,
        }
    }
}

/// Outcome of validating a profile or a single field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Profile fields that have a dedicated validator, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    UserId,
    Age,
    PhysicalStats,
    Goals,
    FitnessLevel,
    ActivityLevel,
    DietaryRestrictions,
    Preferences,
    TimeConstraints,
    Lifestyle,
}

impl ProfileField {
    pub const ALL: &'static [Self] = &[
        Self::UserId,
        Self::Age,
        Self::PhysicalStats,
        Self::Goals,
        Self::FitnessLevel,
        Self::ActivityLevel,
        Self::DietaryRestrictions,
        Self::Preferences,
        Self::TimeConstraints,
        Self::Lifestyle,
    ];

    /// Key of the field in a profile object
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::UserId => "userId",
            Self::Age => "age",
            Self::PhysicalStats => "physicalStats",
            Self::Goals => "goals",
            Self::FitnessLevel => "fitnessLevel",
            Self::ActivityLevel => "activityLevel",
            Self::DietaryRestrictions => "dietaryRestrictions",
            Self::Preferences => "preferences",
            Self::TimeConstraints => "timeConstraints",
            Self::Lifestyle => "lifestyle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.wire_name() == name)
    }
}

/// Error and warning accumulator shared by the field validators
#[derive(Debug, Default)]
pub struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn finish(mut self, strict: bool) -> ValidationResult {
        if strict {
            self.errors.append(&mut self.warnings);
        }
        ValidationResult {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Stateless validator for user profiles
#[derive(Debug, Clone, Default)]
pub struct UserProfileValidator {
    config: ValidationConfig,
}

impl UserProfileValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Options honoring the configured strictness
    pub fn default_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict: self.config.strict_by_default,
            allow_partial: false,
        }
    }

    /// Run every field validator over a profile in a fixed order
    pub fn validate(&self, profile: &Value, options: ValidationOptions) -> ValidationResult {
        let mut findings = Findings::default();

        let Some(object) = profile.as_object() else {
            findings.error("Profile must be an object");
            return findings.finish(options.strict);
        };

        if !options.allow_partial {
            for field in REQUIRED_FIELDS {
                if object.get(*field).map_or(true, Value::is_null) {
                    findings.error(format!("Missing required field: {}", field));
                }
            }
        }

        for field in ProfileField::ALL {
            if let Some(value) = object.get(field.wire_name()).filter(|v| !v.is_null()) {
                fields::check_field(*field, value, &self.config, options.allow_partial, &mut findings);
            }
        }

        let result = findings.finish(options.strict);
        AppLogger::log_profile_validation(
            object.get("userId").and_then(Value::as_str),
            result.is_valid,
            result.errors.len(),
            result.warnings.len(),
            options.strict,
        );
        result
    }

    /// Re-run a single named validator, e.g. for live form feedback
    pub fn validate_field(&self, field_name: &str, value: &Value) -> ValidationResult {
        let mut findings = Findings::default();
        match ProfileField::from_name(field_name) {
            Some(field) => fields::check_field(field, value, &self.config, false, &mut findings),
            None => findings.error(format!("Unknown field: {}", field_name)),
        }
        findings.finish(false)
    }

    /// Best-effort repair of a (possibly partial) profile; never fails
    pub fn sanitize(&self, profile: &Value) -> SanitizedProfile {
        sanitize::sanitize_profile(profile, &self.config)
    }
}
