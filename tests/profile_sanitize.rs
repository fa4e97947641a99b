// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Profile sanitization integration tests

use anyhow::Result;
use pierre_recommendations::models::{FitnessGoal, FitnessLevel, Gender};
use pierre_recommendations::validation::{UserProfileValidator, ValidationOptions};
use serde_json::json;

#[test]
fn test_age_is_clamped_to_maximum() {
    let sanitized = UserProfileValidator::new().sanitize(&json!({"age": 200}));
    assert_eq!(sanitized.age, Some(120));
    assert!(sanitized.goals.is_none());
}

#[test]
fn test_goals_keep_first_three_in_order() {
    let sanitized = UserProfileValidator::new().sanitize(&json!({
        "goals": ["weight_loss", "muscle_gain", "strength", "endurance"]
    }));
    assert_eq!(
        sanitized.goals,
        Some(vec![
            FitnessGoal::WeightLoss,
            FitnessGoal::MuscleGain,
            FitnessGoal::Strength
        ])
    );
}

#[test]
fn test_sanitized_profile_passes_validation() -> Result<()> {
    let validator = UserProfileValidator::new();
    let messy = json!({
        "userId": "  swimmer_9 ",
        "age": "27",
        "physicalStats": {"weight": 500, "height": 181.6, "gender": "Female"},
        "goals": ["endurance", "unicorn", "endurance"],
        "fitnessLevel": "pro",
        "activityLevel": "moderately_active",
        "extraneous": {"ignored": true}
    });

    assert!(!validator.validate(&messy, ValidationOptions::default()).is_valid);

    let sanitized = validator.sanitize(&messy);
    assert_eq!(sanitized.user_id.as_deref(), Some("swimmer_9"));
    assert_eq!(sanitized.age, Some(27));
    assert_eq!(sanitized.fitness_level, Some(FitnessLevel::Beginner));
    let stats = sanitized.physical_stats.clone().unwrap();
    assert_eq!(stats.weight, Some(300.0));
    assert_eq!(stats.height, Some(182.0));
    assert_eq!(stats.gender, Some(Gender::Female));
    assert_eq!(sanitized.goals, Some(vec![FitnessGoal::Endurance]));

    let round_trip = serde_json::to_value(&sanitized)?;
    assert!(round_trip.get("extraneous").is_none());
    assert!(round_trip.get("lifestyle").is_none());
    let report = validator.validate(&round_trip, ValidationOptions::default());
    assert!(report.is_valid, "{:?}", report.errors);
    Ok(())
}

#[test]
fn test_sanitize_respects_configured_limits() {
    let validator = UserProfileValidator::with_config(
        pierre_recommendations::config::ValidationConfig {
            max_string_length: 5,
            max_goals: 1,
            strict_by_default: false,
        },
    );
    let sanitized = validator.sanitize(&json!({
        "userId": "abcdefghij",
        "goals": ["flexibility", "strength"]
    }));
    assert_eq!(sanitized.user_id.as_deref(), Some("abcde"));
    assert_eq!(sanitized.goals, Some(vec![FitnessGoal::Flexibility]));
}
