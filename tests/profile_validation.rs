// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! User profile validation integration tests

use pierre_recommendations::config::ValidationConfig;
use pierre_recommendations::validation::{UserProfileValidator, ValidationOptions};
use serde_json::{json, Value};

fn complete_profile() -> Value {
    json!({
        "userId": "runner_01",
        "age": 34,
        "physicalStats": {"weight": 68, "height": 172, "gender": "female", "bodyFatPercentage": 21},
        "goals": ["endurance", "general_fitness"],
        "fitnessLevel": "intermediate",
        "activityLevel": "very_active",
        "dietaryRestrictions": ["vegetarian"],
        "preferences": {"preferredExercises": ["running"], "availableEquipment": []},
        "timeConstraints": {"preferredDuration": "long"},
        "lifestyle": {"stressLevel": "low", "sleepQuality": "good"}
    })
}

#[test]
fn test_complete_profile_is_clean() {
    let result = UserProfileValidator::new().validate(&complete_profile(), ValidationOptions::default());
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_teen_with_conflicting_goals() {
    let profile = json!({
        "userId": "u1",
        "age": 16,
        "physicalStats": {"weight": 70, "height": 175, "gender": "male"},
        "goals": ["weight_loss", "muscle_gain"],
        "fitnessLevel": "beginner",
        "activityLevel": "sedentary"
    });
    let validator = UserProfileValidator::new();

    let relaxed = validator.validate(&profile, ValidationOptions::default());
    assert!(relaxed.is_valid);
    assert!(relaxed.errors.is_empty());
    assert_eq!(relaxed.warnings.len(), 2);
    assert!(relaxed.warnings.iter().any(|w| w.contains("under 18")));
    assert!(relaxed.warnings.iter().any(|w| w.contains("conflict")));

    let strict = validator.validate(&profile, ValidationOptions::strict());
    assert!(!strict.is_valid);
    assert_eq!(strict.errors, relaxed.warnings);
    assert!(strict.warnings.is_empty());
}

#[test]
fn test_errors_accumulate_in_pipeline_order() {
    let mut profile = complete_profile();
    profile["userId"] = json!("no spaces allowed");
    profile["age"] = json!(150);
    profile["goals"] = json!(["strength", "teleportation"]);
    profile["activityLevel"] = json!("couch");

    let result = UserProfileValidator::new().validate(&profile, ValidationOptions::default());
    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "User ID may only contain letters, numbers, underscores and hyphens",
            "Age must be between 13 and 120",
            "Invalid goal: teleportation",
            "Activity level must be one of: sedentary, lightly_active, moderately_active, very_active, extremely_active",
        ]
    );
}

#[test]
fn test_warning_only_fields_never_reject() {
    let mut profile = complete_profile();
    profile["dietaryRestrictions"] = json!(["fruitarian"]);
    profile["preferences"] = json!({"dislikedExercises": "burpees"});
    profile["timeConstraints"] = json!({"preferredDuration": "all_day"});
    profile["lifestyle"] = json!({"stressLevel": "low", "sleepQuality": "terrible"});
    profile["physicalStats"]["bodyFatPercentage"] = json!(1);

    let result = UserProfileValidator::new().validate(&profile, ValidationOptions::default());
    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 5);

    let strict = UserProfileValidator::new().validate(&profile, ValidationOptions::strict());
    assert_eq!(strict.errors.len(), 5);
}

#[test]
fn test_partial_updates() {
    let validator = UserProfileValidator::new();

    let update = json!({"physicalStats": {"weight": 72}});
    let result = validator.validate(&update, ValidationOptions::partial());
    assert!(result.is_valid);

    let result = validator.validate(&update, ValidationOptions::default());
    assert!(!result.is_valid);
    assert!(result.errors.contains(&"Height is required".to_string()));
    assert!(result.errors.contains(&"Missing required field: userId".to_string()));
}

#[test]
fn test_null_required_field_counts_as_missing() {
    let mut profile = complete_profile();
    profile["fitnessLevel"] = Value::Null;

    let result = UserProfileValidator::new().validate(&profile, ValidationOptions::default());
    assert_eq!(result.errors, vec!["Missing required field: fitnessLevel"]);
}

#[test]
fn test_configured_goal_cap() {
    let validator = UserProfileValidator::with_config(ValidationConfig {
        max_goals: 1,
        ..Default::default()
    });
    let result = validator.validate(&complete_profile(), ValidationOptions::default());
    assert!(result.is_valid);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_validate_single_field() {
    let validator = UserProfileValidator::new();

    assert!(validator.validate_field("goals", &json!(["strength"])).is_valid);
    let teen = validator.validate_field("age", &json!(15));
    assert!(teen.is_valid);
    assert_eq!(teen.warnings.len(), 1);

    let stats = validator.validate_field("physicalStats", &json!({"weight": 80}));
    assert_eq!(stats.errors, vec!["Height is required", "Gender is required"]);
}
