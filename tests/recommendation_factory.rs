// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Factory dispatch and payload error integration tests

use anyhow::Result;
use pierre_recommendations::config::RecommendationDefaults;
use pierre_recommendations::recommendation::{
    Difficulty, RecommendationFactory, RecommendationSource, RecommendationType,
};
use pierre_recommendations::RecommendationError;
use serde_json::{json, Value};

fn nutrition_payload() -> Value {
    json!({
        "id": "n-9",
        "userId": "athlete-3",
        "type": "nutrition",
        "title": "Race week fueling",
        "description": "Carb loading",
        "dailyCalories": 3200,
        "macroTargets": {"protein": 140, "carbs": 480, "fat": 70},
        "mealPlan": [
            {"mealType": "breakfast", "name": "Oats", "calories": 700, "foods": ["oats", "banana"]}
        ],
        "hydrationGoal": 3500,
        "tips": ["Sip electrolytes"]
    })
}

#[test]
fn test_unknown_type_is_rejected() {
    let mut payload = nutrition_payload();
    payload["type"] = json!("meditation");

    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(err, RecommendationError::UnknownRecommendationType(ref name) if name == "meditation"));
}

#[test]
fn test_non_string_type_is_unknown() {
    let mut payload = nutrition_payload();
    payload["type"] = json!(7);

    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(err.is_unknown_type());
}

#[test]
fn test_nutrition_payload() -> Result<()> {
    let rec = RecommendationFactory::new().create(nutrition_payload())?;
    assert_eq!(rec.recommendation_type(), RecommendationType::Nutrition);

    let plan = rec.nutrition().unwrap();
    assert_eq!(plan.daily_calories, 3200.0);
    assert_eq!(plan.meal_plan.len(), 1);
    assert_eq!(plan.meal_plan[0].foods, vec!["oats", "banana"]);
    assert_eq!(plan.tips.as_deref(), Some(&["Sip electrolytes".to_string()][..]));
    assert!(rec.validate().is_valid);
    Ok(())
}

#[test]
fn test_workout_defaults() -> Result<()> {
    let rec = RecommendationFactory::new().create(json!({
        "id": "w-9",
        "userId": "athlete-3",
        "type": "workout",
        "title": "Intervals",
        "description": "8x400m",
        "exercises": [{"id": "rep", "name": "400m repeat", "sets": 8}],
        "estimatedDuration": 40,
        "targetMuscles": ["legs"]
    }))?;

    assert!(rec.is_active());
    assert!(!rec.is_completed());
    assert_eq!(rec.view_count(), 0);
    assert_eq!(rec.source(), RecommendationSource::AiGenerated);
    assert_eq!(rec.confidence(), 1.0);
    assert_eq!(rec.version(), "1.0");
    assert_eq!(rec.workout().unwrap().difficulty, Difficulty::Moderate);
    Ok(())
}

#[test]
fn test_factory_defaults_fill_missing_tracking() -> Result<()> {
    let factory = RecommendationFactory::with_defaults(RecommendationDefaults {
        source: RecommendationSource::ExpertCurated,
        confidence: 0.75,
        version: "2.0".into(),
    });

    let mut payload = nutrition_payload();
    payload["metadata"] = json!({"source": "rule_based"});
    let rec = factory.create(payload)?;

    assert_eq!(rec.source(), RecommendationSource::RuleBased);
    assert_eq!(rec.confidence(), 0.75);
    assert_eq!(rec.version(), "2.0");
    assert!(rec.metadata().is_empty());
    Ok(())
}

#[test]
fn test_missing_identity_is_rejected() {
    let mut payload = nutrition_payload();
    payload["userId"] = json!("   ");

    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(err, RecommendationError::MissingField("userId")));
}

#[test]
fn test_malformed_payload_is_rejected() {
    let mut payload = nutrition_payload();
    payload["dailyCalories"] = json!("lots");

    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(err, RecommendationError::InvalidPayload(_)));
}

#[test]
fn test_negative_restored_progress_is_rejected() {
    let mut payload = nutrition_payload();
    payload["caloriesConsumed"] = json!(-10);

    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(
        err,
        RecommendationError::InvalidField { field: "caloriesConsumed", .. }
    ));
}

fn workout_payload(duration: Value) -> Value {
    json!({
        "id": "w-10",
        "userId": "athlete-3",
        "type": "workout",
        "title": "Tempo run",
        "description": "Steady effort",
        "exercises": [{"id": "tempo", "name": "Tempo block"}],
        "estimatedDuration": duration,
        "targetMuscles": ["legs"]
    })
}

#[test]
fn test_bad_duration_reaches_model_validation() -> Result<()> {
    let rec = RecommendationFactory::new().create(workout_payload(json!(-5)))?;
    let report = rec.validate();
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec!["Estimated duration must be greater than 0"]);
    Ok(())
}

#[test]
fn test_fractional_duration_is_accepted() -> Result<()> {
    let rec = RecommendationFactory::new().create(workout_payload(json!(22.5)))?;
    assert_eq!(rec.workout().unwrap().estimated_duration, 22.5);
    assert!(rec.validate().is_valid);
    Ok(())
}

#[test]
fn test_restored_session_stats_are_checked() {
    let mut payload = workout_payload(json!(30));
    payload["perceivedExertion"] = json!(42);
    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(
        err,
        RecommendationError::InvalidField { field: "perceivedExertion", .. }
    ));

    let mut payload = workout_payload(json!(30));
    payload["averageHeartRate"] = json!(175);
    payload["maxHeartRate"] = json!(160);
    let err = RecommendationFactory::new().create(payload).unwrap_err();
    assert!(matches!(
        err,
        RecommendationError::InvalidField { field: "averageHeartRate", .. }
    ));
}

#[test]
fn test_duplicate_exercise_ids_fail_validation() -> Result<()> {
    let mut payload = workout_payload(json!(30));
    payload["exercises"] = json!([
        {"id": "tempo", "name": "Tempo block"},
        {"id": "tempo", "name": "Tempo block again"}
    ]);
    let mut rec = RecommendationFactory::new().create(payload)?;
    assert_eq!(rec.validate().errors, vec!["Duplicate exercise id: tempo"]);

    let plan = rec.workout_mut().unwrap();
    plan.complete_exercise("tempo", None, None);
    assert!(plan.remaining_exercises().is_empty());
    Ok(())
}
