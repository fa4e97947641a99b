// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Best-effort profile repair
//!
//! Every present field is coerced into a safe value or dropped. Nothing
//! here reports or fails; pair with [`super::UserProfileValidator::validate`]
//! when a verdict is needed.

use crate::config::ValidationConfig;
use crate::constants::profile_limits::*;
use crate::models::{
    ActivityLevel, DietaryRestriction, FitnessGoal, FitnessLevel, Gender, Lifestyle,
    PhysicalStats, Preferences, PreferredDuration, ProfileVocabulary, SanitizedProfile,
    SleepQuality, StressLevel, TimeConstraints,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Produce a cleaned copy of a (possibly partial) profile
pub fn sanitize_profile(profile: &Value, config: &ValidationConfig) -> SanitizedProfile {
    let Some(object) = profile.as_object() else {
        debug!("Sanitizing non-object profile, returning empty profile");
        return SanitizedProfile::default();
    };
    let field = |key: &str| object.get(key).filter(|v| !v.is_null());

    SanitizedProfile {
        user_id: field("userId").and_then(|v| sanitize_string(v, config.max_string_length)),
        age: field("age")
            .and_then(|v| clamp_number(v, f64::from(AGE_MIN), f64::from(AGE_MAX)))
            .map(|age| age as u32),
        physical_stats: field("physicalStats")
            .and_then(Value::as_object)
            .map(sanitize_physical_stats),
        goals: field("goals")
            .and_then(Value::as_array)
            .map(|goals| sanitize_goals(goals, config.max_goals)),
        fitness_level: field("fitnessLevel").map(|v| coerce_enum(v, FitnessLevel::Beginner)),
        activity_level: field("activityLevel").map(|v| coerce_enum(v, ActivityLevel::Sedentary)),
        dietary_restrictions: field("dietaryRestrictions")
            .and_then(Value::as_array)
            .map(|items| filter_known::<DietaryRestriction>(items)),
        preferences: field("preferences")
            .and_then(Value::as_object)
            .map(|prefs| sanitize_preferences(prefs, config.max_string_length)),
        time_constraints: field("timeConstraints")
            .and_then(Value::as_object)
            .map(|constraints| TimeConstraints {
                preferred_duration: present(constraints, "preferredDuration")
                    .map(|v| coerce_enum(v, PreferredDuration::Medium)),
            }),
        lifestyle: field("lifestyle")
            .and_then(Value::as_object)
            .map(|lifestyle| Lifestyle {
                stress_level: present(lifestyle, "stressLevel")
                    .map(|v| coerce_enum(v, StressLevel::Moderate)),
                sleep_quality: present(lifestyle, "sleepQuality")
                    .map(|v| coerce_enum(v, SleepQuality::Fair)),
            }),
    }
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

/// Trimmed and capped at `max_length` characters; empty results are dropped
fn sanitize_string(value: &Value, max_length: usize) -> Option<String> {
    let trimmed: String = value.as_str()?.trim().chars().take(max_length).collect();
    let trimmed = trimmed.trim_end().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Numbers or numeric strings, rounded then clamped into `[min, max]`
fn clamp_number(value: &Value, min: f64, max: f64) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then(|| number.round().clamp(min, max))
}

/// Parse a vocabulary value leniently, falling back to `default`
fn coerce_enum<T: ProfileVocabulary>(value: &Value, default: T) -> T {
    parse_lenient::<T>(value).unwrap_or(default)
}

fn parse_lenient<T: ProfileVocabulary>(value: &Value) -> Option<T> {
    let normalized = value.as_str()?.trim().to_lowercase();
    T::from_name(&normalized)
}

fn filter_known<T: ProfileVocabulary + PartialEq>(items: &[Value]) -> Vec<T> {
    let mut known = Vec::new();
    for parsed in items.iter().filter_map(parse_lenient::<T>) {
        if !known.contains(&parsed) {
            known.push(parsed);
        }
    }
    known
}

fn sanitize_goals(goals: &[Value], max_goals: usize) -> Vec<FitnessGoal> {
    let mut goals = filter_known::<FitnessGoal>(goals);
    goals.truncate(max_goals);
    goals
}

fn sanitize_physical_stats(stats: &Map<String, Value>) -> PhysicalStats {
    PhysicalStats {
        weight: present(stats, "weight").and_then(|v| clamp_number(v, WEIGHT_MIN, WEIGHT_MAX)),
        height: present(stats, "height").and_then(|v| clamp_number(v, HEIGHT_MIN, HEIGHT_MAX)),
        gender: present(stats, "gender").map(|v| coerce_enum(v, Gender::Other)),
        body_fat_percentage: present(stats, "bodyFatPercentage")
            .and_then(|v| clamp_number(v, BODY_FAT_MIN, BODY_FAT_MAX)),
    }
}

fn sanitize_preferences(preferences: &Map<String, Value>, max_length: usize) -> Preferences {
    let list = |key: &str| {
        present(preferences, key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| sanitize_string(item, max_length))
                .collect::<Vec<_>>()
        })
    };

    Preferences {
        preferred_exercises: list("preferredExercises"),
        disliked_exercises: list("dislikedExercises"),
        available_equipment: list("availableEquipment"),
    }
}
