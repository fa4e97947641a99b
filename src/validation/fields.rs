// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-field profile rules

use super::{Findings, ProfileField};
use crate::config::ValidationConfig;
use crate::constants::profile_limits::*;
use crate::models::{
    body_mass_index, ActivityLevel, DietaryRestriction, FitnessGoal, FitnessLevel, Gender,
    PreferredDuration, ProfileVocabulary, SleepQuality, StressLevel,
};
use serde_json::{Map, Value};

/// Dispatch to the validator for `field`
pub fn check_field(
    field: ProfileField,
    value: &Value,
    config: &ValidationConfig,
    allow_partial: bool,
    findings: &mut Findings,
) {
    match field {
        ProfileField::UserId => check_user_id(value, findings),
        ProfileField::Age => check_age(value, findings),
        ProfileField::PhysicalStats => check_physical_stats(value, allow_partial, findings),
        ProfileField::Goals => check_goals(value, config, findings),
        ProfileField::FitnessLevel => {
            check_required_enum::<FitnessLevel>(value, "Fitness level", findings)
        }
        ProfileField::ActivityLevel => {
            check_required_enum::<ActivityLevel>(value, "Activity level", findings)
        }
        ProfileField::DietaryRestrictions => check_dietary_restrictions(value, findings),
        ProfileField::Preferences => check_preferences(value, findings),
        ProfileField::TimeConstraints => check_time_constraints(value, findings),
        ProfileField::Lifestyle => check_lifestyle(value, findings),
    }
}

fn check_user_id(value: &Value, findings: &mut Findings) {
    let Some(user_id) = value.as_str() else {
        findings.error("User ID must be a string");
        return;
    };

    let length = user_id.chars().count();
    if length == 0 || length > USER_ID_MAX_LENGTH {
        findings.error(format!(
            "User ID must be between 1 and {} characters",
            USER_ID_MAX_LENGTH
        ));
    } else if !user_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        findings.error("User ID may only contain letters, numbers, underscores and hyphens");
    }
}

fn check_age(value: &Value, findings: &mut Findings) {
    let Some(age) = value.as_f64() else {
        findings.error("Age must be a number");
        return;
    };

    if age.fract() != 0.0 {
        findings.error("Age must be a whole number");
    } else if age < f64::from(AGE_MIN) || age > f64::from(AGE_MAX) {
        findings.error(format!("Age must be between {} and {}", AGE_MIN, AGE_MAX));
    } else if age < f64::from(AGE_MINOR_THRESHOLD) {
        findings.warning(
            "Users under 18 should consult a healthcare provider and have guardian consent before starting a fitness program",
        );
    } else if age > f64::from(AGE_SENIOR_THRESHOLD) {
        findings.warning(
            "Users over 65 should consult a healthcare provider before starting a new fitness program",
        );
    }
}

/// Checks a numeric stat and returns it when within range
fn check_measurement(
    stats: &Map<String, Value>,
    key: &str,
    label: &str,
    range: (f64, f64),
    unit: &str,
    allow_partial: bool,
    findings: &mut Findings,
) -> Option<f64> {
    match stats.get(key).filter(|v| !v.is_null()) {
        None => {
            if !allow_partial {
                findings.error(format!("{} is required", label));
            }
            None
        }
        Some(value) => match value.as_f64() {
            None => {
                findings.error(format!("{} must be a number", label));
                None
            }
            Some(number) if number < range.0 || number > range.1 => {
                findings.error(format!(
                    "{} must be between {} and {} {}",
                    label, range.0, range.1, unit
                ));
                None
            }
            Some(number) => Some(number),
        },
    }
}

fn check_physical_stats(value: &Value, allow_partial: bool, findings: &mut Findings) {
    let Some(stats) = value.as_object() else {
        findings.error("Physical stats must be an object");
        return;
    };

    let weight = check_measurement(
        stats,
        "weight",
        "Weight",
        (WEIGHT_MIN, WEIGHT_MAX),
        "kg",
        allow_partial,
        findings,
    );
    let height = check_measurement(
        stats,
        "height",
        "Height",
        (HEIGHT_MIN, HEIGHT_MAX),
        "cm",
        allow_partial,
        findings,
    );

    match stats.get("gender").filter(|v| !v.is_null()) {
        None if !allow_partial => findings.error("Gender is required"),
        None => {}
        Some(gender) => {
            if gender.as_str().and_then(Gender::from_name).is_none() {
                findings.error(format!("Gender must be one of: {}", Gender::allowed_values()));
            }
        }
    }

    if let Some(body_fat) = stats.get("bodyFatPercentage").filter(|v| !v.is_null()) {
        let in_range = body_fat
            .as_f64()
            .is_some_and(|pct| (BODY_FAT_MIN..=BODY_FAT_MAX).contains(&pct));
        if !in_range {
            findings.warning(format!(
                "Body fat percentage should be between {} and {}",
                BODY_FAT_MIN, BODY_FAT_MAX
            ));
        }
    }

    if let (Some(weight), Some(height)) = (weight, height) {
        let bmi = body_mass_index(weight, height);
        if bmi < BMI_LOW {
            findings.warning(format!(
                "BMI of {:.1} is very low; please consult a healthcare provider",
                bmi
            ));
        } else if bmi > BMI_HIGH {
            findings.warning(format!(
                "BMI of {:.1} is very high; please consult a healthcare provider",
                bmi
            ));
        }
    }
}

fn check_goals(value: &Value, config: &ValidationConfig, findings: &mut Findings) {
    let Some(goals) = value.as_array() else {
        findings.error("Goals must be an array");
        return;
    };
    if goals.is_empty() {
        findings.error("At least one goal is required");
        return;
    }

    let mut parsed = Vec::with_capacity(goals.len());
    for goal in goals {
        match goal.as_str().and_then(FitnessGoal::from_name) {
            Some(known) => parsed.push(known),
            None => findings.error(format!("Invalid goal: {}", display_value(goal))),
        }
    }

    if goals.len() > config.max_goals {
        findings.warning(format!(
            "Focusing on more than {} goals at once may reduce effectiveness",
            config.max_goals
        ));
    }
    if parsed.contains(&FitnessGoal::WeightLoss) && parsed.contains(&FitnessGoal::MuscleGain) {
        findings.warning(
            "Weight loss and muscle gain goals may conflict; consider prioritizing one at a time",
        );
    }
}

fn check_required_enum<T: ProfileVocabulary>(value: &Value, label: &str, findings: &mut Findings) {
    if value.as_str().and_then(T::from_name).is_none() {
        findings.error(format!("{} must be one of: {}", label, T::allowed_values()));
    }
}

fn check_optional_enum<T: ProfileVocabulary>(
    object: &Map<String, Value>,
    key: &str,
    label: &str,
    findings: &mut Findings,
) {
    if let Some(value) = object.get(key).filter(|v| !v.is_null()) {
        if value.as_str().and_then(T::from_name).is_none() {
            findings.warning(format!("{} should be one of: {}", label, T::allowed_values()));
        }
    }
}

fn check_dietary_restrictions(value: &Value, findings: &mut Findings) {
    let Some(restrictions) = value.as_array() else {
        findings.warning("Dietary restrictions should be an array");
        return;
    };

    for restriction in restrictions {
        if restriction
            .as_str()
            .and_then(DietaryRestriction::from_name)
            .is_none()
        {
            findings.warning(format!(
                "Unrecognized dietary restriction: {}",
                display_value(restriction)
            ));
        }
    }
}

fn check_preferences(value: &Value, findings: &mut Findings) {
    let Some(preferences) = value.as_object() else {
        findings.warning("Preferences should be an object");
        return;
    };

    for (key, entry) in preferences {
        let list_typed = key.ends_with("Exercises") || key == "availableEquipment";
        if list_typed && !entry.is_null() && !entry.is_array() {
            findings.warning(format!("Preference '{}' should be an array", key));
        }
    }
}

fn check_time_constraints(value: &Value, findings: &mut Findings) {
    let Some(constraints) = value.as_object() else {
        findings.warning("Time constraints should be an object");
        return;
    };
    check_optional_enum::<PreferredDuration>(
        constraints,
        "preferredDuration",
        "Preferred duration",
        findings,
    );
}

fn check_lifestyle(value: &Value, findings: &mut Findings) {
    let Some(lifestyle) = value.as_object() else {
        findings.warning("Lifestyle should be an object");
        return;
    };
    check_optional_enum::<StressLevel>(lifestyle, "stressLevel", "Stress level", findings);
    check_optional_enum::<SleepQuality>(lifestyle, "sleepQuality", "Sleep quality", findings);
}

/// Strings without quotes, anything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
