// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Workout plans and exercise progress tracking

use crate::constants::model_defaults::{MAX_PERCEIVED_EXERTION, MIN_PERCEIVED_EXERTION};
use crate::errors::{RecommendationError, Result};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Perceived difficulty of a workout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Hard,
}

/// A single exercise prescribed by a workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Exercise {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sets: None,
            reps: None,
            duration_seconds: None,
            rest_seconds: None,
            notes: None,
        }
    }

    pub fn with_sets(mut self, sets: u32) -> Self {
        self.sets = Some(sets);
        self
    }

    pub fn with_reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn with_duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = Some(seconds);
        self
    }
}

/// Record of a completed exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseCompletion {
    pub exercise_id: String,
    pub completed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_reps: Option<u32>,
}

/// Result of [`WorkoutPlan::complete_exercise`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseCompletionOutcome {
    Completed,
    /// The exercise was already completed; nothing changed
    AlreadyCompleted,
    /// No exercise with that id in the plan; nothing changed
    NotFound,
}

/// Measurements recorded after a workout session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSessionStats {
    /// Minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Borg CR10 style, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceived_exertion: Option<u8>,
}

impl WorkoutSessionStats {
    fn check(&self) -> Result<()> {
        if let Some(rpe) = self.perceived_exertion {
            if !(MIN_PERCEIVED_EXERTION..=MAX_PERCEIVED_EXERTION).contains(&rpe) {
                return Err(RecommendationError::invalid(
                    "perceivedExertion",
                    format!(
                        "must be between {MIN_PERCEIVED_EXERTION} and {MAX_PERCEIVED_EXERTION}, got {rpe}"
                    ),
                ));
            }
        }
        if let (Some(average), Some(max)) = (self.average_heart_rate, self.max_heart_rate) {
            if average > max {
                return Err(RecommendationError::invalid(
                    "averageHeartRate",
                    format!("{average} exceeds max heart rate {max}"),
                ));
            }
        }
        Ok(())
    }
}

/// Workout payload of a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Minutes
    #[serde(default)]
    pub estimated_duration: f64,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm_up: Option<Vec<Exercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cool_down: Option<Vec<Exercise>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<Exercise>>,

    #[serde(default)]
    completed_exercises: Vec<ExerciseCompletion>,
    #[serde(flatten)]
    session: WorkoutSessionStats,
}

impl WorkoutPlan {
    pub fn new(exercises: Vec<Exercise>, estimated_duration: f64, target_muscles: Vec<String>) -> Self {
        Self {
            exercises,
            estimated_duration,
            difficulty: Difficulty::default(),
            target_muscles,
            equipment: Vec::new(),
            warm_up: None,
            cool_down: None,
            alternatives: None,
            completed_exercises: Vec::new(),
            session: WorkoutSessionStats::default(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_equipment(mut self, equipment: Vec<String>) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_warm_up(mut self, warm_up: Vec<Exercise>) -> Self {
        self.warm_up = Some(warm_up);
        self
    }

    pub fn with_cool_down(mut self, cool_down: Vec<Exercise>) -> Self {
        self.cool_down = Some(cool_down);
        self
    }

    pub fn with_alternatives(mut self, alternatives: Vec<Exercise>) -> Self {
        self.alternatives = Some(alternatives);
        self
    }

    pub fn complete_exercise(
        &mut self,
        exercise_id: &str,
        actual_sets: Option<u32>,
        actual_reps: Option<u32>,
    ) -> ExerciseCompletionOutcome {
        self.complete_exercise_at(exercise_id, actual_sets, actual_reps, Utc::now())
    }

    /// Record completion of an exercise from the main sequence.
    ///
    /// Completion is idempotent per exercise id and unknown ids are ignored.
    pub fn complete_exercise_at(
        &mut self,
        exercise_id: &str,
        actual_sets: Option<u32>,
        actual_reps: Option<u32>,
        now: DateTime<Utc>,
    ) -> ExerciseCompletionOutcome {
        if !self.exercises.iter().any(|exercise| exercise.id == exercise_id) {
            debug!(exercise.id = %exercise_id, "Exercise not in workout, ignoring");
            return ExerciseCompletionOutcome::NotFound;
        }
        if self.is_exercise_completed(exercise_id) {
            return ExerciseCompletionOutcome::AlreadyCompleted;
        }

        self.completed_exercises.push(ExerciseCompletion {
            exercise_id: exercise_id.to_string(),
            completed_at: now,
            actual_sets,
            actual_reps,
        });
        AppLogger::log_progress_event(
            "exercise_completed",
            exercise_id,
            self.completion_percentage(),
        );
        ExerciseCompletionOutcome::Completed
    }

    pub fn is_exercise_completed(&self, exercise_id: &str) -> bool {
        self.completed_exercises
            .iter()
            .any(|completion| completion.exercise_id == exercise_id)
    }

    pub fn completed_exercises(&self) -> &[ExerciseCompletion] {
        &self.completed_exercises
    }

    /// Number of distinct exercises completed, never above the exercise count
    pub fn exercises_completed(&self) -> usize {
        self.completed_exercises.len()
    }

    /// Percentage of exercises completed; 0 for an empty workout
    pub fn completion_percentage(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        self.exercises_completed() as f64 / self.exercises.len() as f64 * 100.0
    }

    /// Exercises not yet completed, in plan order
    pub fn remaining_exercises(&self) -> Vec<&Exercise> {
        self.exercises
            .iter()
            .filter(|exercise| !self.is_exercise_completed(&exercise.id))
            .collect()
    }

    /// Store post-session measurements, replacing earlier values
    pub fn record_session(&mut self, stats: WorkoutSessionStats) -> Result<()> {
        stats.check()?;
        self.session = stats;
        Ok(())
    }

    pub fn session_stats(&self) -> &WorkoutSessionStats {
        &self.session
    }

    pub(crate) fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.exercises.is_empty() {
            errors.push("Workout must contain at least one exercise".to_string());
        }
        if self.estimated_duration.is_nan() || self.estimated_duration <= 0.0 {
            errors.push("Estimated duration must be greater than 0".to_string());
        }
        if self.target_muscles.is_empty() {
            errors.push("Workout must target at least one muscle group".to_string());
        }
        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if !seen.insert(exercise.id.as_str()) {
                errors.push(format!("Duplicate exercise id: {}", exercise.id));
            }
        }
        errors
    }

    /// Reject restored session stats that `record_session` would refuse
    pub(crate) fn check_progress(&self) -> Result<()> {
        self.session.check()
    }

    /// Drop restored completions for unknown or repeated exercise ids
    pub(crate) fn normalize_progress(&mut self) {
        let mut seen = HashSet::new();
        let exercises = &self.exercises;
        self.completed_exercises.retain(|completion| {
            exercises.iter().any(|exercise| exercise.id == completion.exercise_id)
                && seen.insert(completion.exercise_id.clone())
        });
    }

    pub(crate) fn fresh_copy(&self) -> Self {
        Self {
            completed_exercises: Vec::new(),
            session: WorkoutSessionStats::default(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_plan() -> WorkoutPlan {
        WorkoutPlan::new(
            vec![
                Exercise::new("push_up", "Push Up").with_sets(3).with_reps(12),
                Exercise::new("row", "Dumbbell Row").with_sets(3).with_reps(10),
                Exercise::new("plank", "Plank").with_duration_seconds(60),
                Exercise::new("curl", "Biceps Curl"),
            ],
            40.0,
            vec!["chest".into(), "back".into()],
        )
    }

    #[test]
    fn test_complete_exercise_tracks_progress() {
        let mut plan = sample_plan();
        assert_eq!(
            plan.complete_exercise("row", Some(3), Some(9)),
            ExerciseCompletionOutcome::Completed
        );
        assert_eq!(plan.exercises_completed(), 1);
        assert_eq!(plan.completion_percentage(), 25.0);

        let completion = &plan.completed_exercises()[0];
        assert_eq!(completion.exercise_id, "row");
        assert_eq!(completion.actual_sets, Some(3));
        assert_eq!(completion.actual_reps, Some(9));
    }

    #[test]
    fn test_unknown_exercise_is_noop() {
        let mut plan = sample_plan();
        let before = plan.clone();
        assert_eq!(
            plan.complete_exercise("deadlift", None, None),
            ExerciseCompletionOutcome::NotFound
        );
        assert_eq!(plan, before);
        assert_eq!(plan.exercises_completed(), 0);
    }

    #[test]
    fn test_double_completion_is_idempotent() {
        let mut plan = sample_plan();
        plan.complete_exercise("plank", None, None);
        assert_eq!(
            plan.complete_exercise("plank", None, None),
            ExerciseCompletionOutcome::AlreadyCompleted
        );
        assert_eq!(plan.exercises_completed(), 1);

        for exercise in ["push_up", "row", "curl", "push_up"] {
            plan.complete_exercise(exercise, None, None);
        }
        assert_eq!(plan.exercises_completed(), 4);
        assert_eq!(plan.completion_percentage(), 100.0);
    }

    #[test]
    fn test_empty_workout_completion_is_zero() {
        let plan = WorkoutPlan::new(vec![], 30.0, vec!["legs".into()]);
        assert_eq!(plan.completion_percentage(), 0.0);
        assert!(plan.remaining_exercises().is_empty());
    }

    #[test]
    fn test_remaining_exercises_handles_awkward_ids() {
        let mut plan = WorkoutPlan::new(
            vec![
                Exercise::new("set_completed", "Tricky"),
                Exercise::new("set", "Plain"),
            ],
            20.0,
            vec!["arms".into()],
        );
        plan.complete_exercise("set_completed", None, None);

        let remaining: Vec<_> = plan.remaining_exercises().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(remaining, vec!["set"]);
    }

    #[test]
    fn test_validate_rules() {
        assert!(sample_plan().validate().is_empty());

        let errors = WorkoutPlan::new(vec![], 0.0, vec![]).validate();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("at least one exercise"));
        assert!(errors[1].contains("Estimated duration"));
        assert!(errors[2].contains("muscle group"));

        let negative = WorkoutPlan::new(vec![Exercise::new("a", "A")], -5.0, vec!["legs".into()]);
        assert_eq!(negative.validate(), vec!["Estimated duration must be greater than 0"]);

        let fractional = WorkoutPlan::new(vec![Exercise::new("a", "A")], 22.5, vec!["legs".into()]);
        assert!(fractional.validate().is_empty());
    }

    #[test]
    fn test_duplicate_exercise_ids_reported() {
        let plan = WorkoutPlan::new(
            vec![
                Exercise::new("lunge", "Lunge"),
                Exercise::new("squat", "Squat"),
                Exercise::new("lunge", "Walking Lunge"),
            ],
            25.0,
            vec!["legs".into()],
        );
        assert_eq!(plan.validate(), vec!["Duplicate exercise id: lunge"]);
    }

    #[test]
    fn test_check_progress_rejects_bad_session() {
        let mut plan = sample_plan();
        plan.session.perceived_exertion = Some(42);
        assert!(plan.check_progress().is_err());

        plan.session = WorkoutSessionStats {
            average_heart_rate: Some(180),
            max_heart_rate: Some(150),
            ..Default::default()
        };
        assert!(matches!(
            plan.check_progress(),
            Err(RecommendationError::InvalidField { field: "averageHeartRate", .. })
        ));
        assert!(sample_plan().check_progress().is_ok());
    }

    #[test]
    fn test_record_session() {
        let mut plan = sample_plan();
        plan.record_session(WorkoutSessionStats {
            actual_duration: Some(42),
            calories_burned: Some(380),
            average_heart_rate: Some(138),
            max_heart_rate: Some(171),
            perceived_exertion: Some(7),
        })
        .unwrap();
        assert_eq!(plan.session_stats().calories_burned, Some(380));

        let err = plan
            .record_session(WorkoutSessionStats {
                perceived_exertion: Some(11),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, RecommendationError::InvalidField { field: "perceivedExertion", .. }));
        assert_eq!(plan.session_stats().actual_duration, Some(42));
    }

    #[test]
    fn test_serialization_round_trip_keeps_progress() {
        let mut plan = sample_plan().with_difficulty(Difficulty::Hard);
        plan.complete_exercise("curl", Some(2), None);
        plan.record_session(WorkoutSessionStats {
            calories_burned: Some(250),
            ..Default::default()
        })
        .unwrap();

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["difficulty"], "hard");
        assert_eq!(json["caloriesBurned"], 250);
        assert_eq!(json["completedExercises"][0]["exerciseId"], "curl");

        let restored: WorkoutPlan = serde_json::from_value(json).unwrap();
        assert_eq!(restored, plan);
    }
}
