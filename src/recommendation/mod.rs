// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Recommendation Module
//!
//! Stores and tracks workout and nutrition recommendations once they have
//! been produced by a generation engine.
//!
//! A [`Recommendation`] is a shared record (identity, display fields,
//! lifecycle and engagement tracking) plus a [`RecommendationKind`] payload
//! selected by the `type` discriminator. Shared lifecycle operations live on
//! the record; progress tracking lives on the variant plans:
//! - [`WorkoutPlan`]: exercise completion and session statistics
//! - [`NutritionPlan`]: meal and hydration logging with adherence
//!
//! The snapshot produced by [`Recommendation::to_json`] folds tracking state
//! into the `metadata` object; [`RecommendationFactory`] reads it back.

use crate::config::RecommendationDefaults;
use crate::constants::metadata_keys;
use crate::errors::{RecommendationError, Result};
use crate::logging::AppLogger;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

pub mod factory;
pub mod nutrition;
pub mod workout;

pub use factory::RecommendationFactory;
pub use nutrition::{MacroAdherence, Macros, MealLog, NutritionPlan, PlannedMeal, WaterIntakeEntry};
pub use workout::{
    Difficulty, Exercise, ExerciseCompletion, ExerciseCompletionOutcome, WorkoutPlan,
    WorkoutSessionStats,
};

/// Free-form caller annotations, insertion ordered
pub type Metadata = Map<String, Value>;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Discriminator selecting the recommendation variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationType {
    Workout,
    Nutrition,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Workout => "workout",
            Self::Nutrition => "nutrition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "workout" => Some(Self::Workout),
            "nutrition" => Some(Self::Nutrition),
            _ => None,
        }
    }
}

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    #[default]
    AiGenerated,
    ApiBased,
    RuleBased,
    ExpertCurated,
}

impl RecommendationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AiGenerated => "ai_generated",
            Self::ApiBased => "api_based",
            Self::RuleBased => "rule_based",
            Self::ExpertCurated => "expert_curated",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ai_generated" => Some(Self::AiGenerated),
            "api_based" => Some(Self::ApiBased),
            "rule_based" => Some(Self::RuleBased),
            "expert_curated" => Some(Self::ExpertCurated),
            _ => None,
        }
    }
}

/// User rating between 1 and 5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self> {
        use crate::constants::model_defaults::{MAX_RATING, MIN_RATING};

        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RecommendationError::invalid(
                "rating",
                format!("must be between {MIN_RATING} and {MAX_RATING}, got {value}"),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = RecommendationError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Variant payload of a recommendation
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationKind {
    Workout(WorkoutPlan),
    Nutrition(NutritionPlan),
}

impl RecommendationKind {
    pub fn recommendation_type(&self) -> RecommendationType {
        match self {
            Self::Workout(_) => RecommendationType::Workout,
            Self::Nutrition(_) => RecommendationType::Nutrition,
        }
    }

    fn validate(&self) -> Vec<String> {
        match self {
            Self::Workout(plan) => plan.validate(),
            Self::Nutrition(plan) => plan.validate(),
        }
    }

    /// Same plan content with progress cleared
    fn fresh_copy(&self) -> Self {
        match self {
            Self::Workout(plan) => Self::Workout(plan.fresh_copy()),
            Self::Nutrition(plan) => Self::Nutrition(plan.fresh_copy()),
        }
    }

    fn snapshot_fields(&self) -> Result<Metadata> {
        let (value, derived) = match self {
            Self::Workout(plan) => (
                serde_json::to_value(plan)?,
                ("exercisesCompleted", Value::from(plan.exercises_completed())),
            ),
            Self::Nutrition(plan) => (
                serde_json::to_value(plan)?,
                ("mealsCompleted", Value::from(plan.meals_completed())),
            ),
        };

        let mut fields = match value {
            Value::Object(map) => map,
            _ => Metadata::new(),
        };
        fields.insert(derived.0.to_string(), derived.1);
        Ok(fields)
    }
}

/// Common construction fields shared by every variant
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationFields {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Caller annotations; reserved tracking keys found here are restored
    /// into tracking state rather than kept as annotations
    #[serde(default)]
    pub metadata: Metadata,
}

impl RecommendationFields {
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Tracking values carried under reserved metadata keys
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TrackingSnapshot {
    is_active: Option<bool>,
    is_completed: Option<bool>,
    completed_at: Option<DateTime<Utc>>,
    rating: Option<Rating>,
    feedback: Option<String>,
    view_count: Option<u64>,
    share_count: Option<u64>,
    source: Option<RecommendationSource>,
    confidence: Option<f64>,
    version: Option<String>,
    last_viewed_at: Option<DateTime<Utc>>,
    last_shared_at: Option<DateTime<Utc>>,
}

/// Outcome of structural validation on a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ModelValidation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// A stored workout or nutrition recommendation with its tracking state
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    id: String,
    user_id: String,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    metadata: Metadata,
    is_active: bool,
    is_completed: bool,
    view_count: u64,
    share_count: u64,
    last_viewed_at: Option<DateTime<Utc>>,
    last_shared_at: Option<DateTime<Utc>>,
    rating: Option<Rating>,
    feedback: Option<String>,
    source: RecommendationSource,
    confidence: f64,
    version: String,
    kind: RecommendationKind,
}

impl Recommendation {
    /// Build a recommendation using the built-in defaults
    pub fn new(fields: RecommendationFields, kind: RecommendationKind) -> Result<Self> {
        Self::with_defaults(fields, kind, &RecommendationDefaults::default())
    }

    /// Build a recommendation, filling absent tracking values from `defaults`
    pub fn with_defaults(
        fields: RecommendationFields,
        kind: RecommendationKind,
        defaults: &RecommendationDefaults,
    ) -> Result<Self> {
        let RecommendationFields {
            id,
            user_id,
            title,
            description,
            created_at,
            expires_at,
            metadata,
        } = fields;

        require_non_empty("id", &id)?;
        require_non_empty("userId", &user_id)?;
        require_non_empty("title", &title)?;
        require_non_empty("description", &description)?;

        let (metadata, tracking) = split_tracking(metadata)?;

        let confidence = tracking.confidence.unwrap_or(defaults.confidence);
        check_confidence(confidence)?;

        Ok(Self {
            id,
            user_id,
            title,
            description,
            created_at: created_at.unwrap_or_else(Utc::now),
            expires_at,
            completed_at: tracking.completed_at,
            metadata,
            is_active: tracking.is_active.unwrap_or(true),
            is_completed: tracking.is_completed.unwrap_or(false),
            view_count: tracking.view_count.unwrap_or(0),
            share_count: tracking.share_count.unwrap_or(0),
            last_viewed_at: tracking.last_viewed_at,
            last_shared_at: tracking.last_shared_at,
            rating: tracking.rating,
            feedback: tracking.feedback,
            source: tracking.source.unwrap_or(defaults.source),
            confidence,
            version: tracking.version.unwrap_or_else(|| defaults.version.clone()),
            kind,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn recommendation_type(&self) -> RecommendationType {
        self.kind.recommendation_type()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn view_count(&self) -> u64 {
        self.view_count
    }

    pub fn share_count(&self) -> u64 {
        self.share_count
    }

    pub fn last_viewed_at(&self) -> Option<DateTime<Utc>> {
        self.last_viewed_at
    }

    pub fn last_shared_at(&self) -> Option<DateTime<Utc>> {
        self.last_shared_at
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn source(&self) -> RecommendationSource {
        self.source
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn kind(&self) -> &RecommendationKind {
        &self.kind
    }

    pub fn workout(&self) -> Option<&WorkoutPlan> {
        match &self.kind {
            RecommendationKind::Workout(plan) => Some(plan),
            RecommendationKind::Nutrition(_) => None,
        }
    }

    /// Mutable access to the workout plan; the variant itself cannot change
    pub fn workout_mut(&mut self) -> Option<&mut WorkoutPlan> {
        match &mut self.kind {
            RecommendationKind::Workout(plan) => Some(plan),
            RecommendationKind::Nutrition(_) => None,
        }
    }

    pub fn nutrition(&self) -> Option<&NutritionPlan> {
        match &self.kind {
            RecommendationKind::Nutrition(plan) => Some(plan),
            RecommendationKind::Workout(_) => None,
        }
    }

    /// Mutable access to the nutrition plan; the variant itself cannot change
    pub fn nutrition_mut(&mut self) -> Option<&mut NutritionPlan> {
        match &mut self.kind {
            RecommendationKind::Nutrition(plan) => Some(plan),
            RecommendationKind::Workout(_) => None,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn mark_as_viewed(&mut self) {
        self.mark_as_viewed_at(Utc::now());
    }

    pub fn mark_as_viewed_at(&mut self, now: DateTime<Utc>) {
        self.view_count = self.view_count.saturating_add(1);
        self.last_viewed_at = Some(now);
        debug!(recommendation.id = %self.id, views = self.view_count, "Recommendation viewed");
        AppLogger::log_recommendation_event(&self.id, &self.user_id, "viewed");
    }

    /// Mark the recommendation completed, optionally recording user feedback.
    ///
    /// Completion is sticky: a second call keeps the first `completed_at`
    /// but replaces rating and feedback when they are supplied.
    pub fn mark_as_completed(&mut self, rating: Option<Rating>, feedback: Option<String>) {
        self.mark_as_completed_at(rating, feedback, Utc::now());
    }

    pub fn mark_as_completed_at(
        &mut self,
        rating: Option<Rating>,
        feedback: Option<String>,
        now: DateTime<Utc>,
    ) {
        if !self.is_completed {
            self.is_completed = true;
            self.completed_at = Some(now);
        }
        if rating.is_some() {
            self.rating = rating;
        }
        if feedback.is_some() {
            self.feedback = feedback;
        }
        AppLogger::log_recommendation_event(&self.id, &self.user_id, "completed");
    }

    pub fn mark_as_shared(&mut self) {
        self.mark_as_shared_at(Utc::now());
    }

    pub fn mark_as_shared_at(&mut self, now: DateTime<Utc>) {
        self.share_count = self.share_count.saturating_add(1);
        self.last_shared_at = Some(now);
        AppLogger::log_recommendation_event(&self.id, &self.user_id, "shared");
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// True iff an expiry is set and `now` is strictly past it
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    pub fn age_in_days(&self) -> i64 {
        self.age_in_days_at(Utc::now())
    }

    /// Whole days since creation, rounded up; tolerant of clock skew
    pub fn age_in_days_at(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.created_at).num_milliseconds().abs();
        (elapsed + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }

    /// Shallow-merge caller annotations, last write wins per key.
    ///
    /// The whole batch is rejected if any key is reserved for tracking data.
    pub fn update_metadata(&mut self, updates: Metadata) -> Result<()> {
        if let Some(key) = updates.keys().find(|key| metadata_keys::is_reserved(key)) {
            warn!(recommendation.id = %self.id, key = %key, "Rejected reserved metadata key");
            return Err(RecommendationError::ReservedMetadataKey(key.clone()));
        }
        self.metadata.extend(updates);
        Ok(())
    }

    /// Flattened external representation.
    ///
    /// Identity, display fields and timestamps sit at the top level with the
    /// variant plan; tracking fields are folded into `metadata`.
    pub fn to_json(&self) -> Result<Value> {
        let mut snapshot = Metadata::new();
        snapshot.insert("id".into(), Value::from(self.id.as_str()));
        snapshot.insert("userId".into(), Value::from(self.user_id.as_str()));
        snapshot.insert(
            "type".into(),
            Value::from(self.recommendation_type().as_str()),
        );
        snapshot.insert("title".into(), Value::from(self.title.as_str()));
        snapshot.insert("description".into(), Value::from(self.description.as_str()));
        snapshot.insert("createdAt".into(), serde_json::to_value(self.created_at)?);
        if let Some(expires_at) = self.expires_at {
            snapshot.insert("expiresAt".into(), serde_json::to_value(expires_at)?);
        }
        snapshot.insert("metadata".into(), Value::Object(self.tracking_metadata()?));
        snapshot.extend(self.kind.snapshot_fields()?);

        Ok(Value::Object(snapshot))
    }

    fn tracking_metadata(&self) -> Result<Metadata> {
        let mut metadata = self.metadata.clone();
        metadata.insert(metadata_keys::IS_ACTIVE.into(), Value::from(self.is_active));
        metadata.insert(metadata_keys::IS_COMPLETED.into(), Value::from(self.is_completed));
        if let Some(completed_at) = self.completed_at {
            metadata.insert(
                metadata_keys::COMPLETED_AT.into(),
                serde_json::to_value(completed_at)?,
            );
        }
        if let Some(rating) = self.rating {
            metadata.insert(metadata_keys::RATING.into(), Value::from(rating.value()));
        }
        if let Some(feedback) = &self.feedback {
            metadata.insert(metadata_keys::FEEDBACK.into(), Value::from(feedback.as_str()));
        }
        metadata.insert(metadata_keys::VIEW_COUNT.into(), Value::from(self.view_count));
        metadata.insert(metadata_keys::SHARE_COUNT.into(), Value::from(self.share_count));
        metadata.insert(metadata_keys::SOURCE.into(), Value::from(self.source.as_str()));
        metadata.insert(metadata_keys::CONFIDENCE.into(), Value::from(self.confidence));
        metadata.insert(metadata_keys::VERSION.into(), Value::from(self.version.as_str()));
        if let Some(viewed_at) = self.last_viewed_at {
            metadata.insert(
                metadata_keys::LAST_VIEWED_AT.into(),
                serde_json::to_value(viewed_at)?,
            );
        }
        if let Some(shared_at) = self.last_shared_at {
            metadata.insert(
                metadata_keys::LAST_SHARED_AT.into(),
                serde_json::to_value(shared_at)?,
            );
        }
        Ok(metadata)
    }

    /// Template copy with a new identity.
    ///
    /// Content, plan and caller metadata are copied; tracking state and plan
    /// progress start fresh and `created_at` is now.
    pub fn clone_with_id(&self, new_id: impl Into<String>) -> Result<Self> {
        let new_id = new_id.into();
        require_non_empty("id", &new_id)?;

        Ok(Self {
            id: new_id,
            user_id: self.user_id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            created_at: Utc::now(),
            expires_at: self.expires_at,
            completed_at: None,
            metadata: self.metadata.clone(),
            is_active: true,
            is_completed: false,
            view_count: 0,
            share_count: 0,
            last_viewed_at: None,
            last_shared_at: None,
            rating: None,
            feedback: None,
            source: self.source,
            confidence: self.confidence,
            version: self.version.clone(),
            kind: self.kind.fresh_copy(),
        })
    }

    /// Template copy identified by a random v4 UUID
    pub fn clone_with_fresh_id(&self) -> Result<Self> {
        self.clone_with_id(Uuid::new_v4().to_string())
    }

    /// Structural validation of the variant plan
    pub fn validate(&self) -> ModelValidation {
        ModelValidation::from_errors(self.kind.validate())
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RecommendationError::MissingField(field));
    }
    Ok(())
}

fn check_confidence(confidence: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(RecommendationError::invalid(
            "confidence",
            format!("must be within [0, 1], got {confidence}"),
        ));
    }
    Ok(())
}

/// Separate reserved tracking keys from caller annotations
fn split_tracking(metadata: Metadata) -> Result<(Metadata, TrackingSnapshot)> {
    let (reserved, annotations): (Metadata, Metadata) = metadata
        .into_iter()
        .partition(|(key, _)| metadata_keys::is_reserved(key));

    let tracking = if reserved.is_empty() {
        TrackingSnapshot::default()
    } else {
        serde_json::from_value(Value::Object(reserved))?
    };
    Ok((annotations, tracking))
}
