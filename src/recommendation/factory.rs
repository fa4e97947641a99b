// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Construction of recommendations from untyped payloads

use super::{
    NutritionPlan, Recommendation, RecommendationFields, RecommendationKind, RecommendationType,
    WorkoutPlan,
};
use crate::config::RecommendationDefaults;
use crate::errors::{RecommendationError, Result};
use crate::logging::AppLogger;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Common fields plus a variant plan, read from one flat JSON object
#[derive(Debug, Deserialize)]
struct RecommendationInput<P> {
    #[serde(flatten)]
    fields: RecommendationFields,
    #[serde(flatten)]
    plan: P,
}

/// Builds the matching recommendation variant from a payload tagged by `type`
#[derive(Debug, Clone, Default)]
pub struct RecommendationFactory {
    defaults: RecommendationDefaults,
}

impl RecommendationFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults(defaults: RecommendationDefaults) -> Self {
        Self { defaults }
    }

    /// Dispatch on the `type` discriminator.
    ///
    /// Accepts both fresh construction payloads and snapshots produced by
    /// [`Recommendation::to_json`].
    pub fn create(&self, data: Value) -> Result<Recommendation> {
        let type_name = match data.get("type") {
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
            None => return Err(RecommendationError::MissingField("type")),
        };

        match RecommendationType::from_name(&type_name) {
            Some(RecommendationType::Workout) => self.create_workout(data),
            Some(RecommendationType::Nutrition) => self.create_nutrition(data),
            None => {
                warn!(recommendation_type = %type_name, "Unknown recommendation type");
                Err(RecommendationError::UnknownRecommendationType(type_name))
            }
        }
    }

    /// Build a workout recommendation, ignoring any `type` field
    pub fn create_workout(&self, data: Value) -> Result<Recommendation> {
        let input: RecommendationInput<WorkoutPlan> = serde_json::from_value(data)?;
        let mut plan = input.plan;
        plan.normalize_progress();
        plan.check_progress()?;

        let recommendation = Recommendation::with_defaults(
            input.fields,
            RecommendationKind::Workout(plan),
            &self.defaults,
        )?;
        self.log_created(&recommendation);
        Ok(recommendation)
    }

    /// Build a nutrition recommendation, ignoring any `type` field
    pub fn create_nutrition(&self, data: Value) -> Result<Recommendation> {
        let input: RecommendationInput<NutritionPlan> = serde_json::from_value(data)?;
        input.plan.check_progress()?;

        let recommendation = Recommendation::with_defaults(
            input.fields,
            RecommendationKind::Nutrition(input.plan),
            &self.defaults,
        )?;
        self.log_created(&recommendation);
        Ok(recommendation)
    }

    fn log_created(&self, recommendation: &Recommendation) {
        debug!(
            recommendation.id = %recommendation.id(),
            recommendation.kind = recommendation.recommendation_type().as_str(),
            "Recommendation constructed"
        );
        AppLogger::log_recommendation_event(recommendation.id(), recommendation.user_id(), "created");
    }
}
