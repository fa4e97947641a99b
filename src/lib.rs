// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Pierre Recommendations
//!
//! Personalized workout and nutrition recommendations for the Pierre
//! fitness platform, and validation of the user profiles that drive them.
//!
//! ## Features
//!
//! - **Recommendation model**: workout and nutrition variants sharing one
//!   lifecycle (views, completion with rating/feedback, shares, expiry)
//! - **Progress tracking**: exercise completion, meal and hydration logging
//!   with adherence percentages
//! - **Flattened snapshots**: `to_json` output that the factory reads back
//! - **Profile validation**: errors vs. warnings, strict and partial modes
//! - **Sanitization**: best-effort repair of profiles for storage
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_recommendations::recommendation::RecommendationFactory;
//! use pierre_recommendations::validation::{UserProfileValidator, ValidationOptions};
//! use serde_json::json;
//!
//! fn main() -> anyhow::Result<()> {
//!     let factory = RecommendationFactory::new();
//!     let mut workout = factory.create(json!({
//!         "id": "rec-1",
//!         "userId": "athlete-7",
//!         "type": "workout",
//!         "title": "Leg day",
//!         "description": "Strength focus",
//!         "exercises": [{"id": "squat", "name": "Back Squat", "sets": 5, "reps": 5}],
//!         "estimatedDuration": 45,
//!         "targetMuscles": ["quads", "glutes"]
//!     }))?;
//!
//!     if let Some(plan) = workout.workout_mut() {
//!         plan.complete_exercise("squat", Some(5), Some(5));
//!     }
//!     println!("{}", workout.to_json()?);
//!
//!     let report = UserProfileValidator::new().validate(
//!         &json!({"age": 16, "goals": ["strength"]}),
//!         ValidationOptions::partial(),
//!     );
//!     println!("valid: {}, warnings: {:?}", report.is_valid, report.warnings);
//!     Ok(())
//! }
//! ```

/// Configuration management and persistence
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Error types for recommendation construction and tracking
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// User profile data models and vocabularies
pub mod models;

/// Workout and nutrition recommendations with lifecycle tracking
pub mod recommendation;

/// User profile validation and sanitization
pub mod validation;

pub use errors::{RecommendationError, Result};
pub use recommendation::{Recommendation, RecommendationFactory, RecommendationKind};
pub use validation::{UserProfileValidator, ValidationOptions, ValidationResult};
