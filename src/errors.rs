// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for recommendation construction and tracking

/// Errors raised while building or mutating a recommendation
#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("Unknown recommendation type: {0}")]
    UnknownRecommendationType(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Metadata key '{0}' is reserved for tracking data")]
    ReservedMetadataKey(String),

    #[error("Invalid recommendation payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl RecommendationError {
    /// Shorthand for an [`RecommendationError::InvalidField`] error
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the error came from an unrecognized discriminator
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownRecommendationType(_))
    }
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
