//! Error types for the MacroMate calculation library
//!
//! The calculation engines themselves never fail; these errors only appear at
//! the parsing and profile-finalization boundaries.

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors raised when turning user-facing strings into typed values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown weight unit: {0}")]
    WeightUnit(String),

    #[error("Unknown height unit: {0}")]
    HeightUnit(String),

    #[error("Unknown activity level: {0}")]
    ActivityLevel(String),

    #[error("Unknown biological sex: {0}")]
    BiologicalSex(String),

    #[error("Unknown gender: {0}")]
    Gender(String),

    #[error("Unknown goal: {0}")]
    Goal(String),

    #[error("Unknown change rate: {0}")]
    ChangeRate(String),

    #[error("Unknown macronutrient: {0}")]
    Macro(String),
}

/// Errors raised when an onboarding draft is finalized into a profile
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid profile: {} field(s) failed validation", .0.len())]
    Invalid(Vec<ValidationError>),
}

impl ProfileError {
    /// User-facing messages, one per problem
    pub fn user_messages(&self) -> Vec<String> {
        match self {
            ProfileError::MissingFields(labels) => labels
                .iter()
                .map(|label| format!("{}: required", label))
                .collect(),
            ProfileError::Invalid(errors) => errors.iter().map(|e| e.user_message()).collect(),
        }
    }
}
