//! Error types for dialogue-forge operations.
//!
//! Defines error types for the major subsystems:
//! - Weighted sampling primitives
//! - Profile generation and forced-override validation
//! - LLM collaborator interactions
//! - Session orchestration
//! - Session record export

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the weighted categorical sampler.
///
/// These are configuration errors: a weight table that triggers one of them
/// is malformed and the run must stop before any session starts. There is no
/// silent uniform fallback for a degenerate weight vector.
#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("Cannot sample from an empty category set")]
    EmptyCategories,

    #[error("Negative weight {weight} at index {index}")]
    NegativeWeight { index: usize, weight: f64 },

    #[error("Weight vector sums to zero: distribution is undefined")]
    ZeroWeightSum,

    #[error("Weights count ({weights}) does not match categories count ({categories})")]
    WeightsMismatch { weights: usize, categories: usize },

    #[error("Cannot draw {requested} items without replacement from a pool of {available}")]
    PoolExhausted { requested: usize, available: usize },
}

/// Errors that can occur while building a patient profile or doctor
/// configuration, chiefly forced overrides that name a value absent from
/// the fixed tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    #[error("Unknown doctor persona '{0}'")]
    UnknownPersona(String),

    #[error("Unknown age range '{0}'")]
    UnknownAgeRange(String),

    #[error("Invalid value '{value}' for {field}")]
    InvalidFieldValue { field: String, value: String },

    #[error("Sampler error: {0}")]
    Sampler(#[from] SamplerError),
}

/// Errors that can occur during LLM collaborator calls.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key: OPENROUTER_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Collaborator call timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },

    #[error("Empty response from model '{0}'")]
    EmptyResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while orchestrating a session.
///
/// Malformed collaborator output and budget exhaustion are deliberately not
/// represented here: the former is recovered locally with a safe default
/// decision, the latter is a defined terminal outcome of the session record.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors that can occur while persisting session records.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create output directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write record '{}': {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
