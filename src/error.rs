use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Model \"{model_id}\" not found in catalog")]
    ModelNotFound { model_id: String },

    #[error("Unknown interaction \"{id}\"")]
    UnknownInteraction { id: String },

    #[error("Model \"{model_id}\" is not available for interaction \"{interaction_id}\"")]
    ModelNotAllowed {
        model_id: String,
        interaction_id: String,
    },

    #[error("Invalid token range {min}..{max} (expected 0 <= min <= max)")]
    InvalidTokenRange { min: f64, max: f64 },

    #[error("Invalid base tokens {value} (must not be negative)")]
    InvalidBaseTokens { value: f64 },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub(crate) enum CatalogError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: String,
        source: serde_json::Error,
    },

    #[error("Catalog contains no models")]
    NoModels,

    #[error("Duplicate model id \"{0}\"")]
    DuplicateModel(String),

    #[error("Duplicate interaction id \"{0}\"")]
    DuplicateInteraction(String),

    #[error("Interaction \"{interaction}\" has an invalid {which} token range")]
    InvalidRange {
        interaction: String,
        which: &'static str,
    },

    #[error("Interaction \"{0}\" has negative base tokens")]
    NegativeBase(String),

    #[error("Interaction \"{interaction}\" references unknown model \"{model}\"")]
    UnknownModel { interaction: String, model: String },
}
