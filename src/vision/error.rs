// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving a model or running a prediction
#[derive(Debug, Error)]
pub enum PredictError {
    /// Name does not belong to the known model set
    #[error("Model {0} not found")]
    UnknownModel(String),

    /// Known model without an artifact on disk
    #[error("Model {model} not found")]
    ModelNotFound { model: String, path: PathBuf },

    #[error("Failed to load model {model}: {message}")]
    LoadFailed { model: String, message: String },

    #[error("Inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    /// Whether the error means the requested model is unavailable
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PredictError::UnknownModel(_) | PredictError::ModelNotFound { .. }
        )
    }
}
