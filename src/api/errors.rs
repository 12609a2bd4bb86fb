// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::vision::{ModelId, PredictError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    InvalidRequest(String),
    PayloadTooLarge(String),
    ModelNotFound {
        model: String,
        available_models: Vec<String>,
    },
    InternalError(String),
}

impl ApiError {
    pub fn to_response(&self) -> ErrorResponse {
        let (error_type, message, details) = match self {
            ApiError::InvalidRequest(msg) => ("invalid_request", msg.clone(), None),
            ApiError::PayloadTooLarge(msg) => ("payload_too_large", msg.clone(), None),
            ApiError::ModelNotFound {
                model,
                available_models,
            } => {
                let mut details = HashMap::new();
                details.insert(
                    "available_models".to_string(),
                    serde_json::Value::Array(
                        available_models
                            .iter()
                            .map(|m| serde_json::Value::String(m.clone()))
                            .collect(),
                    ),
                );
                (
                    "model_not_found",
                    format!("Model {} not found", model),
                    Some(details),
                )
            }
            ApiError::InternalError(msg) => ("internal_error", msg.clone(), None),
        };

        ErrorResponse {
            error: message,
            error_type: error_type.to_string(),
            details,
        }
    }

    /// A missing model is reported like any other internal failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ModelNotFound { .. } | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            ApiError::ModelNotFound { model, .. } => write!(f, "Model {} not found", model),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PredictError> for ApiError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::UnknownModel(model) | PredictError::ModelNotFound { model, .. } => {
                ApiError::ModelNotFound {
                    model,
                    available_models: ModelId::names(),
                }
            }
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}
