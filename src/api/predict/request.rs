// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict form parsing and validation

use axum::body::Bytes;
use axum_extra::extract::multipart::MultipartError;
use axum_extra::extract::Multipart;
use tracing::debug;

use crate::api::errors::ApiError;
use crate::vision::ModelId;

/// An uploaded file part
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Fields of a `POST /predict` form
#[derive(Debug, Clone, Default)]
pub struct PredictForm {
    /// First `image` part that carried a filename
    pub image: Option<ImageUpload>,
    /// `model` text field
    pub model: Option<String>,
}

impl PredictForm {
    /// Read the form from a multipart body
    ///
    /// Parts other than `image` and `model` are skipped. An `image` part
    /// without a filename is a plain form value, not an upload.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = PredictForm::default();

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("image") if form.image.is_none() => {
                    let Some(file_name) = field.file_name().map(str::to_string) else {
                        continue;
                    };
                    let bytes = field.bytes().await.map_err(multipart_error)?;
                    debug!("Received upload {:?} ({} bytes)", file_name, bytes.len());
                    form.image = Some(ImageUpload { file_name, bytes });
                }
                Some("model") if form.model.is_none() => {
                    form.model = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        Ok(form)
    }

    /// Validate the form, returning the upload and the requested model name
    pub fn validate(self) -> Result<(ImageUpload, String), ApiError> {
        let image = self
            .image
            .ok_or_else(|| ApiError::InvalidRequest("No image provided".to_string()))?;

        if image.file_name.is_empty() {
            return Err(ApiError::InvalidRequest("No image selected".to_string()));
        }

        let model = self
            .model
            .unwrap_or_else(|| ModelId::DEFAULT.as_str().to_string());

        Ok((image, model))
    }
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::InvalidRequest(err.body_text())
    }
}
