// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::multipart::MultipartRejection;
use axum_extra::extract::Multipart;
use image::DynamicImage;
use tracing::{debug, error, info, warn};

use super::request::PredictForm;
use super::response::PredictResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::{decode_grayscale, draw_crosshair, encode_png_data_uri, CrosshairStyle, ModelId};

/// POST /predict - Locate the center of an uploaded image
///
/// # Request (multipart/form-data)
/// - `image`: Image file (required, non-empty filename)
/// - `model`: Model name - defaults to "allData_v2"
///
/// # Response
/// - `success`: Always true
/// - `coordinates`: `{x, y}` in original image pixels, two decimals
/// - `result_image`: PNG data URI with a crosshair at the center
///
/// # Errors
/// - 400 Bad Request: missing image, empty filename, undecodable image
/// - 413 Payload Too Large: body over the configured limit
/// - 500 Internal Server Error: unknown or missing model, inference or encoding failure
pub async fn predict_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let multipart = multipart.map_err(|e| {
        warn!("Predict request rejected: {}", e);
        ApiError::InvalidRequest(e.to_string())
    })?;

    // 1. Read and validate the form
    let form = PredictForm::from_multipart(multipart).await?;
    let (upload, model_name) = form.validate().map_err(|e| {
        warn!("Predict validation failed: {}", e);
        e
    })?;

    // 2. Decode the upload
    let (gray, image_info) = decode_grayscale(&upload.bytes).map_err(|e| {
        warn!("Failed to decode {}: {}", upload.file_name, e);
        ApiError::InvalidRequest("Failed to read image".to_string())
    })?;

    debug!(
        "Decoded image: {}x{} {:?}, {} bytes",
        image_info.width, image_info.height, image_info.format, image_info.size_bytes
    );

    // 3. Predict
    let model: ModelId = model_name.parse()?;
    let prediction = state.predictor.predict(&gray, model).await.map_err(|e| {
        if e.is_not_found() {
            warn!("Model {} unavailable: {}", model, e);
        } else {
            error!("Prediction with {} failed: {}", model, e);
        }
        ApiError::from(e)
    })?;

    // 4. Annotate with the unrounded coordinates
    let annotated = draw_crosshair(
        &DynamicImage::ImageLuma8(gray),
        prediction.x,
        prediction.y,
        &CrosshairStyle::default(),
    );

    // 5. Encode
    let result_image = encode_png_data_uri(&annotated).map_err(|e| {
        warn!("Failed to encode result image: {}", e);
        ApiError::InternalError(e.to_string())
    })?;

    info!(
        "Center found with {} at ({:.2}, {:.2}) in {}x{} image",
        model, prediction.x, prediction.y, image_info.width, image_info.height
    );

    Ok(Json(PredictResponse::new(&prediction, result_image)))
}
