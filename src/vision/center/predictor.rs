// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Center prediction: preprocessing, inference and rescaling

use image::GrayImage;
use std::sync::Arc;
use tracing::debug;

use super::model::ModelId;
use super::preprocessing::{preprocess_for_center, MODEL_INPUT_SIZE};
use crate::vision::error::PredictError;
use crate::vision::model_cache::ModelCache;

/// Predicted center in original image pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterPrediction {
    pub x: f64,
    pub y: f64,
}

impl CenterPrediction {
    /// Coordinates rounded to two decimal places for display
    pub fn rounded(&self) -> (f64, f64) {
        (round2(self.x), round2(self.y))
    }
}

/// Ties go to the even neighbour, so 0.125 displays as 0.12.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Map raw model output from 128x128 input space back to the original image.
///
/// Each axis is scaled independently; there is no aspect-ratio correction
/// and no clamping.
pub fn scale_to_original(x_norm: f32, y_norm: f32, width: u32, height: u32) -> (f64, f64) {
    let input_size = MODEL_INPUT_SIZE as f64;
    let x = x_norm as f64 * (width as f64 / input_size);
    let y = y_norm as f64 * (height as f64 / input_size);
    (x, y)
}

/// Runs center regression through models held in a [`ModelCache`]
pub struct Predictor {
    cache: Arc<ModelCache>,
}

impl Predictor {
    pub fn new(cache: Arc<ModelCache>) -> Self {
        Self { cache }
    }

    /// Predict the center of `image` with `model`
    ///
    /// # Errors
    /// - `UnknownModel` / `ModelNotFound` if the model artifact is missing
    /// - `LoadFailed` if the artifact cannot be loaded
    /// - `Inference` if the network fails to run
    pub async fn predict(
        &self,
        image: &GrayImage,
        model: ModelId,
    ) -> Result<CenterPrediction, PredictError> {
        let center_model = self.cache.get(model).await?;

        let input = preprocess_for_center(image);

        // Output order is [y, x]; the networks were trained against it.
        let [y_norm, x_norm] = center_model
            .infer(input)
            .map_err(|e| PredictError::Inference(format!("{:#}", e)))?;

        if !y_norm.is_finite() || !x_norm.is_finite() {
            return Err(PredictError::Inference(format!(
                "{} returned non-finite output (y={}, x={})",
                model, y_norm, x_norm
            )));
        }

        let (x, y) = scale_to_original(x_norm, y_norm, image.width(), image.height());

        debug!(
            "{} raw output (y={:.3}, x={:.3}) -> ({:.2}, {:.2}) for {}x{}",
            model,
            y_norm,
            x_norm,
            x,
            y,
            image.width(),
            image.height()
        );

        Ok(CenterPrediction { x, y })
    }
}
