// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Predict response types

use serde::{Deserialize, Serialize};

use crate::vision::CenterPrediction;

/// Center coordinates in original image pixels, rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

/// Body of a successful `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    pub coordinates: Coordinates,
    /// Annotated image as a `data:image/png;base64,...` URI
    pub result_image: String,
}

impl PredictResponse {
    pub fn new(prediction: &CenterPrediction, result_image: String) -> Self {
        let (x, y) = prediction.rounded();
        Self {
            success: true,
            coordinates: Coordinates { x, y },
            result_image,
        }
    }
}
