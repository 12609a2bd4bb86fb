// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Center regression over grayscale images
//!
//! Components:
//! - `model` - Known model identifiers and the ONNX Runtime backend
//! - `preprocessing` - 128x128 normalised input tensors
//! - `predictor` - Inference plus rescaling to original pixel space
//! - `annotate` - Crosshair overlay on the predicted point

pub mod annotate;
pub mod model;
pub mod predictor;
pub mod preprocessing;

pub use annotate::{draw_crosshair, draw_crosshair_mut, CrosshairStyle};
pub use model::{CenterModel, ModelId, ModelLoader, OnnxCenterModel, OnnxModelLoader, MODEL_EXTENSION};
pub use predictor::{scale_to_original, CenterPrediction, Predictor};
pub use preprocessing::{preprocess_for_center, MODEL_INPUT_SIZE};
