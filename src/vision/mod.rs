// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing module for center localisation
//!
//! This module provides:
//! - Upload decoding and PNG data-URI encoding
//! - A lazily populated cache of the center regression models
//! - Center prediction and crosshair annotation
//!
//! Models run on CPU through ONNX Runtime.

pub mod center;
pub mod error;
pub mod image_utils;
pub mod model_cache;

pub use center::{
    draw_crosshair, CenterModel, CenterPrediction, CrosshairStyle, ModelId, ModelLoader,
    OnnxCenterModel, OnnxModelLoader, Predictor,
};
pub use error::PredictError;
pub use image_utils::{
    decode_data_uri, decode_grayscale, decode_image_bytes, detect_format, encode_png_data_uri,
    ImageError, ImageInfo,
};
pub use model_cache::ModelCache;
