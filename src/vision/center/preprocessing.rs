// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image preprocessing for the center regression models

use image::imageops::{self, FilterType};
use image::GrayImage;
use ndarray::Array4;

/// Side length of the square model input
pub const MODEL_INPUT_SIZE: u32 = 128;

/// Preprocess a grayscale image for center regression
///
/// Steps:
/// 1. Resize to MODEL_INPUT_SIZE x MODEL_INPUT_SIZE with bilinear filtering,
///    ignoring aspect ratio
/// 2. Normalize: pixel / 255
/// 3. Convert to NHWC tensor format [1, 128, 128, 1]
pub fn preprocess_for_center(image: &GrayImage) -> Array4<f32> {
    let size = MODEL_INPUT_SIZE as usize;
    let resized = imageops::resize(image, MODEL_INPUT_SIZE, MODEL_INPUT_SIZE, FilterType::Triangle);

    Array4::from_shape_fn((1, size, size, 1), |(_, y, x, _)| {
        resized.get_pixel(x as u32, y as u32)[0] as f32 / 255.0
    })
}
