// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image decoding and PNG data-URI encoding for uploads and results

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Maximum image size (16MB, same as the request body limit)
const MAX_IMAGE_SIZE: usize = 16 * 1024 * 1024;

/// Prefix of every encoded result image
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,

    #[error("Not a PNG data URI")]
    InvalidDataUri,

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// Decode raw image bytes (for multipart uploads)
///
/// # Arguments
/// * `bytes` - Raw image bytes
///
/// # Returns
/// * `Ok((DynamicImage, ImageInfo))` - The decoded image and metadata
/// * `Err(ImageError)` - If decoding fails
pub fn decode_image_bytes(bytes: &[u8]) -> Result<(DynamicImage, ImageInfo), ImageError> {
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }

    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    // Detect format from magic bytes
    let format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    let info = ImageInfo {
        width: img.width(),
        height: img.height(),
        format,
        size_bytes: bytes.len(),
    };

    Ok((img, info))
}

/// BT.601 luma weights in 14-bit fixed point (R, G, B); they sum to 1 << 14
const BT601_WEIGHTS: [u32; 3] = [4899, 9617, 1868];
const BT601_SHIFT: u32 = 14;

/// Decode raw image bytes straight to a single-channel grayscale buffer
///
/// Color inputs are reduced with BT.601 weights (0.299, 0.587, 0.114),
/// the conversion the models were trained with. Alpha is dropped.
pub fn decode_grayscale(bytes: &[u8]) -> Result<(GrayImage, ImageInfo), ImageError> {
    let (img, info) = decode_image_bytes(bytes)?;
    Ok((to_gray_bt601(img), info))
}

/// Convert to 8-bit grayscale, using BT.601 luma for color images
fn to_gray_bt601(img: DynamicImage) -> GrayImage {
    if !img.color().has_color() {
        return img.into_luma8();
    }

    let rgb = img.into_rgb8();
    let [wr, wg, wb] = BT601_WEIGHTS;
    let round = 1 << (BT601_SHIFT - 1);

    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (r as u32 * wr + g as u32 * wg + b as u32 * wb + round) >> BT601_SHIFT;
        Luma([luma as u8])
    })
}

/// Detect image format from magic bytes
///
/// # Arguments
/// * `bytes` - Raw image data
///
/// # Returns
/// * `Ok(ImageFormat)` - Detected format
/// * `Err(ImageError::UnsupportedFormat)` - If format cannot be detected
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        // BMP: BM
        [0x42, 0x4D, ..] => Ok(ImageFormat::Bmp),

        // TIFF: II (little-endian) or MM (big-endian)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => Ok(ImageFormat::Tiff),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Encode an RGB image as a `data:image/png;base64,...` URI
///
/// The buffer is already in RGB order, which is what the PNG encoder
/// expects, so pixels are written as-is.
pub fn encode_png_data_uri(image: &RgbImage) -> Result<String, ImageError> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

    let payload = STANDARD.encode(buffer.into_inner());
    Ok(format!("{}{}", PNG_DATA_URI_PREFIX, payload))
}

/// Decode a PNG data URI produced by [`encode_png_data_uri`]
pub fn decode_data_uri(uri: &str) -> Result<(DynamicImage, ImageInfo), ImageError> {
    let payload = uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or(ImageError::InvalidDataUri)?;

    if payload.is_empty() {
        return Err(ImageError::EmptyData);
    }

    let bytes = STANDARD.decode(payload)?;
    decode_image_bytes(&bytes)
}
