// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for integration tests
#![allow(dead_code)]

use anyhow::{bail, Result};
use center_finder::vision::{CenterModel, ModelCache, ModelId, ModelLoader};
use image::{GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::Array4;
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const BOUNDARY: &str = "center-finder-test-boundary";

/// Model that always returns the same raw `[y_norm, x_norm]` output
pub struct FixedModel {
    pub output: [f32; 2],
}

impl CenterModel for FixedModel {
    fn infer(&self, input: Array4<f32>) -> Result<[f32; 2]> {
        assert_eq!(input.shape(), &[1, 128, 128, 1]);
        Ok(self.output)
    }
}

/// Model whose inference always fails
pub struct BrokenModel;

impl CenterModel for BrokenModel {
    fn infer(&self, _input: Array4<f32>) -> Result<[f32; 2]> {
        bail!("output tensor has shape [1, 3]")
    }
}

/// Loader handing out [`FixedModel`]s and counting loads
pub struct FixedLoader {
    pub output: [f32; 2],
    pub loads: Arc<AtomicUsize>,
    pub delay: Duration,
}

impl FixedLoader {
    pub fn new(output: [f32; 2]) -> Self {
        Self {
            output,
            loads: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    /// Make every load take `delay`, so concurrent callers overlap
    pub fn slow(output: [f32; 2], delay: Duration) -> Self {
        Self {
            delay,
            ..Self::new(output)
        }
    }

    pub fn load_count(&self) -> Arc<AtomicUsize> {
        self.loads.clone()
    }
}

impl ModelLoader for FixedLoader {
    fn load(&self, _model: ModelId, _path: &Path) -> Result<Arc<dyn CenterModel>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        Ok(Arc::new(FixedModel {
            output: self.output,
        }))
    }
}

/// Loader whose models fail at inference time
pub struct BrokenLoader;

impl ModelLoader for BrokenLoader {
    fn load(&self, _model: ModelId, _path: &Path) -> Result<Arc<dyn CenterModel>> {
        Ok(Arc::new(BrokenModel))
    }
}

/// Loader that rejects every artifact
pub struct CorruptLoader;

impl ModelLoader for CorruptLoader {
    fn load(&self, model: ModelId, _path: &Path) -> Result<Arc<dyn CenterModel>> {
        bail!("{} is not a valid ONNX graph", model)
    }
}

/// Temporary model directory holding placeholder artifacts for `models`
pub fn model_dir_with(models: &[ModelId]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp model dir");
    for model in models {
        std::fs::write(dir.path().join(model.file_name()), b"placeholder")
            .expect("Failed to write model artifact");
    }
    dir
}

/// Cache over a temp directory; keep the returned dir alive for the test
pub fn cache_with(models: &[ModelId], loader: impl ModelLoader + 'static) -> (TempDir, Arc<ModelCache>) {
    let dir = model_dir_with(models);
    let cache = Arc::new(ModelCache::new(dir.path(), Arc::new(loader)));
    (dir, cache)
}

pub fn gray_image(width: u32, height: u32) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| Luma([((x + y) % 256) as u8]))
}

pub fn gray_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    gray_image(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("Failed to encode test PNG");
    bytes
}

pub fn rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb([40, 120, 200]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .expect("Failed to encode test JPEG");
    bytes
}

/// One part of a multipart form
pub enum Part<'a> {
    File {
        name: &'a str,
        file_name: &'a str,
        bytes: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Encode `parts` as a `multipart/form-data` body using [`BOUNDARY`]
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File {
                name,
                file_name,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(bytes);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
