// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Center prediction endpoint module
//!
//! Provides POST /predict for locating the center of an uploaded image.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::predict_handler;
pub use request::{ImageUpload, PredictForm};
pub use response::{Coordinates, PredictResponse};
