// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Center regression models
//!
//! The trained networks are exported to ONNX and loaded from
//! `<model_dir>/<name>.onnx`. Each takes a `[1, 128, 128, 1]` tensor and
//! returns two values ordered `[y_norm, x_norm]`.

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

use crate::vision::error::PredictError;

/// File extension of model artifacts
pub const MODEL_EXTENSION: &str = "onnx";

/// Known center regression models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelId {
    AllDataV2,
    CnnM20xK4,
    CnnM20xK6,
    CnnM20xK8,
}

impl ModelId {
    /// Every model offered to clients, in display order
    pub const ALL: [ModelId; 4] = [
        ModelId::AllDataV2,
        ModelId::CnnM20xK4,
        ModelId::CnnM20xK6,
        ModelId::CnnM20xK8,
    ];

    /// Model used when a request does not name one
    pub const DEFAULT: ModelId = ModelId::AllDataV2;

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::AllDataV2 => "allData_v2",
            ModelId::CnnM20xK4 => "cnn_M_20x_k_4",
            ModelId::CnnM20xK6 => "cnn_M_20x_k_6",
            ModelId::CnnM20xK8 => "cnn_M_20x_k_8",
        }
    }

    /// Artifact file name, e.g. `allData_v2.onnx`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.as_str(), MODEL_EXTENSION)
    }

    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl Default for ModelId {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelId {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| PredictError::UnknownModel(s.to_string()))
    }
}

/// A loaded center regression network
#[cfg_attr(test, mockall::automock)]
pub trait CenterModel: Send + Sync {
    /// Run the network on a `[1, 128, 128, 1]` tensor.
    ///
    /// Returns the raw `[y_norm, x_norm]` output in 128x128 input space.
    fn infer(&self, input: Array4<f32>) -> Result<[f32; 2]>;
}

/// Turns a model artifact on disk into a [`CenterModel`]
pub trait ModelLoader: Send + Sync {
    fn load(&self, model: ModelId, path: &Path) -> Result<Arc<dyn CenterModel>>;
}

/// Center model backed by an ONNX Runtime session
///
/// Runs on CPU only.
pub struct OnnxCenterModel {
    /// ONNX Runtime session (`run` needs exclusive access)
    session: Mutex<Session>,
    model: ModelId,
    input_name: String,
}

impl fmt::Debug for OnnxCenterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxCenterModel")
            .field("model", &self.model)
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl OnnxCenterModel {
    /// Load a center model from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub fn load<P: AsRef<Path>>(model: ModelId, model_path: P, intra_threads: usize) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Center model not found: {}", model_path.display());
        }

        info!("Loading center model {} from {}", model, model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load center model from {}", model_path.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "input".to_string());

        if let Some(input) = session.inputs.first() {
            debug!("Center model input: {} {:?}", input.name, input.input_type);
        }

        info!("✅ Center model {} loaded (CPU-only)", model);

        Ok(Self {
            session: Mutex::new(session),
            model,
            input_name,
        })
    }
}

impl CenterModel for OnnxCenterModel {
    fn infer(&self, input: Array4<f32>) -> Result<[f32; 2]> {
        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow::anyhow!("Session lock poisoned for {}", self.model))?;

        let input_value = Value::from_array(input).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![self.input_name.as_str() => input_value])
            .context("Center inference failed")?;

        let output = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let values: Vec<f32> = output.iter().copied().collect();
        match values.as_slice() {
            [y_norm, x_norm, ..] => Ok([*y_norm, *x_norm]),
            _ => anyhow::bail!(
                "Expected two output values from {}, got shape {:?}",
                self.model,
                output.shape()
            ),
        }
    }
}

/// Loads [`OnnxCenterModel`]s
#[derive(Debug, Clone)]
pub struct OnnxModelLoader {
    intra_threads: usize,
}

impl OnnxModelLoader {
    pub fn new(intra_threads: usize) -> Self {
        Self {
            intra_threads: intra_threads.max(1),
        }
    }
}

impl Default for OnnxModelLoader {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ModelLoader for OnnxModelLoader {
    fn load(&self, model: ModelId, path: &Path) -> Result<Arc<dyn CenterModel>> {
        let loaded = OnnxCenterModel::load(model, path, self.intra_threads)?;
        Ok(Arc::new(loaded))
    }
}
