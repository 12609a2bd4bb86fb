// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Lazily populated cache of center regression models
//!
//! Each known model has its own once-cell, so the first requests for a model
//! share a single load while other models stay available. Loaded models are
//! kept for the lifetime of the cache; nothing is evicted or reloaded.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::vision::center::{CenterModel, ModelId, ModelLoader, OnnxModelLoader};
use crate::vision::error::PredictError;

/// Cache of loaded center models, keyed by [`ModelId`]
pub struct ModelCache {
    model_dir: PathBuf,
    loader: Arc<dyn ModelLoader>,
    slots: HashMap<ModelId, OnceCell<Arc<dyn CenterModel>>>,
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("model_dir", &self.model_dir)
            .field("loaded", &self.loaded_models())
            .finish_non_exhaustive()
    }
}

impl ModelCache {
    /// Create an empty cache reading artifacts from `model_dir`
    pub fn new(model_dir: impl Into<PathBuf>, loader: Arc<dyn ModelLoader>) -> Self {
        let slots = ModelId::ALL
            .into_iter()
            .map(|model| (model, OnceCell::new()))
            .collect();

        Self {
            model_dir: model_dir.into(),
            loader,
            slots,
        }
    }

    /// Create an empty cache backed by ONNX Runtime
    pub fn onnx(model_dir: impl Into<PathBuf>, intra_threads: usize) -> Self {
        Self::new(model_dir, Arc::new(OnnxModelLoader::new(intra_threads)))
    }

    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    /// Path of the artifact for `model`
    pub fn model_path(&self, model: ModelId) -> PathBuf {
        self.model_dir.join(model.file_name())
    }

    /// Get a model, loading it on first use
    ///
    /// # Errors
    /// - `ModelNotFound` if the artifact does not exist
    /// - `LoadFailed` if the loader rejects it; a later call retries
    pub async fn get(&self, model: ModelId) -> Result<Arc<dyn CenterModel>, PredictError> {
        let slot = self
            .slots
            .get(&model)
            .ok_or_else(|| PredictError::UnknownModel(model.to_string()))?;

        if let Some(loaded) = slot.get() {
            debug!("Model cache hit: {}", model);
            return Ok(Arc::clone(loaded));
        }

        let loaded = slot.get_or_try_init(|| self.load(model)).await?;
        Ok(Arc::clone(loaded))
    }

    async fn load(&self, model: ModelId) -> Result<Arc<dyn CenterModel>, PredictError> {
        let path = self.model_path(model);
        if !path.exists() {
            warn!("Model {} not found at {}", model, path.display());
            return Err(PredictError::ModelNotFound {
                model: model.to_string(),
                path,
            });
        }

        info!("Loading model {} from {}", model, path.display());

        let loader = Arc::clone(&self.loader);
        let loaded = tokio::task::spawn_blocking(move || loader.load(model, &path))
            .await
            .map_err(|e| PredictError::LoadFailed {
                model: model.to_string(),
                message: e.to_string(),
            })?
            .map_err(|e| PredictError::LoadFailed {
                model: model.to_string(),
                message: format!("{:#}", e),
            })?;

        info!("✓ Model {} cached", model);
        Ok(loaded)
    }

    /// Whether `model` is resident in memory
    pub fn is_loaded(&self, model: ModelId) -> bool {
        self.slots
            .get(&model)
            .map(|slot| slot.initialized())
            .unwrap_or(false)
    }

    /// Models resident in memory, in display order
    pub fn loaded_models(&self) -> Vec<ModelId> {
        ModelId::ALL
            .into_iter()
            .filter(|model| self.is_loaded(*model))
            .collect()
    }

    /// Known models whose artifact is missing from the model directory
    pub fn missing_models(&self) -> Vec<ModelId> {
        ModelId::ALL
            .into_iter()
            .filter(|model| !self.model_path(*model).exists())
            .collect()
    }

    /// Check that every known model has an artifact on disk
    pub fn validate(&self) -> Result<(), PredictError> {
        match self.missing_models().first() {
            Some(model) => Err(PredictError::ModelNotFound {
                model: model.to_string(),
                path: self.model_path(*model),
            }),
            None => Ok(()),
        }
    }
}
