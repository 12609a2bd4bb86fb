// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration
//!
//! Every option can be given on the command line or through the matching
//! `CENTER_*` environment variable (a `.env` file is honoured as well).

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Maximum accepted request body (16 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Name of the model directory looked up next to the executable
pub const MODEL_DIR_NAME: &str = "model";

/// Center finder server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "center-finder")]
#[command(version)]
#[command(
    about = "Locates the center point of grayscale images with pre-trained regression models",
    long_about = None
)]
pub struct ServerConfig {
    /// Interface to bind the HTTP server to
    #[arg(long, env = "CENTER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(long, env = "CENTER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Directory holding `<model>.onnx` artifacts (defaults to `model/` next to the executable)
    #[arg(long, env = "CENTER_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Maximum request body size in bytes
    #[arg(long, env = "CENTER_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Refuse to start when any known model has no artifact on disk
    #[arg(long, env = "CENTER_REQUIRE_MODELS", default_value_t = false)]
    pub require_models: bool,

    /// Intra-op threads for each ONNX Runtime session
    #[arg(long, env = "CENTER_INTRA_THREADS", default_value_t = 4)]
    pub intra_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            model_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            require_models: false,
            intra_threads: 4,
        }
    }
}

impl ServerConfig {
    /// Socket address the server listens on
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    /// Model directory, either explicit or derived from the executable location
    pub fn resolved_model_dir(&self) -> PathBuf {
        match &self.model_dir {
            Some(dir) => dir.clone(),
            None => default_model_dir(),
        }
    }
}

/// Locate the model directory relative to the running executable.
///
/// Checks `<exe_dir>/model` and then `<exe_dir>/../model`; falls back to
/// `./model` when neither exists.
pub fn default_model_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .and_then(|exe_dir| model_dir_near(&exe_dir))
        .unwrap_or_else(|| PathBuf::from(MODEL_DIR_NAME))
}

fn model_dir_near(exe_dir: &Path) -> Option<PathBuf> {
    let candidates = [
        exe_dir.join(MODEL_DIR_NAME),
        exe_dir.join("..").join(MODEL_DIR_NAME),
    ];
    candidates.into_iter().find(|dir| dir.is_dir())
}
