// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod predict;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{health_handler, index_handler, render_index, script_handler, HealthResponse};
pub use http_server::{create_app, start_server, AppState};
pub use predict::{predict_handler, Coordinates, PredictForm, PredictResponse};
