// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::vision::ModelId;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const SCRIPT_JS: &str = include_str!("../../static/js/script.js");
const MODEL_OPTIONS_SLOT: &str = "{{MODEL_OPTIONS}}";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            issues: None,
        }
    }
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET / - upload page
pub async fn index_handler() -> Html<String> {
    Html(render_index())
}

/// GET /static/js/script.js
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT_JS,
    )
}

/// Render the upload page with one `<option>` per model
pub fn render_index() -> String {
    let options = ModelId::ALL
        .iter()
        .map(|model| {
            let selected = if *model == ModelId::DEFAULT {
                " selected"
            } else {
                ""
            };
            format!(
                "<option value=\"{0}\"{1}>{0}</option>",
                model.as_str(),
                selected
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    INDEX_TEMPLATE.replace(MODEL_OPTIONS_SLOT, &options)
}
