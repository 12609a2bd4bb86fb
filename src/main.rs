// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use center_finder::{config::ServerConfig, start_server, version};
use clap::Parser;
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();

    info!("{}", version::get_version_string());
    info!("Build date: {}", version::BUILD_DATE);

    start_server(config).await
}
