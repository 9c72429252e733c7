// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use dotenv::dotenv;
use fabstir_vector_node::{
    api::http_server::{start_server, AppState},
    config::ServerConfig,
    embeddings::{ensure_model, ClipVisionModel, ImageEncoder},
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting Fabstir Vector Node...\n");

    let config = ServerConfig::from_env();

    // Load the embedding model before the server accepts any requests
    println!("🧠 Loading CLIP vision model...");
    let model_path = ensure_model(&config.model_path).await?;
    let model = ClipVisionModel::new(&model_path).await?;
    println!(
        "✅ Model ready: {} ({} dimensions)",
        model.model_name(),
        model.dimension()
    );

    let state = AppState::new(Arc::new(model));
    start_server(state, config.port).await
}
