use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::dataset::{load_dataset, Dataset};
use crate::services::{CropService, ExportService};

/// Running HTTP server
pub struct Application {
    pub server_handle: JoinHandle<Result<(), std::io::Error>>,
}

impl Application {
    /// Load the dataset and start the HTTP API
    ///
    /// The dataset is read once here and shared read-only for the life of the
    /// process. A missing or broken dataset file still starts the server with
    /// no crops.
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        info!("Initializing application components");

        let data_path = config.data_path.clone();
        let dataset = tokio::task::spawn_blocking(move || load_dataset(&data_path)).await?;
        if dataset.is_empty() {
            warn!("Dataset is empty, every crop query will report not found");
        }

        let addr = config.server_addr();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("Starting HTTP server on {}", addr);

        let app = create_router(app_state(&config, dataset)).layer(TraceLayer::new_for_http());
        let server_handle = tokio::spawn(async move { axum::serve(listener, app).await });

        info!("Application initialized successfully");
        Ok(Self { server_handle })
    }

    /// Run until the server stops
    pub async fn run_until_stopped(self) -> Result<(), Box<dyn std::error::Error>> {
        self.server_handle.await??;
        Ok(())
    }
}

/// Wire services around an already loaded dataset
pub fn app_state(config: &Config, dataset: Dataset) -> AppState {
    AppState {
        crop_service: CropService::new(Arc::new(dataset), config.ranking_limit),
        export_service: ExportService::new(
            config.export_path.clone(),
            config.export_fallback_path.clone(),
        ),
    }
}
