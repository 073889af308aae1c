#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read dataset file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}
