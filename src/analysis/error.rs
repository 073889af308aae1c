#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("Cultura não encontrada: {0}")]
    CropNotFound(String),
    #[error("Uma ou ambas culturas não encontradas")]
    CropsNotFound { crop1: String, crop2: String },
    #[error("Cultura sem municípios para calcular estatísticas: {0}")]
    EmptySeries(String),
}

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CropNotFound(_) | Self::CropsNotFound { .. })
    }
}
