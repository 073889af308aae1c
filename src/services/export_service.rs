use calamine::{open_workbook, Reader, Xlsx};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

pub const EXPORT_FILE_NAME: &str = "base_completa_culturas_ibge_2023.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Arquivo de dados não encontrado")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workbook: {0}")]
    InvalidWorkbook(String),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Workbook ready to be sent as a download
#[derive(Debug)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serves the census workbook the dataset was built from
#[derive(Debug, Clone)]
pub struct ExportService {
    primary_path: PathBuf,
    fallback_path: PathBuf,
}

impl ExportService {
    pub fn new(primary_path: impl Into<PathBuf>, fallback_path: impl Into<PathBuf>) -> Self {
        Self {
            primary_path: primary_path.into(),
            fallback_path: fallback_path.into(),
        }
    }

    /// First configured path that exists on disk
    pub async fn resolve_path(&self) -> Option<PathBuf> {
        for candidate in [&self.primary_path, &self.fallback_path] {
            if tokio::fs::try_exists(candidate).await.unwrap_or(false) {
                return Some(candidate.clone());
            }
            debug!("Export candidate {} not present", candidate.display());
        }
        None
    }

    /// Read the workbook verbatim after checking it opens as xlsx
    #[instrument(skip(self))]
    pub async fn load_workbook(&self) -> Result<ExportFile, ExportError> {
        let path = self.resolve_path().await.ok_or_else(|| {
            warn!(
                "No export workbook at {} or {}",
                self.primary_path.display(),
                self.fallback_path.display()
            );
            ExportError::NotFound
        })?;

        // calamine is synchronous
        let check_path = path.clone();
        tokio::task::spawn_blocking(move || validate_workbook(&check_path)).await??;

        let bytes = tokio::fs::read(&path).await?;
        info!("Exporting {} ({} bytes)", path.display(), bytes.len());

        Ok(ExportFile {
            file_name: EXPORT_FILE_NAME,
            content_type: XLSX_CONTENT_TYPE,
            bytes,
        })
    }
}

fn validate_workbook(path: &Path) -> Result<(), ExportError> {
    let workbook: Xlsx<BufReader<File>> =
        open_workbook(path).map_err(|e| ExportError::InvalidWorkbook(format!("{e}")))?;

    if workbook.sheet_names().is_empty() {
        return Err(ExportError::InvalidWorkbook("workbook has no sheets".to_string()));
    }
    Ok(())
}
