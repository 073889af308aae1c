use std::sync::Arc;
use tracing::{debug, instrument, warn};

use crate::analysis::{
    self, ChartData, ComparisonResult, DatasetStatistics, EngineError, StateRollup,
    StatisticalSummary,
};
use crate::dataset::{CropTable, Dataset};

/// Entry point for every crop query
///
/// Holds the shared, read-only dataset snapshot. Cloning is cheap (an `Arc`
/// bump), so handlers may clone it freely across concurrent requests.
#[derive(Clone)]
pub struct CropService {
    dataset: Arc<Dataset>,
    ranking_limit: usize,
}

impl CropService {
    pub fn new(dataset: Arc<Dataset>, ranking_limit: usize) -> Self {
        Self {
            dataset,
            ranking_limit,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn statistics(&self) -> DatasetStatistics {
        analysis::dataset_statistics(&self.dataset)
    }

    pub fn crops(&self) -> Vec<String> {
        analysis::list_crops(&self.dataset)
    }

    #[instrument(skip(self))]
    pub fn crop_data(&self, crop: &str) -> Result<&CropTable, EngineError> {
        analysis::crop_municipalities(&self.dataset, crop).inspect_err(Self::log_failure)
    }

    /// Top municipalities for `crop`; `limit` falls back to the configured default
    #[instrument(skip(self))]
    pub fn chart_data(&self, crop: &str, limit: Option<usize>) -> Result<ChartData, EngineError> {
        let n = limit.unwrap_or(self.ranking_limit);
        debug!("Ranking top {} municipalities for {}", n, crop);
        analysis::top_n_by_area(&self.dataset, crop, n).inspect_err(Self::log_failure)
    }

    #[instrument(skip(self))]
    pub fn statistical_summary(&self, crop: &str) -> Result<StatisticalSummary, EngineError> {
        analysis::statistical_summary(&self.dataset, crop).inspect_err(Self::log_failure)
    }

    #[instrument(skip(self))]
    pub fn state_rollup(&self, crop: &str) -> Result<StateRollup, EngineError> {
        analysis::rollup_by_state(&self.dataset, crop).inspect_err(Self::log_failure)
    }

    #[instrument(skip(self))]
    pub fn compare(&self, crop1: &str, crop2: &str) -> Result<ComparisonResult, EngineError> {
        analysis::compare_crops(&self.dataset, crop1, crop2).inspect_err(Self::log_failure)
    }

    fn log_failure(error: &EngineError) {
        if error.is_not_found() {
            debug!("{}", error);
        } else {
            warn!("{}", error);
        }
    }
}
