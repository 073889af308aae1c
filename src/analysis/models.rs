use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Top-N ranking shaped for a bar chart; `labels[i]` pairs with `data[i]`
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

/// Descriptive statistics over a crop's harvested areas
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StatisticalSummary {
    pub mean: f64,
    pub median: f64,
    /// Most frequent value, absent when no value repeats
    pub mode: Option<f64>,
    /// Sample standard deviation, 0 for a single value
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// First quartile, absent with fewer than four values
    pub q1: Option<f64>,
    /// Third quartile, absent with fewer than four values
    pub q3: Option<f64>,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StateMunicipality {
    pub name: String,
    pub area: f64,
}

/// Per-state rollup of one crop
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StateStats {
    pub total_area: f64,
    pub municipalities_count: usize,
    pub max_area: f64,
    pub average_area: f64,
    pub municipalities: Vec<StateMunicipality>,
}

/// State code -> rollup
pub type StateRollup = BTreeMap<String, StateStats>;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ComparisonEntry {
    pub municipality_code: String,
    pub municipality_name: String,
    pub state_code: String,
    pub crop1_area: f64,
    pub crop2_area: f64,
    /// `crop1_area / max(crop2_area, 1)`
    pub ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ComparisonResult {
    pub crop1: String,
    pub crop2: String,
    /// Sorted by municipality code
    pub comparison_data: Vec<ComparisonEntry>,
    pub common_municipalities: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DatasetStatistics {
    pub total_crops: usize,
    pub total_municipalities: usize,
}
