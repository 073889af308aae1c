use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use utoipa::ToSchema;

pub const UNKNOWN_MUNICIPALITY_NAME: &str = "Desconhecido";
pub const UNKNOWN_STATE_CODE: &str = "XX";

/// Harvested-area figure for one crop in one municipality
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MunicipalityRecord {
    pub municipality_name: String,
    /// Two-letter state code (UF)
    pub state_code: String,
    /// Harvested area in hectares, always finite and non-negative
    pub harvested_area: f64,
}

impl MunicipalityRecord {
    pub fn new(
        municipality_name: impl Into<String>,
        state_code: impl Into<String>,
        harvested_area: f64,
    ) -> Self {
        Self {
            municipality_name: municipality_name.into(),
            state_code: state_code.into(),
            harvested_area,
        }
    }

    /// Chart label in the form `Name (UF)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.municipality_name, self.state_code)
    }
}

/// Municipality code -> record, for a single crop
pub type CropTable = BTreeMap<String, MunicipalityRecord>;

/// Immutable crop -> municipality -> record snapshot
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// request. `BTreeMap` keeps iteration in ascending key order, so everything
/// derived from it (ranking ties, per-state lists, comparisons) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    crops: BTreeMap<String, CropTable>,
}

impl Dataset {
    pub fn from_crops(crops: BTreeMap<String, CropTable>) -> Self {
        Self { crops }
    }

    pub fn crop(&self, name: &str) -> Option<&CropTable> {
        self.crops.get(name)
    }

    pub fn contains_crop(&self, name: &str) -> bool {
        self.crops.contains_key(name)
    }

    /// Crop names in ascending order
    pub fn crop_names(&self) -> Vec<String> {
        self.crops.keys().cloned().collect()
    }

    pub fn crop_count(&self) -> usize {
        self.crops.len()
    }

    /// Number of distinct municipality codes across all crops
    pub fn unique_municipality_count(&self) -> usize {
        self.crops
            .values()
            .flat_map(|table| table.keys())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Total number of records across all crops
    pub fn record_count(&self) -> usize {
        self.crops.values().map(|table| table.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }

    pub fn crops(&self) -> impl Iterator<Item = (&String, &CropTable)> {
        self.crops.iter()
    }
}
