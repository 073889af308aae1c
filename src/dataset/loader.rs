use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

use super::error::DatasetError;
use super::models::{
    CropTable, Dataset, MunicipalityRecord, UNKNOWN_MUNICIPALITY_NAME, UNKNOWN_STATE_CODE,
};

/// Record as it appears in the JSON document, before validation
#[derive(Debug, Deserialize)]
struct RawMunicipalityRecord {
    municipality_name: Option<String>,
    state_code: Option<String>,
    harvested_area: Option<Value>,
}

/// Load the dataset from a JSON file
///
/// Never fails: a missing or malformed file yields an empty dataset so the
/// service still starts (every crop lookup then reports "not found").
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_dataset(path: &Path) -> Dataset {
    debug!("Loading crop dataset");

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error!("Dataset file {} not found, starting with empty dataset", path.display());
            return Dataset::default();
        }
        Err(e) => {
            error!("Failed to read dataset file {}: {}", path.display(), e);
            return Dataset::default();
        }
    };

    match Dataset::from_json_str(&contents) {
        Ok(dataset) => {
            info!(
                "Loaded {} crops, {} records, {} unique municipalities",
                dataset.crop_count(),
                dataset.record_count(),
                dataset.unique_municipality_count()
            );
            dataset
        }
        Err(e) => {
            error!("Failed to load dataset from {}: {}", path.display(), e);
            Dataset::default()
        }
    }
}

impl Dataset {
    /// Parse and validate a dataset document
    ///
    /// Missing fields take their defaults (`Desconhecido`, `XX`, `0`).
    /// Records whose harvested area is not a finite non-negative number are
    /// dropped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw: BTreeMap<String, BTreeMap<String, RawMunicipalityRecord>> =
            serde_json::from_str(json)?;

        let mut crops = BTreeMap::new();
        let mut rejected = 0usize;

        for (crop, municipalities) in raw {
            let mut table = CropTable::new();
            for (code, record) in municipalities {
                match validate_record(record) {
                    Ok(record) => {
                        table.insert(code, record);
                    }
                    Err(reason) => {
                        warn!("Skipping record {} for crop {}: {}", code, crop, reason);
                        rejected += 1;
                    }
                }
            }
            crops.insert(crop, table);
        }

        if rejected > 0 {
            warn!("Rejected {} malformed records while loading dataset", rejected);
        }

        Ok(Dataset::from_crops(crops))
    }
}

fn validate_record(raw: RawMunicipalityRecord) -> Result<MunicipalityRecord, String> {
    let harvested_area = parse_area(raw.harvested_area)?;

    Ok(MunicipalityRecord {
        municipality_name: raw
            .municipality_name
            .unwrap_or_else(|| UNKNOWN_MUNICIPALITY_NAME.to_string()),
        state_code: raw
            .state_code
            .unwrap_or_else(|| UNKNOWN_STATE_CODE.to_string()),
        harvested_area,
    })
}

fn parse_area(value: Option<Value>) -> Result<f64, String> {
    let area = match value {
        None | Some(Value::Null) => return Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| format!("harvested_area {n} is not representable"))?,
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("harvested_area {s:?} is not numeric"))?,
        Some(other) => return Err(format!("harvested_area {other} is not numeric")),
    };

    if !area.is_finite() || area < 0.0 {
        return Err(format!("harvested_area {area} is out of range"));
    }

    // -0.0 -> 0.0
    Ok(if area == 0.0 { 0.0 } else { area })
}
