use crate::dataset::Dataset;

use super::error::EngineError;
use super::models::{StateMunicipality, StateRollup, StateStats};

/// Aggregate a crop's municipalities into per-state totals
///
/// Municipality lists inside each state follow ascending municipality code.
pub fn rollup_by_state(dataset: &Dataset, crop: &str) -> Result<StateRollup, EngineError> {
    let table = dataset
        .crop(crop)
        .ok_or_else(|| EngineError::CropNotFound(crop.to_string()))?;

    let mut states = StateRollup::new();
    for record in table.values() {
        let area = record.harvested_area;
        let stats = states
            .entry(record.state_code.clone())
            .or_insert_with(|| StateStats {
                total_area: 0.0,
                municipalities_count: 0,
                max_area: 0.0,
                average_area: 0.0,
                municipalities: Vec::new(),
            });

        stats.total_area += area;
        stats.municipalities_count += 1;
        stats.max_area = stats.max_area.max(area);
        stats.municipalities.push(StateMunicipality {
            name: record.municipality_name.clone(),
            area,
        });
    }

    // Every entry has at least one municipality
    for stats in states.values_mut() {
        stats.average_area = stats.total_area / stats.municipalities_count as f64;
    }

    Ok(states)
}
