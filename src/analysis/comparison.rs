use crate::dataset::Dataset;

use super::error::EngineError;
use super::models::{ComparisonEntry, ComparisonResult};

/// Pair the harvested areas of two crops over the municipalities growing both
///
/// Name and state come from `crop1`'s record. The ratio divides by
/// `max(crop2_area, 1)`, so a zero `crop2_area` reports `crop1_area` itself.
/// Entries are ordered by municipality code.
pub fn compare_crops(
    dataset: &Dataset,
    crop1: &str,
    crop2: &str,
) -> Result<ComparisonResult, EngineError> {
    let (table1, table2) = match (dataset.crop(crop1), dataset.crop(crop2)) {
        (Some(t1), Some(t2)) => (t1, t2),
        _ => {
            return Err(EngineError::CropsNotFound {
                crop1: crop1.to_string(),
                crop2: crop2.to_string(),
            })
        }
    };

    let comparison_data: Vec<ComparisonEntry> = table1
        .iter()
        .filter_map(|(code, record1)| {
            table2.get(code).map(|record2| ComparisonEntry {
                municipality_code: code.clone(),
                municipality_name: record1.municipality_name.clone(),
                state_code: record1.state_code.clone(),
                crop1_area: record1.harvested_area,
                crop2_area: record2.harvested_area,
                ratio: record1.harvested_area / record2.harvested_area.max(1.0),
            })
        })
        .collect();

    Ok(ComparisonResult {
        crop1: crop1.to_string(),
        crop2: crop2.to_string(),
        common_municipalities: comparison_data.len(),
        comparison_data,
    })
}
