use crate::dataset::{Dataset, MunicipalityRecord};

use super::error::EngineError;
use super::models::ChartData;

pub const DEFAULT_TOP_N: usize = 20;

/// The `n` municipalities with the largest harvested area for `crop`
///
/// Sorted descending by area. The sort is stable over code order, so equal
/// areas keep ascending municipality code.
pub fn top_n_by_area(dataset: &Dataset, crop: &str, n: usize) -> Result<ChartData, EngineError> {
    let table = dataset
        .crop(crop)
        .ok_or_else(|| EngineError::CropNotFound(crop.to_string()))?;

    let mut records: Vec<&MunicipalityRecord> = table.values().collect();
    records.sort_by(|a, b| b.harvested_area.total_cmp(&a.harvested_area));
    records.truncate(n);

    Ok(ChartData {
        labels: records.iter().map(|r| r.label()).collect(),
        data: records.iter().map(|r| r.harvested_area).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;

    #[test]
    fn test_top_one() {
        let chart = top_n_by_area(&fixtures::soy_and_corn(), "soy", 1).unwrap();
        assert_eq!(chart.labels, vec!["Beta (SP)"]);
        assert_eq!(chart.data, vec![300.0]);
    }

    #[test]
    fn test_sorted_descending_and_capped_by_count() {
        let chart = top_n_by_area(&fixtures::soy_and_corn(), "soy", 20).unwrap();
        assert_eq!(chart.labels, vec!["Beta (SP)", "Alpha (SP)"]);
        assert_eq!(chart.data, vec![300.0, 100.0]);
    }

    #[test]
    fn test_ties_keep_code_order() {
        let dataset = fixtures::dataset(&[(
            "rice",
            &[
                ("B2", "Second", "RS", 10.0),
                ("A1", "First", "RS", 10.0),
                ("C3", "Big", "SC", 50.0),
            ],
        )]);
        let chart = top_n_by_area(&dataset, "rice", 3).unwrap();
        assert_eq!(chart.labels, vec!["Big (SC)", "First (RS)", "Second (RS)"]);
    }

    #[test]
    fn test_zero_limit() {
        let chart = top_n_by_area(&fixtures::soy_and_corn(), "soy", 0).unwrap();
        assert!(chart.labels.is_empty());
        assert!(chart.data.is_empty());
    }

    #[test]
    fn test_missing_crop() {
        let result = top_n_by_area(&fixtures::soy_and_corn(), "wheat", 5);
        assert_eq!(result, Err(EngineError::CropNotFound("wheat".to_string())));
    }
}
