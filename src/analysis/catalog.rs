use crate::dataset::{CropTable, Dataset};

use super::error::EngineError;
use super::models::DatasetStatistics;

/// Crop count and distinct municipality count across the whole dataset
pub fn dataset_statistics(dataset: &Dataset) -> DatasetStatistics {
    DatasetStatistics {
        total_crops: dataset.crop_count(),
        total_municipalities: dataset.unique_municipality_count(),
    }
}

/// Crop names, sorted
pub fn list_crops(dataset: &Dataset) -> Vec<String> {
    dataset.crop_names()
}

/// Raw municipality table for `crop`
pub fn crop_municipalities<'a>(
    dataset: &'a Dataset,
    crop: &str,
) -> Result<&'a CropTable, EngineError> {
    dataset
        .crop(crop)
        .ok_or_else(|| EngineError::CropNotFound(crop.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;

    #[test]
    fn test_dataset_statistics() {
        let stats = dataset_statistics(&fixtures::soy_and_corn());
        assert_eq!(stats.total_crops, 2);
        assert_eq!(stats.total_municipalities, 2);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        let stats = dataset_statistics(&dataset);
        assert_eq!(stats.total_crops, 0);
        assert_eq!(stats.total_municipalities, 0);
        assert!(list_crops(&dataset).is_empty());
        assert!(crop_municipalities(&dataset, "soy").is_err());
    }

    #[test]
    fn test_list_crops_sorted() {
        assert_eq!(list_crops(&fixtures::soy_and_corn()), vec!["corn", "soy"]);
    }

    #[test]
    fn test_crop_municipalities() {
        let dataset = fixtures::soy_and_corn();
        let table = crop_municipalities(&dataset, "soy").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["M2"].municipality_name, "Beta");
    }
}
