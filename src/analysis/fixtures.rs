use std::collections::BTreeMap;

use crate::dataset::{CropTable, Dataset, MunicipalityRecord};

/// Build a dataset from `(crop, [(code, name, state, area)])` tuples
pub fn dataset(crops: &[(&str, &[(&str, &str, &str, f64)])]) -> Dataset {
    let mut map = BTreeMap::new();
    for (crop, rows) in crops {
        let table: CropTable = rows
            .iter()
            .map(|(code, name, state, area)| {
                (code.to_string(), MunicipalityRecord::new(*name, *state, *area))
            })
            .collect();
        map.insert(crop.to_string(), table);
    }
    Dataset::from_crops(map)
}

/// soy: Alpha/SP 100, Beta/SP 300; corn: Alpha/SP 50
pub fn soy_and_corn() -> Dataset {
    dataset(&[
        (
            "soy",
            &[("M1", "Alpha", "SP", 100.0), ("M2", "Beta", "SP", 300.0)],
        ),
        ("corn", &[("M1", "Alpha", "SP", 50.0)]),
    ])
}
