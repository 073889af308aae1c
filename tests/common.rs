use crop_stats_service::dataset::Dataset;

/// The two-crop scenario used across integration tests
pub const SCENARIO_JSON: &str = r#"{
    "soy": {
        "M1": {"municipality_name": "Alpha", "state_code": "SP", "harvested_area": 100},
        "M2": {"municipality_name": "Beta", "state_code": "SP", "harvested_area": 300}
    },
    "corn": {
        "M1": {"municipality_name": "Alpha", "state_code": "SP", "harvested_area": 50}
    }
}"#;

/// A wider dataset: several states, repeated values, an empty crop
pub const NATIONAL_JSON: &str = r#"{
    "Soja (em grão)": {
        "5107925": {"municipality_name": "Sorriso", "state_code": "MT", "harvested_area": 600000},
        "5107040": {"municipality_name": "Nova Mutum", "state_code": "MT", "harvested_area": 390000},
        "5103403": {"municipality_name": "Diamantino", "state_code": "MT", "harvested_area": 210000},
        "5218805": {"municipality_name": "Rio Verde", "state_code": "GO", "harvested_area": 380000},
        "5206206": {"municipality_name": "Cristalina", "state_code": "GO", "harvested_area": 210000},
        "4314100": {"municipality_name": "Passo Fundo", "state_code": "RS", "harvested_area": 55000},
        "2919553": {"municipality_name": "Luís Eduardo Magalhães", "state_code": "BA", "harvested_area": 240000}
    },
    "Milho (em grão)": {
        "5107925": {"municipality_name": "Sorriso", "state_code": "MT", "harvested_area": 450000},
        "5218805": {"municipality_name": "Rio Verde", "state_code": "GO", "harvested_area": 0},
        "4106902": {"municipality_name": "Curitiba", "state_code": "PR", "harvested_area": 100}
    },
    "Algodão herbáceo (em caroço)": {}
}"#;

pub fn scenario() -> Dataset {
    Dataset::from_json_str(SCENARIO_JSON).expect("scenario dataset parses")
}

pub fn national() -> Dataset {
    Dataset::from_json_str(NATIONAL_JSON).expect("national dataset parses")
}
