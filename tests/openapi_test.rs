// The OpenAPI document must describe every route the router serves

use crop_stats_service::api::generate_openapi_spec;

#[test]
fn test_openapi_lists_all_paths() {
    let spec = serde_json::to_value(generate_openapi_spec()).unwrap();
    let paths = spec["paths"].as_object().unwrap();

    for path in [
        "/api/health",
        "/api/brazilian-states",
        "/api/statistics",
        "/api/crops",
        "/api/crop-data/{crop_name}",
        "/api/crop-chart-data/{crop_name}",
        "/api/analysis/statistical-summary/{crop_name}",
        "/api/analysis/by-state/{crop_name}",
        "/api/analysis/comparison/{crop1}/{crop2}",
        "/api/export/complete-data",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}

#[test]
fn test_openapi_has_summary_schema() {
    let spec = serde_json::to_value(generate_openapi_spec()).unwrap();
    let schemas = &spec["components"]["schemas"];
    assert!(schemas["StatisticalSummary"]["properties"]["std_dev"].is_object());
    assert!(schemas["ErrorResponse"].is_object());
}
