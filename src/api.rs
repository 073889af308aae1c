use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::analysis::{
    ChartData, ComparisonEntry, EngineError, StateMunicipality, StateStats, StatisticalSummary,
};
use crate::dataset::MunicipalityRecord;
use crate::services::{CropService, ExportError, ExportService};
use crate::states::{brazilian_states, BrazilianState};

#[derive(Clone)]
pub struct AppState {
    pub crop_service: CropService,
    pub export_service: ExportService,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub crops_loaded: usize,
}

/// Failure body shared by every endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Serialize, ToSchema)]
pub struct StatesResponse {
    pub success: bool,
    pub states: Vec<BrazilianState>,
}

#[derive(Serialize, ToSchema)]
pub struct StatisticsResponse {
    pub success: bool,
    pub total_crops: usize,
    pub total_municipalities: usize,
}

#[derive(Serialize, ToSchema)]
pub struct CropsResponse {
    pub success: bool,
    pub crops: Vec<String>,
}

#[derive(Serialize, ToSchema)]
pub struct CropDataResponse {
    pub success: bool,
    /// Municipality code -> record
    pub data: BTreeMap<String, MunicipalityRecord>,
}

#[derive(Serialize, ToSchema)]
pub struct ChartDataResponse {
    pub success: bool,
    pub chart_data: ChartData,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub success: bool,
    pub summary: StatisticalSummary,
}

#[derive(Serialize, ToSchema)]
pub struct StatesDataResponse {
    pub success: bool,
    /// State code -> rollup
    pub states_data: BTreeMap<String, StateStats>,
}

#[derive(Serialize, ToSchema)]
pub struct ComparisonResponse {
    pub success: bool,
    pub crop1: String,
    pub crop2: String,
    pub comparison_data: Vec<ComparisonEntry>,
    pub common_municipalities: usize,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChartParams {
    /// Number of municipalities to return (defaults to the configured ranking limit)
    pub limit: Option<usize>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn failure(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message.into(),
        }),
    )
}

fn engine_failure(e: EngineError) -> ApiError {
    let status = match e {
        EngineError::CropNotFound(_) | EngineError::CropsNotFound { .. } => StatusCode::NOT_FOUND,
        EngineError::EmptySeries(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    failure(status, e.to_string())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        get_states,
        get_statistics,
        get_crops,
        get_crop_data,
        get_crop_chart_data,
        get_statistical_summary,
        get_analysis_by_state,
        get_crop_comparison,
        export_complete_data,
    ),
    components(schemas(
        HealthResponse,
        ErrorResponse,
        StatesResponse,
        BrazilianState,
        StatisticsResponse,
        CropsResponse,
        CropDataResponse,
        MunicipalityRecord,
        ChartDataResponse,
        ChartData,
        SummaryResponse,
        StatisticalSummary,
        StatesDataResponse,
        StateStats,
        StateMunicipality,
        ComparisonResponse,
        ComparisonEntry,
    )),
    tags((name = "crops", description = "Harvested-area statistics by crop and municipality"))
)]
pub struct ApiDoc;

/// OpenAPI document for the HTTP API
pub fn generate_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health))
        .route("/brazilian-states", get(get_states))
        .route("/statistics", get(get_statistics))
        .route("/crops", get(get_crops))
        .route("/crop-data/{crop_name}", get(get_crop_data))
        .route("/crop-chart-data/{crop_name}", get(get_crop_chart_data))
        .route(
            "/analysis/statistical-summary/{crop_name}",
            get(get_statistical_summary),
        )
        .route("/analysis/by-state/{crop_name}", get(get_analysis_by_state))
        .route(
            "/analysis/comparison/{crop1}/{crop2}",
            get(get_crop_comparison),
        )
        .route("/export/complete-data", get(export_complete_data))
        .with_state(state);

    Router::new().nest("/api", api_routes)
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "crops",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
#[instrument(skip(state))]
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check requested");
    let response = HealthResponse {
        status: "healthy".to_string(),
        crops_loaded: state.crop_service.dataset().crop_count(),
    };
    (StatusCode::OK, Json(response))
}

#[utoipa::path(
    get,
    path = "/api/brazilian-states",
    tag = "crops",
    responses((status = 200, description = "Federative units", body = StatesResponse))
)]
async fn get_states() -> Json<StatesResponse> {
    Json(StatesResponse {
        success: true,
        states: brazilian_states(),
    })
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "crops",
    responses((status = 200, description = "Dataset totals", body = StatisticsResponse))
)]
#[instrument(skip(state))]
async fn get_statistics(State(state): State<AppState>) -> Json<StatisticsResponse> {
    let stats = state.crop_service.statistics();
    info!(
        "Dataset has {} crops over {} municipalities",
        stats.total_crops, stats.total_municipalities
    );
    Json(StatisticsResponse {
        success: true,
        total_crops: stats.total_crops,
        total_municipalities: stats.total_municipalities,
    })
}

#[utoipa::path(
    get,
    path = "/api/crops",
    tag = "crops",
    responses((status = 200, description = "Crop names, sorted", body = CropsResponse))
)]
#[instrument(skip(state))]
async fn get_crops(State(state): State<AppState>) -> Json<CropsResponse> {
    let crops = state.crop_service.crops();
    debug!("Listing {} crops", crops.len());
    Json(CropsResponse {
        success: true,
        crops,
    })
}

#[utoipa::path(
    get,
    path = "/api/crop-data/{crop_name}",
    tag = "crops",
    params(("crop_name" = String, Path, description = "Crop name")),
    responses(
        (status = 200, description = "Municipality records for the crop", body = CropDataResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(crop = %crop_name))]
async fn get_crop_data(
    State(state): State<AppState>,
    Path(crop_name): Path<String>,
) -> Result<Json<CropDataResponse>, ApiError> {
    let data = state
        .crop_service
        .crop_data(&crop_name)
        .map_err(engine_failure)?
        .clone();

    info!("Returning {} municipalities for {}", data.len(), crop_name);
    Ok(Json(CropDataResponse {
        success: true,
        data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/crop-chart-data/{crop_name}",
    tag = "crops",
    params(("crop_name" = String, Path, description = "Crop name"), ChartParams),
    responses(
        (status = 200, description = "Top municipalities by harvested area", body = ChartDataResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state, params), fields(crop = %crop_name))]
async fn get_crop_chart_data(
    State(state): State<AppState>,
    Path(crop_name): Path<String>,
    params: Result<Query<ChartParams>, QueryRejection>,
) -> Result<Json<ChartDataResponse>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warn!("Rejected chart query for {}: {}", crop_name, rejection.body_text());
        failure(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let chart_data = state
        .crop_service
        .chart_data(&crop_name, params.limit)
        .map_err(engine_failure)?;

    info!("Ranked {} municipalities for {}", chart_data.labels.len(), crop_name);
    Ok(Json(ChartDataResponse {
        success: true,
        chart_data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/analysis/statistical-summary/{crop_name}",
    tag = "crops",
    params(("crop_name" = String, Path, description = "Crop name")),
    responses(
        (status = 200, description = "Descriptive statistics", body = SummaryResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse),
        (status = 422, description = "Crop has no municipalities", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(crop = %crop_name))]
async fn get_statistical_summary(
    State(state): State<AppState>,
    Path(crop_name): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let summary = state
        .crop_service
        .statistical_summary(&crop_name)
        .map_err(engine_failure)?;

    info!(
        "Summarised {} municipalities for {}, total area: {:.2} ha",
        summary.count, crop_name, summary.total
    );
    Ok(Json(SummaryResponse {
        success: true,
        summary,
    }))
}

#[utoipa::path(
    get,
    path = "/api/analysis/by-state/{crop_name}",
    tag = "crops",
    params(("crop_name" = String, Path, description = "Crop name")),
    responses(
        (status = 200, description = "Per-state rollup", body = StatesDataResponse),
        (status = 404, description = "Crop not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state), fields(crop = %crop_name))]
async fn get_analysis_by_state(
    State(state): State<AppState>,
    Path(crop_name): Path<String>,
) -> Result<Json<StatesDataResponse>, ApiError> {
    let states_data = state
        .crop_service
        .state_rollup(&crop_name)
        .map_err(engine_failure)?;

    info!("Rolled up {} into {} states", crop_name, states_data.len());
    Ok(Json(StatesDataResponse {
        success: true,
        states_data,
    }))
}

#[utoipa::path(
    get,
    path = "/api/analysis/comparison/{crop1}/{crop2}",
    tag = "crops",
    params(
        ("crop1" = String, Path, description = "First crop"),
        ("crop2" = String, Path, description = "Second crop")
    ),
    responses(
        (status = 200, description = "Paired areas over shared municipalities", body = ComparisonResponse),
        (status = 404, description = "One or both crops not found", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn get_crop_comparison(
    State(state): State<AppState>,
    Path((crop1, crop2)): Path<(String, String)>,
) -> Result<Json<ComparisonResponse>, ApiError> {
    let result = state
        .crop_service
        .compare(&crop1, &crop2)
        .map_err(engine_failure)?;

    info!(
        "Compared {} and {} over {} common municipalities",
        crop1, crop2, result.common_municipalities
    );
    Ok(Json(ComparisonResponse {
        success: true,
        crop1: result.crop1,
        crop2: result.crop2,
        comparison_data: result.comparison_data,
        common_municipalities: result.common_municipalities,
    }))
}

#[utoipa::path(
    get,
    path = "/api/export/complete-data",
    tag = "crops",
    responses(
        (status = 200, description = "Census workbook as an xlsx attachment"),
        (status = 404, description = "Workbook not found", body = ErrorResponse),
        (status = 500, description = "Workbook could not be read", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
async fn export_complete_data(State(state): State<AppState>) -> Result<Response, ApiError> {
    let file = state
        .export_service
        .load_workbook()
        .await
        .map_err(|e| match e {
            ExportError::NotFound => {
                warn!("Export requested but no workbook is available");
                failure(StatusCode::NOT_FOUND, e.to_string())
            }
            other => {
                error!("Failed to export workbook: {}", other);
                failure(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        })?;

    let disposition = format!("attachment; filename=\"{}\"", file.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
