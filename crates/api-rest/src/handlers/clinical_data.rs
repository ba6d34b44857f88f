use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;
use api_shared::{
    ClinicalData, ClinicalDataByTypeRes, ClinicalDataReq, DeleteManyRes, DeleteRecordRes,
    ErrorRes,
};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/clinicaldata",
    responses(
        (status = 200, description = "All measurements", body = [ClinicalData])
    )
)]
#[axum::debug_handler]
pub async fn list_clinical_data(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClinicalData>>, ApiError> {
    Ok(Json(state.services.clinical_data.list().await?))
}

#[utoipa::path(
    get,
    path = "/clinicaldata/{data_id}",
    params(("data_id" = String, Path, description = "Measurement id")),
    responses(
        (status = 200, description = "The measurement", body = ClinicalData),
        (status = 404, description = "Measurement not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_clinical_data(
    State(state): State<AppState>,
    PathParams(data_id): PathParams<String>,
) -> Result<Json<ClinicalData>, ApiError> {
    Ok(Json(state.services.clinical_data.get(&data_id).await?))
}

#[utoipa::path(
    post,
    path = "/clinicaldata",
    request_body = ClinicalDataReq,
    responses(
        (status = 201, description = "Measurement recorded with its derived flag", body = ClinicalData),
        (status = 400, description = "Required field missing or timestamp invalid", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Record a measurement
///
/// `flagged` is derived from `type` and `value`: a blood pressure of 180/120 or above, or a
/// heart rate, respiratory rate or blood oxygen level outside its normal range, is flagged.
#[axum::debug_handler]
pub async fn create_clinical_data(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ClinicalDataReq>,
) -> Result<(StatusCode, Json<ClinicalData>), ApiError> {
    let data = state.services.clinical_data.create(&req).await?;
    Ok((StatusCode::CREATED, Json(data)))
}

#[utoipa::path(
    put,
    path = "/clinicaldata/{data_id}",
    params(("data_id" = String, Path, description = "Measurement id")),
    request_body = ClinicalDataReq,
    responses(
        (status = 200, description = "Measurement replaced and re-flagged", body = ClinicalData),
        (status = 400, description = "Required field missing or timestamp invalid", body = ErrorRes),
        (status = 404, description = "Measurement or patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_clinical_data(
    State(state): State<AppState>,
    PathParams(data_id): PathParams<String>,
    JsonBody(req): JsonBody<ClinicalDataReq>,
) -> Result<Json<ClinicalData>, ApiError> {
    Ok(Json(
        state.services.clinical_data.update(&data_id, &req).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/clinicaldata/{data_id}",
    params(("data_id" = String, Path, description = "Measurement id")),
    responses(
        (status = 200, description = "Measurement deleted", body = DeleteRecordRes),
        (status = 404, description = "Measurement not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_clinical_data(
    State(state): State<AppState>,
    PathParams(data_id): PathParams<String>,
) -> Result<Json<DeleteRecordRes>, ApiError> {
    Ok(Json(state.services.clinical_data.delete(&data_id).await?))
}

#[utoipa::path(
    get,
    path = "/clinicaldata/types/{kind}",
    params(("kind" = String, Path, description = "Measurement type, matched ignoring case")),
    responses(
        (status = 200, description = "Measurements of this type", body = ClinicalDataByTypeRes)
    )
)]
#[axum::debug_handler]
pub async fn clinical_data_by_type(
    State(state): State<AppState>,
    PathParams(kind): PathParams<String>,
) -> Result<Json<ClinicalDataByTypeRes>, ApiError> {
    Ok(Json(state.services.clinical_data.by_type(&kind).await?))
}

#[utoipa::path(
    delete,
    path = "/clinicaldata",
    responses(
        (status = 200, description = "All measurements deleted", body = DeleteManyRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_all_clinical_data(
    State(state): State<AppState>,
) -> Result<Json<DeleteManyRes>, ApiError> {
    Ok(Json(state.services.clinical_data.delete_all().await?))
}
