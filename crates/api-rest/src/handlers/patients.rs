use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;
use api_shared::{ClinicalData, CriticalReportRes, DeleteManyRes, ErrorRes, Patient, PatientReq};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "All patients", body = [Patient])
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Patient>>, ApiError> {
    Ok(Json(state.services.patients.list().await?))
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient", body = Patient),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(state.services.patients.get(&patient_id).await?))
}

#[utoipa::path(
    post,
    path = "/patients",
    request_body = PatientReq,
    responses(
        (status = 201, description = "Patient created", body = Patient),
        (status = 400, description = "Name missing", body = ErrorRes)
    )
)]
/// Create a patient record
///
/// `contact` defaults to `Not Provided` when absent.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<PatientReq>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let patient = state.services.patients.create(&req).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

#[utoipa::path(
    put,
    path = "/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient id")),
    request_body = PatientReq,
    responses(
        (status = 200, description = "Patient updated", body = Patient),
        (status = 400, description = "Name missing", body = ErrorRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
    JsonBody(req): JsonBody<PatientReq>,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(
        state.services.patients.update(&patient_id, &req).await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/patients/{patient_id}",
    params(("patient_id" = String, Path, description = "Patient id")),
    responses(
        (status = 204, description = "Patient deleted"),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
) -> Result<StatusCode, ApiError> {
    state.services.patients.delete(&patient_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/patients",
    responses(
        (status = 200, description = "All patients deleted", body = DeleteManyRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_all_patients(
    State(state): State<AppState>,
) -> Result<Json<DeleteManyRes>, ApiError> {
    Ok(Json(state.services.patients.delete_all().await?))
}

#[utoipa::path(
    get,
    path = "/patients/{patient_id}/clinicaldata",
    params(("patient_id" = String, Path, description = "Patient id")),
    responses(
        (status = 200, description = "The patient's measurements", body = [ClinicalData]),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn patient_clinical_data(
    State(state): State<AppState>,
    PathParams(patient_id): PathParams<String>,
) -> Result<Json<Vec<ClinicalData>>, ApiError> {
    Ok(Json(
        state
            .services
            .patients
            .clinical_data_for(&patient_id)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/patients/critical/report",
    responses(
        (status = 200, description = "Patients with flagged measurements", body = CriticalReportRes)
    )
)]
/// Critical patients report
///
/// Lists every patient that has at least one flagged measurement, with those measurements.
#[axum::debug_handler]
pub async fn critical_report(
    State(state): State<AppState>,
) -> Result<Json<CriticalReportRes>, ApiError> {
    let report = state
        .services
        .patients
        .critical_report(chrono::Utc::now())
        .await?;
    Ok(Json(report))
}
