use crate::error::ApiError;
use crate::extract::{JsonBody, PathParams};
use crate::AppState;
use api_shared::{Appointment, AppointmentReq, CountRes, DeleteRecordRes, ErrorRes, SuccessRes};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

#[utoipa::path(
    get,
    path = "/appointments",
    responses(
        (status = 200, description = "All appointments", body = [Appointment])
    )
)]
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Appointment>>, ApiError> {
    Ok(Json(state.services.appointments.list().await?))
}

#[utoipa::path(
    get,
    path = "/appointments/count",
    responses(
        (status = 200, description = "Number of appointments", body = CountRes)
    )
)]
#[axum::debug_handler]
pub async fn count_appointments(
    State(state): State<AppState>,
) -> Result<Json<CountRes>, ApiError> {
    Ok(Json(state.services.appointments.count().await?))
}

#[utoipa::path(
    get,
    path = "/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "The appointment", body = Appointment),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppState>,
    PathParams(appointment_id): PathParams<String>,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(state.services.appointments.get(&appointment_id).await?))
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = AppointmentReq,
    responses(
        (status = 201, description = "Appointment created", body = Appointment),
        (status = 400, description = "Required field missing or date invalid", body = ErrorRes)
    )
)]
/// Book an appointment
///
/// `status` defaults to `Scheduled`; `isEmergency` accepts any truthy value.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AppointmentReq>,
) -> Result<(StatusCode, Json<Appointment>), ApiError> {
    let appointment = state.services.appointments.create(&req).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

#[utoipa::path(
    put,
    path = "/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment id")),
    request_body = AppointmentReq,
    responses(
        (status = 200, description = "Appointment replaced", body = SuccessRes),
        (status = 400, description = "Required field missing or date invalid", body = ErrorRes),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppState>,
    PathParams(appointment_id): PathParams<String>,
    JsonBody(req): JsonBody<AppointmentReq>,
) -> Result<Json<SuccessRes>, ApiError> {
    Ok(Json(
        state
            .services
            .appointments
            .update(&appointment_id, &req)
            .await?,
    ))
}

#[utoipa::path(
    delete,
    path = "/appointments/{appointment_id}",
    params(("appointment_id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted", body = DeleteRecordRes),
        (status = 404, description = "Appointment not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppState>,
    PathParams(appointment_id): PathParams<String>,
) -> Result<Json<DeleteRecordRes>, ApiError> {
    Ok(Json(
        state.services.appointments.delete(&appointment_id).await?,
    ))
}
