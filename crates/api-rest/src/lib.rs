//! # API REST
//!
//! REST API implementation for burrow.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS, request tracing)
//!
//! Uses `api-shared` for wire types and `burrow-core` for every record operation.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod extract;
pub mod handlers;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use burrow_core::{CallCounter, Services, Stores};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::{appointments, clinical_data, diagnostics, items, patients, shop_lists, users};

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub calls: Arc<CallCounter>,
}

impl AppState {
    pub fn new(stores: &Stores) -> Self {
        Self {
            services: Services::new(stores),
            calls: Arc::new(CallCounter::new()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        diagnostics::health,
        diagnostics::calls,
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::delete_all_users,
        shop_lists::list_shop_lists,
        shop_lists::create_shop_list,
        shop_lists::get_shop_list,
        shop_lists::update_shop_list,
        shop_lists::delete_shop_list,
        shop_lists::search_shop_lists,
        shop_lists::search_by_topic,
        items::list_items,
        items::create_item,
        items::get_item,
        items::update_item,
        items::delete_item,
        patients::list_patients,
        patients::get_patient,
        patients::create_patient,
        patients::update_patient,
        patients::delete_patient,
        patients::delete_all_patients,
        patients::patient_clinical_data,
        patients::critical_report,
        appointments::list_appointments,
        appointments::count_appointments,
        appointments::get_appointment,
        appointments::create_appointment,
        appointments::update_appointment,
        appointments::delete_appointment,
        clinical_data::list_clinical_data,
        clinical_data::get_clinical_data,
        clinical_data::create_clinical_data,
        clinical_data::update_clinical_data,
        clinical_data::delete_clinical_data,
        clinical_data::clinical_data_by_type,
        clinical_data::delete_all_clinical_data,
    ),
    components(schemas(
        api_shared::User,
        api_shared::ShopList,
        api_shared::ShopListItem,
        api_shared::Patient,
        api_shared::Appointment,
        api_shared::ClinicalData,
        api_shared::UserReq,
        api_shared::ShopListReq,
        api_shared::ItemReq,
        api_shared::PatientReq,
        api_shared::AppointmentReq,
        api_shared::ClinicalDataReq,
        api_shared::HealthRes,
        api_shared::ErrorRes,
        api_shared::DeleteUserRes,
        api_shared::DeleteManyRes,
        api_shared::DeleteShopListRes,
        api_shared::DeleteItemRes,
        api_shared::TopicSearchRow,
        api_shared::TopicSearchRes,
        api_shared::SuccessRes,
        api_shared::DeleteRecordRes,
        api_shared::CountRes,
        api_shared::ClinicalDataByTypeRes,
        api_shared::CriticalPatient,
        api_shared::CriticalReportRes,
        api_shared::CallCountsRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full REST application.
///
/// Static segments (`search`, `shoplists`, `critical`, `count`, `types`) take precedence over
/// path parameters at the same position.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(diagnostics::health))
        .route("/diagnostics/calls", get(diagnostics::calls))
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .delete(users::delete_all_users),
        )
        .route(
            "/users/:user_id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/shoplists/topics/:topic",
            get(shop_lists::search_by_topic),
        )
        .route(
            "/users/:user_id/shoplists",
            get(shop_lists::list_shop_lists).post(shop_lists::create_shop_list),
        )
        .route(
            "/users/:user_id/shoplists/search",
            get(shop_lists::search_shop_lists),
        )
        .route(
            "/users/:user_id/shoplists/:list_id",
            get(shop_lists::get_shop_list)
                .put(shop_lists::update_shop_list)
                .delete(shop_lists::delete_shop_list),
        )
        .route(
            "/users/:user_id/shoplists/:list_id/items",
            get(items::list_items).post(items::create_item),
        )
        .route(
            "/users/:user_id/shoplists/:list_id/items/:item_id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route(
            "/patients",
            get(patients::list_patients)
                .post(patients::create_patient)
                .delete(patients::delete_all_patients),
        )
        .route("/patients/critical/report", get(patients::critical_report))
        .route(
            "/patients/:patient_id",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        .route(
            "/patients/:patient_id/clinicaldata",
            get(patients::patient_clinical_data),
        )
        .route(
            "/appointments",
            get(appointments::list_appointments).post(appointments::create_appointment),
        )
        .route("/appointments/count", get(appointments::count_appointments))
        .route(
            "/appointments/:appointment_id",
            get(appointments::get_appointment)
                .put(appointments::update_appointment)
                .delete(appointments::delete_appointment),
        )
        .route(
            "/clinicaldata",
            get(clinical_data::list_clinical_data)
                .post(clinical_data::create_clinical_data)
                .delete(clinical_data::delete_all_clinical_data),
        )
        .route(
            "/clinicaldata/types/:kind",
            get(clinical_data::clinical_data_by_type),
        )
        .route(
            "/clinicaldata/:data_id",
            get(clinical_data::get_clinical_data)
                .put(clinical_data::update_clinical_data)
                .delete(clinical_data::delete_clinical_data),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), count_calls))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Counts each routed request under its route template.
async fn count_calls(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(route) = request.extensions().get::<MatchedPath>() {
        state.calls.record(request.method().as_str(), route.as_str());
    }
    next.run(request).await
}
