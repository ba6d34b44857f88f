//! Request schemas and response envelopes.
//!
//! Request fields are all optional at the wire level; `burrow-core` validates presence and
//! ranges before any store access so that every rejection carries a precise message.

use crate::model::{ClinicalData, User};
use burrow_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::{IntoParams, ToSchema};

/// A JSON scalar that may arrive either as a number or as numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarInput {
    Number(f64),
    Text(String),
}

impl std::fmt::Display for ScalarInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarInput::Number(n) => write!(f, "{}", n),
            ScalarInput::Text(s) => write!(f, "{}", s),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserReq {
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ShopListReq {
    pub topic: Option<String>,
    /// Initial items; only honoured on create.
    pub items: Option<Vec<ItemReq>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ItemReq {
    pub name: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<ScalarInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ShopListSearchParams {
    /// Case-insensitive substring of the topic.
    pub topic: Option<String>,
    /// Inclusive lower bound on item count.
    pub min_items: Option<String>,
    /// Inclusive upper bound on item count.
    pub max_items: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub history: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentReq {
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub appointment_date: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
    /// Any truthy value (`true`, `1`, `"yes"`, ...) is normalised to `true`.
    #[schema(value_type = Option<bool>)]
    pub is_emergency: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDataReq {
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[schema(value_type = Option<String>)]
    pub value: Option<ScalarInput>,
    /// RFC 3339 timestamp; defaults to the time of ingestion.
    pub measured_date_time: Option<String>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Structured error body returned for every failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Machine-readable kind: `BadRequest`, `NotFound`, `Conflict` or `Internal`.
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserRes {
    pub message: String,
    pub deleted_user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyRes {
    pub message: String,
    pub deleted_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteShopListRes {
    pub message: String,
    #[schema(value_type = String)]
    pub user_id: RecordId,
    #[schema(value_type = String)]
    pub list_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemRes {
    pub message: String,
    #[schema(value_type = String)]
    pub user_id: RecordId,
    #[schema(value_type = String)]
    pub list_id: RecordId,
    #[schema(value_type = String)]
    pub item_id: RecordId,
}

/// One matching shop list in a cross-user topic search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicSearchRow {
    #[schema(value_type = String)]
    pub user_id: RecordId,
    pub username: String,
    #[schema(value_type = String)]
    pub shop_list_id: RecordId,
    pub topic: String,
    pub item_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicSearchRes {
    pub message: String,
    pub topic: String,
    pub count: usize,
    pub shop_lists: Vec<TopicSearchRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuccessRes {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordRes {
    pub message: String,
    #[schema(value_type = String)]
    pub deleted_id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CountRes {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDataByTypeRes {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: usize,
    pub clinical_data: Vec<ClinicalData>,
}

/// A patient with at least one flagged measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPatient {
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    pub name: String,
    pub critical_data: Vec<ClinicalData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CriticalReportRes {
    pub report_name: String,
    pub generated_at: DateTime<Utc>,
    pub critical_patients: Vec<CriticalPatient>,
}

/// Diagnostic call counts keyed by `"<METHOD> <route>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CallCountsRes {
    pub calls: BTreeMap<String, u64>,
}
