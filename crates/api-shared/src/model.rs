//! Stored document types.
//!
//! Identities are `Option<RecordId>` because the document store assigns them on first save; any
//! document read back from a store has every id populated. On the wire ids are named `_id`.

use burrow_uuid::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Leaf entity embedded in exactly one [`ShopList`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShopListItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
}

/// Ordered group of items embedded in exactly one [`User`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShopList {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    pub topic: String,
    #[serde(default)]
    pub items: Vec<ShopListItem>,
}

impl ShopList {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Root aggregate owning a sequence of shop lists. `username` is unique across users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    pub username: String,
    #[serde(default)]
    pub shop_lists: Vec<ShopList>,
}

/// Patient demographics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Patient {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    pub patient_name: String,
    pub doctor_name: String,
    pub appointment_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub is_emergency: bool,
}

/// A single measurement for a patient. `flagged` is derived from `type` and `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    #[schema(value_type = String)]
    pub patient_id: RecordId,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub measured_date_time: DateTime<Utc>,
    pub flagged: bool,
}
