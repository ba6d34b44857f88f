//! Input validation.
//!
//! Every request schema in `api-shared` is converted into a validated input here before any
//! store access. Validation is side-effect free: a rejection never touches a store.

use crate::constants::{DEFAULT_APPOINTMENT_STATUS, DEFAULT_PATIENT_CONTACT};
use crate::{RecordError, RecordResult};
use api_shared::{
    AppointmentReq, ClinicalDataReq, ItemReq, PatientReq, ScalarInput, ShopList,
    ShopListReq, ShopListSearchParams, UserReq,
};
use burrow_types::{NonEmptyText, Price};
use chrono::{DateTime, NaiveDate, Utc};

fn required_text(value: Option<&str>, message: &str) -> RecordResult<NonEmptyText> {
    value
        .and_then(|v| NonEmptyText::new(v).ok())
        .ok_or_else(|| RecordError::InvalidInput(message.into()))
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn parse_price(input: &ScalarInput) -> RecordResult<Price> {
    let parsed = match input {
        ScalarInput::Number(n) => Price::new(*n),
        ScalarInput::Text(s) => Price::parse(s),
    };
    parsed.map_err(|_| RecordError::InvalidInput("Price must be a valid number 0 or greater".into()))
}

/// Parses an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_timestamp(field: &str, input: &str) -> RecordResult<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            RecordError::InvalidInput(format!(
                "{} must be an RFC 3339 timestamp or YYYY-MM-DD date, got '{}'",
                field, input
            ))
        })
}

/// Normalises a loosely-typed flag. `true`, non-zero numbers and the strings
/// `true`/`yes`/`y`/`on`/`1` (any case) are truthy; everything else is false.
pub fn normalize_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "on" | "1"
        ),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Users and shop lists
// ---------------------------------------------------------------------------

pub fn validate_user(req: &UserReq) -> RecordResult<NonEmptyText> {
    required_text(req.username.as_deref(), "Username must be supplied")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    pub name: NonEmptyText,
    pub price: Price,
}

pub fn validate_new_item(req: &ItemReq) -> RecordResult<ItemInput> {
    let name = required_text(req.name.as_deref(), "Item name must be supplied")?;
    let price = req
        .price
        .as_ref()
        .ok_or_else(|| RecordError::InvalidInput("Item price must be supplied".into()))?;

    Ok(ItemInput {
        name,
        price: parse_price(price)?,
    })
}

/// Partial item update: each field applies only when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemPatch {
    pub name: Option<NonEmptyText>,
    pub price: Option<Price>,
}

pub fn validate_item_patch(req: &ItemReq) -> RecordResult<ItemPatch> {
    if req.name.is_none() && req.price.is_none() {
        return Err(RecordError::InvalidInput(
            "Either name or price must be supplied for update".into(),
        ));
    }

    let name = req
        .name
        .as_deref()
        .map(|n| {
            NonEmptyText::new(n)
                .map_err(|_| RecordError::InvalidInput("Item name cannot be empty".into()))
        })
        .transpose()?;
    let price = req.price.as_ref().map(parse_price).transpose()?;

    Ok(ItemPatch { name, price })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShopListInput {
    pub topic: NonEmptyText,
    pub items: Vec<ItemInput>,
}

pub fn validate_new_shop_list(req: &ShopListReq) -> RecordResult<ShopListInput> {
    let topic = required_text(
        req.topic.as_deref(),
        "Topic must be supplied for the shop list",
    )?;
    let items = req
        .items
        .iter()
        .flatten()
        .map(validate_new_item)
        .collect::<RecordResult<Vec<_>>>()?;

    Ok(ShopListInput { topic, items })
}

pub fn validate_topic(req: &ShopListReq) -> RecordResult<NonEmptyText> {
    required_text(req.topic.as_deref(), "Topic must be supplied")
}

/// Filters for searching one user's shop lists. All present filters must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub topic: Option<String>,
    pub min_items: Option<f64>,
    pub max_items: Option<f64>,
}

impl SearchCriteria {
    pub fn matches(&self, list: &ShopList) -> bool {
        let topic_ok = self
            .topic
            .as_ref()
            .map_or(true, |t| contains_ignore_case(&list.topic, t));
        let count = list.item_count() as f64;
        let min_ok = self.min_items.map_or(true, |min| count >= min);
        let max_ok = self.max_items.map_or(true, |max| count <= max);
        topic_ok && min_ok && max_ok
    }
}

/// Bounds that are empty or not numbers are ignored.
pub fn parse_search_params(params: &ShopListSearchParams) -> SearchCriteria {
    fn bound(raw: Option<&str>) -> Option<f64> {
        raw.map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| !v.is_nan())
    }

    SearchCriteria {
        topic: optional_text(params.topic.as_deref()),
        min_items: bound(params.min_items.as_deref()),
        max_items: bound(params.max_items.as_deref()),
    }
}

/// Case-insensitive substring test used by every topic search.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------
// Patients, appointments, clinical data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct PatientInput {
    pub name: NonEmptyText,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub contact: String,
    pub history: Option<String>,
}

pub fn validate_patient(req: &PatientReq) -> RecordResult<PatientInput> {
    Ok(PatientInput {
        name: required_text(req.name.as_deref(), "Patient name must be supplied")?,
        age: req.age,
        gender: optional_text(req.gender.as_deref()),
        contact: optional_text(req.contact.as_deref())
            .unwrap_or_else(|| DEFAULT_PATIENT_CONTACT.to_owned()),
        history: optional_text(req.history.as_deref()),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentInput {
    pub patient_name: NonEmptyText,
    pub doctor_name: NonEmptyText,
    pub appointment_date: DateTime<Utc>,
    pub reason: String,
    pub status: String,
    pub is_emergency: bool,
}

pub fn validate_appointment(req: &AppointmentReq) -> RecordResult<AppointmentInput> {
    let patient_name = required_text(
        req.patient_name.as_deref(),
        "Patient name must be supplied",
    )?;
    let doctor_name = required_text(req.doctor_name.as_deref(), "Doctor name must be supplied")?;
    let raw_date = required_text(
        req.appointment_date.as_deref(),
        "Appointment date must be supplied",
    )?;

    Ok(AppointmentInput {
        patient_name,
        doctor_name,
        appointment_date: parse_timestamp("appointmentDate", raw_date.as_str())?,
        reason: req.reason.as_deref().map(str::trim).unwrap_or_default().to_owned(),
        status: optional_text(req.status.as_deref())
            .unwrap_or_else(|| DEFAULT_APPOINTMENT_STATUS.to_owned()),
        is_emergency: req.is_emergency.as_ref().is_some_and(normalize_truthy),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClinicalDataInput {
    /// Kept as supplied; the patient lookup decides whether it exists.
    pub patient_id: String,
    pub kind: NonEmptyText,
    pub value: NonEmptyText,
    /// `None` when the request leaves the time out; the caller picks the default.
    pub measured_date_time: Option<DateTime<Utc>>,
}

pub fn validate_clinical_data(req: &ClinicalDataReq) -> RecordResult<ClinicalDataInput> {
    let patient_id = required_text(req.patient_id.as_deref(), "Patient id must be supplied")?;
    let kind = required_text(req.kind.as_deref(), "Clinical data type must be supplied")?;
    let value = req
        .value
        .as_ref()
        .map(ScalarInput::to_string)
        .and_then(|v| NonEmptyText::new(v).ok())
        .ok_or_else(|| RecordError::InvalidInput("Clinical data value must be supplied".into()))?;
    let measured_date_time = optional_text(req.measured_date_time.as_deref())
        .map(|raw| parse_timestamp("measuredDateTime", &raw))
        .transpose()?;

    Ok(ClinicalDataInput {
        patient_id: patient_id.into_inner(),
        kind,
        value,
        measured_date_time,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn item_req(name: Option<&str>, price: Option<ScalarInput>) -> ItemReq {
        ItemReq {
            name: name.map(str::to_owned),
            price,
        }
    }

    #[test]
    fn test_validate_user_requires_username() {
        let err = validate_user(&UserReq { username: None }).expect_err("missing username");
        assert_eq!(err.to_string(), "invalid input: Username must be supplied");

        assert!(validate_user(&UserReq {
            username: Some("  ".into())
        })
        .is_err());

        let name = validate_user(&UserReq {
            username: Some("alice".into()),
        })
        .expect("username present");
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_validate_new_item_rules() {
        let ok = validate_new_item(&item_req(Some("Milk"), Some(ScalarInput::Number(3.99))))
            .expect("valid item");
        assert_eq!(ok.name.as_str(), "Milk");
        assert_eq!(ok.price.value(), 3.99);

        let text_price =
            validate_new_item(&item_req(Some("Milk"), Some(ScalarInput::Text("2".into()))))
                .expect("numeric text price");
        assert_eq!(text_price.price.value(), 2.0);

        let missing_name = validate_new_item(&item_req(None, Some(ScalarInput::Number(1.0))))
            .expect_err("missing name");
        assert!(missing_name.to_string().contains("Item name must be supplied"));

        let missing_price =
            validate_new_item(&item_req(Some("Milk"), None)).expect_err("missing price");
        assert!(missing_price.to_string().contains("Item price must be supplied"));

        for bad in [ScalarInput::Number(-1.0), ScalarInput::Text("abc".into())] {
            let err = validate_new_item(&item_req(Some("Milk"), Some(bad)))
                .expect_err("invalid price");
            assert!(err.to_string().contains("Price must be a valid number 0 or greater"));
        }
    }

    #[test]
    fn test_item_patch_requires_one_field() {
        let err = validate_item_patch(&item_req(None, None)).expect_err("empty patch");
        assert!(err
            .to_string()
            .contains("Either name or price must be supplied for update"));

        let price_only = validate_item_patch(&item_req(None, Some(ScalarInput::Number(5.49))))
            .expect("price only");
        assert_eq!(price_only.name, None);
        assert_eq!(price_only.price.map(Price::value), Some(5.49));

        let name_only = validate_item_patch(&item_req(Some("Oat Milk"), None)).expect("name only");
        assert_eq!(name_only.name.as_ref().map(NonEmptyText::as_str), Some("Oat Milk"));
        assert_eq!(name_only.price, None);

        assert!(validate_item_patch(&item_req(Some(""), None)).is_err());
        assert!(validate_item_patch(&item_req(None, Some(ScalarInput::Number(-2.0)))).is_err());
    }

    #[test]
    fn test_new_shop_list_validates_initial_items() {
        let req = ShopListReq {
            topic: Some("Groceries".into()),
            items: Some(vec![item_req(Some("Milk"), Some(ScalarInput::Number(3.99)))]),
        };
        let input = validate_new_shop_list(&req).expect("valid list");
        assert_eq!(input.topic.as_str(), "Groceries");
        assert_eq!(input.items.len(), 1);

        let bad = ShopListReq {
            topic: Some("Groceries".into()),
            items: Some(vec![item_req(Some("Milk"), None)]),
        };
        assert!(validate_new_shop_list(&bad).is_err());

        let no_topic = ShopListReq::default();
        let err = validate_new_shop_list(&no_topic).expect_err("missing topic");
        assert!(err.to_string().contains("Topic must be supplied"));
    }

    #[test]
    fn test_search_criteria_composition() {
        let list = |topic: &str, n: usize| ShopList {
            id: None,
            topic: topic.into(),
            items: (0..n)
                .map(|i| api_shared::ShopListItem {
                    id: None,
                    name: format!("item {i}"),
                    price: 1.0,
                })
                .collect(),
        };

        let weekly = parse_search_params(&ShopListSearchParams {
            topic: Some("weekly".into()),
            ..Default::default()
        });
        assert!(weekly.matches(&list("Weekly Groceries", 0)));
        assert!(!weekly.matches(&list("Electronics", 0)));

        let min_two = parse_search_params(&ShopListSearchParams {
            min_items: Some("2".into()),
            ..Default::default()
        });
        assert!(!min_two.matches(&list("A", 1)));
        assert!(min_two.matches(&list("A", 2)));

        let bounded = parse_search_params(&ShopListSearchParams {
            topic: Some("a".into()),
            min_items: Some("1".into()),
            max_items: Some("3".into()),
        });
        assert!(bounded.matches(&list("Alpha", 3)));
        assert!(!bounded.matches(&list("Alpha", 4)));
        assert!(!bounded.matches(&list("Omega", 0)));
    }

    #[test]
    fn test_search_params_ignore_non_numeric_bounds() {
        let criteria = parse_search_params(&ShopListSearchParams {
            topic: Some("".into()),
            min_items: Some("lots".into()),
            max_items: Some("".into()),
        });
        assert_eq!(criteria, SearchCriteria::default());
    }

    #[test]
    fn test_patient_defaults_contact() {
        let input = validate_patient(&PatientReq {
            name: Some("Oscar Want".into()),
            age: Some(45),
            gender: Some("Female".into()),
            contact: None,
            history: Some("Something".into()),
        })
        .expect("valid patient");
        assert_eq!(input.contact, "Not Provided");
        assert_eq!(input.age, Some(45));

        assert!(validate_patient(&PatientReq::default()).is_err());
    }

    #[test]
    fn test_normalize_truthy() {
        for truthy in [json!(true), json!(1), json!("true"), json!("YES"), json!("on")] {
            assert!(normalize_truthy(&truthy), "{truthy} should be truthy");
        }
        for falsy in [json!(false), json!(0), json!("no"), json!(""), json!(null), json!([])] {
            assert!(!normalize_truthy(&falsy), "{falsy} should be falsy");
        }
    }

    #[test]
    fn test_validate_appointment_defaults_and_dates() {
        let req = AppointmentReq {
            patient_name: Some("Test Patient".into()),
            doctor_name: Some("Dr. Tester".into()),
            appointment_date: Some("2025-01-01T10:00:00Z".into()),
            reason: None,
            status: None,
            is_emergency: Some(json!("yes")),
        };
        let input = validate_appointment(&req).expect("valid appointment");
        assert_eq!(input.status, "Scheduled");
        assert_eq!(input.reason, "");
        assert!(input.is_emergency);
        assert_eq!(
            input.appointment_date,
            Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap()
        );

        let date_only = AppointmentReq {
            appointment_date: Some("2025-02-03".into()),
            ..req.clone()
        };
        assert_eq!(
            validate_appointment(&date_only)
                .expect("date-only accepted")
                .appointment_date,
            Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap()
        );

        let bad_date = AppointmentReq {
            appointment_date: Some("next tuesday".into()),
            ..req.clone()
        };
        assert!(validate_appointment(&bad_date).is_err());

        let no_doctor = AppointmentReq {
            doctor_name: None,
            ..req
        };
        assert!(validate_appointment(&no_doctor).is_err());
    }

    #[test]
    fn test_validate_clinical_data() {
        let req = ClinicalDataReq {
            patient_id: Some("550e8400e29b41d4a716446655440000".into()),
            kind: Some("Heart Rate".into()),
            value: Some(ScalarInput::Number(75.0)),
            measured_date_time: None,
        };
        let input = validate_clinical_data(&req).expect("valid clinical data");
        assert_eq!(input.value.as_str(), "75");
        assert_eq!(input.measured_date_time, None);

        let timed = ClinicalDataReq {
            measured_date_time: Some("2025-03-01T08:30:00Z".into()),
            ..req.clone()
        };
        let input = validate_clinical_data(&timed).expect("valid clinical data");
        assert_eq!(
            input.measured_date_time,
            Some(Utc.with_ymd_and_hms(2025, 3, 1, 8, 30, 0).unwrap())
        );

        let missing_type = ClinicalDataReq {
            kind: None,
            ..req.clone()
        };
        assert!(validate_clinical_data(&missing_type).is_err());

        let bad_time = ClinicalDataReq {
            measured_date_time: Some("yesterday".into()),
            ..req
        };
        assert!(validate_clinical_data(&bad_time).is_err());
    }
}
