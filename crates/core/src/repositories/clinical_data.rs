//! Clinical measurements.
//!
//! `flagged` is never accepted from a client: it is derived from `type` and `value` by
//! [`is_critical`] each time a measurement is created or replaced.

use crate::flagging::is_critical;
use crate::repositories::patients::PATIENT_ENTITY;
use crate::repositories::stored_id;
use crate::store::{DocumentStore, Filter};
use crate::validation::{validate_clinical_data, ClinicalDataInput};
use crate::{RecordError, RecordResult};
use api_shared::{
    ClinicalData, ClinicalDataByTypeRes, ClinicalDataReq, DeleteManyRes, DeleteRecordRes, Patient,
};
use burrow_uuid::RecordId;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const CLINICAL_DATA_ENTITY: &str = "Clinical data";

#[derive(Clone)]
pub struct ClinicalDataService {
    clinical_data: Arc<dyn DocumentStore<ClinicalData>>,
    patients: Arc<dyn DocumentStore<Patient>>,
}

impl ClinicalDataService {
    pub fn new(
        clinical_data: Arc<dyn DocumentStore<ClinicalData>>,
        patients: Arc<dyn DocumentStore<Patient>>,
    ) -> Self {
        Self {
            clinical_data,
            patients,
        }
    }

    pub async fn list(&self) -> RecordResult<Vec<ClinicalData>> {
        self.clinical_data.find(&Filter::all()).await
    }

    pub async fn get(&self, data_id: &str) -> RecordResult<ClinicalData> {
        self.clinical_data
            .find_by_id(data_id)
            .await?
            .ok_or_else(|| RecordError::not_found(CLINICAL_DATA_ENTITY, data_id))
    }

    /// Resolves the referenced patient's identity.
    async fn patient_id(&self, patient_id: &str) -> RecordResult<RecordId> {
        self.patients
            .find_by_id(patient_id)
            .await?
            .and_then(|p| p.id)
            .ok_or_else(|| RecordError::not_found(PATIENT_ENTITY, patient_id))
    }

    /// Records a measurement for an existing patient.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `patientId`, `type` or `value` is missing, or the timestamp is
    ///   malformed.
    /// - `NotFound` if no patient has the given id.
    pub async fn create(&self, req: &ClinicalDataReq) -> RecordResult<ClinicalData> {
        let input = validate_clinical_data(req)?;
        let patient_id = self.patient_id(&input.patient_id).await?;
        let measured_at = input.measured_date_time.unwrap_or_else(Utc::now);

        let saved = self
            .clinical_data
            .save(measurement_from(None, patient_id, measured_at, input))
            .await?;
        if saved.flagged {
            tracing::warn!(
                "critical {} reading '{}' for patient {}",
                saved.kind,
                saved.value,
                saved.patient_id
            );
        }
        Ok(saved)
    }

    /// Replaces a measurement and re-derives its flag. An omitted `measuredDateTime` keeps the
    /// stored time.
    pub async fn update(
        &self,
        data_id: &str,
        req: &ClinicalDataReq,
    ) -> RecordResult<ClinicalData> {
        let input = validate_clinical_data(req)?;
        let existing = self.get(data_id).await?;
        let patient_id = self.patient_id(&input.patient_id).await?;
        let measured_at = input
            .measured_date_time
            .unwrap_or(existing.measured_date_time);

        self.clinical_data
            .save(measurement_from(existing.id, patient_id, measured_at, input))
            .await
    }

    pub async fn delete(&self, data_id: &str) -> RecordResult<DeleteRecordRes> {
        let removed = self
            .clinical_data
            .delete_by_id(data_id)
            .await?
            .ok_or_else(|| RecordError::not_found(CLINICAL_DATA_ENTITY, data_id))?;

        Ok(DeleteRecordRes {
            message: "Clinical data deleted successfully".into(),
            deleted_id: stored_id(removed.id, CLINICAL_DATA_ENTITY)?,
        })
    }

    /// Measurements whose type equals `kind`, ignoring case.
    pub async fn by_type(&self, kind: &str) -> RecordResult<ClinicalDataByTypeRes> {
        let wanted = kind.to_lowercase();
        let clinical_data = self
            .clinical_data
            .find(&Filter::matching(move |c: &ClinicalData| {
                c.kind.to_lowercase() == wanted
            }))
            .await?;

        Ok(ClinicalDataByTypeRes {
            kind: kind.to_owned(),
            count: clinical_data.len(),
            clinical_data,
        })
    }

    pub async fn delete_all(&self) -> RecordResult<DeleteManyRes> {
        let deleted_count = self.clinical_data.delete_all(&Filter::all()).await?;
        tracing::info!("deleted all clinical data ({})", deleted_count);
        Ok(DeleteManyRes {
            message: "Successfully deleted all clinical data".into(),
            deleted_count,
        })
    }
}

fn measurement_from(
    id: Option<RecordId>,
    patient_id: RecordId,
    measured_date_time: DateTime<Utc>,
    input: ClinicalDataInput,
) -> ClinicalData {
    let flagged = is_critical(input.kind.as_str(), input.value.as_str());
    ClinicalData {
        id,
        patient_id,
        kind: input.kind.into_inner(),
        value: input.value.into_inner(),
        measured_date_time,
        flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ErrorKind;
    use api_shared::ScalarInput;

    struct Fixture {
        clinical: ClinicalDataService,
        patient_id: String,
    }

    async fn fixture() -> Fixture {
        let patients: Arc<dyn DocumentStore<Patient>> = Arc::new(MemoryStore::<Patient>::new());
        let patient = patients
            .save(Patient {
                id: None,
                name: "Jane Doe".into(),
                age: None,
                gender: None,
                contact: "Not Provided".into(),
                history: None,
            })
            .await
            .expect("save patient");

        Fixture {
            clinical: ClinicalDataService::new(
                Arc::new(MemoryStore::<ClinicalData>::new()),
                patients,
            ),
            patient_id: patient.id.expect("patient id").to_string(),
        }
    }

    fn req(patient_id: &str, kind: &str, value: ScalarInput) -> ClinicalDataReq {
        ClinicalDataReq {
            patient_id: Some(patient_id.into()),
            kind: Some(kind.into()),
            value: Some(value),
            measured_date_time: None,
        }
    }

    fn text(v: &str) -> ScalarInput {
        ScalarInput::Text(v.into())
    }

    #[tokio::test]
    async fn test_create_derives_flag() {
        let f = fixture().await;
        let cases = [
            ("Blood Pressure", text("180/120"), true),
            ("Blood Pressure", text("120/80"), false),
            ("Heart Rate", text("75"), false),
            ("Heart Rate", ScalarInput::Number(150.0), true),
            ("Temperature", text("41"), false),
        ];

        for (kind, value, expected) in cases {
            let saved = f
                .clinical
                .create(&req(&f.patient_id, kind, value.clone()))
                .await
                .expect("create");
            assert_eq!(saved.flagged, expected, "{} {}", kind, value);
            assert!(saved.id.is_some());
        }
    }

    #[tokio::test]
    async fn test_create_for_unknown_patient_is_not_found() {
        let f = fixture().await;
        let err = f
            .clinical
            .create(&req(&RecordId::new().to_string(), "Heart Rate", text("75")))
            .await
            .expect_err("unknown patient");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(f.clinical.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_update_rederives_flag() {
        let f = fixture().await;
        let normal = f
            .clinical
            .create(&req(&f.patient_id, "Heart Rate", text("75")))
            .await
            .expect("create");
        let id = normal.id.clone().expect("id").to_string();

        let updated = f
            .clinical
            .update(&id, &req(&f.patient_id, "Heart Rate", text("45")))
            .await
            .expect("update");
        assert!(updated.flagged);
        assert_eq!(updated.id, normal.id);
    }

    #[tokio::test]
    async fn test_update_without_time_keeps_measured_date_time() {
        let f = fixture().await;
        let mut timed = req(&f.patient_id, "Heart Rate", text("75"));
        timed.measured_date_time = Some("2025-03-01T08:30:00Z".into());
        let created = f.clinical.create(&timed).await.expect("create");
        let id = created.id.clone().expect("id").to_string();

        let updated = f
            .clinical
            .update(&id, &req(&f.patient_id, "Heart Rate", text("80")))
            .await
            .expect("update");
        assert_eq!(updated.measured_date_time, created.measured_date_time);
        assert_eq!(updated.value, "80");

        let mut retimed = req(&f.patient_id, "Heart Rate", text("80"));
        retimed.measured_date_time = Some("2025-03-02T09:00:00Z".into());
        let moved = f.clinical.update(&id, &retimed).await.expect("update");
        assert_ne!(moved.measured_date_time, created.measured_date_time);
    }

    #[tokio::test]
    async fn test_by_type_ignores_case_and_delete_all_clears() {
        let f = fixture().await;
        let readings = [
            ("Heart Rate", "75"),
            ("heart rate", "80"),
            ("Blood Pressure", "120/80"),
        ];
        for (kind, value) in readings {
            f.clinical
                .create(&req(&f.patient_id, kind, text(value)))
                .await
                .expect("create");
        }

        let res = f.clinical.by_type("HEART RATE").await.expect("by type");
        assert_eq!(res.count, 2);
        assert_eq!(res.kind, "HEART RATE");

        let res = f.clinical.delete_all().await.expect("delete all");
        assert_eq!(res.deleted_count, 3);
        assert!(f.clinical.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let f = fixture().await;
        let saved = f
            .clinical
            .create(&req(&f.patient_id, "Heart Rate", text("75")))
            .await
            .expect("create");
        let id = saved.id.expect("id").to_string();

        f.clinical.delete(&id).await.expect("delete");
        let err = f.clinical.get(&id).await.expect_err("deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
