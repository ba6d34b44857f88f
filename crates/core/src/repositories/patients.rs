//! Patient demographics and patient-centred reports.

use crate::constants::CRITICAL_REPORT_NAME;
use crate::store::{DocumentStore, Filter};
use crate::validation::{validate_patient, PatientInput};
use crate::{RecordError, RecordResult};
use api_shared::{
    ClinicalData, CriticalPatient, CriticalReportRes, DeleteManyRes, Patient, PatientReq,
};
use burrow_uuid::RecordId;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

pub const PATIENT_ENTITY: &str = "Patient";

#[derive(Clone)]
pub struct PatientService {
    patients: Arc<dyn DocumentStore<Patient>>,
    clinical_data: Arc<dyn DocumentStore<ClinicalData>>,
}

impl PatientService {
    pub fn new(
        patients: Arc<dyn DocumentStore<Patient>>,
        clinical_data: Arc<dyn DocumentStore<ClinicalData>>,
    ) -> Self {
        Self {
            patients,
            clinical_data,
        }
    }

    pub async fn list(&self) -> RecordResult<Vec<Patient>> {
        self.patients.find(&Filter::all()).await
    }

    pub async fn get(&self, patient_id: &str) -> RecordResult<Patient> {
        self.patients
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| RecordError::not_found(PATIENT_ENTITY, patient_id))
    }

    pub async fn create(&self, req: &PatientReq) -> RecordResult<Patient> {
        let input = validate_patient(req)?;
        let saved = self.patients.save(patient_from(None, input)).await?;
        tracing::info!("created patient {:?}", saved.id);
        Ok(saved)
    }

    /// Replaces every demographic field of an existing patient.
    pub async fn update(&self, patient_id: &str, req: &PatientReq) -> RecordResult<Patient> {
        let input = validate_patient(req)?;
        let existing = self.get(patient_id).await?;
        self.patients.save(patient_from(existing.id, input)).await
    }

    /// Removes the patient. Measurements recorded against it are kept.
    pub async fn delete(&self, patient_id: &str) -> RecordResult<Patient> {
        self.patients
            .delete_by_id(patient_id)
            .await?
            .ok_or_else(|| RecordError::not_found(PATIENT_ENTITY, patient_id))
    }

    pub async fn delete_all(&self) -> RecordResult<DeleteManyRes> {
        let deleted_count = self.patients.delete_all(&Filter::all()).await?;
        tracing::info!("deleted all patients ({})", deleted_count);
        Ok(DeleteManyRes {
            message: "Successfully deleted all patients".into(),
            deleted_count,
        })
    }

    /// All measurements recorded for one existing patient, oldest first.
    pub async fn clinical_data_for(&self, patient_id: &str) -> RecordResult<Vec<ClinicalData>> {
        let patient = self.get(patient_id).await?;
        let owner = patient.id;
        self.clinical_data
            .find(&Filter::matching(move |c: &ClinicalData| {
                owner.as_ref() == Some(&c.patient_id)
            }))
            .await
    }

    /// Lists each existing patient with at least one flagged measurement.
    pub async fn critical_report(
        &self,
        generated_at: DateTime<Utc>,
    ) -> RecordResult<CriticalReportRes> {
        let flagged = self
            .clinical_data
            .find(&Filter::matching(|c: &ClinicalData| c.flagged))
            .await?;

        let mut by_patient: HashMap<RecordId, Vec<ClinicalData>> = HashMap::new();
        for data in flagged {
            by_patient
                .entry(data.patient_id.clone())
                .or_default()
                .push(data);
        }

        let critical_patients = self
            .list()
            .await?
            .into_iter()
            .filter_map(|patient| {
                let id = patient.id?;
                let critical_data = by_patient.remove(&id)?;
                Some(CriticalPatient {
                    patient_id: id,
                    name: patient.name,
                    critical_data,
                })
            })
            .collect();

        Ok(CriticalReportRes {
            report_name: CRITICAL_REPORT_NAME.into(),
            generated_at,
            critical_patients,
        })
    }
}

fn patient_from(id: Option<RecordId>, input: PatientInput) -> Patient {
    Patient {
        id,
        name: input.name.into_inner(),
        age: input.age,
        gender: input.gender,
        contact: input.contact,
        history: input.history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ErrorKind;

    fn service() -> (PatientService, Arc<dyn DocumentStore<ClinicalData>>) {
        let clinical: Arc<dyn DocumentStore<ClinicalData>> =
            Arc::new(MemoryStore::<ClinicalData>::new());
        let patients = PatientService::new(
            Arc::new(MemoryStore::<Patient>::new()),
            clinical.clone(),
        );
        (patients, clinical)
    }

    fn req(name: &str) -> PatientReq {
        PatientReq {
            name: Some(name.into()),
            age: Some(42),
            gender: Some("female".into()),
            contact: None,
            history: None,
        }
    }

    fn measurement(patient: &Patient, kind: &str, value: &str, flagged: bool) -> ClinicalData {
        ClinicalData {
            id: None,
            patient_id: patient.id.clone().expect("patient id"),
            kind: kind.into(),
            value: value.into(),
            measured_date_time: Utc::now(),
            flagged,
        }
    }

    #[tokio::test]
    async fn test_crud_round_trip() {
        let (patients, _) = service();
        let created = patients.create(&req("Jane Doe")).await.expect("create");
        assert_eq!(created.contact, "Not Provided");
        let id = created.id.clone().expect("id").to_string();

        let updated = patients
            .update(
                &id,
                &PatientReq {
                    contact: Some("555-0100".into()),
                    ..req("Jane Smith")
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Jane Smith");
        assert_eq!(updated.contact, "555-0100");

        assert_eq!(patients.list().await.expect("list").len(), 1);

        patients.delete(&id).await.expect("delete");
        let err = patients.get(&id).await.expect_err("deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err = patients.delete(&id).await.expect_err("already deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (patients, _) = service();
        let err = patients
            .create(&PatientReq::default())
            .await
            .expect_err("no name");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_critical_report_lists_only_patients_with_flagged_data() {
        let (patients, clinical) = service();
        let jane = patients.create(&req("Jane")).await.expect("create");
        let john = patients.create(&req("John")).await.expect("create");

        clinical
            .save(measurement(&jane, "Blood Pressure", "190/100", true))
            .await
            .expect("save");
        clinical
            .save(measurement(&jane, "Heart Rate", "75", false))
            .await
            .expect("save");
        clinical
            .save(measurement(&john, "Heart Rate", "72", false))
            .await
            .expect("save");

        let report = patients.critical_report(Utc::now()).await.expect("report");
        assert_eq!(report.report_name, "Critical Patients Report");
        assert_eq!(report.critical_patients.len(), 1);

        let entry = &report.critical_patients[0];
        assert_eq!(Some(&entry.patient_id), jane.id.as_ref());
        assert_eq!(entry.name, "Jane");
        assert_eq!(entry.critical_data.len(), 1);
        assert!(entry.critical_data.iter().all(|c| c.flagged));
    }

    #[tokio::test]
    async fn test_clinical_data_for_patient() {
        let (patients, clinical) = service();
        let jane = patients.create(&req("Jane")).await.expect("create");
        let john = patients.create(&req("John")).await.expect("create");
        clinical
            .save(measurement(&jane, "Heart Rate", "75", false))
            .await
            .expect("save");
        clinical
            .save(measurement(&john, "Heart Rate", "80", false))
            .await
            .expect("save");

        let jane_id = jane.id.clone().expect("id").to_string();
        let data = patients.clinical_data_for(&jane_id).await.expect("data");
        assert_eq!(data.len(), 1);
        assert_eq!(Some(&data[0].patient_id), jane.id.as_ref());

        let err = patients
            .clinical_data_for(&RecordId::new().to_string())
            .await
            .expect_err("unknown patient");
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let (patients, _) = service();
        patients.create(&req("Jane")).await.expect("create");
        patients.create(&req("John")).await.expect("create");

        let res = patients.delete_all().await.expect("delete all");
        assert_eq!(res.deleted_count, 2);
        assert!(patients.list().await.expect("list").is_empty());
    }
}
