//! Appointment scheduling records.

use crate::repositories::stored_id;
use crate::store::{DocumentStore, Filter};
use crate::validation::{validate_appointment, AppointmentInput};
use crate::{RecordError, RecordResult};
use api_shared::{Appointment, AppointmentReq, CountRes, DeleteRecordRes, SuccessRes};
use burrow_uuid::RecordId;
use std::sync::Arc;

pub const APPOINTMENT_ENTITY: &str = "Appointment";

#[derive(Clone)]
pub struct AppointmentService {
    appointments: Arc<dyn DocumentStore<Appointment>>,
}

impl AppointmentService {
    pub fn new(appointments: Arc<dyn DocumentStore<Appointment>>) -> Self {
        Self { appointments }
    }

    pub async fn list(&self) -> RecordResult<Vec<Appointment>> {
        self.appointments.find(&Filter::all()).await
    }

    pub async fn get(&self, appointment_id: &str) -> RecordResult<Appointment> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or_else(|| RecordError::not_found(APPOINTMENT_ENTITY, appointment_id))
    }

    /// Creates an appointment; `status` defaults to `Scheduled` and `isEmergency` is
    /// normalised from any truthy input.
    pub async fn create(&self, req: &AppointmentReq) -> RecordResult<Appointment> {
        let input = validate_appointment(req)?;
        let saved = self.appointments.save(appointment_from(None, input)).await?;
        tracing::info!(
            "created appointment {:?} (emergency: {})",
            saved.id,
            saved.is_emergency
        );
        Ok(saved)
    }

    pub async fn update(
        &self,
        appointment_id: &str,
        req: &AppointmentReq,
    ) -> RecordResult<SuccessRes> {
        let input = validate_appointment(req)?;
        let existing = self.get(appointment_id).await?;
        self.appointments
            .save(appointment_from(existing.id, input))
            .await?;
        Ok(SuccessRes { success: true })
    }

    pub async fn delete(&self, appointment_id: &str) -> RecordResult<DeleteRecordRes> {
        let removed = self
            .appointments
            .delete_by_id(appointment_id)
            .await?
            .ok_or_else(|| RecordError::not_found(APPOINTMENT_ENTITY, appointment_id))?;

        Ok(DeleteRecordRes {
            message: "Appointment deleted successfully".into(),
            deleted_id: stored_id(removed.id, APPOINTMENT_ENTITY)?,
        })
    }

    pub async fn count(&self) -> RecordResult<CountRes> {
        Ok(CountRes {
            count: self.appointments.count(&Filter::all()).await?,
        })
    }
}

fn appointment_from(id: Option<RecordId>, input: AppointmentInput) -> Appointment {
    Appointment {
        id,
        patient_name: input.patient_name.into_inner(),
        doctor_name: input.doctor_name.into_inner(),
        appointment_date: input.appointment_date,
        reason: input.reason,
        status: input.status,
        is_emergency: input.is_emergency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::ErrorKind;
    use serde_json::json;

    fn service() -> AppointmentService {
        AppointmentService::new(Arc::new(MemoryStore::<Appointment>::new()))
    }

    fn req(is_emergency: Option<serde_json::Value>) -> AppointmentReq {
        AppointmentReq {
            patient_name: Some("Jane Doe".into()),
            doctor_name: Some("Dr. Who".into()),
            appointment_date: Some("2026-11-02T09:30:00Z".into()),
            reason: Some("Checkup".into()),
            status: None,
            is_emergency,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_normalises_emergency() {
        let appointments = service();
        let created = appointments
            .create(&req(Some(json!("yes"))))
            .await
            .expect("create");
        assert_eq!(created.status, "Scheduled");
        assert!(created.is_emergency);

        let routine = appointments.create(&req(None)).await.expect("create");
        assert!(!routine.is_emergency);
    }

    #[tokio::test]
    async fn test_update_count_and_delete() {
        let appointments = service();
        let created = appointments.create(&req(None)).await.expect("create");
        let id = created.id.clone().expect("id").to_string();
        assert_eq!(appointments.count().await.expect("count").count, 1);

        let res = appointments
            .update(
                &id,
                &AppointmentReq {
                    status: Some("Completed".into()),
                    ..req(Some(json!(false)))
                },
            )
            .await
            .expect("update");
        assert!(res.success);
        let fetched = appointments.get(&id).await.expect("get");
        assert_eq!(fetched.status, "Completed");
        assert_eq!(fetched.id, created.id);

        let deleted = appointments.delete(&id).await.expect("delete");
        assert_eq!(deleted.deleted_id.to_string(), id);
        let err = appointments.get(&id).await.expect_err("deleted");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(appointments.count().await.expect("count").count, 0);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found_and_bad_date_is_rejected() {
        let appointments = service();
        let err = appointments
            .update(&RecordId::new().to_string(), &req(None))
            .await
            .expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = appointments
            .create(&AppointmentReq {
                appointment_date: Some("next tuesday".into()),
                ..req(None)
            })
            .await
            .expect_err("bad date");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }
}
