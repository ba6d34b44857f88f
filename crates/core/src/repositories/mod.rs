//! Entity services.
//!
//! Each service owns the store handles it needs and exposes one async method per operation.
//! Services validate their input before touching a store.

pub mod appointments;
pub mod clinical_data;
pub mod items;
pub mod patients;
pub mod shop_lists;
pub mod users;

use crate::store::Stores;
use crate::{RecordError, RecordResult};
use appointments::AppointmentService;
use clinical_data::ClinicalDataService;
use items::ItemService;
use patients::PatientService;
use shop_lists::ShopListService;
use burrow_uuid::RecordId;
use users::UserService;

/// The id of a document read back from a store. Saved documents always carry one.
pub(crate) fn stored_id(id: Option<RecordId>, entity: &str) -> RecordResult<RecordId> {
    id.ok_or_else(|| RecordError::Inconsistent(format!("stored {entity} has no id")))
}

/// Every service, wired to one set of stores.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub shop_lists: ShopListService,
    pub items: ItemService,
    pub patients: PatientService,
    pub appointments: AppointmentService,
    pub clinical_data: ClinicalDataService,
}

impl Services {
    pub fn new(stores: &Stores) -> Self {
        Self {
            users: UserService::new(stores.users.clone()),
            shop_lists: ShopListService::new(stores.users.clone()),
            items: ItemService::new(stores.users.clone()),
            patients: PatientService::new(stores.patients.clone(), stores.clinical_data.clone()),
            appointments: AppointmentService::new(stores.appointments.clone()),
            clinical_data: ClinicalDataService::new(
                stores.clinical_data.clone(),
                stores.patients.clone(),
            ),
        }
    }
}
