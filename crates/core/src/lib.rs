//! # Burrow Core
//!
//! Core record logic for the burrow API.
//!
//! This crate contains the data operations and their storage:
//! - Users with embedded shop lists and items, addressed by nested identities
//! - Patients, appointments and clinical measurements with critical-value flagging
//! - Document stores (in-memory, or sharded JSON files under a data directory)
//!
//! **No API concerns**: HTTP servers, routing and status codes belong in `api-rest`.

pub mod config;
pub mod constants;
pub mod counter;
pub mod error;
pub mod flagging;
pub mod repositories;
pub mod resolver;
pub mod store;
pub mod validation;

pub use config::{CoreConfig, StoreBackend};
pub use counter::CallCounter;
pub use error::{ErrorKind, RecordError, RecordResult};
pub use repositories::appointments::AppointmentService;
pub use repositories::clinical_data::ClinicalDataService;
pub use repositories::items::ItemService;
pub use repositories::patients::PatientService;
pub use repositories::shop_lists::ShopListService;
pub use repositories::users::UserService;
pub use repositories::Services;
pub use store::{DocumentStore, Filter, Stores};
