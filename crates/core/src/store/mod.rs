//! Document store abstraction.
//!
//! The core never talks to a database directly. It asks a [`DocumentStore`] to find, save and
//! delete whole documents; embedded sub-documents (shop lists, items) are persisted by saving
//! the owning aggregate.
//!
//! Identity rules shared by every backend:
//! - `save` assigns a fresh [`RecordId`] to the document and to every embedded sub-document
//!   that does not have one yet.
//! - `find_by_id` and `delete_by_id` answer `None` for ids that are not canonical, exactly as
//!   for ids that do not exist.
//! - `find` returns documents in creation order; updating a document keeps its position.
//!
//! Writes are last-writer-wins. Two requests that load the same document, mutate it and save it
//! concurrently can lose one of the changes; no backend offers optimistic concurrency.

mod documents;
mod file;
mod memory;

pub use documents::Document;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::{CoreConfig, StoreBackend};
use crate::RecordResult;
use api_shared::{Appointment, ClinicalData, Patient, User};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Predicate over documents of one collection.
pub struct Filter<D> {
    predicate: Option<Arc<dyn Fn(&D) -> bool + Send + Sync>>,
}

impl<D> Filter<D> {
    /// Matches every document.
    pub fn all() -> Self {
        Self { predicate: None }
    }

    pub fn matching(predicate: impl Fn(&D) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Some(Arc::new(predicate)),
        }
    }

    pub fn matches(&self, document: &D) -> bool {
        self.predicate.as_ref().map_or(true, |p| p(document))
    }
}

impl<D> Clone for Filter<D> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
        }
    }
}

impl<D> fmt::Debug for Filter<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.predicate {
            Some(_) => f.write_str("Filter(matching)"),
            None => f.write_str("Filter(all)"),
        }
    }
}

/// Storage contract for one document collection.
#[async_trait]
pub trait DocumentStore<D: Document>: Send + Sync {
    /// All documents matching `filter`, in creation order.
    async fn find(&self, filter: &Filter<D>) -> RecordResult<Vec<D>>;

    async fn find_one(&self, filter: &Filter<D>) -> RecordResult<Option<D>> {
        Ok(self.find(filter).await?.into_iter().next())
    }

    async fn find_by_id(&self, id: &str) -> RecordResult<Option<D>>;

    /// Inserts or replaces the full document, assigning any missing identities.
    async fn save(&self, document: D) -> RecordResult<D>;

    async fn delete_by_id(&self, id: &str) -> RecordResult<Option<D>>;

    /// Deletes every document matching `filter` and returns how many were removed.
    async fn delete_all(&self, filter: &Filter<D>) -> RecordResult<u64>;

    async fn count(&self, filter: &Filter<D>) -> RecordResult<u64> {
        Ok(self.find(filter).await?.len() as u64)
    }

    /// Name of this backend for logging.
    fn backend_name(&self) -> &'static str;
}

/// One store per collection.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DocumentStore<User>>,
    pub patients: Arc<dyn DocumentStore<Patient>>,
    pub appointments: Arc<dyn DocumentStore<Appointment>>,
    pub clinical_data: Arc<dyn DocumentStore<ClinicalData>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryStore::<User>::new()),
            patients: Arc::new(MemoryStore::<Patient>::new()),
            appointments: Arc::new(MemoryStore::<Appointment>::new()),
            clinical_data: Arc::new(MemoryStore::<ClinicalData>::new()),
        }
    }

    /// Opens the backend selected by `cfg`.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::StorageDirCreation` if the file backend cannot create its
    /// collection directories.
    pub fn open(cfg: &CoreConfig) -> RecordResult<Self> {
        match cfg.store_backend() {
            StoreBackend::Memory => Ok(Self::in_memory()),
            StoreBackend::File => Ok(Self {
                users: Arc::new(FileStore::<User>::open(cfg)?),
                patients: Arc::new(FileStore::<Patient>::open(cfg)?),
                appointments: Arc::new(FileStore::<Appointment>::open(cfg)?),
                clinical_data: Arc::new(FileStore::<ClinicalData>::open(cfg)?),
            }),
        }
    }
}

impl fmt::Debug for Stores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stores")
            .field("users", &self.users.backend_name())
            .field("patients", &self.patients.backend_name())
            .field("appointments", &self.appointments.backend_name())
            .field("clinical_data", &self.clinical_data.backend_name())
            .finish()
    }
}
