//! Constants used throughout the burrow core crate.

/// Default directory for the file-backed store when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "burrow_data";

/// Collection (and file store directory) names.
pub const USERS_COLLECTION: &str = "users";
pub const PATIENTS_COLLECTION: &str = "patients";
pub const APPOINTMENTS_COLLECTION: &str = "appointments";
pub const CLINICAL_DATA_COLLECTION: &str = "clinical_data";

/// Filename of a stored document inside its sharded directory.
pub const DOCUMENT_JSON_FILENAME: &str = "document.json";

/// Contact value recorded for patients who did not supply one.
pub const DEFAULT_PATIENT_CONTACT: &str = "Not Provided";

/// Status recorded for appointments created without one.
pub const DEFAULT_APPOINTMENT_STATUS: &str = "Scheduled";

pub const CRITICAL_REPORT_NAME: &str = "Critical Patients Report";
