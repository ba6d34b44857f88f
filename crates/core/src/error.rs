use std::fmt;

/// Coarse classification of a [`RecordError`], used to pick a transport status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write document file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read document file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to remove document file: {0}")]
    FileRemove(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
    #[error("store task failed: {0}")]
    StoreTask(#[from] tokio::task::JoinError),
    #[error("inconsistent document state: {0}")]
    Inconsistent(String),
}

impl RecordError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RecordError::InvalidInput(_) => ErrorKind::BadRequest,
            RecordError::NotFound { .. } => ErrorKind::NotFound,
            RecordError::Conflict(_) => ErrorKind::Conflict,
            RecordError::StorageDirCreation(_)
            | RecordError::FileWrite(_)
            | RecordError::FileRead(_)
            | RecordError::FileRemove(_)
            | RecordError::Serialization(_)
            | RecordError::Deserialization(_)
            | RecordError::StoreTask(_)
            | RecordError::Inconsistent(_) => ErrorKind::Internal,
        }
    }
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
