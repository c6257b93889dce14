use supplicore_types::Mrn;

#[derive(Debug, thiserror::Error)]
pub enum SuppliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no patient found with MRN {0}")]
    PatientNotFound(Mrn),
    #[error("a patient with MRN {0} already exists")]
    DuplicateMrn(Mrn),
    #[error("no supplement found with id {0}")]
    SupplementNotFound(u32),
    #[error("no stored report found at {0}")]
    ReportNotFound(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete record: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
}

pub type SuppliResult<T> = std::result::Result<T, SuppliError>;
