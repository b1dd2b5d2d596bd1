use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Field '{0}' unsupported for level '{1}'")]
    InvalidField(String, String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    #[error("Type '{0}' is registered but defines no default provider")]
    MissingProvider(String),

    #[error("Default provider failed for type '{0}': {1}")]
    ProviderFailed(String, String),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, FieldError>;
