use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested name does not denote any type on the class path.
    #[error("Class not found: {0}")]
    ClassNotFound(String),
    #[error("Supertype {supertype} of {class} could not be found")]
    MissingSupertype { class: String, supertype: String },
    #[error("Circular class hierarchy detected at {0}")]
    CircularHierarchy(String),
    #[error("Malformed class file for {class}: {reason}")]
    MalformedClass { class: String, reason: String },
    #[error("Unsupported resource {name}: {reason}")]
    UnsupportedResource { name: String, reason: String },
    #[error("Archive error in {}: {message}", path.display())]
    Archive { path: PathBuf, message: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn malformed(class: impl Into<String>, reason: impl ToString) -> Self {
        ApiError::MalformedClass {
            class: class.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is the one recoverable condition: an unknown type name.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::ClassNotFound(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
