#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Type not found: {0}")]
    NotFound(String),
    #[error("Invalid type name: '{0}'")]
    InvalidTypeName(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
