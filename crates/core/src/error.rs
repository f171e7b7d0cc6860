use jbind_api::{DirectoryError, Member};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JbindError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("Method resolution for signature {receiver}.{member}({arguments}) was ambiguous")]
    AmbiguousInvocation {
        receiver: String,
        member: String,
        arguments: String,
        candidates: Vec<Member>,
    },
    #[error("No {} field '{field}' was found belonging to class '{receiver}'", field_kind(.is_static))]
    NoField {
        field: String,
        receiver: String,
        is_static: bool,
        #[source]
        cause: Option<DirectoryError>,
    },
    #[error("Invalid argument list: {0}")]
    InvalidArguments(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JbindError {
    /// SQLSTATE reported to the SQL layer for resolution failures.
    pub fn sql_state(&self) -> Option<&'static str> {
        match self {
            JbindError::AmbiguousInvocation { .. } => Some("42X73"),
            JbindError::NoField {
                is_static: false, ..
            } => Some("42X68"),
            JbindError::NoField { is_static: true, .. } => Some("42X72"),
            _ => None,
        }
    }
}

fn field_kind(is_static: &bool) -> &'static str {
    if *is_static { "static" } else { "instance" }
}

pub type Result<T> = std::result::Result<T, JbindError>;
