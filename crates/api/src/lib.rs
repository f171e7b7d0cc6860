pub mod directory;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use directory::TypeDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use models::*;
