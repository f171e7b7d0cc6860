//! Adapters that implement TypeDirectory for various data sources.

mod caching;
mod memory;

pub use caching::CachingDirectory;
pub use memory::{FieldDecl, MemoryDirectory, MethodDecl, TypeDecl, Universe};
