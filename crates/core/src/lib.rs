pub mod adapters;
pub mod config;
pub mod conversion;
pub mod error;
pub mod inspector;
pub mod logging;
pub mod resolver;
pub mod signature;

pub use error::{JbindError, Result};
pub use inspector::{ArgumentTypes, ClassInspector};
pub use resolver::{OverloadResolver, Resolution, ResolutionFlags};
pub use signature::{ArgumentSpec, ResolvedArguments};
