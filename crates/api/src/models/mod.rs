pub mod member;
pub mod type_name;
pub mod types;

pub use member::*;
pub use type_name::*;
pub use types::*;
