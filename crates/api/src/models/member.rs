//! Member descriptions produced by a type directory.

use crate::models::types::TypeHandle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved name shared by all constructors.
pub const CONSTRUCTOR_NAME: &str = "<init>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Method,
    Constructor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Simple name; [`CONSTRUCTOR_NAME`] for constructors.
    pub name: String,
    pub kind: MemberKind,
    pub declaring_type: TypeHandle,
    /// Formal parameter types, in declaration order.
    pub parameters: Vec<TypeHandle>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// True when the last parameter is declared with `...`.
    pub is_varargs: bool,
}

impl Member {
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == MemberKind::Constructor
    }

    pub fn declaring_type(&self) -> &TypeHandle {
        &self.declaring_type
    }

    pub fn parameter_types(&self) -> &[TypeHandle] {
        &self.parameters
    }

    /// True when the formal parameter list is exactly `types`.
    pub fn has_signature(&self, types: &[TypeHandle]) -> bool {
        self.parameters.as_slice() == types
    }

    /// `name(type, type)`; constructors render with the declaring type's name.
    pub fn signature(&self) -> String {
        let params = self
            .parameters
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.kind {
            MemberKind::Constructor => format!("{}({})", self.declaring_type, params),
            MemberKind::Method => format!("{}({})", self.name, params),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            MemberKind::Constructor => write!(f, "{}", self.signature()),
            MemberKind::Method => write!(f, "{}.{}", self.declaring_type, self.signature()),
        }
    }
}

/// A field declared by some type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    pub declaring_type: TypeHandle,
    pub field_type: TypeHandle,
    pub visibility: Visibility,
    pub is_static: bool,
}

impl FieldInfo {
    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }
}
