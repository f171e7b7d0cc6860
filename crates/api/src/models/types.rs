//! Resolved type handles and the primitive kind table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Binary name of the universal root reference type.
pub const ROOT_OBJECT_TYPE: &str = "java.lang.Object";

/// The eight primitive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

/// All primitive kinds, in keyword-table order.
pub const PRIMITIVES: [Primitive; 8] = [
    Primitive::Boolean,
    Primitive::Byte,
    Primitive::Char,
    Primitive::Short,
    Primitive::Int,
    Primitive::Long,
    Primitive::Float,
    Primitive::Double,
];

impl Primitive {
    /// Java source keyword, e.g. `int`.
    pub const fn keyword(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Binary name of the wrapper class, e.g. `java.lang.Integer`.
    pub const fn wrapper_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "java.lang.Boolean",
            Primitive::Byte => "java.lang.Byte",
            Primitive::Char => "java.lang.Character",
            Primitive::Short => "java.lang.Short",
            Primitive::Int => "java.lang.Integer",
            Primitive::Long => "java.lang.Long",
            Primitive::Float => "java.lang.Float",
            Primitive::Double => "java.lang.Double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        PRIMITIVES.into_iter().find(|p| p.keyword() == keyword)
    }

    pub fn from_wrapper_name(name: &str) -> Option<Self> {
        PRIMITIVES.into_iter().find(|p| p.wrapper_name() == name)
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean | Primitive::Char)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Kind of a reference (non-array) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
}

/// A resolved type, handed out by a [`crate::TypeDirectory`].
///
/// Two handles denote the same type exactly when their canonical names are
/// equal; the class kind is carried along but does not take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TypeHandle {
    Primitive { primitive: Primitive },
    Void,
    Reference { name: String, class_kind: ClassKind },
    Array { component: Box<TypeHandle> },
}

impl TypeHandle {
    pub fn primitive(primitive: Primitive) -> Self {
        TypeHandle::Primitive { primitive }
    }

    pub fn class(name: impl Into<String>) -> Self {
        TypeHandle::Reference {
            name: name.into(),
            class_kind: ClassKind::Class,
        }
    }

    pub fn interface(name: impl Into<String>) -> Self {
        TypeHandle::Reference {
            name: name.into(),
            class_kind: ClassKind::Interface,
        }
    }

    pub fn array_of(component: TypeHandle) -> Self {
        TypeHandle::Array {
            component: Box::new(component),
        }
    }

    /// Wrap `self` in `dimensions` levels of array.
    pub fn into_array(self, dimensions: usize) -> Self {
        (0..dimensions).fold(self, |ty, _| TypeHandle::array_of(ty))
    }

    /// True for the eight primitive kinds and `void`.
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeHandle::Primitive { .. } | TypeHandle::Void)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeHandle::Void)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeHandle::Array { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(
            self,
            TypeHandle::Reference {
                class_kind: ClassKind::Interface,
                ..
            }
        )
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeHandle::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    /// Binary name of a non-array reference type.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeHandle::Reference { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&TypeHandle> {
        match self {
            TypeHandle::Array { component } => Some(component),
            _ => None,
        }
    }

    /// Innermost non-array type.
    pub fn element_type(&self) -> &TypeHandle {
        let mut current = self;
        while let TypeHandle::Array { component } = current {
            current = component;
        }
        current
    }

    pub fn dimensions(&self) -> usize {
        let mut dims = 0;
        let mut current = self;
        while let TypeHandle::Array { component } = current {
            dims += 1;
            current = component;
        }
        dims
    }

    /// The primitive kind this type stands for, either directly or as its wrapper class.
    pub fn primitive_kind(&self) -> Option<Primitive> {
        match self {
            TypeHandle::Primitive { primitive } => Some(*primitive),
            TypeHandle::Reference { name, .. } => Primitive::from_wrapper_name(name),
            _ => None,
        }
    }

    pub fn is_root_object(&self) -> bool {
        self.class_name() == Some(ROOT_OBJECT_TYPE)
    }

    /// Canonical name in Java source syntax, e.g. `int[][]`.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeHandle::Primitive { primitive: a }, TypeHandle::Primitive { primitive: b }) => {
                a == b
            }
            (TypeHandle::Void, TypeHandle::Void) => true,
            (TypeHandle::Reference { name: a, .. }, TypeHandle::Reference { name: b, .. }) => {
                a == b
            }
            (TypeHandle::Array { component: a }, TypeHandle::Array { component: b }) => a == b,
            _ => false,
        }
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeHandle::Primitive { primitive } => write!(f, "{primitive}"),
            TypeHandle::Void => f.write_str("void"),
            TypeHandle::Reference { name, .. } => f.write_str(name),
            TypeHandle::Array { component } => write!(f, "{component}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_and_wrapper_tables_are_inverse() {
        for p in PRIMITIVES {
            assert_eq!(Primitive::from_keyword(p.keyword()), Some(p));
            assert_eq!(Primitive::from_wrapper_name(p.wrapper_name()), Some(p));
        }
        assert_eq!(Primitive::from_keyword("void"), None);
        assert_eq!(Primitive::from_wrapper_name("java.lang.String"), None);
    }

    #[test]
    fn nested_arrays_display_in_source_syntax() {
        let ty = TypeHandle::primitive(Primitive::Int).into_array(2);
        assert_eq!(ty.name(), "int[][]");
        assert_eq!(ty.dimensions(), 2);
        assert_eq!(ty.element_type(), &TypeHandle::primitive(Primitive::Int));
        assert_eq!(ty.component().map(|c| c.name()), Some("int[]".to_string()));
    }

    #[test]
    fn identity_ignores_class_kind() {
        assert_eq!(TypeHandle::class("a.B"), TypeHandle::interface("a.B"));
        assert_ne!(TypeHandle::class("a.B"), TypeHandle::class("a.C"));
        assert_ne!(
            TypeHandle::class("a.B"),
            TypeHandle::array_of(TypeHandle::class("a.B"))
        );
    }

    #[test]
    fn wrapper_classes_report_their_primitive_kind() {
        assert_eq!(
            TypeHandle::class("java.lang.Character").primitive_kind(),
            Some(Primitive::Char)
        );
        assert_eq!(TypeHandle::class("java.lang.Number").primitive_kind(), None);
        assert!(TypeHandle::Void.is_primitive());
        assert!(TypeHandle::class(ROOT_OBJECT_TYPE).is_root_object());
    }
}
