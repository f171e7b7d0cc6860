//! Parsing of Java-source type names such as `int`, `java.lang.String` or `Foo[][]`.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::types::Primitive;
use std::fmt;

/// The non-array part of a type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseTypeName {
    Primitive(Primitive),
    Void,
    Class(String),
}

/// A parsed type name: a base name plus zero or more `[]` suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub base: BaseTypeName,
    pub dimensions: usize,
}

impl TypeName {
    /// Parse a type name.
    ///
    /// Trailing `[]` pairs are stripped and counted; the remaining base name is
    /// checked against the primitive keywords and `void` before being treated
    /// as a class name. The empty string is rejected: it marks an untyped null
    /// argument and has to be handled by the caller before parsing.
    pub fn parse(name: &str) -> DirectoryResult<Self> {
        let invalid = || DirectoryError::InvalidTypeName(name.to_string());

        let mut base = name;
        let mut dimensions = 0usize;
        while let Some(stripped) = base.strip_suffix("[]") {
            base = stripped;
            dimensions += 1;
        }

        if base.is_empty()
            || base
                .chars()
                .any(|c| c.is_whitespace() || c == '[' || c == ']')
            || base.starts_with('.')
            || base.ends_with('.')
        {
            return Err(invalid());
        }

        let base = if base == "void" {
            if dimensions > 0 {
                return Err(invalid());
            }
            BaseTypeName::Void
        } else if let Some(p) = Primitive::from_keyword(base) {
            BaseTypeName::Primitive(p)
        } else {
            BaseTypeName::Class(base.to_string())
        };

        Ok(Self { base, dimensions })
    }

    pub fn is_array(&self) -> bool {
        self.dimensions > 0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            BaseTypeName::Primitive(p) => write!(f, "{p}")?,
            BaseTypeName::Void => f.write_str("void")?,
            BaseTypeName::Class(name) => f.write_str(name)?,
        }
        for _ in 0..self.dimensions {
            f.write_str("[]")?;
        }
        Ok(())
    }
}

/// True when `name` is one of the eight primitive keywords.
pub fn is_primitive_name(name: &str) -> bool {
    Primitive::from_keyword(name).is_some()
}
