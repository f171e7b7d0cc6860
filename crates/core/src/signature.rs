//! Actual-argument descriptions and the per-candidate signature check.

use crate::conversion::is_convertible;
use jbind_api::{TypeDirectory, TypeHandle};

/// One actual argument of a call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentSpec {
    /// Declared type of the argument; `None` for an untyped null.
    pub object_type: Option<TypeHandle>,
    /// Primitive form the argument may additionally be passed as.
    pub primitive_type: Option<TypeHandle>,
    /// True when the argument is a `?` parameter marker.
    pub is_parameter: bool,
}

impl ArgumentSpec {
    pub fn typed(object_type: TypeHandle) -> Self {
        Self {
            object_type: Some(object_type),
            ..Self::default()
        }
    }

    pub fn null() -> Self {
        Self::default()
    }

    pub fn with_primitive(mut self, primitive_type: TypeHandle) -> Self {
        self.primitive_type = Some(primitive_type);
        self
    }

    pub fn as_parameter(mut self) -> Self {
        self.is_parameter = true;
        self
    }
}

/// The resolved actual arguments of one call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedArguments {
    pub specs: Vec<ArgumentSpec>,
    /// True on the second resolution pass, when the caller supplied primitive
    /// counterparts for the argument list.
    pub has_primitives: bool,
}

impl ResolvedArguments {
    pub fn new(specs: Vec<ArgumentSpec>) -> Self {
        Self {
            specs,
            has_primitives: false,
        }
    }

    pub fn with_primitives(mut self) -> Self {
        self.has_primitives = true;
        self
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn last(&self) -> Option<&ArgumentSpec> {
        self.specs.last()
    }

    /// Render as `type, type(primitive), null` for diagnostics.
    pub fn render(&self) -> String {
        self.specs
            .iter()
            .map(|spec| {
                let mut out = spec
                    .object_type
                    .as_ref()
                    .map_or_else(|| "null".to_string(), TypeHandle::name);
                if let Some(primitive) = &spec.primitive_type {
                    out.push('(');
                    out.push_str(&primitive.name());
                    out.push(')');
                }
                out
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Check whether `arguments` can be passed to a member with formal types `formals`.
///
/// Only the first `min(arguments, formals)` positions are compared, which lets
/// repeat-last-parameter resolution accept longer formal lists.
pub fn signature_convertible<D: TypeDirectory + ?Sized>(
    directory: &D,
    arguments: &ResolvedArguments,
    formals: &[TypeHandle],
) -> bool {
    arguments
        .specs
        .iter()
        .zip(formals)
        .all(|(spec, formal)| match &spec.object_type {
            None => {
                // An untyped null never binds to a primitive on the first pass.
                !formal.is_primitive() || (arguments.has_primitives && spec.is_parameter)
            }
            Some(object_type) => {
                is_convertible(directory, object_type, formal, true)
                    || spec
                        .primitive_type
                        .as_ref()
                        .is_some_and(|p| is_convertible(directory, p, formal, true))
            }
        })
}
