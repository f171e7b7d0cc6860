//! Type compatibility rules used by overload resolution.
//!
//! Two regimes are supported:
//! - strict (`mix_types == false`): primitives only match primitives and
//!   references only match references;
//! - mixed (`mix_types == true`): a primitive or its wrapper class may stand
//!   in for the other, following a fixed conversion table.
//!
//! There is no general numeric widening. `int` does not convert to `long`;
//! the only cross-kind conversions are the ones listed in [`conversion_targets`].

use jbind_api::{Primitive, TypeDirectory, TypeHandle};

/// Primitive kinds a value of kind `source` (or of its wrapper) may be passed as.
pub const fn conversion_targets(source: Primitive) -> &'static [Primitive] {
    use Primitive::*;
    match source {
        Boolean => &[Boolean],
        Byte => &[Byte, Short, Int, Long, Float, Double],
        Char => &[Char, Int, Long, Float, Double],
        Short => &[Short],
        Int => &[Int],
        Long => &[Long],
        Float => &[Float],
        Double => &[Double],
    }
}

/// Check whether a value of type `from` can be passed where `to` is expected.
pub fn is_convertible<D: TypeDirectory + ?Sized>(
    directory: &D,
    from: &TypeHandle,
    to: &TypeHandle,
    mix_types: bool,
) -> bool {
    if is_assignable(directory, from, to) {
        return true;
    }

    // Without mixing, only primitive-to-primitive goes through the table.
    if !(from.is_primitive() && to.is_primitive()) && !mix_types {
        return false;
    }

    let Some(source) = from.primitive_kind() else {
        return false;
    };

    if to.class_name() == Some(source.wrapper_name()) {
        return true;
    }

    to.as_primitive()
        .is_some_and(|target| conversion_targets(source).contains(&target))
}

/// Reference assignability: identity, subclass to superclass, implementor to
/// interface, and any reference type to the root object type.
///
/// Arrays are only assignable to arrays. Primitive components must be
/// identical; reference components follow the same rule recursively.
pub fn is_assignable<D: TypeDirectory + ?Sized>(
    directory: &D,
    from: &TypeHandle,
    to: &TypeHandle,
) -> bool {
    if from == to {
        return true;
    }

    match (from, to) {
        (TypeHandle::Array { component: f }, TypeHandle::Array { component: t }) => {
            if f.is_primitive() || t.is_primitive() {
                return false;
            }
            is_assignable(directory, f, t)
        }
        (TypeHandle::Reference { .. }, TypeHandle::Reference { .. }) => {
            to.is_root_object() || directory.walk_supertypes(from).any(|ancestor| &ancestor == to)
        }
        _ => false,
    }
}
