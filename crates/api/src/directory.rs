//! The type directory abstraction.
//!
//! The resolver never loads classes itself. Everything it knows about types
//! and their members comes through [`TypeDirectory`], so it can run against a
//! live class path, a cached snapshot, or a synthetic in-memory universe.

use crate::error::{DirectoryError, DirectoryResult};
use crate::models::{BaseTypeName, FieldInfo, Member, MemberKind, ROOT_OBJECT_TYPE, TypeHandle, TypeName};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Read-only view of a universe of types.
///
/// Implementations must be safe for concurrent reads.
pub trait TypeDirectory: Send + Sync {
    /// Load a non-primitive, non-array type by binary name.
    ///
    /// Only ever called with base names; array suffixes and primitive
    /// keywords are handled by [`TypeDirectory::resolve_type_by_name`].
    fn load_class(&self, name: &str) -> DirectoryResult<TypeHandle>;

    /// Direct supertypes: the superclass (if any) followed by the directly
    /// implemented or extended interfaces.
    fn supertypes(&self, ty: &TypeHandle) -> Vec<TypeHandle>;

    /// Public members of `ty`, including inherited public methods.
    ///
    /// Constructors are never inherited. `name` filters by simple name.
    fn list_members(
        &self,
        ty: &TypeHandle,
        kind: MemberKind,
        name: Option<&str>,
    ) -> DirectoryResult<Vec<Member>>;

    /// Public fields visible through `ty`, in lookup order: own fields,
    /// then superinterfaces, then the superclass chain.
    fn public_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>>;

    /// Fields declared directly by `ty`, whatever their visibility.
    fn declared_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>>;

    /// Whether `ty` itself is publicly accessible.
    fn is_accessible(&self, _ty: &TypeHandle) -> bool {
        true
    }

    /// The universal root reference type.
    fn root_object_type(&self) -> TypeHandle {
        TypeHandle::class(ROOT_OBJECT_TYPE)
    }

    /// Resolve a Java-source type name such as `int`, `void` or `a.B[][]`.
    fn resolve_type_by_name(&self, name: &str) -> DirectoryResult<TypeHandle> {
        let parsed = TypeName::parse(name)?;
        let base = match parsed.base {
            BaseTypeName::Primitive(p) => TypeHandle::primitive(p),
            BaseTypeName::Void => TypeHandle::Void,
            BaseTypeName::Class(class_name) => self.load_class(&class_name)?,
        };
        Ok(base.into_array(parsed.dimensions))
    }

    /// Walk all supertypes of `ty` in BFS order, each yielded once.
    fn walk_supertypes(&self, ty: &TypeHandle) -> Box<dyn Iterator<Item = TypeHandle> + '_> {
        let mut queue: VecDeque<TypeHandle> = self.supertypes(ty).into();
        let mut visited: HashSet<TypeHandle> = HashSet::new();
        let mut out = Vec::new();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            queue.extend(self.supertypes(&current));
            out.push(current);
        }

        Box::new(out.into_iter())
    }

    /// Find the field a `getField`-style lookup would return.
    fn find_public_field(&self, ty: &TypeHandle, name: &str) -> DirectoryResult<FieldInfo> {
        self.public_fields(ty)?
            .into_iter()
            .find(|f| f.name == name)
            .ok_or_else(|| DirectoryError::NotFound(format!("{ty}.{name}")))
    }
}

impl<T: TypeDirectory + ?Sized> TypeDirectory for &T {
    fn load_class(&self, name: &str) -> DirectoryResult<TypeHandle> {
        (**self).load_class(name)
    }

    fn supertypes(&self, ty: &TypeHandle) -> Vec<TypeHandle> {
        (**self).supertypes(ty)
    }

    fn list_members(
        &self,
        ty: &TypeHandle,
        kind: MemberKind,
        name: Option<&str>,
    ) -> DirectoryResult<Vec<Member>> {
        (**self).list_members(ty, kind, name)
    }

    fn public_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        (**self).public_fields(ty)
    }

    fn declared_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        (**self).declared_fields(ty)
    }

    fn is_accessible(&self, ty: &TypeHandle) -> bool {
        (**self).is_accessible(ty)
    }

    fn root_object_type(&self) -> TypeHandle {
        (**self).root_object_type()
    }

    fn resolve_type_by_name(&self, name: &str) -> DirectoryResult<TypeHandle> {
        (**self).resolve_type_by_name(name)
    }

    fn walk_supertypes(&self, ty: &TypeHandle) -> Box<dyn Iterator<Item = TypeHandle> + '_> {
        (**self).walk_supertypes(ty)
    }

    fn find_public_field(&self, ty: &TypeHandle, name: &str) -> DirectoryResult<FieldInfo> {
        (**self).find_public_field(ty, name)
    }
}

impl<T: TypeDirectory + ?Sized> TypeDirectory for Arc<T> {
    fn load_class(&self, name: &str) -> DirectoryResult<TypeHandle> {
        (**self).load_class(name)
    }

    fn supertypes(&self, ty: &TypeHandle) -> Vec<TypeHandle> {
        (**self).supertypes(ty)
    }

    fn list_members(
        &self,
        ty: &TypeHandle,
        kind: MemberKind,
        name: Option<&str>,
    ) -> DirectoryResult<Vec<Member>> {
        (**self).list_members(ty, kind, name)
    }

    fn public_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        (**self).public_fields(ty)
    }

    fn declared_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        (**self).declared_fields(ty)
    }

    fn is_accessible(&self, ty: &TypeHandle) -> bool {
        (**self).is_accessible(ty)
    }

    fn root_object_type(&self) -> TypeHandle {
        (**self).root_object_type()
    }

    fn resolve_type_by_name(&self, name: &str) -> DirectoryResult<TypeHandle> {
        (**self).resolve_type_by_name(name)
    }

    fn walk_supertypes(&self, ty: &TypeHandle) -> Box<dyn Iterator<Item = TypeHandle> + '_> {
        (**self).walk_supertypes(ty)
    }

    fn find_public_field(&self, ty: &TypeHandle, name: &str) -> DirectoryResult<FieldInfo> {
        (**self).find_public_field(ty, name)
    }
}
