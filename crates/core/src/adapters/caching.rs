//! Memoizing decorator for class loads.

use dashmap::DashMap;
use jbind_api::{DirectoryResult, FieldInfo, Member, MemberKind, TypeDirectory, TypeHandle};

/// Wraps a directory and remembers every successful [`TypeDirectory::load_class`].
///
/// Failed loads are not cached, so a type added to the underlying directory
/// later becomes visible. Member and field queries always go to the inner
/// directory.
pub struct CachingDirectory<D> {
    inner: D,
    classes: DashMap<String, TypeHandle>,
}

impl<D: TypeDirectory> CachingDirectory<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            classes: DashMap::new(),
        }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn cached_len(&self) -> usize {
        self.classes.len()
    }

    pub fn clear(&self) {
        self.classes.clear();
    }
}

impl<D: TypeDirectory> TypeDirectory for CachingDirectory<D> {
    fn load_class(&self, name: &str) -> DirectoryResult<TypeHandle> {
        if let Some(hit) = self.classes.get(name) {
            tracing::trace!("Class cache hit for {}", name);
            return Ok(hit.clone());
        }
        let handle = self.inner.load_class(name)?;
        self.classes.insert(name.to_string(), handle.clone());
        Ok(handle)
    }

    fn supertypes(&self, ty: &TypeHandle) -> Vec<TypeHandle> {
        self.inner.supertypes(ty)
    }

    fn list_members(
        &self,
        ty: &TypeHandle,
        kind: MemberKind,
        name: Option<&str>,
    ) -> DirectoryResult<Vec<Member>> {
        self.inner.list_members(ty, kind, name)
    }

    fn public_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        self.inner.public_fields(ty)
    }

    fn declared_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        self.inner.declared_fields(ty)
    }

    fn is_accessible(&self, ty: &TypeHandle) -> bool {
        self.inner.is_accessible(ty)
    }

    fn root_object_type(&self) -> TypeHandle {
        self.inner.root_object_type()
    }
}
