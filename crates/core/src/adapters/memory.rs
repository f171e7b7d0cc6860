//! In-memory type universe.
//!
//! Types are declared up front, either through the fluent builder or by
//! deserializing a JSON universe file. Declaration order is preserved so
//! member listings, and therefore resolution, are deterministic.

use indexmap::IndexMap;
use jbind_api::{
    CONSTRUCTOR_NAME, ClassKind, DirectoryError, DirectoryResult, FieldInfo, Member, MemberKind,
    PRIMITIVES, ROOT_OBJECT_TYPE, TypeDirectory, TypeHandle, Visibility,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

fn default_true() -> bool {
    true
}

/// A declared class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default = "default_true")]
    pub public: bool,
    /// Superclass binary name. Classes without one extend the root object type.
    #[serde(default)]
    pub superclass: Option<String>,
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub constructors: Vec<MethodDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            public: true,
            superclass: None,
            interfaces: vec![],
            constructors: vec![],
            methods: vec![],
            fields: vec![],
        }
    }

    fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    fn handle(&self) -> TypeHandle {
        match self.kind {
            ClassKind::Class => TypeHandle::class(&self.name),
            ClassKind::Interface => TypeHandle::interface(&self.name),
        }
    }
}

/// A declared method or constructor. Parameter types are type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default, rename = "varargs")]
    pub is_varargs: bool,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, parameters: &[&str]) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            visibility: Visibility::Public,
            is_static: false,
            is_varargs: false,
        }
    }

    pub fn constructor(parameters: &[&str]) -> Self {
        Self::new(CONSTRUCTOR_NAME, parameters)
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// A declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// On-disk form of a universe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Universe {
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

/// A [`TypeDirectory`] over declared types.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    types: IndexMap<String, TypeDecl>,
}

impl MemoryDirectory {
    /// Create a new empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    /// A universe pre-populated with the core `java.lang` types.
    pub fn with_java_lang() -> Self {
        let mut dir = Self::new();
        dir.merge(java_lang_universe());
        dir
    }

    pub fn from_universe(universe: Universe) -> Self {
        let mut dir = Self::new();
        dir.merge(universe);
        dir
    }

    /// Load a JSON universe file.
    pub fn from_json_file(path: &Path) -> crate::Result<Universe> {
        let content = std::fs::read_to_string(path)?;
        let universe: Universe = serde_json::from_str(&content)?;
        tracing::debug!(
            "Loaded {} type declarations from {}",
            universe.types.len(),
            path.display()
        );
        Ok(universe)
    }

    /// Add every declaration of `universe`; later declarations replace earlier ones.
    pub fn merge(&mut self, universe: Universe) {
        for decl in universe.types {
            if self.types.contains_key(&decl.name) {
                tracing::warn!("Type {} declared twice; keeping the later one", decl.name);
            }
            self.types.insert(decl.name.clone(), decl);
        }
    }

    pub fn declare(mut self, decl: TypeDecl) -> Self {
        self.types.insert(decl.name.clone(), decl);
        self
    }

    /// Add a class to the universe.
    pub fn add_class(self, name: &str, superclass: Option<&str>) -> Self {
        let mut decl = TypeDecl::new(name, ClassKind::Class);
        decl.superclass = superclass.map(|s| s.to_string());
        self.declare(decl)
    }

    /// Add an interface to the universe.
    pub fn add_interface(self, name: &str) -> Self {
        self.declare(TypeDecl::new(name, ClassKind::Interface))
    }

    /// Add interface implementation (or extension, for interfaces).
    pub fn implements(mut self, type_name: &str, interface: &str) -> Self {
        if !self.types.contains_key(interface) {
            self = self.add_interface(interface);
        }
        self.decl_mut(type_name).interfaces.push(interface.to_string());
        self
    }

    pub fn non_public(mut self, type_name: &str) -> Self {
        self.decl_mut(type_name).public = false;
        self
    }

    pub fn add_method(mut self, type_name: &str, method: MethodDecl) -> Self {
        self.decl_mut(type_name).methods.push(method);
        self
    }

    pub fn add_constructor(mut self, type_name: &str, constructor: MethodDecl) -> Self {
        self.decl_mut(type_name).constructors.push(MethodDecl {
            name: CONSTRUCTOR_NAME.to_string(),
            ..constructor
        });
        self
    }

    pub fn add_field(mut self, type_name: &str, field: FieldDecl) -> Self {
        self.decl_mut(type_name).fields.push(field);
        self
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn decl_mut(&mut self, type_name: &str) -> &mut TypeDecl {
        self.types
            .entry(type_name.to_string())
            .or_insert_with(|| TypeDecl::new(type_name, ClassKind::Class))
    }

    fn decl_of(&self, ty: &TypeHandle) -> Option<&TypeDecl> {
        ty.class_name().and_then(|name| self.types.get(name))
    }

    fn to_member(
        &self,
        owner: &TypeDecl,
        decl: &MethodDecl,
        kind: MemberKind,
    ) -> DirectoryResult<Member> {
        let parameters = decl
            .parameters
            .iter()
            .map(|p| self.resolve_type_by_name(p))
            .collect::<DirectoryResult<Vec<_>>>()?;
        Ok(Member {
            name: match kind {
                MemberKind::Constructor => CONSTRUCTOR_NAME.to_string(),
                MemberKind::Method => decl.name.clone(),
            },
            kind,
            declaring_type: owner.handle(),
            parameters,
            visibility: decl.visibility,
            is_static: decl.is_static,
            is_varargs: decl.is_varargs,
        })
    }

    fn to_field(&self, owner: &TypeDecl, decl: &FieldDecl) -> DirectoryResult<FieldInfo> {
        // Interface fields are implicitly public static.
        let (visibility, is_static) = if owner.is_interface() {
            (Visibility::Public, true)
        } else {
            (decl.visibility, decl.is_static)
        };
        Ok(FieldInfo {
            name: decl.name.clone(),
            declaring_type: owner.handle(),
            field_type: self.resolve_type_by_name(&decl.field_type)?,
            visibility,
            is_static,
        })
    }

    fn public_methods(&self, ty: &TypeHandle, name: Option<&str>) -> DirectoryResult<Vec<Member>> {
        let mut out: Vec<Member> = Vec::new();
        let mut seen: HashSet<(String, Vec<TypeHandle>)> = HashSet::new();

        let lineage = std::iter::once(ty.clone()).chain(self.walk_supertypes(ty));
        for current in lineage {
            let Some(decl) = self.decl_of(&current) else {
                continue;
            };
            let inherited = &current != ty;
            for method in &decl.methods {
                if method.visibility != Visibility::Public {
                    continue;
                }
                if name.is_some_and(|n| n != method.name) {
                    continue;
                }
                // Static interface methods are not inherited.
                if inherited && decl.is_interface() && method.is_static {
                    continue;
                }
                let member = self.to_member(decl, method, MemberKind::Method)?;
                if seen.insert((member.name.clone(), member.parameters.clone())) {
                    out.push(member);
                }
            }
        }
        Ok(out)
    }

    fn collect_public_fields(
        &self,
        ty: &TypeHandle,
        out: &mut Vec<FieldInfo>,
        visited: &mut HashSet<String>,
    ) -> DirectoryResult<()> {
        let Some(decl) = self.decl_of(ty) else {
            return Ok(());
        };
        if !visited.insert(decl.name.clone()) {
            return Ok(());
        }

        for field in &decl.fields {
            let info = self.to_field(decl, field)?;
            if info.is_public() {
                out.push(info);
            }
        }
        for interface in &decl.interfaces {
            self.collect_public_fields(&TypeHandle::interface(interface), out, visited)?;
        }
        if let Some(superclass) = self.superclass_of(decl) {
            self.collect_public_fields(&TypeHandle::class(superclass), out, visited)?;
        }
        Ok(())
    }

    fn superclass_of<'a>(&self, decl: &'a TypeDecl) -> Option<&'a str> {
        if decl.is_interface() {
            return None;
        }
        match &decl.superclass {
            Some(superclass) => Some(superclass.as_str()),
            None if decl.name != ROOT_OBJECT_TYPE => Some(ROOT_OBJECT_TYPE),
            None => None,
        }
    }
}

impl TypeDirectory for MemoryDirectory {
    fn load_class(&self, name: &str) -> DirectoryResult<TypeHandle> {
        self.types
            .get(name)
            .map(TypeDecl::handle)
            .ok_or_else(|| DirectoryError::NotFound(name.to_string()))
    }

    fn supertypes(&self, ty: &TypeHandle) -> Vec<TypeHandle> {
        match ty {
            TypeHandle::Array { .. } => vec![self.root_object_type()],
            TypeHandle::Reference { .. } => {
                let Some(decl) = self.decl_of(ty) else {
                    return vec![];
                };
                let mut out = Vec::with_capacity(decl.interfaces.len() + 1);
                if let Some(superclass) = self.superclass_of(decl) {
                    out.push(
                        self.load_class(superclass)
                            .unwrap_or_else(|_| TypeHandle::class(superclass)),
                    );
                }
                out.extend(decl.interfaces.iter().map(|i| {
                    self.load_class(i)
                        .unwrap_or_else(|_| TypeHandle::interface(i))
                }));
                out
            }
            _ => vec![],
        }
    }

    fn list_members(
        &self,
        ty: &TypeHandle,
        kind: MemberKind,
        name: Option<&str>,
    ) -> DirectoryResult<Vec<Member>> {
        match (ty, kind) {
            (TypeHandle::Array { .. }, MemberKind::Method) => {
                self.public_methods(&self.root_object_type(), name)
            }
            (TypeHandle::Reference { .. }, MemberKind::Method) => self.public_methods(ty, name),
            (TypeHandle::Reference { .. }, MemberKind::Constructor) => {
                let Some(decl) = self.decl_of(ty) else {
                    return Err(DirectoryError::NotFound(ty.name()));
                };
                if decl.is_interface() || name.is_some_and(|n| n != CONSTRUCTOR_NAME) {
                    return Ok(vec![]);
                }
                decl.constructors
                    .iter()
                    .filter(|c| c.visibility == Visibility::Public)
                    .map(|c| self.to_member(decl, c, MemberKind::Constructor))
                    .collect()
            }
            _ => Ok(vec![]),
        }
    }

    fn public_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        if self.decl_of(ty).is_none() {
            return Err(DirectoryError::NotFound(ty.name()));
        }
        let mut out = Vec::new();
        self.collect_public_fields(ty, &mut out, &mut HashSet::new())?;
        Ok(out)
    }

    fn declared_fields(&self, ty: &TypeHandle) -> DirectoryResult<Vec<FieldInfo>> {
        let Some(decl) = self.decl_of(ty) else {
            return Err(DirectoryError::NotFound(ty.name()));
        };
        decl.fields.iter().map(|f| self.to_field(decl, f)).collect()
    }

    fn is_accessible(&self, ty: &TypeHandle) -> bool {
        match ty.element_type() {
            element @ TypeHandle::Reference { .. } => {
                self.decl_of(element).is_some_and(|decl| decl.public)
            }
            _ => true,
        }
    }
}

/// The slice of `java.lang` that SQL routines bind against most often.
fn java_lang_universe() -> Universe {
    const OBJECT: &str = ROOT_OBJECT_TYPE;
    const STRING: &str = "java.lang.String";
    const NUMBER: &str = "java.lang.Number";
    const SERIALIZABLE: &str = "java.io.Serializable";
    const COMPARABLE: &str = "java.lang.Comparable";
    const CHAR_SEQUENCE: &str = "java.lang.CharSequence";

    let mut object = TypeDecl::new(OBJECT, ClassKind::Class);
    object.constructors.push(MethodDecl::constructor(&[]));
    object.methods = vec![
        MethodDecl::new("equals", &[OBJECT]),
        MethodDecl::new("hashCode", &[]),
        MethodDecl::new("toString", &[]),
        MethodDecl::new("getClass", &[]),
        MethodDecl::new("notify", &[]),
        MethodDecl::new("notifyAll", &[]),
        MethodDecl::new("wait", &[]),
        MethodDecl::new("wait", &["long"]),
        MethodDecl::new("wait", &["long", "int"]),
    ];

    let serializable = TypeDecl::new(SERIALIZABLE, ClassKind::Interface);

    let mut comparable = TypeDecl::new(COMPARABLE, ClassKind::Interface);
    comparable.methods.push(MethodDecl::new("compareTo", &[OBJECT]));

    let mut char_sequence = TypeDecl::new(CHAR_SEQUENCE, ClassKind::Interface);
    char_sequence.methods = vec![
        MethodDecl::new("length", &[]),
        MethodDecl::new("charAt", &["int"]),
    ];

    let mut string = TypeDecl::new(STRING, ClassKind::Class);
    string.interfaces = vec![
        SERIALIZABLE.to_string(),
        COMPARABLE.to_string(),
        CHAR_SEQUENCE.to_string(),
    ];
    string.constructors = vec![
        MethodDecl::constructor(&[]),
        MethodDecl::constructor(&[STRING]),
        MethodDecl::constructor(&["char[]"]),
    ];
    string.methods = vec![
        MethodDecl::new("length", &[]),
        MethodDecl::new("charAt", &["int"]),
        MethodDecl::new("substring", &["int"]),
        MethodDecl::new("substring", &["int", "int"]),
        MethodDecl::new("concat", &[STRING]),
        MethodDecl::new("format", &[STRING, "java.lang.Object[]"])
            .with_static()
            .with_varargs(),
        MethodDecl::new("valueOf", &[OBJECT]).with_static(),
        MethodDecl::new("valueOf", &["char[]"]).with_static(),
    ];

    let mut number = TypeDecl::new(NUMBER, ClassKind::Class);
    number.interfaces = vec![SERIALIZABLE.to_string()];
    number.constructors.push(MethodDecl::constructor(&[]));
    number.methods = ["byteValue", "shortValue", "intValue", "longValue", "floatValue", "doubleValue"]
        .into_iter()
        .map(|m| MethodDecl::new(m, &[]))
        .collect();

    string.methods.extend(
        PRIMITIVES
            .into_iter()
            .map(|p| MethodDecl::new("valueOf", &[p.keyword()]).with_static()),
    );

    let mut types = vec![object, serializable, comparable, char_sequence, string, number];

    for primitive in PRIMITIVES {
        let keyword = primitive.keyword();
        let wrapper = primitive.wrapper_name();
        let mut decl = TypeDecl::new(wrapper, ClassKind::Class);
        if primitive.is_numeric() {
            decl.superclass = Some(NUMBER.to_string());
            decl.fields = vec![
                FieldDecl::new("MAX_VALUE", keyword).with_static(),
                FieldDecl::new("MIN_VALUE", keyword).with_static(),
            ];
            decl.methods.push(
                MethodDecl::new(format!("parse{}", simple_name(wrapper)), &[STRING]).with_static(),
            );
        } else {
            decl.interfaces.push(SERIALIZABLE.to_string());
        }
        decl.interfaces.push(COMPARABLE.to_string());
        decl.constructors.push(MethodDecl::constructor(&[keyword]));
        decl.methods
            .push(MethodDecl::new("valueOf", &[keyword]).with_static());
        decl.methods.push(MethodDecl::new("compareTo", &[wrapper]));
        types.push(decl);
    }

    Universe { types }
}

fn simple_name(binary_name: &str) -> &str {
    match binary_name {
        "java.lang.Integer" => "Int",
        other => other.rsplit('.').next().unwrap_or(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jbind_api::Primitive;

    #[test]
    fn bootstrap_declares_object_and_wrappers() {
        let dir = MemoryDirectory::with_java_lang();
        assert!(dir.load_class("java.lang.Object").is_ok());
        for p in PRIMITIVES {
            assert!(dir.load_class(p.wrapper_name()).is_ok(), "{}", p.wrapper_name());
        }
        assert!(matches!(
            dir.load_class("java.util.List"),
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[test]
    fn parse_methods_use_conventional_names() {
        let dir = MemoryDirectory::with_java_lang();
        let integer = dir.load_class("java.lang.Integer").unwrap();
        let parse = dir
            .list_members(&integer, MemberKind::Method, Some("parseInt"))
            .unwrap();
        assert_eq!(parse.len(), 1);
        assert!(parse[0].is_static);

        let double = dir.load_class("java.lang.Double").unwrap();
        assert_eq!(
            dir.list_members(&double, MemberKind::Method, Some("parseDouble"))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn string_has_a_value_of_per_primitive() {
        let dir = MemoryDirectory::with_java_lang();
        let string = dir.load_class("java.lang.String").unwrap();
        let value_of = dir
            .list_members(&string, MemberKind::Method, Some("valueOf"))
            .unwrap();
        assert_eq!(value_of.len(), 2 + PRIMITIVES.len());
    }

    #[test]
    fn resolves_array_and_primitive_names_without_declarations() {
        let dir = MemoryDirectory::new();
        assert_eq!(
            dir.resolve_type_by_name("int[][]").unwrap().name(),
            "int[][]"
        );
        assert_eq!(
            dir.resolve_type_by_name("double").unwrap(),
            TypeHandle::primitive(Primitive::Double)
        );
        assert!(dir.resolve_type_by_name("com.acme.Missing[]").is_err());
    }

    #[test]
    fn inherited_methods_skip_overridden_ones() {
        let dir = MemoryDirectory::with_java_lang()
            .add_class("com.acme.Base", None)
            .add_method("com.acme.Base", MethodDecl::new("run", &["int"]))
            .add_method("com.acme.Base", MethodDecl::new("stop", &[]))
            .add_class("com.acme.Derived", Some("com.acme.Base"))
            .add_method("com.acme.Derived", MethodDecl::new("run", &["int"]))
            .add_method(
                "com.acme.Derived",
                MethodDecl::new("hidden", &[]).with_visibility(Visibility::Private),
            );

        let derived = dir.load_class("com.acme.Derived").unwrap();
        let run = dir
            .list_members(&derived, MemberKind::Method, Some("run"))
            .unwrap();
        assert_eq!(run.len(), 1);
        assert_eq!(run[0].declaring_type.name(), "com.acme.Derived");

        let all = dir.list_members(&derived, MemberKind::Method, None).unwrap();
        assert!(all.iter().any(|m| m.name == "stop"));
        assert!(all.iter().any(|m| m.name == "hashCode"));
        assert!(!all.iter().any(|m| m.name == "hidden"));
    }

    #[test]
    fn interfaces_do_not_list_root_object_methods() {
        let dir = MemoryDirectory::with_java_lang();
        let cs = dir.load_class("java.lang.CharSequence").unwrap();
        assert!(cs.is_interface());
        let methods = dir.list_members(&cs, MemberKind::Method, None).unwrap();
        assert!(methods.iter().all(|m| m.name != "hashCode"));
        assert!(dir
            .list_members(&cs, MemberKind::Constructor, None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn interface_fields_are_public_static() {
        let dir = MemoryDirectory::new()
            .add_interface("com.acme.Limits")
            .add_field(
                "com.acme.Limits",
                FieldDecl::new("MAX", "int").with_visibility(Visibility::Package),
            );
        let limits = dir.load_class("com.acme.Limits").unwrap();
        let fields = dir.declared_fields(&limits).unwrap();
        assert!(fields[0].is_public());
        assert!(fields[0].is_static);
    }

    #[test]
    fn unresolvable_parameter_fails_the_whole_listing() {
        let dir = MemoryDirectory::new()
            .add_class("com.acme.Ledger", None)
            .add_method("com.acme.Ledger", MethodDecl::new("total", &["int"]))
            .add_method("com.acme.Ledger", MethodDecl::new("post", &["java.lang.String"]));
        let ledger = dir.load_class("com.acme.Ledger").unwrap();

        assert_eq!(
            dir.list_members(&ledger, MemberKind::Method, None),
            Err(DirectoryError::NotFound("java.lang.String".to_string()))
        );
        // A name filter skips the broken method before its parameters are resolved.
        assert_eq!(
            dir.list_members(&ledger, MemberKind::Method, Some("total"))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn universe_json_defaults() {
        let json = r#"{
            "types": [
                {
                    "name": "com.acme.Prices",
                    "constructors": [ { "parameters": ["int"] } ],
                    "methods": [
                        { "name": "lookup", "parameters": ["java.lang.String"], "static": true },
                        { "name": "sum", "parameters": ["int[]"], "varargs": true }
                    ],
                    "fields": [ { "name": "rate", "type": "double", "visibility": "private" } ]
                },
                { "name": "com.acme.Priced", "kind": "interface", "public": false }
            ]
        }"#;
        let universe: Universe = serde_json::from_str(json).unwrap();
        let mut dir = MemoryDirectory::with_java_lang();
        dir.merge(universe);

        let prices = dir.load_class("com.acme.Prices").unwrap();
        let ctors = dir
            .list_members(&prices, MemberKind::Constructor, None)
            .unwrap();
        assert_eq!(ctors[0].name, CONSTRUCTOR_NAME);
        assert_eq!(ctors[0].parameters, vec![TypeHandle::primitive(Primitive::Int)]);

        let methods = dir.list_members(&prices, MemberKind::Method, None).unwrap();
        assert!(methods.iter().any(|m| m.name == "lookup" && m.is_static));
        assert!(methods.iter().any(|m| m.name == "sum" && m.is_varargs));

        let priced = dir.load_class("com.acme.Priced").unwrap();
        assert!(priced.is_interface());
        assert!(!dir.is_accessible(&priced));
        assert!(dir.is_accessible(&prices));
        assert!(dir.public_fields(&prices).unwrap().is_empty());
    }
}
