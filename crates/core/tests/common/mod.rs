#![allow(dead_code)]

use jbind_api::Visibility;
use jbind_core::adapters::{FieldDecl, MemoryDirectory, MethodDecl};
use jbind_core::{ArgumentTypes, ClassInspector};

pub const ROUTINES: &str = "com.acme.Routines";
pub const ACCOUNT: &str = "com.acme.Account";
pub const NAMED: &str = "com.acme.Named";
pub const LIMITS: &str = "com.acme.Limits";
pub const BASE: &str = "com.acme.Base";
pub const DERIVED: &str = "com.acme.Derived";
pub const BOUNDED: &str = "com.acme.Bounded";

/// `java.lang` plus a handful of application classes with overloads that
/// exercise each resolution rule.
pub fn universe() -> MemoryDirectory {
    MemoryDirectory::with_java_lang()
        .add_class(ROUTINES, None)
        .add_method(ROUTINES, MethodDecl::new("describe", &["java.lang.Object"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("describe", &["java.lang.String"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("add", &["int"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("add", &["int", "int"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("scale", &["long"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("label", &["java.lang.String"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("label", &["int"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("count", &["int"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("concat", &["java.lang.String", "int"]).with_static())
        .add_method(
            ROUTINES,
            MethodDecl::new("pad", &["java.lang.String", "int", "int", "int"]).with_static(),
        )
        .add_method(
            ROUTINES,
            MethodDecl::new("pad", &["java.lang.String", "int", "long"]).with_static(),
        )
        .add_method(ROUTINES, MethodDecl::new("sum", &["int[]"]).with_static().with_varargs())
        .add_method(ROUTINES, MethodDecl::new("sum", &["long[]"]).with_static())
        .add_method(ROUTINES, MethodDecl::new("reset", &[]))
        .add_method(
            ROUTINES,
            MethodDecl::new("secret", &[]).with_static().with_visibility(Visibility::Private),
        )
        .add_class(ACCOUNT, None)
        .add_constructor(ACCOUNT, MethodDecl::constructor(&["java.lang.String"]))
        .add_constructor(ACCOUNT, MethodDecl::constructor(&["int"]))
        .add_constructor(ACCOUNT, MethodDecl::constructor(&["java.lang.Integer"]))
        .add_constructor(
            ACCOUNT,
            MethodDecl::constructor(&["long"]).with_visibility(Visibility::Protected),
        )
        .add_interface(NAMED)
        .add_method(NAMED, MethodDecl::new("name", &[]))
        .add_interface(LIMITS)
        .add_field(LIMITS, FieldDecl::new("CEILING", "int"))
        .add_class(BASE, None)
        .add_field(BASE, FieldDecl::new("x", "int"))
        .add_field(BASE, FieldDecl::new("y", "int"))
        .add_field(BASE, FieldDecl::new("ORIGIN", "int").with_static())
        .add_class(DERIVED, Some(BASE))
        .add_field(DERIVED, FieldDecl::new("x", "int").with_visibility(Visibility::Private))
        .add_class(BOUNDED, None)
        .implements(BOUNDED, LIMITS)
}

pub fn inspector() -> ClassInspector<MemoryDirectory> {
    ClassInspector::new(universe())
}

pub fn args(types: &[&str]) -> ArgumentTypes {
    ArgumentTypes::new(types.iter().copied())
}
