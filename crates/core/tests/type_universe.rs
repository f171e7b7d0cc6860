//! Name-level helpers, JSON universes and the caching directory.

mod common;

use common::{ACCOUNT, ROUTINES, args, universe};
use jbind_api::{PRIMITIVES, TypeDirectory};
use jbind_core::adapters::{CachingDirectory, MemoryDirectory};
use jbind_core::{ClassInspector, ResolutionFlags};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_array_names_round_trip() {
    let inspector = ClassInspector::new(universe());
    assert_eq!(inspector.type_display_name("int[][]").unwrap(), "int[][]");
    assert_eq!(
        inspector.type_display_name("java.lang.String[]").unwrap(),
        "java.lang.String[]"
    );
    assert_eq!(inspector.type_display_name("void").unwrap(), "void");
    assert!(inspector.type_display_name("void[]").is_err());
    assert!(inspector.type_display_name("[]").is_err());
}

#[test]
fn test_every_type_converts_to_itself() {
    let inspector = ClassInspector::new(universe());
    let mut names: Vec<String> = PRIMITIVES.iter().map(|p| p.keyword().to_string()).collect();
    names.extend(PRIMITIVES.iter().map(|p| p.wrapper_name().to_string()));
    names.extend(
        [ROUTINES, "java.lang.Object", "int[]", "java.lang.String[][]"].map(String::from),
    );

    for name in &names {
        assert!(inspector.is_convertible(name, name, false).unwrap(), "{name}");
        assert!(inspector.is_convertible(name, name, true).unwrap(), "{name}");
    }
}

#[test]
fn test_conversion_table_by_name() {
    let inspector = ClassInspector::new(universe());
    for mix in [false, true] {
        assert!(!inspector.is_convertible("int", "long", mix).unwrap());
    }
    assert!(inspector.is_convertible("byte", "int", true).unwrap());
    assert!(!inspector.is_convertible("int", "byte", true).unwrap());
    assert!(inspector.is_convertible("int", "java.lang.Integer", true).unwrap());
    assert!(!inspector.is_convertible("int", "java.lang.Integer", false).unwrap());
    assert!(inspector.is_convertible("com.acme.Missing", "int", true).is_err());
}

#[test]
fn test_assignability_and_access() {
    let dir = universe()
        .add_class("com.acme.Internal", None)
        .non_public("com.acme.Internal");
    let inspector = ClassInspector::new(dir);

    assert!(inspector.assignable_to("java.lang.String", "java.lang.CharSequence"));
    assert!(inspector.assignable_to("java.lang.Integer", "java.lang.Number"));
    assert!(inspector.assignable_to("java.lang.String[]", "java.lang.Object[]"));
    assert!(!inspector.assignable_to("java.lang.Number", "java.lang.Integer"));
    assert!(!inspector.assignable_to("com.acme.Missing", "java.lang.Object"));

    assert!(inspector.accessible("java.lang.String"));
    assert!(inspector.accessible("long[]"));
    assert!(!inspector.accessible("com.acme.Internal"));
    assert!(!inspector.accessible("com.acme.Internal[]"));
    assert!(!inspector.accessible("com.acme.Missing"));
}

#[test]
fn test_json_universe_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("universe.json");
    std::fs::write(
        &path,
        r#"{
            "types": [
                {
                    "name": "com.acme.Tax",
                    "methods": [
                        { "name": "rate", "parameters": ["java.lang.String"], "static": true },
                        { "name": "rate", "parameters": ["int"], "static": true }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let mut dir = MemoryDirectory::with_java_lang();
    dir.merge(MemoryDirectory::from_json_file(&path).unwrap());
    let inspector = ClassInspector::new(dir);

    let flags = ResolutionFlags {
        static_only: true,
        ..Default::default()
    };
    let rate = inspector
        .find_method("com.acme.Tax", "rate", Some(&args(&["short"])), flags)
        .unwrap();
    assert!(rate.is_none());
    let rate = inspector
        .find_method("com.acme.Tax", "rate", Some(&args(&["java.lang.Integer"])), flags)
        .unwrap()
        .unwrap();
    assert_eq!(rate.parameters[0].name(), "int");
}

#[test]
fn test_malformed_universe_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("universe.json");
    std::fs::write(&path, "{ \"types\": [ { \"kind\": \"class\" } ] }").unwrap();
    assert!(MemoryDirectory::from_json_file(&path).is_err());
    assert!(MemoryDirectory::from_json_file(&temp.path().join("absent.json")).is_err());
}

#[test]
fn test_cached_directory_resolves_like_the_plain_one() {
    let plain = ClassInspector::new(universe());
    let cached = ClassInspector::new(CachingDirectory::new(universe()));

    for arg in ["java.lang.String", "int", "java.lang.Integer", "byte", "short"] {
        let query = args(&[arg]);
        assert_eq!(
            plain.find_constructor(ACCOUNT, &query).unwrap(),
            cached.find_constructor(ACCOUNT, &query).unwrap(),
            "{arg}"
        );
    }
    assert!(cached.directory().cached_len() > 0);
}

#[test]
fn test_shared_inspector_across_threads() {
    let directory: Arc<dyn TypeDirectory> = Arc::new(CachingDirectory::new(universe()));
    let inspector = Arc::new(ClassInspector::new(directory));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let inspector = Arc::clone(&inspector);
            std::thread::spawn(move || {
                inspector
                    .find_constructor(ACCOUNT, &args(&["byte"]))
                    .unwrap()
                    .map(|c| c.signature())
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(
            handle.join().unwrap().as_deref(),
            Some("com.acme.Account(int)")
        );
    }
}
