//! Module graph traversal over the Foo/Bar fixtures

mod fixtures;

use confix_core::{annotated_properties, referenced_properties, referenced_types, TypeRef};
use fixtures::{Bar, Foo, Module};

#[test]
fn test_referenced_properties_of_module() {
    let properties = referenced_properties(&[TypeRef::of::<Module>()]);
    assert_eq!(properties.len(), 9);

    let keys: Vec<_> = properties.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys.first(), Some(&"string_key"));
    assert_eq!(keys.last(), Some(&"foo"));
}

#[test]
fn test_self_reference_terminates() {
    let types = referenced_types(&[TypeRef::of::<Module>(), TypeRef::of::<Foo>()]);
    let names: Vec<_> = types.iter().map(TypeRef::short_name).collect();
    assert_eq!(names, vec!["Module", "Foo", "Bar"]);
}

#[test]
fn test_annotated_properties_include_unsupported_members() {
    let properties = annotated_properties(&[
        TypeRef::of::<Foo>(),
        TypeRef::of::<Bar>(),
        TypeRef::of::<Foo>(),
    ]);
    assert_eq!(properties.len(), 9);
    assert!(properties.iter().any(|p| p.key == "custom_key" && p.type_name == "CustomType"));
}

#[test]
fn test_module_without_refs_contributes_nothing() {
    assert!(annotated_properties(&[TypeRef::of::<Module>()]).is_empty());
}
