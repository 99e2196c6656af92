use super::types::{Type, TypeKind};

#[test]
fn test_type_from_name() {
    assert_eq!(Type::from_name("int"), Type::int());
    assert_eq!(Type::from_name("string").kind, TypeKind::String);
    assert_eq!(
        Type::from_name("Point").kind,
        TypeKind::Named("Point".to_string())
    );
}

#[test]
fn test_compatibility_widening() {
    assert!(Type::int().is_compatible_with(&Type::float()));
    assert!(Type::char().is_compatible_with(&Type::string()));

    assert!(!Type::float().is_compatible_with(&Type::int()));
    assert!(!Type::string().is_compatible_with(&Type::char()));
    assert!(!Type::bool().is_compatible_with(&Type::int()));
}

#[test]
fn test_any_is_compatible_both_ways() {
    for ty in [Type::int(), Type::float(), Type::bool(), Type::char(), Type::string()] {
        assert!(ty.is_compatible_with(&Type::any()));
        assert!(Type::any().is_compatible_with(&ty));
        assert!(Type::from_name("Widget").is_compatible_with(&ty));
    }
}

#[test]
fn test_types_compare_structurally() {
    assert_eq!(Type::from_name("int").nullable(), Type::int().nullable());
    assert_ne!(Type::int().nullable(), Type::int());
    assert!(Type::int().nullable().is_compatible_with(&Type::int()));
}

#[test]
fn test_type_display() {
    assert_eq!(Type::float().to_string(), "float");
    assert_eq!(Type::string().nullable().to_string(), "string?");
    assert_eq!(Type::from_name("Point").to_string(), "Point");
}
