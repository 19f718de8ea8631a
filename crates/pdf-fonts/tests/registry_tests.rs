use pdf_fonts::*;

#[test]
fn test_default_registry_contents() {
    let registry = FontRegistry::default();

    let helvetica = registry.get("helvetica").unwrap();
    assert!(helvetica.is_built_in());
    assert!(!helvetica.supports_cyrillic);

    let pt_sans = registry.get("pt-sans").unwrap();
    assert!(!pt_sans.is_built_in());
    assert!(pt_sans.supports_cyrillic);
    assert!(matches!(pt_sans.kind, FontKind::Remote { .. }));

    assert!(registry.get("comic-sans").is_none());
}

#[test]
fn test_default_builtin_is_helvetica() {
    let registry = FontRegistry::default();
    assert_eq!(registry.default_builtin().name, "helvetica");
}

#[test]
fn test_builtin_base_names() {
    assert_eq!(BuiltinFont::Helvetica.base_name(), "Helvetica");
    assert_eq!(BuiltinFont::TimesRoman.base_name(), "Times-Roman");
    assert_eq!(BuiltinFont::Courier.base_name(), "Courier");
}

#[test]
fn test_cache_insert_get_clear() {
    let cache = FontCache::new();
    assert!(cache.is_empty());

    cache.insert("pt-sans", vec![1, 2, 3]);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("pt-sans").unwrap().as_slice(), &[1, 2, 3]);
    assert!(cache.get("noto-sans").is_none());

    cache.clear();
    assert!(cache.get("pt-sans").is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_builtin_width_uses_ratio() {
    let width = builtin_text_width("DRAFT", 48.0);
    assert_eq!(width, 5.0 * 48.0 * BUILTIN_CHAR_WIDTH_RATIO);
    assert_eq!(builtin_text_width("", 48.0), 0.0);
}
