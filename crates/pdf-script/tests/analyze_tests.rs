use pdf_script::*;

#[test]
fn test_cyrillic_sentence() {
    let profile = analyze("Это текст");
    assert_eq!(profile.dominant, Script::Cyrillic);
    assert!(profile.confidence >= 0.5);
    assert_eq!(profile.decoding_profile, "ru");

    // Whitelist must be present and hold only Cyrillic letters plus
    // neutral characters (digits, spaces, punctuation).
    let whitelist = profile.glyph_whitelist.expect("whitelist for Cyrillic");
    assert!(whitelist.contains('а'));
    assert!(whitelist.contains('Я'));
    assert!(!whitelist.chars().any(|c| c.is_ascii_alphabetic()));
}

#[test]
fn test_mixed_sentence_has_no_whitelist() {
    let profile = analyze("Document расходы");
    assert_eq!(profile.dominant, Script::Mixed);
    assert!(profile.glyph_whitelist.is_none());
    assert_eq!(profile.decoding_profile, "ru+en");
}

#[test]
fn test_latin_sentence() {
    let profile = analyze("Quarterly report, final draft");
    assert_eq!(profile.dominant, Script::Latin);
    assert!(profile.confidence >= 0.5);
    let whitelist = profile.glyph_whitelist.expect("whitelist for Latin");
    assert!(whitelist.contains('a'));
    assert!(!whitelist.contains('я'));
}

#[test]
fn test_counts_are_tracked() {
    let profile = analyze("Доход: 120 USD!");
    assert_eq!(profile.counts.cyrillic_letters, 5);
    assert_eq!(profile.counts.latin_letters, 3);
    assert_eq!(profile.counts.digits, 3);
    // ':' and '!' recognized as punctuation, two spaces land in other
    assert_eq!(profile.counts.punctuation, 2);
    assert_eq!(profile.counts.other, 2);
}

#[test]
fn test_mixed_whitelist_absent_for_any_mixed_input() {
    // Property: Mixed implies no whitelist, regardless of proportions.
    for text in ["ab яя", "abcя ab", "Отчёт report", "x я"] {
        let profile = analyze(text);
        if profile.dominant == Script::Mixed {
            assert!(
                profile.glyph_whitelist.is_none(),
                "whitelist leaked for {text:?}"
            );
        }
    }
}
