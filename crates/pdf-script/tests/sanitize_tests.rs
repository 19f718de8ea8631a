use pdf_script::*;

#[test]
fn test_identity_for_covered_fonts() {
    for text in ["", "plain", "Это текст", "Document расходы", "mix 123 !?"] {
        assert_eq!(sanitize(text, true), text);
    }
}

#[test]
fn test_uncovered_output_is_pure_ascii() {
    for text in ["Это текст", "Пример — dash", "Ёлка и ёж", "₽ 100"] {
        let out = sanitize(text, false);
        assert!(out.is_ascii(), "non-ascii output for {text:?}");
        assert!(
            !out.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c)),
            "cyrillic survived for {text:?}"
        );
    }
}

#[test]
fn test_case_is_preserved() {
    assert_eq!(sanitize("ЧАЙ чай Чай", false), "ChAY chay Chay");
}

#[test]
fn test_pipeline_pairs_with_analyze() {
    // The caller contract: analyze, resolve a font, then sanitize with the
    // coverage verdict. With no coverage the text still renders.
    let text = "Сводный отчёт";
    let profile = analyze(text);
    assert_eq!(profile.dominant, Script::Cyrillic);
    let fallback = sanitize(text, false);
    assert_eq!(fallback, "Svodnyy otchyot");
}
