//! Encoding fallback for fonts without Cyrillic coverage.
//!
//! When the resolved font cannot render the text, every Cyrillic letter is
//! transliterated to a Latin digraph and anything left outside printable
//! ASCII becomes a placeholder. The result is always encodable by the
//! built-in Latin fonts.

/// Placeholder for characters with no transliteration.
const PLACEHOLDER: char = '?';

/// Make `text` renderable by the resolved font.
///
/// Identity when the font covers Cyrillic. Otherwise transliterates and
/// clamps to printable ASCII; never fails.
pub fn sanitize(text: &str, supports_cyrillic: bool) -> String {
    if supports_cyrillic {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match transliterate(c) {
            Some(latin) => out.push_str(latin),
            None if c.is_ascii() && !c.is_ascii_control() => out.push(c),
            None => out.push(PLACEHOLDER),
        }
    }
    out
}

/// GOST-style romanization, lowercase and uppercase forms.
///
/// Uppercase digraphs capitalize only the first letter ("Ж" → "Zh"),
/// matching how romanized proper nouns are written.
fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "\"",
        'ы' => "y",
        'ь' => "'",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Е' => "E",
        'Ё' => "Yo",
        'Ж' => "Zh",
        'З' => "Z",
        'И' => "I",
        'Й' => "Y",
        'К' => "K",
        'Л' => "L",
        'М' => "M",
        'Н' => "N",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'У' => "U",
        'Ф' => "F",
        'Х' => "Kh",
        'Ц' => "Ts",
        'Ч' => "Ch",
        'Ш' => "Sh",
        'Щ' => "Shch",
        'Ъ' => "\"",
        'Ы' => "Y",
        'Ь' => "'",
        'Э' => "E",
        'Ю' => "Yu",
        'Я' => "Ya",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_font_covers() {
        let text = "Это текст с ünïcode";
        assert_eq!(sanitize(text, true), text);
    }

    #[test]
    fn test_transliterates_common_words() {
        assert_eq!(sanitize("Это", false), "Eto");
        assert_eq!(sanitize("текст", false), "tekst");
        assert_eq!(sanitize("Жук", false), "Zhuk");
        assert_eq!(sanitize("ЩИ", false), "ShchI");
    }

    #[test]
    fn test_output_is_ascii_without_cyrillic() {
        let out = sanitize("Документ расходы 2024 — итог", false);
        assert!(out.is_ascii());
        assert!(!out.chars().any(|c| ('\u{0400}'..='\u{04FF}').contains(&c)));
    }

    #[test]
    fn test_residual_unicode_becomes_placeholder() {
        assert_eq!(sanitize("a€b", false), "a?b");
        assert_eq!(sanitize("★★", false), "??");
    }

    #[test]
    fn test_never_panics_on_arbitrary_input() {
        let out = sanitize("🎉 día Ω это", false);
        assert!(out.is_ascii());
    }
}
