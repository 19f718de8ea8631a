//! Script classification for text runs.
//!
//! Classification drives font selection: Cyrillic text needs a font with
//! Cyrillic glyph coverage, mixed text needs a font covering both ranges,
//! and Latin text can use any of the built-in base-14 fonts.

/// Dominant writing system of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Script {
    Latin,
    Cyrillic,
    /// Both scripts present in meaningful proportion.
    Mixed,
    /// No letters at all (digits, punctuation, empty string).
    Unknown,
}

/// Per-category character counts for a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharCounts {
    pub latin_letters: usize,
    pub cyrillic_letters: usize,
    pub digits: usize,
    pub punctuation: usize,
    /// Whitespace and everything outside the other categories.
    pub other: usize,
}

/// Result of analyzing a text run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScriptProfile {
    pub dominant: Script,
    pub counts: CharCounts,
    /// 0..1, how certain the classification is.
    pub confidence: f32,
    /// Language tag for decoding ("ru", "en", "ru+en" for mixed, "und").
    pub decoding_profile: &'static str,
    /// Constrained character set for single-script text.
    ///
    /// `None` for `Mixed` and `Unknown`: a whitelist would silently drop
    /// valid glyphs from the other script.
    pub glyph_whitelist: Option<&'static str>,
}

/// Punctuation recognized as such rather than falling into `other`.
const PUNCTUATION: &str = ".,;:!?-–—…()[]{}<>'\"«»/\\&@#%*+=_~|";

/// Character set a Latin-only text is expected to stay within.
const LATIN_WHITELIST: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                               abcdefghijklmnopqrstuvwxyz\
                               0123456789 .,;:!?-()[]'\"/&@#%*+=";

/// Character set a Cyrillic-only text is expected to stay within.
const CYRILLIC_WHITELIST: &str = "АБВГДЕЁЖЗИЙКЛМНОПРСТУФХЦЧШЩЪЫЬЭЮЯ\
                                  абвгдеёжзийклмнопрстуфхцчшщъыьэюя\
                                  0123456789 .,;:!?-()[]'\"«»/&@#%*+=";

fn is_cyrillic_letter(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || (('\u{00C0}'..='\u{024F}').contains(&c) && c.is_alphabetic())
}

/// Classify a text run by writing system.
///
/// Pure function; the decision ladder is ordered and the first match wins:
/// no letters → `Unknown`, ≥90% of one script → that script, ≥10% of each
/// → `Mixed`, otherwise the larger share.
pub fn analyze(text: &str) -> ScriptProfile {
    let mut counts = CharCounts::default();

    for c in text.chars() {
        if is_cyrillic_letter(c) {
            counts.cyrillic_letters += 1;
        } else if is_latin_letter(c) {
            counts.latin_letters += 1;
        } else if c.is_ascii_digit() {
            counts.digits += 1;
        } else if PUNCTUATION.contains(c) {
            counts.punctuation += 1;
        } else {
            counts.other += 1;
        }
    }

    let letters = counts.latin_letters + counts.cyrillic_letters;
    let (latin_ratio, cyrillic_ratio) = if letters == 0 {
        (0.0, 0.0)
    } else {
        (
            counts.latin_letters as f32 / letters as f32,
            counts.cyrillic_letters as f32 / letters as f32,
        )
    };

    let dominant = if letters == 0 {
        Script::Unknown
    } else if cyrillic_ratio >= 0.9 {
        Script::Cyrillic
    } else if latin_ratio >= 0.9 {
        Script::Latin
    } else if latin_ratio >= 0.1 && cyrillic_ratio >= 0.1 {
        Script::Mixed
    } else if cyrillic_ratio > latin_ratio {
        Script::Cyrillic
    } else {
        Script::Latin
    };

    let confidence = match dominant {
        Script::Cyrillic => (0.5 + cyrillic_ratio * 0.5).min(0.95),
        Script::Latin => (0.5 + latin_ratio * 0.5).min(0.95),
        Script::Mixed => (0.4 + latin_ratio.min(cyrillic_ratio) * 0.5).min(0.9),
        Script::Unknown => 0.1,
    };

    let decoding_profile = match dominant {
        Script::Latin => "en",
        Script::Cyrillic => "ru",
        Script::Mixed => "ru+en",
        Script::Unknown => "und",
    };

    let glyph_whitelist = match dominant {
        Script::Latin => Some(LATIN_WHITELIST),
        Script::Cyrillic => Some(CYRILLIC_WHITELIST),
        // Mixed must never get a whitelist; Unknown has nothing to constrain.
        Script::Mixed | Script::Unknown => None,
    };

    ScriptProfile {
        dominant,
        counts,
        confidence,
        decoding_profile,
        glyph_whitelist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_unknown() {
        let profile = analyze("");
        assert_eq!(profile.dominant, Script::Unknown);
        assert_eq!(profile.confidence, 0.1);
        assert!(profile.glyph_whitelist.is_none());
    }

    #[test]
    fn test_digits_and_punctuation_only_is_unknown() {
        let profile = analyze("123 456 -- !?");
        assert_eq!(profile.dominant, Script::Unknown);
        assert_eq!(profile.counts.latin_letters, 0);
        assert_eq!(profile.counts.cyrillic_letters, 0);
        assert_eq!(profile.decoding_profile, "und");
    }

    #[test]
    fn test_ninety_percent_threshold() {
        // 9 cyrillic letters, 1 latin letter
        let profile = analyze("абвгдежзиq");
        assert_eq!(profile.dominant, Script::Cyrillic);

        // 9 latin letters, 1 cyrillic letter
        let profile = analyze("abcdefghiя");
        assert_eq!(profile.dominant, Script::Latin);
    }

    #[test]
    fn test_even_split_is_mixed() {
        let profile = analyze("abcde абвгд");
        assert_eq!(profile.dominant, Script::Mixed);
        assert_eq!(profile.decoding_profile, "ru+en");
        assert!(profile.confidence <= 0.9);
    }

    #[test]
    fn test_latin_extended_counts_as_latin() {
        let profile = analyze("café naïve");
        assert_eq!(profile.dominant, Script::Latin);
        assert_eq!(profile.counts.latin_letters, 9);
    }

    #[test]
    fn test_confidence_cap() {
        let profile = analyze("purelatin");
        assert_eq!(profile.dominant, Script::Latin);
        assert_eq!(profile.confidence, 0.95);
    }
}
