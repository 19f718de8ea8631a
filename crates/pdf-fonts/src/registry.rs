//! Font registry: built-in base-14 fonts and remote supplementary faces.

use crate::FontCache;
use crate::resolve::{FontData, ResolvedFont};
use pdf_script::{Script, analyze};

/// PDF base-14 fonts usable without embedding.
///
/// None of these cover Cyrillic; they are the degradation target when a
/// remote face cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Helvetica,
    TimesRoman,
    Courier,
}

impl BuiltinFont {
    /// PDF BaseFont name.
    pub fn base_name(self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::Courier => "Courier",
        }
    }
}

/// Where a font's bytes come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    BuiltIn(BuiltinFont),
    /// TrueType program fetched on demand.
    Remote { url: &'static str },
}

/// Registry entry for a selectable font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Canonical lookup key.
    pub name: &'static str,
    pub display_name: &'static str,
    /// Declared Cyrillic glyph coverage; verified against the actual face
    /// after fetch.
    pub supports_cyrillic: bool,
    pub kind: FontKind,
}

impl FontDescriptor {
    pub fn is_built_in(&self) -> bool {
        matches!(self.kind, FontKind::BuiltIn(_))
    }
}

/// The selectable font set.
///
/// Construct with [`FontRegistry::default`] for the standard table, or
/// [`FontRegistry::with_fonts`] to substitute entries in tests.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: Vec<FontDescriptor>,
}

const DEFAULT_FONTS: &[FontDescriptor] = &[
    FontDescriptor {
        name: "helvetica",
        display_name: "Helvetica",
        supports_cyrillic: false,
        kind: FontKind::BuiltIn(BuiltinFont::Helvetica),
    },
    FontDescriptor {
        name: "times",
        display_name: "Times New Roman",
        supports_cyrillic: false,
        kind: FontKind::BuiltIn(BuiltinFont::TimesRoman),
    },
    FontDescriptor {
        name: "courier",
        display_name: "Courier",
        supports_cyrillic: false,
        kind: FontKind::BuiltIn(BuiltinFont::Courier),
    },
    FontDescriptor {
        name: "pt-sans",
        display_name: "PT Sans",
        supports_cyrillic: true,
        kind: FontKind::Remote {
            url: "https://cdn.jsdelivr.net/gh/google/fonts@main/ofl/ptsans/PT_Sans-Web-Regular.ttf",
        },
    },
    FontDescriptor {
        name: "noto-sans",
        display_name: "Noto Sans",
        supports_cyrillic: true,
        kind: FontKind::Remote {
            url: "https://cdn.jsdelivr.net/gh/notofonts/notofonts.github.io@main/fonts/NotoSans/hinted/ttf/NotoSans-Regular.ttf",
        },
    },
];

/// Lookup key of the degradation target.
const DEFAULT_BUILTIN: &str = "helvetica";

/// Preferred face for predominantly Cyrillic text.
const PREFERRED_CYRILLIC: &str = "pt-sans";

/// Preferred face for mixed-script text; must cover both ranges.
const PREFERRED_MIXED: &str = "noto-sans";

impl Default for FontRegistry {
    fn default() -> Self {
        Self {
            fonts: DEFAULT_FONTS.to_vec(),
        }
    }
}

impl FontRegistry {
    /// Registry with a custom font table (isolated registries for tests).
    pub fn with_fonts(fonts: Vec<FontDescriptor>) -> Self {
        Self { fonts }
    }

    pub fn get(&self, name: &str) -> Option<&FontDescriptor> {
        self.fonts.iter().find(|f| f.name == name)
    }

    pub fn fonts(&self) -> &[FontDescriptor] {
        &self.fonts
    }

    /// The built-in font used when resolution degrades.
    pub fn default_builtin(&self) -> &FontDescriptor {
        self.get(DEFAULT_BUILTIN)
            .or_else(|| self.fonts.iter().find(|f| f.is_built_in()))
            .unwrap_or(&DEFAULT_FONTS[0])
    }

    /// Pick the best font for `text` by script, fetching remote faces as
    /// needed.
    ///
    /// Cyrillic text prefers the dedicated Cyrillic face; mixed text must
    /// end up on a face covering both scripts. Latin and letterless text
    /// stay on the default built-in.
    pub async fn best_font_for(&self, text: &str, cache: &FontCache) -> ResolvedFont {
        let profile = analyze(text);
        match profile.dominant {
            Script::Cyrillic => self.resolve(PREFERRED_CYRILLIC, text, cache).await,
            Script::Mixed => self.resolve(PREFERRED_MIXED, text, cache).await,
            Script::Latin | Script::Unknown => self.builtin_resolved(self.default_builtin()),
        }
    }

    pub(crate) fn builtin_resolved(&self, desc: &FontDescriptor) -> ResolvedFont {
        let builtin = match desc.kind {
            FontKind::BuiltIn(b) => b,
            // Degradation target must be drawable without bytes.
            FontKind::Remote { .. } => BuiltinFont::Helvetica,
        };
        ResolvedFont {
            name: desc.name.to_owned(),
            display_name: desc.display_name.to_owned(),
            supports_cyrillic: false,
            data: FontData::BuiltIn(builtin),
        }
    }
}
