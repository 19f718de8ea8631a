//! Font resolution with fallback.

use std::sync::Arc;

use ttf_parser::Face;

use crate::cache::FontCache;
use crate::fetch::{FontError, fetch_font_bytes};
use crate::registry::{FontDescriptor, FontKind, FontRegistry};

/// Bytes (or built-in identity) of a resolved font.
#[derive(Debug, Clone)]
pub enum FontData {
    BuiltIn(crate::BuiltinFont),
    /// TrueType program to embed into the output document.
    Embedded(Arc<Vec<u8>>),
}

/// Outcome of font resolution.
///
/// `supports_cyrillic` is the coverage verdict the sanitizer keys off:
/// when false the caller must transliterate before drawing.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub name: String,
    pub display_name: String,
    pub supports_cyrillic: bool,
    pub data: FontData,
}

impl FontRegistry {
    /// Resolve `name` for rendering `sample_text`.
    ///
    /// Never fails: unknown names, fetch errors, unparsable faces, and
    /// coverage gaps all degrade to the default built-in with
    /// `supports_cyrillic = false`. Callers observe degradation through
    /// that flag, not through an error.
    pub async fn resolve(&self, name: &str, sample_text: &str, cache: &FontCache) -> ResolvedFont {
        let Some(desc) = self.get(name) else {
            log::warn!("unknown font {name:?}, using {}", self.default_builtin().name);
            return self.builtin_resolved(self.default_builtin());
        };

        match desc.kind {
            FontKind::BuiltIn(_) => self.builtin_resolved(desc),
            FontKind::Remote { url } => match load_remote(desc, url, sample_text, cache).await {
                Ok(bytes) => ResolvedFont {
                    name: desc.name.to_owned(),
                    display_name: desc.display_name.to_owned(),
                    supports_cyrillic: desc.supports_cyrillic,
                    data: FontData::Embedded(bytes),
                },
                Err(err) => {
                    log::warn!("font {name:?} unavailable ({err}), degrading to built-in");
                    self.builtin_resolved(self.default_builtin())
                }
            },
        }
    }
}

/// Fetch (or reuse cached) bytes and verify the face covers the sample.
async fn load_remote(
    desc: &FontDescriptor,
    url: &str,
    sample_text: &str,
    cache: &FontCache,
) -> Result<Arc<Vec<u8>>, FontError> {
    let bytes = match cache.get(desc.name) {
        Some(hit) => hit,
        None => {
            let fetched = fetch_font_bytes(url).await?;
            cache.insert(desc.name, fetched)
        }
    };

    let face = Face::parse(&bytes, 0).map_err(|e| FontError::Parse(e.to_string()))?;
    if !covers(&face, sample_text) {
        return Err(FontError::Coverage(desc.name.to_owned()));
    }
    Ok(bytes)
}

/// Whether the face has a glyph for every non-whitespace char of `text`.
fn covers(face: &Face<'_>, text: &str) -> bool {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| face.glyph_index(c).is_some())
}
