//! Font selection for text decoration passes.
//!
//! The registry pairs the PDF base-14 built-ins with remote TrueType faces
//! that cover Cyrillic. Resolution never fails: a fetch or coverage problem
//! degrades to a built-in font, and the caller reads the returned
//! `supports_cyrillic` flag to decide whether to sanitize the text.

mod cache;
mod fetch;
mod metrics;
mod registry;
mod resolve;

pub use cache::FontCache;
pub use fetch::{FontError, fetch_font_bytes};
pub use metrics::{BUILTIN_CHAR_WIDTH_RATIO, builtin_text_width, text_width};
pub use registry::{BuiltinFont, FontDescriptor, FontKind, FontRegistry};
pub use resolve::{FontData, ResolvedFont};
