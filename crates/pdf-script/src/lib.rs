//! Writing-system detection and encoding fallback for text decoration.
//!
//! This crate is the pure, I/O-free part of the text pipeline:
//! [`analyze`] classifies a string by script and recommends a decoding
//! profile, [`sanitize`] transliterates text that the chosen font cannot
//! cover. Font selection itself lives in `pdf-fonts`.

mod analyze;
mod translit;

pub use analyze::{CharCounts, Script, ScriptProfile, analyze};
pub use translit::sanitize;
