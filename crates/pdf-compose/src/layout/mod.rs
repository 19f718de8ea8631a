//! Placement geometry for decorations.
//!
//! Pure coordinate math: a position keyword, the fixed margins, and the
//! measured text size become page-space coordinates. Callers may use these
//! for on-screen preview as well as final output, which guarantees
//! preview/output visual parity.

mod position;
mod rules;

pub use position::*;
pub use rules::*;
