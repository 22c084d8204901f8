//! Bidi- and script-aware itemization for a single paragraph of text,
//! driving an OpenType shaper to produce a positioned glyph stream.
//!
//! The pipeline runs four stages in order: script resolution (Unicode
//! script property plus a paired-punctuation heuristic), the Unicode
//! Bidirectional Algorithm, run splitting at script boundaries, and a
//! shaper pass per run. See [`Paragraph`] for the main entry point, or
//! [`shape_u32`]/[`shape_u8`] for one-shot convenience wrappers.

mod bidi;
mod convenience;
mod direction;
mod error;
mod feature;
mod font;
mod pairing;
mod paragraph;
mod resolve;
mod shaper;
mod split;

pub use convenience::{shape_u32, shape_u8};
pub use direction::{BaseDirection, Direction};
pub use error::ShapeError;
pub use font::FontHandle;
pub use paragraph::Paragraph;
pub use shaper::{EchoShaper, OutputGlyph, RustybuzzShaper, Shaper};
pub use split::ShapingRun;

pub use unicode_script::Script;
