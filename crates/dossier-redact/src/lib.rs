//! Redaction masker: turns raw document text into addressable masked spans.
//!
//! The scan runs once over the original text (never over already-substituted
//! output), longest term first, so overlapping or nested terms can never be
//! double-processed.

mod escape;
mod masker;

pub use escape::escape_markup;
pub use masker::{mask_document, MaskedDocument, RedactionDisplay, Segment, DEFAULT_MASK_GLYPH};
