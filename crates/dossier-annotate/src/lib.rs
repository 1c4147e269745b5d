//! Annotation interaction controller
//!
//! Owns the "active term" selection workflow for one open document: which
//! masked span the reader is annotating, which guess a reply is being
//! composed under, and the in-progress input buffers.

mod session;

pub use session::{AnnotationSession, SessionState};
