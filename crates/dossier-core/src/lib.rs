//! Core domain models and logic for dossier
//!
//! This crate contains:
//! - Document models (CaseFile, FileCategory)
//! - Annotation models (RedactionEntry, Guess, Reply, AnnotationBoard)
//! - The built-in term dictionary
//! - The shared error type

pub mod annotation;
pub mod case_file;
pub mod dictionary;
pub mod error;

pub use annotation::{AnnotationBoard, Guess, RedactionEntry, Reply};
pub use case_file::{CaseFile, FileCategory};
pub use dictionary::{TermDictionary, TermSpec};
pub use error::{Error, Result};
