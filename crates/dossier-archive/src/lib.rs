//! Document provider: the built-in case-file corpus and the in-memory
//! archive that serves it to the viewer.
//!
//! There is no persistence layer. The archive starts from the built-in
//! volumes and only grows when a generated dossier is filed during the
//! session; everything is gone when the process exits.

mod archive;
mod builtin;

pub use archive::Archive;
pub use builtin::{archive_volumes, case_letters};
