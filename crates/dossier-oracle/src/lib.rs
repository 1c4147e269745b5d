//! Opaque generative-service boundary.
//!
//! Everything here is fire-a-request, surface-the-result: no retry, no
//! partial state. A failure is reported to the caller, which shows it as a
//! blocking alert; nothing in this crate ever touches the annotation model.

mod gemini;
mod narrator;

use async_trait::async_trait;
use serde::Deserialize;

use dossier_core::{FileCategory, Result};

pub use gemini::GeminiOracle;
pub use narrator::Narrator;

/// A dossier produced by the generative service, ready to be filed.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedDossier {
    pub to: String,
    pub subject: String,
    pub date: String,
    pub message: String,
    #[serde(rename = "reconstructionPrompt")]
    pub reconstruction_prompt: String,
}

/// The generative backend, as seen by the viewer.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Write a new cryptic case document on the given topic.
    async fn generate_dossier(
        &self,
        topic: &str,
        category: FileCategory,
    ) -> Result<GeneratedDossier>;

    /// Produce an interpretation of a redacted passage.
    async fn decrypt_redactions(&self, text: &str) -> Result<String>;

    /// Produce a video reconstruction of a scene; returns the download URL.
    async fn reconstruct_scene(&self, prompt: &str) -> Result<String>;
}
