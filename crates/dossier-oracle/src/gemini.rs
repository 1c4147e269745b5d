use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use dossier_core::{Error, FileCategory, Result};

use crate::{GeneratedDossier, Oracle};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const VIDEO_POLL_SECS: u64 = 10;

/// Generative-language API client.
pub struct GeminiOracle {
    client: reqwest::Client,
    api_key: String,
    text_model: String,
    video_model: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiOracle {
    pub fn new(
        api_key: impl Into<String>,
        text_model: impl Into<String>,
        video_model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            text_model: text_model.into(),
            video_model: video_model.into(),
        }
    }

    async fn generate_text(&self, prompt: &str, json_response: bool) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            API_BASE, self.text_model, self.api_key
        );

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if json_response {
            body["generationConfig"] = json!({ "responseMimeType": "application/json" });
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Oracle(format!(
                "service returned {}",
                response.status()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::Oracle(format!("malformed response: {e}")))?;
        extract_text(parsed)
    }
}

/// First candidate's text, trimmed.
fn extract_text(response: GenerateResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Oracle("empty response".to_string()))?;
    Ok(text)
}

fn dossier_prompt(topic: &str, category: FileCategory) -> String {
    let form = match category {
        FileCategory::Emails => "email",
        _ => "police statement",
    };
    format!(
        "Write a cryptic, mysterious {form} from the year 1979. The topic is: {topic}. \
         Keep it under 80 words. Use a tone of paranoia and suspense. Respond with a \
         JSON object with the keys \"to\", \"subject\", \"date\", \"message\", and \
         \"reconstructionPrompt\" (a highly descriptive visual prompt for a video \
         reconstruction of the scene mentioned)."
    )
}

fn decrypt_prompt(text: &str) -> String {
    format!(
        "You are an expert cryptographer investigating a Cold War mystery. Provide a \
         chilling interpretation or 'decrypted' version of this redacted information: \
         \"{text}\". The tone should be bone-chilling."
    )
}

fn scene_prompt(prompt: &str) -> String {
    format!(
        "Gritty, 1970s CCTV style video reconstruction of: {prompt}. Low light, grainy \
         film, high suspense."
    )
}

#[async_trait]
impl Oracle for GeminiOracle {
    async fn generate_dossier(
        &self,
        topic: &str,
        category: FileCategory,
    ) -> Result<GeneratedDossier> {
        debug!(%topic, %category, "generating dossier");
        let raw = self
            .generate_text(&dossier_prompt(topic, category), true)
            .await?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Oracle(format!("malformed dossier payload: {e}")))
    }

    async fn decrypt_redactions(&self, text: &str) -> Result<String> {
        debug!("requesting decryption");
        self.generate_text(&decrypt_prompt(text), false).await
    }

    async fn reconstruct_scene(&self, prompt: &str) -> Result<String> {
        debug!("requesting scene reconstruction");
        let url = format!(
            "{}/models/{}:predictLongRunning?key={}",
            API_BASE, self.video_model, self.api_key
        );
        let body = json!({ "instances": [{ "prompt": scene_prompt(prompt) }] });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Oracle(format!("request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(Error::Oracle(format!(
                "service returned {}",
                response.status()
            )));
        }

        let operation: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Oracle(format!("malformed response: {e}")))?;
        let name = operation["name"]
            .as_str()
            .ok_or_else(|| Error::Oracle("operation has no name".to_string()))?
            .to_string();

        // Reconstruction takes a while; poll until the operation reports done.
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(VIDEO_POLL_SECS)).await;

            let status: serde_json::Value = self
                .client
                .get(format!("{}/{}?key={}", API_BASE, name, self.api_key))
                .send()
                .await
                .map_err(|e| Error::Oracle(format!("poll failed: {e}")))?
                .json()
                .await
                .map_err(|e| Error::Oracle(format!("malformed poll response: {e}")))?;

            if status["done"].as_bool().unwrap_or(false) {
                return video_uri(&status)
                    .map(|uri| format!("{}&key={}", uri, self.api_key));
            }
            debug!("reconstruction still running");
        }
    }
}

fn video_uri(status: &serde_json::Value) -> Result<String> {
    status["response"]["generateVideoResponse"]["generatedSamples"][0]["video"]["uri"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::Oracle("operation finished without a video".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_takes_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "  first  " }] } },
                { "content": { "parts": [{ "text": "second" }] } },
            ]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "first");
    }

    #[test]
    fn test_extract_text_rejects_empty_payloads() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": []
        }))
        .unwrap();
        assert!(matches!(extract_text(response), Err(Error::Oracle(_))));
    }

    #[test]
    fn test_generated_dossier_parses_service_json() {
        let dossier: GeneratedDossier = serde_json::from_value(json!({
            "to": "Archivist Delta",
            "subject": "Forbidden Frequency",
            "date": "May 02, 1979",
            "message": "The dial settles on a number no station owns.",
            "reconstructionPrompt": "A radio room at night, needle trembling."
        }))
        .unwrap();
        assert_eq!(dossier.subject, "Forbidden Frequency");
        assert!(dossier.reconstruction_prompt.contains("radio room"));
    }

    #[test]
    fn test_dossier_prompt_varies_by_category() {
        assert!(dossier_prompt("x", FileCategory::Emails).contains("email"));
        assert!(dossier_prompt("x", FileCategory::Statements).contains("police statement"));
    }

    #[test]
    fn test_video_uri_extraction() {
        let status = json!({
            "done": true,
            "response": { "generateVideoResponse": { "generatedSamples": [
                { "video": { "uri": "https://example.test/clip.mp4?alt=media" } }
            ] } }
        });
        assert_eq!(
            video_uri(&status).unwrap(),
            "https://example.test/clip.mp4?alt=media"
        );
        assert!(video_uri(&json!({ "done": true })).is_err());
    }
}
