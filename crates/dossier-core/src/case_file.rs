use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// Archive segment a case file is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileCategory {
    Emails,
    Statements,
    Evidence,
}

impl FileCategory {
    pub fn all() -> [FileCategory; 3] {
        [
            FileCategory::Emails,
            FileCategory::Statements,
            FileCategory::Evidence,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Emails => "EMAILS",
            FileCategory::Statements => "STATEMENTS",
            FileCategory::Evidence => "EVIDENCE",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "EMAILS" => Ok(FileCategory::Emails),
            "STATEMENTS" => Ok(FileCategory::Statements),
            "EVIDENCE" => Ok(FileCategory::Evidence),
            other => Err(Error::InvalidCategory(other.to_string())),
        }
    }
}

/// A single archived document (letter, statement, or evidence record).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFile {
    pub id: String,
    pub title: String,
    pub sender: String,
    pub recipient: String,
    /// Display date exactly as printed on the document.
    pub date: String,
    pub category: FileCategory,
    pub content: String,
    pub content_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconstruction_prompt: Option<String>,
    #[serde(with = "time::serde::timestamp")]
    pub added_at: OffsetDateTime,
}

impl CaseFile {
    pub fn new(
        title: impl Into<String>,
        sender: impl Into<String>,
        recipient: impl Into<String>,
        date: impl Into<String>,
        category: FileCategory,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        let content_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            sender: sender.into(),
            recipient: recipient.into(),
            date: date.into(),
            category,
            content,
            content_hash,
            image: None,
            reconstruction_prompt: None,
            added_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn with_reconstruction_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.reconstruction_prompt = Some(prompt.into());
        self
    }
}
