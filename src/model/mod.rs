//! Persisted data model.
//!
//! Field names serialize in camelCase so the document keeps the
//! `{ prompts, folders, runs, apiKeys }` layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::provider::ProviderKind;
use crate::template::Values;

/// Provider a prompt was written for. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Platform {
    #[default]
    ChatGPT,
    Claude,
    Gemini,
    #[serde(other)]
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::ChatGPT => write!(f, "ChatGPT"),
            Platform::Claude => write!(f, "Claude"),
            Platform::Gemini => write!(f, "Gemini"),
            Platform::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Platform::ChatGPT),
            "claude" | "anthropic" => Ok(Platform::Claude),
            "gemini" | "google" => Ok(Platform::Gemini),
            "other" => Ok(Platform::Other),
            _ => Err(format!("Unknown platform: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Prompt {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    /// Display name of the model that produced `content`.
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutputs {
    pub model_a: RunOutput,
    pub model_b: RunOutput,
}

/// One saved comparison session. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub prompt_id: String,
    pub prompt_title: String,
    #[serde(default)]
    pub variables: Values,
    pub outputs: RunOutputs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeys {
    #[serde(default)]
    pub openai: String,
    #[serde(default)]
    pub anthropic: String,
    #[serde(default)]
    pub gemini: String,
}

impl ApiKeys {
    pub fn get(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    pub fn merge(&mut self, patch: ApiKeysPatch) {
        if let Some(k) = patch.openai {
            self.openai = k;
        }
        if let Some(k) = patch.anthropic {
            self.anthropic = k;
        }
        if let Some(k) = patch.gemini {
            self.gemini = k;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiKeysPatch {
    pub openai: Option<String>,
    pub anthropic: Option<String>,
    pub gemini: Option<String>,
}

impl ApiKeysPatch {
    pub fn is_empty(&self) -> bool {
        self.openai.is_none() && self.anthropic.is_none() && self.gemini.is_none()
    }
}

/// Everything that is persisted, saved and loaded as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default)]
    pub api_keys: ApiKeys,
}

#[derive(Debug, Clone, Default)]
pub struct NewPrompt {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub platform: Platform,
    pub folder_id: Option<String>,
    pub color: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct PromptPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub platform: Option<Platform>,
    /// `Some(None)` clears the folder.
    pub folder_id: Option<Option<String>>,
    pub color: Option<Option<String>>,
}

impl PromptPatch {
    pub(crate) fn apply(self, p: &mut Prompt) {
        if let Some(title) = self.title {
            p.title = title;
        }
        if let Some(content) = self.content {
            p.content = content;
        }
        if let Some(tags) = self.tags {
            p.tags = normalize_tags(tags);
        }
        if let Some(platform) = self.platform {
            p.platform = platform;
        }
        if let Some(folder_id) = self.folder_id {
            p.folder_id = folder_id;
        }
        if let Some(color) = self.color {
            p.color = color;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewRun {
    pub prompt_id: String,
    pub prompt_title: String,
    pub variables: Values,
    pub outputs: RunOutputs,
}

/// Trim, drop empties and repeated labels; keeps first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for t in tags {
        let t = t.as_ref().trim();
        if t.is_empty() || out.iter().any(|seen| seen.eq_ignore_ascii_case(t)) {
            continue;
        }
        out.push(t.to_string());
    }
    out
}
