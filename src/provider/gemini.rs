use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{endpoint, read_json, Provider, ProviderKind};
use crate::errors::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-1.5-flash".into(),
        }
    }
}

/// Gemini `generateContent`. The key travels as the `key` query parameter.
pub struct GeminiProvider {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiProvider {
    pub fn new(client: Client, settings: GeminiSettings) -> Self {
        Self { client, settings }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl Provider for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, GatewayError> {
        let url = endpoint(
            &self.settings.base_url,
            &format!("v1beta/models/{}:generateContent", self.settings.model),
        );
        let body = GenerateRequest {
            contents: [Content { parts: [Part { text: prompt }] }],
        };

        let resp = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|source| GatewayError::transport(self.kind(), source))?;

        let parsed: GenerateResponse = read_json(self.kind(), resp).await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or_else(|| GatewayError::MalformedResponse {
                provider: self.kind(),
                detail: "no candidates[0].content.parts[0].text".into(),
            })
    }
}
