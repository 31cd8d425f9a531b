use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{endpoint, read_json, Provider, ProviderKind};
use crate::errors::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".into(),
            model: "gpt-4o".into(),
            temperature: 0.7,
        }
    }
}

/// OpenAI-compatible chat completions.
pub struct OpenAIProvider {
    client: Client,
    settings: OpenAISettings,
}

impl OpenAIProvider {
    pub fn new(client: Client, settings: OpenAISettings) -> Self {
        Self { client, settings }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Msg<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, GatewayError> {
        let url = endpoint(&self.settings.base_url, "v1/chat/completions");
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [Msg { role: "user", content: prompt }],
            temperature: self.settings.temperature,
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| GatewayError::transport(self.kind(), source))?;

        let parsed: ChatResponse = read_json(self.kind(), resp).await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GatewayError::MalformedResponse {
                provider: self.kind(),
                detail: "no choices[0].message.content".into(),
            })
    }
}
