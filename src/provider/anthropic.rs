use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{endpoint, read_json, Provider, ProviderKind};
use crate::errors::GatewayError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropicSettings {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub api_version: String,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".into(),
            model: "claude-3-5-sonnet-20240620".into(),
            max_tokens: 1024,
            api_version: "2023-06-01".into(),
        }
    }
}

pub struct AnthropicProvider {
    client: Client,
    settings: AnthropicSettings,
}

impl AnthropicProvider {
    pub fn new(client: Client, settings: AnthropicSettings) -> Self {
        Self { client, settings }
    }
}

#[derive(Serialize)]
struct MsgRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Msg<'a>; 1],
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MsgResponse {
    #[serde(default)]
    content: Vec<Block>,
}

#[derive(Deserialize)]
struct Block {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, GatewayError> {
        let url = endpoint(&self.settings.base_url, "v1/messages");
        let body = MsgRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            messages: [Msg { role: "user", content: prompt }],
        };

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.settings.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|source| {
                // A refused connection is reported as a block, not a raw socket error.
                if source.is_connect() {
                    GatewayError::Blocked { provider: self.kind() }
                } else {
                    GatewayError::transport(self.kind(), source)
                }
            })?;

        let parsed: MsgResponse = read_json(self.kind(), resp).await?;
        parsed
            .content
            .into_iter()
            .next()
            .and_then(|b| b.text)
            .ok_or_else(|| GatewayError::MalformedResponse {
                provider: self.kind(),
                detail: "no content[0].text".into(),
            })
    }
}
