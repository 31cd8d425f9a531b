use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::GatewayError;
use crate::model::Platform;

pub mod anthropic;
pub mod gemini;
pub mod openai;

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAI,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::OpenAI, Self::Anthropic, Self::Gemini];

    /// Vendor name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
        }
    }

    /// Model family name shown on comparison slots.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAI => "ChatGPT",
            Self::Anthropic => "Claude",
            Self::Gemini => "Gemini",
        }
    }

    pub fn for_platform(platform: Platform) -> Option<Self> {
        match platform {
            Platform::ChatGPT => Some(Self::OpenAI),
            Platform::Claude => Some(Self::Anthropic),
            Platform::Gemini => Some(Self::Gemini),
            Platform::Other => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::OpenAI => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "open-ai" | "chatgpt" => Ok(ProviderKind::OpenAI),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// One provider's request builder and response parser.
#[async_trait]
pub trait Provider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn model(&self) -> &str;

    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub openai: openai::OpenAISettings,
    pub anthropic: anthropic::AnthropicSettings,
    pub gemini: gemini::GeminiSettings,
}

/// Entry point for provider calls.
pub struct Gateway {
    openai: openai::OpenAIProvider,
    anthropic: anthropic::AnthropicProvider,
    gemini: gemini::GeminiProvider,
}

impl Gateway {
    pub fn new(settings: ProviderSettings, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build()?;
        Ok(Self {
            openai: openai::OpenAIProvider::new(client.clone(), settings.openai),
            anthropic: anthropic::AnthropicProvider::new(client.clone(), settings.anthropic),
            gemini: gemini::GeminiProvider::new(client, settings.gemini),
        })
    }

    pub fn provider(&self, kind: ProviderKind) -> &dyn Provider {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Gemini => &self.gemini,
        }
    }

    /// Refuses to call out without a key; otherwise one request, no retries.
    pub async fn run(
        &self,
        kind: ProviderKind,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, GatewayError> {
        if api_key.trim().is_empty() {
            return Err(GatewayError::MissingKey { provider: kind });
        }
        let provider = self.provider(kind);
        tracing::debug!(provider = %kind, model = provider.model(), bytes = prompt.len(), "calling provider");
        let result = provider.complete(api_key.trim(), prompt).await;
        if let Err(e) = &result {
            tracing::warn!(provider = %kind, error = %e, "provider call failed");
        }
        result
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Read the body, turn non-2xx into `Api` (using the provider's
/// `error.message` when present) and parse 2xx bodies as `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    kind: ProviderKind,
    resp: Response,
) -> Result<T, GatewayError> {
    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|source| GatewayError::transport(kind, source))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| format!("{} API failed", kind.label()));
        return Err(GatewayError::Api { provider: kind, status: status.as_u16(), message });
    }

    serde_json::from_str(&text).map_err(|e| GatewayError::MalformedResponse {
        provider: kind,
        detail: e.to_string(),
    })
}

pub(crate) fn endpoint(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("ChatGPT".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAI);
        assert_eq!("CLAUDE".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        assert_eq!(" google ".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("mistral".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn platform_mapping() {
        assert_eq!(ProviderKind::for_platform(Platform::Claude), Some(ProviderKind::Anthropic));
        assert_eq!(ProviderKind::for_platform(Platform::Other), None);
    }

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(endpoint("http://x/", "/v1/messages"), "http://x/v1/messages");
        assert_eq!(endpoint("http://x", "v1/messages"), "http://x/v1/messages");
    }

    #[tokio::test]
    async fn missing_key_never_dispatches() {
        // Unroutable base URLs: any attempted request would surface as Transport.
        let mut settings = ProviderSettings::default();
        settings.openai.base_url = "http://127.0.0.1:9".into();
        settings.anthropic.base_url = "http://127.0.0.1:9".into();
        settings.gemini.base_url = "http://127.0.0.1:9".into();
        let gw = Gateway::new(settings, None).unwrap();
        for kind in ProviderKind::ALL {
            let err = gw.run(kind, "   ", "Hello").await.unwrap_err();
            assert!(err.is_missing_key(), "{kind}: {err}");
            assert_eq!(err.provider(), kind);
        }
    }
}
