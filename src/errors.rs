use thiserror::Error;

use crate::provider::ProviderKind;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage error: {0}")] Storage(#[from] std::io::Error),
    #[error("serialization error: {0}")] Serialize(#[from] serde_json::Error),
    #[error("validation error: {0}")] Validation(String),
}

/// Failure of a single provider call. The `Display` text is what the user sees
/// in place of the model output.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("API Key for {provider} is missing. Please add it in Settings.")]
    MissingKey { provider: ProviderKind },

    #[error("{} API error ({status}): {message}", .provider.label())]
    Api { provider: ProviderKind, status: u16, message: String },

    #[error("{} API blocked the request. Use a proxy or call it from a server.", .provider.label())]
    Blocked { provider: ProviderKind },

    #[error("{} request failed: {source}", .provider.label())]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{} returned an unexpected response: {detail}", .provider.label())]
    MalformedResponse { provider: ProviderKind, detail: String },
}

impl GatewayError {
    /// Wrap a transport failure. The URL is dropped because Gemini carries
    /// the API key in its query string.
    pub fn transport(provider: ProviderKind, source: reqwest::Error) -> Self {
        Self::Transport { provider, source: source.without_url() }
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            Self::MissingKey { provider }
            | Self::Api { provider, .. }
            | Self::Blocked { provider }
            | Self::Transport { provider, .. }
            | Self::MalformedResponse { provider, .. } => *provider,
        }
    }

    pub fn is_missing_key(&self) -> bool {
        matches!(self, Self::MissingKey { .. })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the {0} directory")] NoDir(&'static str),
    #[error("failed to read config {path}: {source}")]
    Read { path: String, #[source] source: std::io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse { path: String, #[source] source: toml::de::Error },
}
