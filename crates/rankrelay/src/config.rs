use std::time::Duration;

use crate::error::ProviderError;

/// Scanned in order when no explicit API key is given; first non-empty wins.
pub const API_KEY_ENV_VARS: [&str; 2] = ["COHERE_API_KEY", "JINA_API_KEY"];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(8);

const COHERE_ENDPOINT: &str = "https://api.cohere.ai/v1/rerank";
const JINA_ENDPOINT: &str = "https://api.jina.ai/v1/rerank";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Cohere,
    Jina,
    /// Known endpoint name with no implemented adapter; parses but cannot be
    /// built into a provider.
    Mixedbread,
}

impl Provider {
    pub fn parse(name: &str) -> Result<Self, ProviderError> {
        match name.to_lowercase().as_str() {
            "cohere" => Ok(Self::Cohere),
            "jina" => Ok(Self::Jina),
            "mixedbread" => Ok(Self::Mixedbread),
            other => Err(ProviderError::UnsupportedProvider(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cohere => "cohere",
            Self::Jina => "jina",
            Self::Mixedbread => "mixedbread",
        }
    }

    pub fn endpoint(self) -> Option<&'static str> {
        match self {
            Self::Cohere => Some(COHERE_ENDPOINT),
            Self::Jina => Some(JINA_ENDPOINT),
            Self::Mixedbread => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CohereRerankConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl CohereRerankConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            api_key: api_key.into(),
            model: if model.is_empty() {
                "rerank-v3.5".to_string()
            } else {
                model
            },
            endpoint: COHERE_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JinaRerankConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl JinaRerankConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            api_key: api_key.into(),
            model: if model.is_empty() {
                "jina-reranker-v2-base-multilingual".to_string()
            } else {
                model
            },
            endpoint: JINA_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub enum RerankProviderConfig {
    Cohere(CohereRerankConfig),
    Jina(JinaRerankConfig),
}

impl RerankProviderConfig {
    pub fn for_provider(
        provider: Provider,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        match provider {
            Provider::Cohere => Ok(Self::Cohere(CohereRerankConfig::new(api_key, model))),
            Provider::Jina => Ok(Self::Jina(JinaRerankConfig::new(api_key, model))),
            Provider::Mixedbread => Err(ProviderError::Config(
                "mixedbread rerank is not implemented".to_string(),
            )),
        }
    }
}

pub fn resolve_api_key(explicit: Option<String>) -> Result<String, ProviderError> {
    resolve_api_key_with(explicit, |name| std::env::var(name).ok())
}

pub(crate) fn resolve_api_key_with(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, ProviderError> {
    if let Some(key) = explicit {
        return Ok(key);
    }
    for name in API_KEY_ENV_VARS {
        if let Some(value) = lookup(name) {
            if !value.is_empty() {
                return Ok(value);
            }
        }
    }
    Err(ProviderError::MissingApiKey {
        checked: API_KEY_ENV_VARS.join(", "),
    })
}
