use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API key not provided and none of the environment variables {checked} are set")]
    MissingApiKey { checked: String },

    #[error("unsupported rerank provider: {0} (supported: cohere, jina)")]
    UnsupportedProvider(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("doc_ids length {actual} does not match documents length {expected}")]
    DocIdMismatch { expected: usize, actual: usize },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("provider returned invalid response: {0}")]
    InvalidResponse(String),

    #[error("provider API error: status={status}, body={body}")]
    Api { status: u16, body: String },
}
