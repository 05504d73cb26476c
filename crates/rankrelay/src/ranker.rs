use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{Provider, RerankProviderConfig, resolve_api_key};
use crate::error::ProviderError;
use crate::factory::build_rerank_provider;
use crate::traits::RerankProvider;
use crate::types::{DocId, DocumentBatch, RankedDocument, RankedResults, RerankItem, RerankRequest};

/// Adapter over a hosted rerank API. Provider and credential are resolved
/// once at construction; each call is a single HTTP round trip.
pub struct ApiReranker {
    provider: Arc<dyn RerankProvider>,
    verbose: bool,
}

impl std::fmt::Debug for ApiReranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiReranker")
            .field("provider", &self.provider.name())
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl ApiReranker {
    /// Resolves the API key from the environment (see
    /// [`crate::config::API_KEY_ENV_VARS`]).
    pub fn new(model: impl Into<String>, provider_name: &str) -> Result<Self, ProviderError> {
        Self::build(model.into(), provider_name, None)
    }

    pub fn with_api_key(
        model: impl Into<String>,
        provider_name: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::build(model.into(), provider_name, Some(api_key.into()))
    }

    /// Wraps an already-built provider, bypassing credential resolution.
    pub fn with_provider(provider: Arc<dyn RerankProvider>) -> Self {
        Self {
            provider,
            verbose: false,
        }
    }

    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    fn build(
        model: String,
        provider_name: &str,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let provider = Provider::parse(provider_name)?;
        let api_key = resolve_api_key(api_key)?;
        let cfg = RerankProviderConfig::for_provider(provider, api_key, model)?;
        Ok(Self {
            provider: build_rerank_provider(cfg)?,
            verbose: false,
        })
    }

    /// Reranks `docs` against `query`. Results come back in the provider's
    /// relevance order, each carrying the caller's identifier for the
    /// document the provider's `index` field points at.
    pub async fn rank(
        &self,
        query: &str,
        docs: impl Into<DocumentBatch>,
        doc_ids: Option<Vec<DocId>>,
    ) -> Result<RankedResults, ProviderError> {
        let documents = docs.into().into_inner();
        let doc_ids = ensure_doc_ids(doc_ids, documents.len())?;

        if self.verbose {
            info!(
                provider = self.provider.name(),
                documents = documents.len(),
                "rerank"
            );
        } else {
            debug!(
                provider = self.provider.name(),
                documents = documents.len(),
                "rerank"
            );
        }

        let top_n = documents.len();
        let request = RerankRequest {
            query: query.to_string(),
            documents,
            top_n,
        };
        let response = self.provider.rerank(request).await?;
        let results = map_results(response.items, &doc_ids)?;

        Ok(RankedResults {
            results,
            query: query.to_string(),
            has_scores: true,
        })
    }

    /// Relevance score for a single document: a one-element [`Self::rank`]
    /// call, returning the score of its only result.
    pub async fn score(&self, query: &str, doc: &str) -> Result<f32, ProviderError> {
        let ranked = self.rank(query, doc, None).await?;
        ranked
            .results
            .first()
            .map(|r| r.score)
            .ok_or_else(|| ProviderError::InvalidResponse("rerank returned no results".to_string()))
    }
}

fn ensure_doc_ids(doc_ids: Option<Vec<DocId>>, len: usize) -> Result<Vec<DocId>, ProviderError> {
    match doc_ids {
        Some(ids) if ids.len() == len => Ok(ids),
        Some(ids) => Err(ProviderError::DocIdMismatch {
            expected: len,
            actual: ids.len(),
        }),
        None => Ok((0..len).map(DocId::Index).collect()),
    }
}

fn map_results(
    items: Vec<RerankItem>,
    doc_ids: &[DocId],
) -> Result<Vec<RankedDocument>, ProviderError> {
    let mut results = Vec::with_capacity(items.len());
    for (pos, item) in items.into_iter().enumerate() {
        let doc_id = doc_ids.get(item.index).cloned().ok_or_else(|| {
            ProviderError::InvalidResponse(format!(
                "result index {} out of range for {} documents",
                item.index,
                doc_ids.len()
            ))
        })?;
        results.push(RankedDocument {
            doc_id,
            text: item.text,
            score: item.score,
            rank: pos + 1,
        });
    }
    Ok(results)
}
