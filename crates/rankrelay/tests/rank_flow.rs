use std::sync::Arc;

use rankrelay::{
    ApiReranker, DocId, ProviderError, RerankItem, RerankProvider, RerankRequest, RerankResponse,
};

struct CannedProvider {
    items: Vec<RerankItem>,
}

impl CannedProvider {
    fn new(items: Vec<(usize, f32, &str)>) -> Arc<Self> {
        Arc::new(Self {
            items: items
                .into_iter()
                .map(|(index, score, text)| RerankItem {
                    index,
                    score,
                    text: text.to_string(),
                })
                .collect(),
        })
    }
}

#[async_trait::async_trait]
impl RerankProvider for CannedProvider {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn rerank(&self, _request: RerankRequest) -> Result<RerankResponse, ProviderError> {
        Ok(RerankResponse {
            provider: self.name().to_string(),
            model: "canned-model".to_string(),
            items: self.items.clone(),
        })
    }
}

#[tokio::test]
async fn rank_maps_response_indices_to_caller_doc_ids() {
    let provider = CannedProvider::new(vec![(2, 0.9, "third doc"), (0, 0.4, "first doc")]);
    let ranker = ApiReranker::with_provider(provider);

    let docs = vec!["first doc", "second doc", "third doc"];
    let doc_ids = vec![DocId::from("a"), DocId::from("b"), DocId::from("c")];
    let ranked = ranker
        .rank("which doc", docs, Some(doc_ids))
        .await
        .expect("rank");

    assert_eq!(ranked.query, "which doc");
    assert!(ranked.has_scores);
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked.results[0].doc_id, DocId::from("c"));
    assert_eq!(ranked.results[0].text, "third doc");
    assert_eq!(ranked.results[0].rank, 1);
    assert_eq!(ranked.results[1].doc_id, DocId::from("a"));
    assert_eq!(ranked.results[1].rank, 2);
}

#[tokio::test]
async fn rank_generates_positional_doc_ids_when_omitted() {
    let provider = CannedProvider::new(vec![(1, 0.8, "b"), (0, 0.2, "a")]);
    let ranker = ApiReranker::with_provider(provider);

    let ranked = ranker
        .rank("q", vec!["a", "b"], None)
        .await
        .expect("rank");

    assert_eq!(ranked.results[0].doc_id, DocId::Index(1));
    assert_eq!(ranked.results[1].doc_id, DocId::Index(0));
}

#[tokio::test]
async fn rank_rejects_mismatched_doc_ids() {
    let provider = CannedProvider::new(vec![(0, 0.5, "a")]);
    let ranker = ApiReranker::with_provider(provider);

    let err = ranker
        .rank("q", vec!["a", "b"], Some(vec![DocId::from("only")]))
        .await
        .expect_err("mismatch");

    assert!(matches!(
        err,
        ProviderError::DocIdMismatch {
            expected: 2,
            actual: 1
        }
    ));
}

#[tokio::test]
async fn score_returns_the_single_result_score() {
    let provider = CannedProvider::new(vec![(0, 0.42, "doc")]);
    let ranker = ApiReranker::with_provider(provider.clone());

    let score = ranker.score("q", "doc").await.expect("score");
    assert!((score - 0.42).abs() < 1e-6);

    let ranked = ApiReranker::with_provider(provider)
        .rank("q", "doc", None)
        .await
        .expect("rank");
    assert!((ranked.results[0].score - score).abs() < 1e-6);
}

#[tokio::test]
async fn capital_of_france_scenario() {
    let provider = CannedProvider::new(vec![(0, 0.98, "Paris is the capital of France.")]);
    let ranker = ApiReranker::with_provider(provider);

    let ranked = ranker
        .rank(
            "capital of France",
            vec!["Paris is the capital of France.", "Berlin is a city."],
            None,
        )
        .await
        .expect("rank");

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.results[0].doc_id, DocId::Index(0));
    assert!((ranked.results[0].score - 0.98).abs() < 1e-6);
    assert_eq!(ranked.results[0].rank, 1);
    assert_eq!(
        ranked.get_score_by_docid(&DocId::Index(0)),
        Some(ranked.results[0].score)
    );
}

#[tokio::test]
async fn single_string_doc_wraps_into_a_batch() {
    let provider = CannedProvider::new(vec![(0, 0.7, "only")]);
    let ranker = ApiReranker::with_provider(provider);

    let ranked = ranker.rank("q", "only", None).await.expect("rank");
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.results[0].doc_id, DocId::Index(0));
}
