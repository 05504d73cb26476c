use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct RerankRequest {
    pub query: String,
    pub documents: Vec<String>,
    pub top_n: usize,
}

#[derive(Debug, Clone)]
pub struct RerankItem {
    /// Position of the document in the submitted batch, as reported by the
    /// remote API. Not the position in the response list.
    pub index: usize,
    pub score: f32,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct RerankResponse {
    pub provider: String,
    pub model: String,
    pub items: Vec<RerankItem>,
}

/// Caller-supplied document identifier, stable across the request/response
/// round trip. Defaults to the positional index when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocId {
    Index(usize),
    Text(String),
}

impl From<usize> for DocId {
    fn from(value: usize) -> Self {
        Self::Index(value)
    }
}

impl From<&str> for DocId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DocId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// A batch of documents to rerank. A single string converts into a
/// one-element batch.
#[derive(Debug, Clone)]
pub struct DocumentBatch(Vec<String>);

impl DocumentBatch {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for DocumentBatch {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for DocumentBatch {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for DocumentBatch {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for DocumentBatch {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[String]> for DocumentBatch {
    fn from(value: &[String]) -> Self {
        Self(value.to_vec())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedDocument {
    pub doc_id: DocId,
    pub text: String,
    pub score: f32,
    /// 1-based position in the returned sequence.
    pub rank: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedResults {
    pub results: Vec<RankedDocument>,
    pub query: String,
    pub has_scores: bool,
}

impl RankedResults {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn top_k(&self, k: usize) -> &[RankedDocument] {
        self.results.get(..k.min(self.results.len())).unwrap_or(&[])
    }

    pub fn get_score_by_docid(&self, doc_id: &DocId) -> Option<f32> {
        self.results
            .iter()
            .find(|r| &r.doc_id == doc_id)
            .map(|r| r.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_string_wraps_into_one_element_batch() {
        let batch = DocumentBatch::from("only document");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.into_inner(), vec!["only document".to_string()]);
    }

    #[test]
    fn doc_id_serializes_untagged() {
        let as_index = serde_json::to_string(&DocId::Index(3)).expect("serialize");
        assert_eq!(as_index, "3");

        let as_text = serde_json::to_string(&DocId::from("doc-a")).expect("serialize");
        assert_eq!(as_text, "\"doc-a\"");
    }

    #[test]
    fn top_k_clamps_to_result_count() {
        let results = RankedResults {
            results: vec![RankedDocument {
                doc_id: DocId::Index(0),
                text: "only".to_string(),
                score: 0.5,
                rank: 1,
            }],
            query: "q".to_string(),
            has_scores: true,
        };
        assert_eq!(results.top_k(5).len(), 1);
        assert_eq!(results.top_k(0).len(), 0);
    }
}
