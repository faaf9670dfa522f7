//! Wire types for the search and article-lookup endpoints.

use serde::{Deserialize, Serialize};

/// One civil-code provision as returned by retrieval.
///
/// Identity is `id`; the same `id` appearing in both `used_sources` and
/// `sources` of a payload denotes the same statute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LawSource {
    pub id: String,
    pub title: String,
    /// Display label, e.g. `第730条（親族間の扶け合い）`.
    pub article: String,
    /// Canonical lookup key, preferred over parsing `article`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_label: Option<String>,
    /// Retrieval relevance, unit-less, higher is more relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Full statute text, absent until fetched on demand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body of the search endpoint.
///
/// `used_sources` lists the statutes actually cited in `answer`;
/// `sources` is the broader candidate set. The backend usually keeps
/// `used_sources ⊆ sources` but nothing here relies on that. Absent
/// sequences decode as empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub used_sources: Vec<LawSource>,
    #[serde(default)]
    pub sources: Vec<LawSource>,
}

/// Success body of the article-lookup endpoint.
///
/// The backend's `{"error": …}` body comes with a non-success status and
/// is carried in the client error, never decoded into this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub article: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_decodes_with_all_fields() {
        let json = r#"{
            "answer": "相続分は民法900条による。",
            "warnings": ["AIの出力は法的助言ではない。"],
            "used_sources": [
                {"id": "a1", "title": "民法", "article": "第900条", "article_label": "第900条", "score": 0.91}
            ],
            "sources": [
                {"id": "a1", "title": "民法", "article": "第900条", "score": 0.91},
                {"id": "a2", "title": "民法", "article": "第887条"}
            ]
        }"#;
        let payload: AnswerPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.warnings.len(), 1);
        assert_eq!(payload.used_sources.len(), 1);
        assert_eq!(payload.sources.len(), 2);
        assert_eq!(payload.sources[1].score, None);
    }

    #[test]
    fn absent_sequences_decode_as_empty() {
        let payload: AnswerPayload = serde_json::from_str(r#"{"answer": "…"}"#).unwrap();
        assert!(payload.warnings.is_empty());
        assert!(payload.used_sources.is_empty());
        assert!(payload.sources.is_empty());
    }

    #[test]
    fn missing_answer_is_rejected() {
        let result = serde_json::from_str::<AnswerPayload>(r#"{"warnings": []}"#);
        assert!(result.is_err());
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let result = serde_json::from_str::<AnswerPayload>(r#"{"answer": "x", "sources": "a1"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn article_detail_decodes() {
        let detail: ArticleDetail =
            serde_json::from_str(r#"{"article": "第900条", "text": "同順位の相続人が…"}"#).unwrap();
        assert_eq!(detail.article, "第900条");
    }

    #[test]
    fn error_body_is_not_an_article_detail() {
        let result = serde_json::from_str::<ArticleDetail>(r#"{"error": "not found: 第9999条"}"#);
        assert!(result.is_err());
    }
}
