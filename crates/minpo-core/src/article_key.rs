//! Lookup-key derivation for the article endpoint.
//!
//! The backend resolves provisions by bare label (`第900条`). Retrieval
//! results carry a display string that may append the provision's
//! heading in parentheses, e.g. `第730条（親族間の扶け合い）`, so the
//! key is either the explicit `article_label` or the display string cut
//! at the first parenthesis.

use crate::payload::LawSource;

/// Derive the article-endpoint lookup key for `source`.
///
/// Prefers a non-empty `article_label`. Falls back to `article`
/// truncated at the first full-width `（` or half-width `(`, which
/// strips any trailing heading annotation. Deterministic for a given
/// source.
pub fn lookup_key(source: &LawSource) -> &str {
    if let Some(label) = source.article_label.as_deref() {
        if !label.is_empty() {
            return label;
        }
    }
    let article = source.article.as_str();
    let cut = article
        .char_indices()
        .find(|(_, c)| *c == '（' || *c == '(')
        .map(|(i, _)| i)
        .unwrap_or(article.len());
    &article[..cut]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(article: &str, label: Option<&str>) -> LawSource {
        LawSource {
            id: "x".to_string(),
            title: "民法".to_string(),
            article: article.to_string(),
            article_label: label.map(str::to_string),
            score: None,
            text: None,
        }
    }

    #[test]
    fn explicit_label_wins() {
        let s = source("第730条（親族間の扶け合い）", Some("第730条"));
        assert_eq!(lookup_key(&s), "第730条");
    }

    #[test]
    fn fullwidth_parenthetical_is_stripped() {
        let s = source("第730条（親族間の扶け合い）", None);
        assert_eq!(lookup_key(&s), "第730条");
    }

    #[test]
    fn halfwidth_parenthetical_is_stripped() {
        let s = source("第900条(法定相続分)", None);
        assert_eq!(lookup_key(&s), "第900条");
    }

    #[test]
    fn plain_article_passes_through() {
        let s = source("第887条", None);
        assert_eq!(lookup_key(&s), "第887条");
    }

    #[test]
    fn empty_label_falls_back_to_article() {
        let s = source("第887条（子の相続権）", Some(""));
        assert_eq!(lookup_key(&s), "第887条");
    }

    #[test]
    fn leading_parenthesis_yields_empty_key() {
        let s = source("（削除）", None);
        assert_eq!(lookup_key(&s), "");
    }
}
