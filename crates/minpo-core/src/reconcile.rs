//! Partition an answer payload's sources into primary and related lists.
//!
//! `primary` holds the statutes the answer actually cites, `related` the
//! remaining retrieval candidates. Both preserve payload order and are
//! deduplicated by `id` (first occurrence wins); their id sets are
//! disjoint.

use crate::payload::{AnswerPayload, LawSource};
use std::collections::HashSet;

/// Result of [`reconcile`]: cited sources and leftover candidates.
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    pub primary: Vec<LawSource>,
    pub related: Vec<LawSource>,
}

/// Split `payload` into primary and related sources.
///
/// `primary` is `used_sources` when non-empty, otherwise `sources` as a
/// fallback. `related` is every element of `sources` whose `id` is not
/// already primary. Pure: the same payload always yields the same
/// partition.
pub fn reconcile(payload: &AnswerPayload) -> Reconciled {
    let cited = if payload.used_sources.is_empty() {
        &payload.sources
    } else {
        &payload.used_sources
    };

    let mut seen: HashSet<&str> = HashSet::new();
    let mut primary = Vec::new();
    for source in cited {
        if seen.insert(&source.id) {
            primary.push(source.clone());
        }
    }

    let mut related = Vec::new();
    for source in &payload.sources {
        if seen.insert(&source.id) {
            related.push(source.clone());
        }
    }

    Reconciled { primary, related }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn src(id: &str, article: &str) -> LawSource {
        LawSource {
            id: id.to_string(),
            title: "民法".to_string(),
            article: article.to_string(),
            article_label: None,
            score: None,
            text: None,
        }
    }

    fn payload(used: &[LawSource], all: &[LawSource]) -> AnswerPayload {
        AnswerPayload {
            answer: String::new(),
            warnings: Vec::new(),
            used_sources: used.to_vec(),
            sources: all.to_vec(),
        }
    }

    fn ids(sources: &[LawSource]) -> Vec<&str> {
        sources.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn cited_sources_split_from_candidates() {
        let p = payload(
            &[src("a1", "第900条")],
            &[src("a1", "第900条"), src("a2", "第887条")],
        );
        let r = reconcile(&p);
        assert_eq!(ids(&r.primary), ["a1"]);
        assert_eq!(ids(&r.related), ["a2"]);
    }

    #[test]
    fn falls_back_to_candidates_when_nothing_cited() {
        let p = payload(&[], &[src("b1", "第1条"), src("b1", "第1条"), src("b2", "第2条")]);
        let r = reconcile(&p);
        assert_eq!(ids(&r.primary), ["b1", "b2"]);
        assert!(r.related.is_empty());
    }

    #[test]
    fn duplicate_cited_ids_collapse_to_first() {
        let p = payload(
            &[src("a1", "第900条"), src("a1", "第900条"), src("a2", "第887条")],
            &[],
        );
        let r = reconcile(&p);
        assert_eq!(ids(&r.primary), ["a1", "a2"]);
    }

    #[test]
    fn cited_id_missing_from_candidates_is_kept() {
        // used_sources ⊆ sources is expected but not guaranteed.
        let p = payload(&[src("x9", "第709条")], &[src("a2", "第887条")]);
        let r = reconcile(&p);
        assert_eq!(ids(&r.primary), ["x9"]);
        assert_eq!(ids(&r.related), ["a2"]);
    }

    #[test]
    fn empty_payload_yields_empty_partition() {
        let r = reconcile(&payload(&[], &[]));
        assert!(r.primary.is_empty());
        assert!(r.related.is_empty());
    }

    #[test]
    fn id_sets_are_disjoint_and_cover_the_payload() {
        let p = payload(
            &[src("a1", "第900条"), src("a3", "第90条")],
            &[
                src("a2", "第887条"),
                src("a1", "第900条"),
                src("a2", "第887条"),
                src("a4", "第177条"),
            ],
        );
        let r = reconcile(&p);
        let primary: std::collections::HashSet<_> = r.primary.iter().map(|s| &s.id).collect();
        let related: std::collections::HashSet<_> = r.related.iter().map(|s| &s.id).collect();
        assert!(primary.is_disjoint(&related));
        let mut all: Vec<_> = primary.union(&related).map(|s| s.as_str()).collect();
        all.sort();
        assert_eq!(all, ["a1", "a2", "a3", "a4"]);
    }

    #[test]
    fn reconcile_is_deterministic() {
        let p = payload(
            &[src("a1", "第900条")],
            &[src("a1", "第900条"), src("a2", "第887条")],
        );
        let first = reconcile(&p);
        let second = reconcile(&p);
        assert_eq!(ids(&first.primary), ids(&second.primary));
        assert_eq!(ids(&first.related), ids(&second.related));
    }

    #[test]
    fn candidate_order_is_preserved() {
        let p = payload(
            &[],
            &[src("c3", "第3条"), src("c1", "第1条"), src("c2", "第2条")],
        );
        let r = reconcile(&p);
        assert_eq!(ids(&r.primary), ["c3", "c1", "c2"]);
    }
}
