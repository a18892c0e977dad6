//! Reference refinement: deduplication and redundancy filtering.
//!
//! The citation patterns overlap on purpose, so the same citation usually
//! comes out several times, at different levels of detail. Refinement keeps
//! one copy of each reference and drops references made redundant by a more
//! specific one for the same law and article.

use std::collections::HashSet;

use crate::law_detection::models::LawReference;

/// Remove exact duplicates, keeping the first occurrence of each reference.
pub fn dedup_references(references: Vec<LawReference>) -> Vec<LawReference> {
    let first_occurrence: Vec<bool> = {
        let mut seen = HashSet::with_capacity(references.len());
        references.iter().map(|reference| seen.insert(reference.key())).collect()
    };

    references
        .into_iter()
        .zip(first_occurrence)
        .filter_map(|(reference, first)| first.then_some(reference))
        .collect()
}

/// Whether `candidate` adds nothing over the already kept `kept`.
///
/// Only references to the same law and the same article can subsume each
/// other. Within that:
/// - identical point and sub-point
/// - same point, `kept` has a sub-point and `candidate` has none
/// - `candidate` has no point while `kept` has one
fn is_subsumed_by(candidate: &LawReference, kept: &LawReference) -> bool {
    if candidate.law_id != kept.law_id || candidate.article != kept.article {
        return false;
    }

    if kept.point_article == candidate.point_article
        && kept.subpoint_article == candidate.subpoint_article
    {
        return true;
    }

    if kept.point_article == candidate.point_article
        && kept.subpoint_article.is_some()
        && candidate.subpoint_article.is_none()
    {
        return true;
    }

    kept.point_article.is_some() && candidate.point_article.is_none()
}

/// Keep only the most specific references.
///
/// References are ordered by specificity, most specific first (stable for
/// equal rank), then each one is kept unless a kept reference subsumes it.
/// The returned order is that specificity order.
pub fn filter_redundant_references(references: Vec<LawReference>) -> Vec<LawReference> {
    let mut sorted = references;
    sorted.sort_by(|a, b| b.specificity().cmp(&a.specificity()));

    let mut kept: Vec<LawReference> = Vec::with_capacity(sorted.len());
    for reference in sorted {
        if !kept.iter().any(|k| is_subsumed_by(&reference, k)) {
            kept.push(reference);
        }
    }

    kept
}

/// Deduplicate, then drop redundant references.
pub fn refine_references(references: Vec<LawReference>) -> Vec<LawReference> {
    debug_assert!(
        references.iter().all(LawReference::is_actionable),
        "reference without article, point or sub-point is not actionable"
    );
    filter_redundant_references(dedup_references(references))
}
