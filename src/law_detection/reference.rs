//! Conversion of raw citation matches into structured law references.
//!
//! A match that cannot be turned into a reference (unknown law name, nothing
//! but a law name, components that clean down to nothing) is not an error:
//! it simply produces no reference.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::law_detection::index::AliasIndex;
use crate::law_detection::models::LawReference;
use crate::law_detection::patterns::{PatternKind, RawCitation};

/// Citation label words left inside a captured component ("п. 3", "ст 15").
static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:п|пункт|ст|статья|пп|подпункт|ч|часть)\b\.?\s*").unwrap()
});

/// Anything that is not a word character, whitespace, period or dash.
static JUNK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s.\-–—]").unwrap());

/// Article number inside a multi-article list.
static ARTICLE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.\-–]\d+)*").unwrap());

/// Separators between sub-point values.
static COMPONENT_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,и;\s]+").unwrap());

/// Numeric range such as "1-3". ASCII digits only: other decimal scripts
/// are kept verbatim.
static NUMERIC_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s*-\s*([0-9]+)$").unwrap());

/// Single-letter sub-point such as "а" or "B".
static LETTER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[а-яa-z]$").unwrap());

/// Suggested cap for [`EngineOptions::max_range_span`](super::EngineOptions).
pub const DEFAULT_MAX_RANGE_SPAN: u64 = 1000;

/// Strip label words and stray punctuation from a captured component.
///
/// Returns `None` when nothing is left.
pub fn clean_component(component: &str) -> Option<String> {
    let without_labels = LABEL_RE.replace_all(component, "");
    let cleaned = JUNK_RE.replace_all(&without_labels, "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Every article number in a multi-article capture ("5, 10-12 и 15").
///
/// Compound numbers such as "10-12" are kept whole: in article numbering a
/// dash is part of the number, not a range.
pub fn parse_multiple_articles(articles: &str) -> Vec<String> {
    ARTICLE_NUMBER_RE
        .find_iter(articles)
        .map(|m| m.as_str().trim().to_string())
        .filter(|article| !article.is_empty())
        .collect()
}

fn expand_range(component: &str, max_range_span: Option<u64>) -> Option<Vec<String>> {
    let caps = NUMERIC_RANGE_RE.captures(component)?;
    let start: u64 = caps[1].parse().ok()?;
    let end: u64 = caps[2].parse().ok()?;

    if max_range_span.is_some_and(|max_span| end.saturating_sub(start) >= max_span) {
        debug!("Not expanding oversized sub-point range {:?}", component);
        return None;
    }

    Some((start..=end).map(|value| value.to_string()).collect())
}

/// Split a sub-point list into individual sub-points.
///
/// Values are separated by commas, semicolons, `и` or whitespace. Numeric
/// ranges ("1-3") expand to every value in the range unless the span
/// reaches `max_range_span`, in which case the range is kept as written.
/// Single letters are lowercased. Letter ranges ("а-в") are kept as written.
pub fn parse_multiple_components(component: &str, max_range_span: Option<u64>) -> Vec<String> {
    let Some(cleaned) = clean_component(component) else {
        return Vec::new();
    };

    let mut components = Vec::new();
    for part in COMPONENT_SEPARATOR_RE.split(&cleaned) {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some(expanded) = expand_range(part, max_range_span) {
            components.extend(expanded);
        } else if LETTER_RE.is_match(part) {
            components.push(part.to_lowercase());
        } else {
            components.push(part.to_string());
        }
    }

    components
}

/// Build the references described by one citation match.
///
/// Returns `None` when the match is discarded: no law name, a law name
/// missing from the alias index, or no article, point or sub-point.
pub fn build_references(
    citation: &RawCitation<'_>,
    index: &AliasIndex,
    max_range_span: Option<u64>,
) -> Option<Vec<LawReference>> {
    let law_name = citation.law_name.filter(|name| !name.is_empty())?;

    let Some(law_id) = index.resolve(law_name) else {
        debug!("Unknown law name {:?}, skipping match", law_name);
        return None;
    };

    let article = citation.article.and_then(clean_component);
    let point = citation.points.and_then(clean_component);
    let subpoints = citation.subpoints.filter(|text| !text.is_empty());

    if article.is_none() && point.is_none() && subpoints.is_none() {
        return None;
    }

    let references = match (citation.kind, citation.article, subpoints) {
        (PatternKind::MultiArticle, Some(raw_articles), _) => parse_multiple_articles(raw_articles)
            .into_iter()
            .map(|article| LawReference::new(law_id, Some(article), None, None))
            .collect(),
        (_, _, Some(subpoints)) => parse_multiple_components(subpoints, max_range_span)
            .into_iter()
            .map(|subpoint| {
                LawReference::new(law_id, article.clone(), point.clone(), Some(subpoint))
            })
            .collect(),
        _ => vec![LawReference::new(law_id, article, point, None)],
    };

    Some(references)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::law_detection::index::build_index;
    use crate::law_detection::models::AliasTable;
    use crate::lemmatizer::LowercaseLemmatizer;

    fn index() -> AliasIndex {
        let table: AliasTable = [(1, vec!["ГК РФ"]), (2, vec!["УК РФ"])].into_iter().collect();
        build_index(&table, &LowercaseLemmatizer, false).unwrap()
    }

    fn citation<'t>(
        kind: PatternKind,
        subpoints: Option<&'t str>,
        points: Option<&'t str>,
        article: Option<&'t str>,
        law_name: &'t str,
    ) -> RawCitation<'t> {
        RawCitation {
            kind,
            subpoints,
            points,
            article,
            law_name: Some(law_name),
        }
    }

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn test_clean_component_strips_labels_and_punctuation() {
        assert_eq!(clean_component("п. 3"), s("3"));
        assert_eq!(clean_component("ст 15.1"), s("15.1"));
        assert_eq!(clean_component("«10-2»,"), s("10-2"));
        assert_eq!(clean_component("(а)"), s("а"));
    }

    #[test]
    fn test_clean_component_empty_result_is_none() {
        assert_eq!(clean_component(""), None);
        assert_eq!(clean_component("п."), None);
        assert_eq!(clean_component(" ,;! "), None);
    }

    #[test]
    fn test_parse_multiple_articles() {
        assert_eq!(
            parse_multiple_articles("5, 10-12 и 15.1"),
            vec!["5", "10-12", "15.1"]
        );
        assert!(parse_multiple_articles(" и ").is_empty());
    }

    #[test]
    fn test_parse_multiple_components_letters() {
        assert_eq!(parse_multiple_components("а и б", None), vec!["а", "б"]);
        assert_eq!(parse_multiple_components("А, Б; в", None), vec!["а", "б", "в"]);
    }

    #[test]
    fn test_parse_multiple_components_numeric_range() {
        assert_eq!(parse_multiple_components("1-3", None), vec!["1", "2", "3"]);
        assert_eq!(parse_multiple_components("1-2, 5", None), vec!["1", "2", "5"]);
    }

    #[test]
    fn test_parse_multiple_components_letter_range_not_expanded() {
        assert_eq!(parse_multiple_components("а-в", None), vec!["а-в"]);
    }

    #[test]
    fn test_parse_multiple_components_reversed_range_is_empty() {
        assert!(parse_multiple_components("5-3", None).is_empty());
    }

    #[test]
    fn test_parse_multiple_components_oversized_range_kept_verbatim() {
        assert_eq!(
            parse_multiple_components("1-100000", Some(DEFAULT_MAX_RANGE_SPAN)),
            vec!["1-100000"]
        );
    }

    #[test]
    fn test_parse_multiple_components_range_span_boundary() {
        let cap = Some(DEFAULT_MAX_RANGE_SPAN);
        assert_eq!(parse_multiple_components("1-1000", cap).len(), 1000);
        assert_eq!(parse_multiple_components("1-1001", cap), vec!["1-1001"]);
        assert_eq!(parse_multiple_components("1-1001", None).len(), 1001);
    }

    #[test]
    fn test_parse_multiple_components_non_ascii_digit_range_kept_verbatim() {
        assert_eq!(parse_multiple_components("١-٣", None), vec!["١-٣"]);
    }

    #[test]
    fn test_build_references_single() {
        let index = index();
        let refs = build_references(
            &citation(PatternKind::General, None, Some("3"), Some("15"), "гк рф"),
            &index,
            None,
        )
        .unwrap();

        assert_eq!(refs, vec![LawReference::new(1, s("15"), s("3"), None)]);
    }

    #[test]
    fn test_build_references_expands_subpoints() {
        let index = index();
        let refs = build_references(
            &citation(PatternKind::General, Some("а и б"), Some("2"), Some("10"), "ук рф"),
            &index,
            None,
        )
        .unwrap();

        assert_eq!(
            refs,
            vec![
                LawReference::new(2, s("10"), s("2"), s("а")),
                LawReference::new(2, s("10"), s("2"), s("б")),
            ]
        );
    }

    #[test]
    fn test_build_references_multi_article() {
        let index = index();
        let refs = build_references(
            &citation(PatternKind::MultiArticle, None, None, Some("5, 10 и 15"), "гк рф"),
            &index,
            None,
        )
        .unwrap();

        let articles: Vec<_> = refs.iter().map(|r| r.article.as_deref()).collect();
        assert_eq!(articles, vec![Some("5"), Some("10"), Some("15")]);
        assert!(refs.iter().all(|r| r.point_article.is_none() && r.subpoint_article.is_none()));
    }

    #[test]
    fn test_build_references_bare_law_is_discarded() {
        let index = index();
        let result = build_references(
            &citation(PatternKind::General, None, None, None, "гк рф"),
            &index,
            None,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_build_references_unknown_law_is_discarded() {
        let index = index();
        let result = build_references(
            &citation(PatternKind::SimpleArticle, None, None, Some("5"), "кодекс марса"),
            &index,
            None,
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_build_references_resolves_uppercase_law_name() {
        let index = index();
        let refs = build_references(
            &citation(PatternKind::SimpleArticle, None, None, Some("7"), "ГК РФ"),
            &index,
            None,
        )
        .unwrap();
        assert_eq!(refs[0].law_id, 1);
    }

    #[test]
    fn test_build_references_missing_law_name_is_discarded() {
        let index = index();
        let mut raw = citation(PatternKind::General, None, None, Some("5"), "");
        assert_eq!(build_references(&raw, &index, None), None);
        raw.law_name = None;
        assert_eq!(build_references(&raw, &index, None), None);
    }
}
