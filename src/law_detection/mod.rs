//! Law Reference Extraction Engine
//!
//! This module extracts structured citations of legal codes ("п. 3 ст. 15
//! ГК РФ") from free-form text and resolves the cited law through an alias
//! index built from a law alias table.

pub mod aliases;
pub mod index;
pub mod models;
pub mod normalize;
pub mod patterns;
pub mod reference;
pub mod refine;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use derive_builder::Builder;
use log::debug;

use crate::law_detection::aliases::load_alias_table;
use crate::law_detection::index::{AliasIndex, build_index};
use crate::law_detection::normalize::{normalize_text, strip_control_chars};
use crate::law_detection::patterns::CompiledPatterns;
use crate::law_detection::reference::build_references;
use crate::law_detection::refine::refine_references;
use crate::lemmatizer::Lemmatizer;

pub use models::{AliasTable, LawReference, LinksResponse};

/// Default compiled size limit for each citation pattern.
///
/// The alias alternation is embedded in every pattern, so large alias tables
/// need far more room than the `regex` crate default.
pub const DEFAULT_REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);

/// Engine construction options.
#[derive(Debug, Clone, Builder)]
#[builder(default)]
pub struct EngineOptions {
    /// Fail construction when aliases of two different laws normalize to the
    /// same name, instead of letting the later law win.
    pub strict_aliases: bool,

    /// Compiled size limit, in bytes, for each citation pattern.
    pub regex_size_limit: usize,

    /// Numeric sub-point ranges spanning this many values or more are kept
    /// as one verbatim sub-point instead of being expanded. `None` expands
    /// every range.
    pub max_range_span: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_aliases: false,
            regex_size_limit: DEFAULT_REGEX_SIZE_LIMIT,
            max_range_span: None,
        }
    }
}

/// Law reference extraction engine.
///
/// Built once from an alias table and a lemmatizer, then immutable: a single
/// instance can serve concurrent extraction calls behind an `Arc`.
#[derive(Debug, Clone)]
pub struct LawReferenceEngine {
    index: Arc<AliasIndex>,
    patterns: Arc<CompiledPatterns>,
    lemmatizer: Arc<dyn Lemmatizer>,
    max_range_span: Option<u64>,
}

impl LawReferenceEngine {
    /// Create an engine with default options.
    pub fn new(table: &AliasTable, lemmatizer: Arc<dyn Lemmatizer>) -> Result<Self> {
        Self::with_options(table, lemmatizer, &EngineOptions::default())
    }

    /// Create an engine.
    ///
    /// # Errors
    /// Fails when the alias patterns cannot be compiled (for example when
    /// they exceed `regex_size_limit`) or, with `strict_aliases`, when two
    /// laws share a normalized alias.
    pub fn with_options(
        table: &AliasTable,
        lemmatizer: Arc<dyn Lemmatizer>,
        options: &EngineOptions,
    ) -> Result<Self> {
        let index = build_index(table, lemmatizer.as_ref(), options.strict_aliases)
            .context("Failed to build alias index")?;
        let patterns = CompiledPatterns::new(&index.alternation, options.regex_size_limit)?;

        debug!(
            "Law reference engine ready: {} laws, {} alias names, {} patterns",
            table.len(),
            index.len(),
            patterns.len()
        );

        Ok(Self {
            index: Arc::new(index),
            patterns: Arc::new(patterns),
            lemmatizer,
            max_range_span: options.max_range_span,
        })
    }

    /// Create an engine from an alias table JSON file.
    pub fn from_alias_file(
        path: &Path,
        lemmatizer: Arc<dyn Lemmatizer>,
        options: &EngineOptions,
    ) -> Result<Self> {
        let table = load_alias_table(path)?;
        Self::with_options(&table, lemmatizer, options)
    }

    /// Extract law references from text.
    ///
    /// This runs the full extraction pipeline:
    /// 1. Fold citation words to abbreviations and lemmatize the text
    /// 2. Strip control characters
    /// 3. Run the three citation patterns in order
    /// 4. Build references from every match, dropping unusable matches
    /// 5. Deduplicate and drop redundant references
    ///
    /// Never fails: malformed or ambiguous citations are simply left out.
    /// The result is ordered most specific reference first.
    pub fn extract(&self, text: &str) -> Vec<LawReference> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let normalized = normalize_text(text, self.lemmatizer.as_ref());
        let clean_text = strip_control_chars(&normalized);

        let references: Vec<LawReference> = self
            .patterns
            .find_citations(&clean_text)
            .iter()
            .filter_map(|citation| build_references(citation, &self.index, self.max_range_span))
            .flatten()
            .collect();

        refine_references(references)
    }

    /// Extract law references wrapped in the service response payload.
    pub fn extract_links(&self, text: &str) -> LinksResponse {
        LinksResponse {
            links: self.extract(text),
        }
    }

    /// Get a reference to the alias index.
    pub fn index(&self) -> &AliasIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::law_detection::reference::DEFAULT_MAX_RANGE_SPAN;
    use crate::lemmatizer::LowercaseLemmatizer;
    use crate::test_utils::{
        create_test_alias_table, create_test_engine, create_test_lemmatizer, reference,
    };

    #[test]
    fn test_engine_options_builder_defaults() {
        let options = EngineOptionsBuilder::default()
            .strict_aliases(true)
            .build()
            .unwrap();
        assert!(options.strict_aliases);
        assert_eq!(options.regex_size_limit, DEFAULT_REGEX_SIZE_LIMIT);
        assert_eq!(options.max_range_span, None);
    }

    #[test]
    fn test_engine_extract_point_and_article() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("пункт 3 статьи 15 ГК РФ"),
            vec![reference(1, Some("15"), Some("3"), None)]
        );
    }

    #[test]
    fn test_engine_extract_multiple_articles() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("ст. 5, 10 и 15 ГК РФ"),
            vec![
                reference(1, Some("5"), None, None),
                reference(1, Some("10"), None, None),
                reference(1, Some("15"), None, None),
            ]
        );
    }

    #[test]
    fn test_engine_extract_subpoints() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("пп. а и б п. 2 ст. 10 УК РФ"),
            vec![
                reference(2, Some("10"), Some("2"), Some("а")),
                reference(2, Some("10"), Some("2"), Some("б")),
            ]
        );
    }

    #[test]
    fn test_engine_extract_keeps_most_specific() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("Согласно ст. 10 ГК РФ, а также п. 1 ст. 10 ГК РФ"),
            vec![reference(1, Some("10"), Some("1"), None)]
        );
    }

    #[test]
    fn test_engine_extract_bare_law_mention() {
        let engine = create_test_engine();
        assert!(engine.extract("Нормы ГК РФ применяются").is_empty());
    }

    #[test]
    fn test_engine_extract_unknown_law() {
        let engine = create_test_engine();
        assert!(engine.extract("ст. 5 Кодекс Марса").is_empty());
    }

    #[test]
    fn test_engine_extract_empty_text() {
        let engine = create_test_engine();
        assert!(engine.extract("").is_empty());
        assert!(engine.extract("  \n\t ").is_empty());
    }

    #[test]
    fn test_engine_extract_inflected_law_name() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("в соответствии со статьей 169 Гражданского кодекса"),
            vec![reference(1, Some("169"), None, None)]
        );
    }

    #[test]
    fn test_engine_extract_subpoint_range() {
        let engine = create_test_engine();
        assert_eq!(
            engine.extract("подпункты 1-3 пункта 2 статьи 7 УК РФ"),
            vec![
                reference(2, Some("7"), Some("2"), Some("1")),
                reference(2, Some("7"), Some("2"), Some("2")),
                reference(2, Some("7"), Some("2"), Some("3")),
            ]
        );
    }

    #[test]
    fn test_engine_expands_wide_subpoint_range_by_default() {
        let engine = create_test_engine();
        let links = engine.extract("пп. 1-1001 п. 1 ст. 2 ГК РФ");

        assert_eq!(links.len(), 1001, "Should expand every value, got: {}", links.len());
        assert_eq!(links[0], reference(1, Some("2"), Some("1"), Some("1")));
        assert_eq!(links[1000], reference(1, Some("2"), Some("1"), Some("1001")));
    }

    #[test]
    fn test_engine_range_span_cap_boundary() {
        let options = EngineOptionsBuilder::default()
            .max_range_span(Some(DEFAULT_MAX_RANGE_SPAN))
            .build()
            .unwrap();
        let engine = LawReferenceEngine::with_options(
            &create_test_alias_table(),
            Arc::new(create_test_lemmatizer()),
            &options,
        )
        .unwrap();

        // span 999
        assert_eq!(engine.extract("пп. 1-1000 п. 1 ст. 2 ГК РФ").len(), 1000);
        // span 1000
        assert_eq!(
            engine.extract("пп. 1-1001 п. 1 ст. 2 ГК РФ"),
            vec![reference(1, Some("2"), Some("1"), Some("1-1001"))]
        );
    }

    #[test]
    fn test_engine_with_empty_alias_table() {
        let engine =
            LawReferenceEngine::new(&AliasTable::new(), Arc::new(LowercaseLemmatizer)).unwrap();
        assert!(engine.extract("ст. 10 ГК РФ").is_empty());
        assert!(engine.index().is_empty());
    }

    #[test]
    fn test_engine_strict_aliases_rejects_collision() {
        let table: AliasTable = [(1, vec!["Кодекс"]), (2, vec!["КОДЕКС"])].into_iter().collect();
        let options = EngineOptions {
            strict_aliases: true,
            ..EngineOptions::default()
        };

        let result = LawReferenceEngine::with_options(&table, Arc::new(LowercaseLemmatizer), &options);
        assert!(result.is_err());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = Arc::new(create_test_engine());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.extract("п. 1 ст. 10 ГК РФ"))
            })
            .collect();

        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                vec![reference(1, Some("10"), Some("1"), None)]
            );
        }
    }

    #[test]
    fn test_engine_extract_links_payload() {
        let engine = create_test_engine();
        let json = serde_json::to_value(engine.extract_links("ст. 10 УК РФ")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "links": [{
                    "law_id": 2,
                    "article": "10",
                    "point_article": null,
                    "subpoint_article": null
                }]
            })
        );
    }
}
