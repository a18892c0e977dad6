//! Citation regex patterns.
//!
//! Three ordered patterns, each anchored on the alias alternation of the
//! [`AliasIndex`](super::index::AliasIndex). They run independently over the
//! same normalized text, so one citation is usually matched by more than one
//! pattern; redundancy is resolved after reference construction, not here.
//!
//! Text reaching these patterns is already folded and lemmatized, so only
//! the short forms `пп.`, `п.`, `ст.` need to be recognized.

use anyhow::{Context, Result};
use log::warn;
use regex::{Captures, Regex, RegexBuilder};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Article number: digits, optionally chained with `.`, `-` or an en-dash
/// ("15", "15.1", "10-2").
const ARTICLE_NUMBER: &str = r"\d+(?:[.\-–]\d+)*";

/// One or more point / sub-point values separated by `и` or commas
/// ("а", "а и б", "1, 2").
const COMPONENT_LIST: &str = r"[^,\s]+(?:\s*[и,]\s*[^,\s]+)*";

/// End of a law name: a non-word character (consumed) or end of text.
///
/// Every alias ends in a word character, so this accepts exactly the
/// positions a trailing `\b` would. Unlike a Unicode `\b` it keeps the
/// patterns within reach of the DFA engines on Cyrillic text. The consumed
/// character can never start another citation.
const LAW_NAME_END: &str = r"(?:\W|$)";

/// Identity of the pattern that produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PatternKind {
    /// `[пп. X] [п. Y] [ст. Z] <law>`, every component optional
    General,
    /// `ст. 5, 10-12 и 15 <law>`
    MultiArticle,
    /// `ст. Z <law>`
    SimpleArticle,
}

impl PatternKind {
    fn build_pattern(self, laws: &str) -> String {
        match self {
            PatternKind::General => format!(
                r"(?:пп\.\s*(?P<subpoints>{list}))?\s*(?:п\.\s*(?P<points>{list}))?\s*(?:ст\.\s*(?P<article>{article}))?\s*(?P<law>{laws}){end}",
                list = COMPONENT_LIST,
                article = ARTICLE_NUMBER,
                laws = laws,
                end = LAW_NAME_END,
            ),
            // lazy bounded class instead of nested optional groups
            PatternKind::MultiArticle => format!(
                r"ст\.\s*(?P<article>[\d\s,.\-–и]+?)\s+(?P<law>{laws}){end}",
                laws = laws,
                end = LAW_NAME_END,
            ),
            PatternKind::SimpleArticle => format!(
                r"ст\.\s*(?P<article>{article})\s*(?P<law>{laws}){end}",
                article = ARTICLE_NUMBER,
                laws = laws,
                end = LAW_NAME_END,
            ),
        }
    }
}

/// Raw captures of one citation match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCitation<'t> {
    pub kind: PatternKind,
    pub subpoints: Option<&'t str>,
    pub points: Option<&'t str>,
    pub article: Option<&'t str>,
    pub law_name: Option<&'t str>,
}

impl<'t> RawCitation<'t> {
    fn from_captures(kind: PatternKind, caps: &Captures<'t>) -> Self {
        let group = |name: &str| caps.name(name).map(|m| m.as_str());
        Self {
            kind,
            subpoints: group("subpoints"),
            points: group("points"),
            article: group("article"),
            law_name: group("law"),
        }
    }
}

/// The compiled citation patterns, in application order.
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    patterns: Vec<(PatternKind, Regex)>,
}

impl CompiledPatterns {
    /// Compile all patterns against an alias alternation.
    ///
    /// An empty alternation yields no patterns at all: nothing can be cited
    /// without a known law name.
    pub fn new(alternation: &str, size_limit: usize) -> Result<Self> {
        if alternation.is_empty() {
            warn!("Alias index is empty, no citation can be recognized");
            return Ok(Self {
                patterns: Vec::new(),
            });
        }

        let patterns = PatternKind::iter()
            .map(|kind| {
                let regex = RegexBuilder::new(&kind.build_pattern(alternation))
                    .case_insensitive(true)
                    .size_limit(size_limit)
                    .dfa_size_limit(size_limit)
                    .build()
                    .with_context(|| format!("Failed to compile {} citation pattern", kind))?;
                Ok((kind, regex))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// All matches of all patterns: pattern 1 first, then 2, then 3; each
    /// pattern left to right, non-overlapping.
    pub fn find_citations<'t>(&self, text: &'t str) -> Vec<RawCitation<'t>> {
        self.patterns
            .iter()
            .flat_map(|(kind, regex)| {
                regex
                    .captures_iter(text)
                    .map(move |caps| RawCitation::from_captures(*kind, &caps))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
