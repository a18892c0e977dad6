//! Core data structures for law reference extraction.

use serde::{Deserialize, Serialize};

/// A structured citation of a law: codex id plus article, point and sub-point.
///
/// At least one of `article`, `point_article`, `subpoint_article` is always
/// present on references produced by the engine; a bare law mention is not
/// actionable and never emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LawReference {
    /// Identifier of the law in the alias table (always > 0)
    pub law_id: u32,

    /// Article number, e.g. "15" or "15.1"
    pub article: Option<String>,

    /// Point within the article
    pub point_article: Option<String>,

    /// Sub-point within the point
    pub subpoint_article: Option<String>,
}

impl LawReference {
    pub fn new(
        law_id: u32,
        article: Option<String>,
        point_article: Option<String>,
        subpoint_article: Option<String>,
    ) -> Self {
        Self {
            law_id,
            article,
            point_article,
            subpoint_article,
        }
    }

    /// Identity key used for deduplication. `None` and `Some("")` are distinct.
    pub fn key(&self) -> (u32, Option<&str>, Option<&str>, Option<&str>) {
        (
            self.law_id,
            self.article.as_deref(),
            self.point_article.as_deref(),
            self.subpoint_article.as_deref(),
        )
    }

    /// Specificity rank: (has sub-point, has point, has article).
    ///
    /// Compared lexicographically, so any sub-point citation outranks any
    /// point-only citation, which outranks a bare article.
    pub fn specificity(&self) -> (bool, bool, bool) {
        (
            self.subpoint_article.is_some(),
            self.point_article.is_some(),
            self.article.is_some(),
        )
    }

    /// True when the reference carries any citation component.
    pub fn is_actionable(&self) -> bool {
        self.article.is_some() || self.point_article.is_some() || self.subpoint_article.is_some()
    }
}

/// Law id to alias names, in the order the table was supplied.
///
/// Order is significant: it drives the alternation order of the alias
/// pattern and resolves alias collisions (the later law id wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(u32, Vec<String>)>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append aliases for `law_id`. Repeated ids extend the existing entry.
    pub fn insert<I, S>(&mut self, law_id: u32, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aliases = aliases.into_iter().map(Into::into);
        if let Some((_, existing)) = self.entries.iter_mut().find(|(id, _)| *id == law_id) {
            existing.extend(aliases);
        } else {
            self.entries.push((law_id, aliases.collect()));
        }
    }

    /// Iterate `(law_id, alias)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.entries
            .iter()
            .flat_map(|(id, names)| names.iter().map(move |name| (*id, name.as_str())))
    }

    /// Number of laws in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of alias names over all laws.
    pub fn alias_count(&self) -> usize {
        self.entries.iter().map(|(_, names)| names.len()).sum()
    }
}

impl<S: Into<String>> FromIterator<(u32, Vec<S>)> for AliasTable {
    fn from_iter<T: IntoIterator<Item = (u32, Vec<S>)>>(iter: T) -> Self {
        let mut table = AliasTable::new();
        for (law_id, aliases) in iter {
            table.insert(law_id, aliases);
        }
        table
    }
}

/// Payload returned for a single document, mirroring the detection service response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinksResponse {
    pub links: Vec<LawReference>,
}
