//! Alias index construction and lookup.

pub mod builder;

use std::collections::HashMap;

pub use builder::build_index;

/// Two different laws whose aliases normalize to the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasCollision {
    /// The shared normalized name
    pub name: String,
    /// Law that previously owned the name
    pub previous_law_id: u32,
    /// Law that owns the name after the collision
    pub law_id: u32,
}

/// Normalized alias index built once from an alias table.
///
/// Holds the lookup used to resolve a matched law name to its id, and the
/// alternation expression that anchors every citation pattern on a known
/// law name.
///
/// # Index Structures
///
/// - **Name lookup**: `law_id_by_name` maps normalized alias → law id
/// - **Alternation**: `alternation` joins the regex-escaped normalized
///   aliases with `|`, in alias table order
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    /// Normalized alias name to law id. Collisions resolve last-write-wins.
    pub law_id_by_name: HashMap<String, u32>,

    /// Regex alternation over all non-empty normalized aliases, without
    /// surrounding group.
    pub alternation: String,

    /// Number of distinct names in the alternation.
    pub alternation_len: usize,

    /// Collisions observed while building, in table order.
    pub collisions: Vec<AliasCollision>,
}

impl AliasIndex {
    /// Resolve a matched law name (already lemmatized) to its law id.
    ///
    /// The name is lowercased and trimmed before lookup.
    pub fn resolve(&self, law_name: &str) -> Option<u32> {
        let normalized = law_name.trim().to_lowercase();
        self.law_id_by_name.get(&normalized).copied()
    }

    /// Number of normalized names in the lookup.
    pub fn len(&self) -> usize {
        self.law_id_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.law_id_by_name.is_empty()
    }
}
