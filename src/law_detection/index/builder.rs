//! Alias index builder.
//!
//! This module implements the `build_index()` function that normalizes every
//! alias of the alias table and constructs the lookup and alternation used by
//! the citation patterns.

use std::collections::HashSet;
use std::collections::hash_map::Entry;

use anyhow::{Result, bail};
use log::{debug, warn};

use crate::law_detection::index::{AliasCollision, AliasIndex};
use crate::law_detection::models::AliasTable;
use crate::law_detection::normalize::normalize_law_name;
use crate::lemmatizer::Lemmatizer;

/// Build the alias index.
///
/// Every alias is normalized with [`normalize_law_name`]. When two different
/// laws share a normalized alias the later one in table order wins and the
/// collision is logged; with `strict_aliases` the collision is an error
/// instead.
///
/// Empty normalized names are kept in the lookup but never enter the
/// alternation: an empty alternative would anchor a citation on nothing.
pub fn build_index(
    table: &AliasTable,
    lemmatizer: &dyn Lemmatizer,
    strict_aliases: bool,
) -> Result<AliasIndex> {
    let mut index = AliasIndex::default();
    let mut alternatives: Vec<String> = Vec::with_capacity(table.alias_count());
    let mut seen_alternatives: HashSet<String> = HashSet::new();

    for (law_id, alias) in table.iter() {
        if law_id == 0 {
            warn!("Skipping alias {:?}: law id 0 is not a valid law", alias);
            continue;
        }

        let normalized = normalize_law_name(alias, lemmatizer);

        match index.law_id_by_name.entry(normalized.clone()) {
            Entry::Occupied(mut entry) => {
                let previous_law_id = *entry.get();
                if previous_law_id != law_id {
                    if strict_aliases {
                        bail!(
                            "Alias {:?} of law {} normalizes to {:?}, already used by law {}",
                            alias,
                            law_id,
                            normalized,
                            previous_law_id
                        );
                    }
                    warn!(
                        "Alias {:?} normalizes to {:?} for both law {} and law {}; law {} wins",
                        alias, normalized, previous_law_id, law_id, law_id
                    );
                    index.collisions.push(AliasCollision {
                        name: normalized.clone(),
                        previous_law_id,
                        law_id,
                    });
                    entry.insert(law_id);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(law_id);
            }
        }

        if normalized.is_empty() {
            debug!("Alias {:?} of law {} normalizes to an empty name", alias, law_id);
            continue;
        }

        if seen_alternatives.insert(normalized.clone()) {
            alternatives.push(regex::escape(&normalized));
        }
    }

    index.alternation_len = alternatives.len();
    index.alternation = alternatives.join("|");

    debug!(
        "Built alias index: {} names, {} alternatives, {} collisions",
        index.law_id_by_name.len(),
        index.alternation_len,
        index.collisions.len()
    );

    Ok(index)
}
