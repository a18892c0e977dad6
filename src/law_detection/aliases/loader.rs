//! Parse alias table JSON documents.
//!
//! The alias table is a JSON object keyed by stringified law id, each value
//! being the list of names that law is known by:
//!
//! ```json
//! {
//!   "1": ["Гражданский кодекс", "ГК РФ", "ГК"],
//!   "2": ["Уголовный кодекс", "УК РФ"]
//! }
//! ```
//!
//! Key order in the document is preserved and becomes the table order.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, warn};
use serde_json::Value;

use crate::law_detection::models::AliasTable;

/// Parse a law id key. Ids are positive integers.
fn parse_law_id(key: &str) -> Result<u32> {
    let law_id: u32 = key
        .trim()
        .parse()
        .with_context(|| format!("Law id is not a positive integer: {:?}", key))?;
    if law_id == 0 {
        return Err(anyhow!("Law id must be greater than zero: {:?}", key));
    }
    Ok(law_id)
}

fn parse_aliases(key: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("Aliases for law {} must be an array of strings", key))?;

    let mut aliases = Vec::with_capacity(items.len());
    for item in items {
        match item.as_str() {
            Some(name) if name.trim().is_empty() => {
                warn!("Law {} has an empty alias name", key);
                aliases.push(name.to_string());
            }
            Some(name) => aliases.push(name.to_string()),
            None => {
                return Err(anyhow!(
                    "Alias for law {} is not a string: {}",
                    key,
                    item
                ));
            }
        }
    }
    Ok(aliases)
}

impl AliasTable {
    /// Parse an alias table from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(content).context("Alias table is not valid JSON")?;

        let object = document
            .as_object()
            .ok_or_else(|| anyhow!("Alias table must be a JSON object keyed by law id"))?;

        let mut table = AliasTable::new();
        for (key, value) in object {
            let law_id = parse_law_id(key)?;
            let aliases = parse_aliases(key, value)?;
            table.insert(law_id, aliases);
        }

        Ok(table)
    }
}

/// Load an alias table from a JSON file.
pub fn load_alias_table(path: &Path) -> Result<AliasTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read alias table: {}", path.display()))?;

    let table = AliasTable::from_json_str(&content)
        .with_context(|| format!("Failed to parse alias table: {}", path.display()))?;

    debug!(
        "Loaded {} aliases for {} laws from {}",
        table.alias_count(),
        table.len(),
        path.display()
    );

    Ok(table)
}
