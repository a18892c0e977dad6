//! Dictionary-backed lemmatizer.
//!
//! A lemma dictionary is a flat mapping from inflected word form to normal
//! form, e.g. exported from OpenCorpora. The on-disk format is one pair per
//! line, tab separated:
//!
//! ```text
//! # form<TAB>lemma
//! кодекса	кодекс
//! гражданского	гражданский
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{info, warn};

use super::Lemmatizer;

/// In-memory form → lemma dictionary.
///
/// Lookups are case-insensitive. Words missing from the dictionary are their
/// own normal form (lowercased).
#[derive(Debug, Clone, Default)]
pub struct DictionaryLemmatizer {
    lemmas_by_form: HashMap<String, String>,
}

impl DictionaryLemmatizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `lemma` as the normal form of `form`.
    pub fn insert(&mut self, form: &str, lemma: &str) {
        self.lemmas_by_form
            .insert(form.to_lowercase(), lemma.to_lowercase());
    }

    /// Look up the normal form of a word, if the dictionary knows it.
    pub fn get(&self, word: &str) -> Option<&str> {
        self.lemmas_by_form
            .get(&word.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lemmas_by_form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas_by_form.is_empty()
    }

    /// Parse dictionary text in the tab-separated format.
    ///
    /// Blank lines and `#` comments are skipped. A line without a tab is
    /// malformed and skipped with a warning.
    pub fn from_tsv_str(content: &str) -> Self {
        let mut dictionary = Self::new();

        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.split_once('\t') {
                Some((form, lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    dictionary.insert(form.trim(), lemma.trim());
                }
                _ => warn!(
                    "Skipping malformed lemma dictionary line {}: {:?}",
                    line_number + 1,
                    line
                ),
            }
        }

        dictionary
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for DictionaryLemmatizer {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut dictionary = Self::new();
        for (form, lemma) in iter {
            dictionary.insert(form, lemma);
        }
        dictionary
    }
}

impl Lemmatizer for DictionaryLemmatizer {
    fn try_normal_form(&self, word: &str) -> Result<String> {
        let lower = word.to_lowercase();
        Ok(self
            .lemmas_by_form
            .get(&lower)
            .cloned()
            .unwrap_or(lower))
    }
}

/// Load a lemma dictionary from a tab-separated file.
pub fn load_lemma_dictionary(path: &Path) -> Result<DictionaryLemmatizer> {
    if !path.is_file() {
        return Err(anyhow!(
            "Lemma dictionary is not a file: {}",
            path.display()
        ));
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lemma dictionary: {}", path.display()))?;

    let dictionary = DictionaryLemmatizer::from_tsv_str(&content);
    info!(
        "Loaded {} lemma entries from {}",
        dictionary.len(),
        path.display()
    );

    Ok(dictionary)
}
