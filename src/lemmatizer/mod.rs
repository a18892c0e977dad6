//! Word lemmatization.
//!
//! The extraction engine only needs one capability from a morphological
//! analyzer: turning a single word into its dictionary (normal) form. That
//! capability is modelled by the [`Lemmatizer`] trait. Implementations provide
//! a fallible primitive, [`Lemmatizer::try_normal_form`]; the engine only ever
//! calls the total wrapper [`Lemmatizer::normal_form`], which maps every fault,
//! panics included, to "return the word unchanged".

mod dictionary;

use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};

use anyhow::Result;
use log::{debug, warn};

pub use dictionary::{DictionaryLemmatizer, load_lemma_dictionary};

/// Maps a word to its normal form.
///
/// Implementations must be shareable across threads: a single engine instance
/// serves concurrent extraction calls.
pub trait Lemmatizer: Send + Sync + Debug {
    /// Normal form of `word`, or an error if the analyzer failed.
    fn try_normal_form(&self, word: &str) -> Result<String>;

    /// Normal form of `word`. Never fails: on any error the original word is
    /// returned unchanged.
    fn normal_form(&self, word: &str) -> String {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_normal_form(word))) {
            Ok(Ok(lemma)) => lemma,
            Ok(Err(e)) => {
                debug!("Lemmatization failed for {:?}: {}", word, e);
                word.to_string()
            }
            Err(_) => {
                warn!("Lemmatizer panicked on {:?}, keeping the word as is", word);
                word.to_string()
            }
        }
    }
}

/// Lemmatizer that only lowercases.
///
/// Used when no lemma dictionary is configured; alias names and text are then
/// matched on their lowercase surface forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseLemmatizer;

impl Lemmatizer for LowercaseLemmatizer {
    fn try_normal_form(&self, word: &str) -> Result<String> {
        Ok(word.to_lowercase())
    }
}
