pub mod cli;
pub mod law_detection;
pub mod lemmatizer;
pub mod models;
pub mod scanner;
pub mod utils;

#[cfg(test)]
mod test_utils;

pub use law_detection::{
    AliasTable, EngineOptions, EngineOptionsBuilder, LawReference, LawReferenceEngine,
    LinksResponse,
};
pub use lemmatizer::{DictionaryLemmatizer, Lemmatizer, LowercaseLemmatizer};
pub use models::{ExtraData, FileLinks, Header, Output, SystemEnvironment};
pub use scanner::{ProcessResult, count, process};
