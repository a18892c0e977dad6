#[cfg(test)]
use crate::law_detection::{AliasTable, LawReference, LawReferenceEngine};
#[cfg(test)]
use crate::lemmatizer::DictionaryLemmatizer;
#[cfg(test)]
use std::sync::Arc;

/// Alias table used across engine tests: 1 is the civil code, 2 the criminal code.
#[cfg(test)]
pub fn create_test_alias_table() -> AliasTable {
    AliasTable::from_json_str(
        r#"{
            "1": ["Гражданский кодекс", "Гражданский кодекс Российской Федерации", "ГК РФ", "ГК"],
            "2": ["Уголовный кодекс", "УК РФ"]
        }"#,
    )
    .expect("Test alias table should parse")
}

/// A small lemma dictionary covering the inflected law names used in tests.
#[cfg(test)]
pub fn create_test_lemmatizer() -> DictionaryLemmatizer {
    [
        ("гражданского", "гражданский"),
        ("гражданским", "гражданский"),
        ("кодекса", "кодекс"),
        ("кодексом", "кодекс"),
        ("кодексе", "кодекс"),
        ("уголовного", "уголовный"),
        ("уголовным", "уголовный"),
        ("российской", "российский"),
        ("федерации", "федерация"),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
pub fn create_test_engine() -> LawReferenceEngine {
    LawReferenceEngine::new(
        &create_test_alias_table(),
        Arc::new(create_test_lemmatizer()),
    )
    .expect("Test engine should build")
}

#[cfg(test)]
pub fn reference(
    law_id: u32,
    article: Option<&str>,
    point: Option<&str>,
    subpoint: Option<&str>,
) -> LawReference {
    LawReference::new(
        law_id,
        article.map(String::from),
        point.map(String::from),
        subpoint.map(String::from),
    )
}
