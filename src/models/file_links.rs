use serde::Serialize;

use crate::law_detection::LawReference;

/// Extraction result for a single scanned file.
#[derive(Debug, Serialize)]
pub struct FileLinks {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub date: Option<String>,
    pub links: Vec<LawReference>,
    pub scan_errors: Vec<String>,
}

impl FileLinks {
    pub fn links_count(&self) -> usize {
        self.links.len()
    }
}
