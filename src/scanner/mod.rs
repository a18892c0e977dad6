mod count;
mod process;

use crate::models::FileLinks;

pub struct ProcessResult {
    pub files: Vec<FileLinks>,
    pub excluded_count: usize,
}

impl ProcessResult {
    pub fn links_count(&self) -> usize {
        self.files.iter().map(FileLinks::links_count).sum()
    }
}

pub use self::count::count;
pub use self::process::{process, process_file};
