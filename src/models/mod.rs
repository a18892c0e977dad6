mod file_links;
mod output;

pub use file_links::FileLinks;
pub use output::{ExtraData, Header, LAWLINKS_OUTPUT_FORMAT_VERSION, Output, SystemEnvironment};
