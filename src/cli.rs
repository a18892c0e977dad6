use clap::Parser;

use crate::utils::text::DEFAULT_MAX_INPUT_CHARS;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or directory to scan. Reads a single text from stdin when omitted
    pub input_path: Option<String>,

    /// Law alias table (JSON object of law id to alias names)
    #[arg(short, long)]
    pub aliases: String,

    /// Lemma dictionary (tab-separated word form and lemma per line)
    #[arg(short, long)]
    pub lemmas: Option<String>,

    /// Output file path (directory scans only)
    #[arg(default_value = "output.json", short)]
    pub output_file: String,

    /// Maximum recursion depth (0 means no recursion)
    #[arg(short, long, default_value = "50")]
    pub max_depth: usize,

    /// Exclude patterns (glob patterns like "*.pdf" or "archive")
    #[arg(short, long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Maximum input length in characters, per text
    #[arg(long, default_value_t = DEFAULT_MAX_INPUT_CHARS)]
    pub max_chars: usize,

    /// Keep numeric sub-point ranges spanning this many values or more as
    /// written instead of expanding them
    #[arg(long)]
    pub max_range_span: Option<u64>,

    /// Fail when aliases of two different laws normalize to the same name
    #[arg(long)]
    pub strict_aliases: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["lawlinks", "--aliases", "laws.json"]).unwrap();
        assert_eq!(cli.aliases, "laws.json");
        assert!(cli.input_path.is_none());
        assert_eq!(cli.output_file, "output.json");
        assert_eq!(cli.max_depth, 50);
        assert_eq!(cli.max_chars, DEFAULT_MAX_INPUT_CHARS);
        assert!(!cli.strict_aliases);
        assert!(cli.max_range_span.is_none());
    }

    #[test]
    fn test_cli_exclude_is_comma_delimited() {
        let cli = Cli::try_parse_from([
            "lawlinks",
            "-a",
            "laws.json",
            "docs",
            "-e",
            "*.pdf,archive",
        ])
        .unwrap();
        assert_eq!(cli.input_path.as_deref(), Some("docs"));
        assert_eq!(cli.exclude, vec!["*.pdf", "archive"]);
    }

    #[test]
    fn test_cli_requires_aliases() {
        assert!(Cli::try_parse_from(["lawlinks", "docs"]).is_err());
    }
}
