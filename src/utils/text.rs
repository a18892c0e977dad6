//! Input text preparation shared by every entry point.

use anyhow::{Result, bail};
use unicode_normalization::UnicodeNormalization;

/// Default upper bound on input length, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 50_000;

/// Clean raw input before extraction.
///
/// - Compose to NFC so decomposed "й"/"ё" match lemma dictionaries
/// - Drop C0/C1 control characters
/// - Drop double quotes and guillemets, which split law names ("«ГК РФ»")
pub fn sanitize_text(text: &str) -> String {
    text.nfc()
        .filter(|c| !c.is_control())
        .filter(|c| !matches!(c, '"' | '«' | '»'))
        .collect()
}

/// Reject inputs longer than `max_chars` characters.
pub fn check_input_length(text: &str, max_chars: usize) -> Result<()> {
    let length = text.chars().count();
    if length > max_chars {
        bail!("Text too long: {} characters (limit {})", length, max_chars);
    }
    Ok(())
}
