use anyhow::{Context, Result};
use regex::Regex;

/// Punctuation kept by default when cleaning text
pub const DEFAULT_KEEP_PUNCTUATION: &str = ".,;?!";

/// Build the pattern matching every character to drop:
/// anything that is not an ASCII letter or digit, whitespace, or one of `keep_punctuation`
fn removal_pattern(keep_punctuation: &str) -> Result<Regex> {
    let kept: String = keep_punctuation
        .chars()
        .map(|c| regex::escape(&c.to_string()))
        .collect();
    let pattern = format!(r"[^a-zA-Z0-9\s{}]", kept);
    Regex::new(&pattern).with_context(|| format!("Invalid text cleaning pattern: {}", pattern))
}

/// Remove non-alphanumeric characters from `text`, keeping whitespace and `keep_punctuation`
pub fn clean_str(text: &str, keep_punctuation: &str) -> Result<String> {
    let pattern = removal_pattern(keep_punctuation)?;
    Ok(pattern.replace_all(text, "").into_owned())
}

/// Clean every element of `texts` with the same pattern, preserving order
pub fn clean_text<S: AsRef<str>>(texts: &[S], keep_punctuation: &str) -> Result<Vec<String>> {
    let pattern = removal_pattern(keep_punctuation)?;
    Ok(texts
        .iter()
        .map(|text| pattern.replace_all(text.as_ref(), "").into_owned())
        .collect())
}
