/// Line-oriented `key = value` parsing for `plfit` output.
use std::collections::HashMap;

/// Parse `key = value` lines into a map.
///
/// Each line is split at its first `=` and both sides are trimmed. Lines
/// without `=` are skipped. A repeated key keeps its last value.
#[must_use]
pub fn parse_key_value(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_owned(), value.trim().to_owned()))
        .collect()
}
